use std::sync::Arc;

use serde::Deserialize;

/// Decoded PCM audio, as produced by the browser's audio decoder.
/// Only channel 0 is kept; the preview has no use for the others.
#[derive(Clone, Debug)]
pub struct AudioData {
    pub samples: Arc<Vec<f32>>,
    pub sample_rate: u32,
    pub channels: u32,
    pub duration_secs: f64,
}

/// The file the user picked, held until it is uploaded.
#[derive(Clone, Debug)]
pub struct SelectedAudio {
    pub name: String,
    pub mime_type: String,
    pub bytes: Arc<Vec<u8>>,
}

impl SelectedAudio {
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// One species guess from the prediction service.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Prediction {
    pub species: String,
    pub confidence: f64,
}

impl Prediction {
    /// Confidence as the user sees it: one decimal place, e.g. "87.3%".
    pub fn confidence_label(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}

/// Body of a 2xx reply from the prediction endpoint.
///
/// When `error` is set the other fields carry no meaning and must be
/// ignored by the renderer.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    #[serde(default)]
    pub spectrogram_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_label_one_decimal() {
        let p = Prediction {
            species: "Robin".into(),
            confidence: 0.873,
        };
        assert_eq!(p.confidence_label(), "87.3%");
    }

    #[test]
    fn test_confidence_label_pads_whole_numbers() {
        let p = Prediction {
            species: "Robin".into(),
            confidence: 0.92,
        };
        assert_eq!(p.confidence_label(), "92.0%");

        let zero = Prediction {
            species: "Wren".into(),
            confidence: 0.0,
        };
        assert_eq!(zero.confidence_label(), "0.0%");

        let one = Prediction {
            species: "Wren".into(),
            confidence: 1.0,
        };
        assert_eq!(one.confidence_label(), "100.0%");
    }

    #[test]
    fn test_parse_success_response() {
        let body = r#"{
            "predictions": [
                {"species": "Robin", "confidence": 0.92},
                {"species": "Song Sparrow", "confidence": 0.05}
            ],
            "spectrogram_url": "/static/spectrograms/x.png"
        }"#;
        let resp: PredictionResponse = serde_json::from_str(body).unwrap();
        assert!(resp.error.is_none());
        assert_eq!(resp.predictions.len(), 2);
        assert_eq!(resp.predictions[0].species, "Robin");
        assert_eq!(
            resp.spectrogram_url.as_deref(),
            Some("/static/spectrograms/x.png")
        );
    }

    #[test]
    fn test_parse_error_response() {
        let body = r#"{"error": "no bird detected"}"#;
        let resp: PredictionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.error.as_deref(), Some("no bird detected"));
        assert!(resp.predictions.is_empty());
        assert!(resp.spectrogram_url.is_none());
    }

    #[test]
    fn test_parse_response_without_spectrogram() {
        let body = r#"{"predictions": [{"species": "Wren", "confidence": 0.5}]}"#;
        let resp: PredictionResponse = serde_json::from_str(body).unwrap();
        assert!(resp.spectrogram_url.is_none());
        assert_eq!(resp.predictions.len(), 1);
    }

    #[test]
    fn test_garbage_body_is_an_error() {
        assert!(serde_json::from_str::<PredictionResponse>("<html>").is_err());
    }
}
