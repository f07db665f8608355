use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, ProgressEvent, XmlHttpRequest};

use crate::types::PredictionResponse;

pub const PREDICT_ENDPOINT: &str = "/api/predict";

/// How an upload can fail, one variant per user-visible outcome.
#[derive(Clone, Debug, PartialEq)]
pub enum PredictError {
    /// The request never completed, or could not be constructed/sent.
    Network(String),
    /// The server answered outside the 2xx range.
    Http(u16),
    /// A 2xx body that did not parse as a prediction response.
    MalformedResponse(String),
}

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(detail) => write!(f, "network failure: {detail}"),
            Self::Http(status) => write!(f, "server returned HTTP {status}"),
            Self::MalformedResponse(detail) => write!(f, "unreadable response: {detail}"),
        }
    }
}

/// Upload percentage for a progress event, when the total is known.
pub fn progress_percent(loaded: f64, total: f64) -> Option<f64> {
    if total > 0.0 {
        Some(loaded / total * 100.0)
    } else {
        None
    }
}

fn js_err(context: &str) -> impl Fn(JsValue) -> PredictError + '_ {
    move |e| PredictError::Network(format!("{context}: {e:?}"))
}

fn build_form(bytes: &[u8], filename: &str, mime_type: &str) -> Result<FormData, PredictError> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array);

    let options = BlobPropertyBag::new();
    if !mime_type.is_empty() {
        options.set_type(mime_type);
    }
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(js_err("Blob"))?;

    let form = FormData::new().map_err(js_err("FormData"))?;
    form.append_with_blob_and_filename("file", &blob, filename)
        .map_err(js_err("FormData append"))?;
    Ok(form)
}

/// POST the audio to the prediction endpoint as multipart form data.
///
/// `on_progress` fires with a 0–100 percentage on every upload progress
/// event whose total is known; it may fire any number of times, always
/// before this future resolves. XMLHttpRequest is used rather than fetch
/// because only it reports upload progress.
pub async fn post_prediction(
    bytes: &[u8],
    filename: &str,
    mime_type: &str,
    on_progress: impl Fn(f64) + 'static,
) -> Result<PredictionResponse, PredictError> {
    let xhr = XmlHttpRequest::new().map_err(js_err("XMLHttpRequest"))?;
    xhr.open_with_async("POST", PREDICT_ENDPOINT, true)
        .map_err(js_err("open"))?;

    let progress_cb =
        Closure::<dyn FnMut(ProgressEvent)>::new(move |ev: ProgressEvent| {
            if !ev.length_computable() {
                return;
            }
            if let Some(pct) = progress_percent(ev.loaded(), ev.total()) {
                on_progress(pct);
            }
        });
    let upload = xhr.upload().map_err(js_err("upload"))?;
    upload.set_onprogress(Some(progress_cb.as_ref().unchecked_ref()));
    // Must stay alive for the whole request.
    progress_cb.forget();

    let xhr_cb = xhr.clone();
    let done = js_sys::Promise::new(&mut |resolve, reject| {
        let resolve = resolve.clone();
        let reject = reject.clone();

        let onload = Closure::once(move |_: web_sys::Event| {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let onerror = Closure::once(move |_: web_sys::Event| {
            let _ = reject.call0(&JsValue::NULL);
        });

        xhr_cb.set_onload(Some(onload.as_ref().unchecked_ref()));
        xhr_cb.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        onload.forget();
        onerror.forget();
    });

    let form = build_form(bytes, filename, mime_type)?;
    xhr.send_with_opt_form_data(Some(&form))
        .map_err(js_err("send"))?;

    JsFuture::from(done)
        .await
        .map_err(|_| PredictError::Network("request did not complete".to_string()))?;

    let status = xhr.status().map_err(js_err("status"))?;
    if !(200..=299).contains(&status) {
        return Err(PredictError::Http(status));
    }

    let body = xhr
        .response_text()
        .map_err(js_err("response text"))?
        .unwrap_or_default();
    serde_json::from_str(&body).map_err(|e| PredictError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(50.0, 200.0), Some(25.0));
        assert_eq!(progress_percent(0.0, 200.0), Some(0.0));
        assert_eq!(progress_percent(200.0, 200.0), Some(100.0));
    }

    #[test]
    fn test_progress_percent_unknown_total() {
        assert_eq!(progress_percent(50.0, 0.0), None);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            PredictError::Http(500).to_string(),
            "server returned HTTP 500"
        );
        assert!(PredictError::Network("reset".into())
            .to_string()
            .contains("reset"));
    }
}
