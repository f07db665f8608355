/// Min/max amplitude of one pixel column's worth of samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvelopeColumn {
    pub min: f32,
    pub max: f32,
}

/// Reduce a sample buffer to one min/max pair per pixel column.
///
/// Columns partition the buffer with `step = ceil(len / width)` samples
/// each; the last columns come back `None` when the buffer runs out before
/// the canvas does. Every sample lands in exactly one column.
pub fn min_max_envelope(samples: &[f32], width: usize) -> Vec<Option<EnvelopeColumn>> {
    if width == 0 {
        return Vec::new();
    }
    if samples.is_empty() {
        return vec![None; width];
    }

    let step = samples.len().div_ceil(width);
    (0..width)
        .map(|i| {
            let start = i * step;
            let end = ((i + 1) * step).min(samples.len());
            if start >= end {
                return None;
            }
            let mut min = f32::MAX;
            let mut max = f32::MIN;
            for &s in &samples[start..end] {
                if s < min {
                    min = s;
                }
                if s > max {
                    max = s;
                }
            }
            Some(EnvelopeColumn { min, max })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_sample_covered_exactly_once() {
        // Deliberately not a multiple of the width.
        let samples: Vec<f32> = (0..1_037).map(|i| (i as f32 * 0.01).sin()).collect();
        let width = 100;
        let env = min_max_envelope(&samples, width);
        assert_eq!(env.len(), width);

        let step = samples.len().div_ceil(width);
        let mut covered = 0usize;
        for (i, col) in env.iter().enumerate() {
            let start = i * step;
            let end = ((i + 1) * step).min(samples.len());
            if start >= end {
                assert!(col.is_none(), "column {i} has no samples but an envelope");
            } else {
                assert!(col.is_some(), "column {i} has samples but no envelope");
                covered += end - start;
            }
        }
        assert_eq!(covered, samples.len());
    }

    #[test]
    fn test_column_minmax_matches_slice() {
        let samples = vec![0.0f32, 0.5, -0.5, 1.0, -1.0, 0.25, -0.25, 0.75];
        let env = min_max_envelope(&samples, 4);
        // step = 2: pairs (0.0, 0.5), (-0.5, 1.0), (-1.0, 0.25), (-0.25, 0.75)
        assert_eq!(env[0], Some(EnvelopeColumn { min: 0.0, max: 0.5 }));
        assert_eq!(env[1], Some(EnvelopeColumn { min: -0.5, max: 1.0 }));
        assert_eq!(env[2], Some(EnvelopeColumn { min: -1.0, max: 0.25 }));
        assert_eq!(env[3], Some(EnvelopeColumn { min: -0.25, max: 0.75 }));
    }

    #[test]
    fn test_fewer_samples_than_columns() {
        // step = 1, so columns past the data must be empty, never read
        // past the end of the buffer.
        let samples = vec![0.1f32, -0.2, 0.3];
        let env = min_max_envelope(&samples, 8);
        assert_eq!(env.len(), 8);
        for (i, col) in env.iter().enumerate() {
            if i < samples.len() {
                let c = col.expect("column with a sample should have an envelope");
                assert_eq!(c.min, samples[i]);
                assert_eq!(c.max, samples[i]);
            } else {
                assert!(col.is_none());
            }
        }
    }

    #[test]
    fn test_empty_input() {
        let env = min_max_envelope(&[], 10);
        assert_eq!(env.len(), 10);
        assert!(env.iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_zero_width() {
        assert!(min_max_envelope(&[0.5], 0).is_empty());
    }

    #[test]
    fn test_single_column_spans_everything() {
        let samples = vec![0.4f32, -0.9, 0.7, 0.1];
        let env = min_max_envelope(&samples, 1);
        assert_eq!(env.len(), 1);
        assert_eq!(env[0], Some(EnvelopeColumn { min: -0.9, max: 0.7 }));
    }
}
