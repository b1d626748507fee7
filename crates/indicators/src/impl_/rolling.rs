//! Trailing-window mean shared by the rolling indicators

/// Mean of the trailing `window` samples at every index.
///
/// Indices before the first full window are NaN. A non-finite sample turns
/// every mean whose window contains it into NaN; once it has left the
/// window the mean is defined again, so one bad bar cannot spoil the rest
/// of the series.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn trailing_mean(samples: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; samples.len()];
    if window == 0 || samples.len() < window {
        return out;
    }

    let n = window as f64;
    let mut sum = 0.0;
    let mut bad = 0usize;

    for (i, &x) in samples.iter().enumerate() {
        if x.is_finite() {
            sum += x;
        } else {
            bad += 1;
        }

        if i >= window {
            let old = samples[i - window];
            if old.is_finite() {
                sum -= old;
            } else {
                bad -= 1;
            }
        }

        if i + 1 >= window && bad == 0 {
            out[i] = sum / n;
        }
    }

    out
}
