//! Average True Range (ATR) indicator with Wilder smoothing

use crate::traits::Indicator;
use levelscan_types::Bar;

/// Average True Range (Wilder)
///
/// The first value is the plain mean of the first `period` true ranges,
/// placed at index `period - 1`; afterwards
/// `ATR = (prev_ATR * (n-1) + TR) / n`.
/// The first bar has no previous close, so its TR is `high - low`.
///
/// A bar with a non-finite high or low gets NaN and is left out of the
/// smoothing; the next bar measures its gap from the last finite close.
#[derive(Debug, Clone)]
pub struct ATR {
    /// Number of periods for ATR calculation
    pub period: usize,
}

impl ATR {
    /// Creates a new ATR indicator with the given period.
    #[must_use]
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// TR = max(High - Low, |High - Prev_Close|, |Low - Prev_Close|)
    #[inline]
    fn true_range(bar: &Bar, prev_close: f64) -> f64 {
        let hl = bar.high - bar.low;
        let hc = (bar.high - prev_close).abs();
        let lc = (bar.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

impl Indicator for ATR {
    #[allow(clippy::cast_precision_loss)]
    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let len = bars.len();
        let mut result = vec![f64::NAN; len];

        if self.period == 0 || len < self.period {
            return result;
        }

        let n = self.period as f64;
        let mut prev_close: Option<f64> = None;
        let mut seed_sum = 0.0;
        let mut seeded = 0usize;
        let mut atr: Option<f64> = None;

        for (i, bar) in bars.iter().enumerate() {
            let tr = match prev_close {
                Some(pc) => Self::true_range(bar, pc),
                None => bar.high - bar.low,
            };
            if bar.close.is_finite() {
                prev_close = Some(bar.close);
            }
            // a bar without a usable range leaves the average untouched
            if !tr.is_finite() {
                continue;
            }

            atr = match atr {
                Some(prev) => Some((prev * (n - 1.0) + tr) / n),
                None => {
                    seed_sum += tr;
                    seeded += 1;
                    (seeded == self.period).then(|| seed_sum / n)
                }
            };
            if let Some(value) = atr {
                result[i] = value;
            }
        }

        result
    }

    fn name(&self) -> &str {
        "ATR"
    }

    fn warmup_periods(&self) -> usize {
        self.period
    }
}
