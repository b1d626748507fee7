//! Relative Strength Index (RSI) with Wilder smoothing

use crate::traits::Indicator;
use levelscan_types::Bar;

/// Relative Strength Index
///
/// Gains and losses are close-to-close differences (zero for the first bar).
/// Both averages start at the first bar and follow
/// `avg = avg * (n-1)/n + x/n`; the first `period - 1` values are NaN.
///
/// `RSI = 100 - 100 / (1 + avg_gain / avg_loss)`, `100` when only the
/// average loss is zero and `50` when both averages are zero.
///
/// A bar with a non-finite close is NaN and skipped; the next difference
/// is taken from the last finite close.
#[derive(Debug, Clone)]
pub struct RSI {
    /// Smoothing window
    pub period: usize,
}

impl RSI {
    /// Creates a new RSI indicator with the given period.
    #[must_use]
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            if avg_gain == 0.0 { 50.0 } else { 100.0 }
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        }
    }
}

impl Indicator for RSI {
    #[allow(clippy::cast_precision_loss)]
    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let len = bars.len();
        let mut result = vec![f64::NAN; len];

        if self.period == 0 || len < self.period {
            return result;
        }

        let alpha = 1.0 / self.period as f64;
        let mut avg_gain = 0.0;
        let mut avg_loss = 0.0;
        let mut prev_close: Option<f64> = None;

        for (i, bar) in bars.iter().enumerate() {
            if !bar.close.is_finite() {
                continue;
            }
            if let Some(prev) = prev_close {
                let diff = bar.close - prev;
                avg_gain = avg_gain * (1.0 - alpha) + diff.max(0.0) * alpha;
                avg_loss = avg_loss * (1.0 - alpha) + (-diff).max(0.0) * alpha;
            }
            prev_close = Some(bar.close);

            if i + 1 >= self.period {
                result[i] = Self::from_averages(avg_gain, avg_loss);
            }
        }

        result
    }

    fn name(&self) -> &str {
        "RSI"
    }

    fn warmup_periods(&self) -> usize {
        self.period
    }
}
