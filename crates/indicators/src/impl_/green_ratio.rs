//! Share of green candles in a trailing window

use crate::impl_::rolling::trailing_mean;
use crate::traits::Indicator;
use levelscan_types::Bar;

/// Fraction of bars in the trailing `window` whose close is above the open.
#[derive(Debug, Clone)]
pub struct GreenRatio {
    /// Trailing window, current bar included
    pub window: usize,
}

impl GreenRatio {
    /// Creates a new green ratio over `window` bars.
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

impl Indicator for GreenRatio {
    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let green: Vec<f64> = bars
            .iter()
            .map(|b| match (b.open.is_finite() && b.close.is_finite(), b.is_green()) {
                (false, _) => f64::NAN,
                (true, true) => 1.0,
                (true, false) => 0.0,
            })
            .collect();
        trailing_mean(&green, self.window)
    }

    fn name(&self) -> &str {
        "GA"
    }

    fn warmup_periods(&self) -> usize {
        self.window
    }
}
