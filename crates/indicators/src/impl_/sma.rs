//! Moving average of closes (`MA_<window>` columns)

use crate::impl_::rolling::trailing_mean;
use crate::traits::Indicator;
use levelscan_types::Bar;

/// Unweighted mean of the last `period` closes, current bar included.
#[derive(Debug, Clone)]
pub struct SMA {
    /// Window length
    pub period: usize,
}

impl SMA {
    /// Moving average over `period` closes.
    #[must_use]
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for SMA {
    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        trailing_mean(&closes, self.period)
    }

    fn name(&self) -> &str {
        "MA"
    }

    fn warmup_periods(&self) -> usize {
        self.period
    }
}
