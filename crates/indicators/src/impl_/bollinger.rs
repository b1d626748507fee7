//! Bollinger Bands indicator

use crate::traits::{IntoMultiVecs, MultiOutputIndicator};
use levelscan_types::Bar;

/// Bollinger Bands result containing upper, middle, and lower bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerResult {
    /// Upper band = SMA + `std_factor` * std
    pub upper: Vec<f64>,
    /// Middle band = SMA
    pub middle: Vec<f64>,
    /// Lower band = SMA - `std_factor` * std
    pub lower: Vec<f64>,
}

impl BollingerResult {
    /// Rebuilds a result from its cached outputs, in `output_names` order.
    #[must_use]
    pub fn from_vecs(upper: Vec<f64>, middle: Vec<f64>, lower: Vec<f64>) -> Self {
        Self {
            upper,
            middle,
            lower,
        }
    }

    /// Bars whose close is strictly above the upper band.
    ///
    /// `false` while the band is undefined.
    #[must_use]
    pub fn above_upper(&self, bars: &[Bar]) -> Vec<bool> {
        bars.iter()
            .zip(&self.upper)
            .map(|(b, u)| b.close > *u)
            .collect()
    }

    /// Bars whose close is strictly below the lower band.
    #[must_use]
    pub fn below_lower(&self, bars: &[Bar]) -> Vec<bool> {
        bars.iter()
            .zip(&self.lower)
            .map(|(b, l)| b.close < *l)
            .collect()
    }
}

impl IntoMultiVecs for BollingerResult {
    fn into_vecs(self) -> Vec<Vec<f64>> {
        vec![self.upper, self.middle, self.lower]
    }
}

/// Bollinger Bands
///
/// Uses population standard deviation (n), not sample (n-1).
#[derive(Debug, Clone)]
pub struct BollingerBands {
    /// Period for the SMA and standard deviation
    pub period: usize,
    /// Multiplier for standard deviation
    pub std_factor: f64,
}

impl BollingerBands {
    /// Creates new Bollinger Bands with the given parameters.
    #[must_use]
    pub fn new(period: usize, std_factor: f64) -> Self {
        Self { period, std_factor }
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Output = BollingerResult;

    #[allow(clippy::cast_precision_loss)]
    fn compute_all(&self, bars: &[Bar]) -> Self::Output {
        let len = bars.len();
        let mut upper = vec![f64::NAN; len];
        let mut middle = vec![f64::NAN; len];
        let mut lower = vec![f64::NAN; len];

        if len < self.period || self.period == 0 {
            return BollingerResult::from_vecs(upper, middle, lower);
        }

        let n = self.period as f64;
        for i in (self.period - 1)..len {
            let window = &bars[i + 1 - self.period..=i];

            let sma = window.iter().map(|b| b.close).sum::<f64>() / n;
            let variance = window.iter().map(|b| (b.close - sma).powi(2)).sum::<f64>() / n;
            let std = variance.sqrt();

            middle[i] = sma;
            upper[i] = sma + self.std_factor * std;
            lower[i] = sma - self.std_factor * std;
        }

        BollingerResult::from_vecs(upper, middle, lower)
    }

    fn name(&self) -> &str {
        "BOLLINGER"
    }

    fn warmup_periods(&self) -> usize {
        self.period
    }

    fn output_names(&self) -> &'static [&'static str] {
        &["upper", "middle", "lower"]
    }
}
