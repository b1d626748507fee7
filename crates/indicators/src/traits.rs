//! Indicator traits and specifications.
//!
//! Defines the core traits and types for indicators.

use levelscan_types::Bar;

/// Specification for an indicator including name and parameters.
/// Used as cache keys to identify computed indicator series.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndicatorSpec {
    /// Indicator name (e.g., "MA", "ATR", `BOLLINGER_upper`).
    pub name: String,
    /// Parameters for the indicator
    pub params: IndicatorParams,
}

impl IndicatorSpec {
    /// Creates a new indicator specification.
    #[must_use]
    pub fn new(name: impl Into<String>, params: IndicatorParams) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// Creates a composite key for multi-output indicators.
    #[must_use]
    pub fn with_output_suffix(&self, output_name: &str) -> Self {
        Self {
            name: format!("{}_{output_name}", self.name),
            params: self.params.clone(),
        }
    }
}

/// Parameters for indicator configuration.
///
/// Float parameters are stored as their bit pattern so the spec stays hashable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorParams {
    /// Simple period-based parameter (RSI, ATR, SMA, green ratio).
    Period(
        /// Window length for the indicator.
        usize,
    ),

    /// Bollinger Bands parameters
    Bollinger {
        /// Window length for SMA/std calculation.
        period: usize,
        /// `f64::to_bits` of the deviation factor.
        std_factor_bits: u64,
    },
}

impl IndicatorParams {
    /// Bollinger parameters for a window and deviation factor.
    #[must_use]
    pub fn bollinger(period: usize, std_factor: f64) -> Self {
        IndicatorParams::Bollinger {
            period,
            std_factor_bits: std_factor.to_bits(),
        }
    }
}

/// Trait for single-output indicators.
///
/// All indicators compute over the full bar series and return a `Vec<f64>`
/// of the same length. Values before the warmup period are NaN.
pub trait Indicator: Send + Sync {
    /// Computes the indicator for all bars.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;

    /// Cache key and output prefix (e.g. "MA" for `MA_21`, "ATR").
    fn name(&self) -> &str;

    /// Minimum number of bars required for valid output.
    fn warmup_periods(&self) -> usize;
}

/// Trait for multi-output indicators like Bollinger Bands.
///
/// These indicators produce multiple series (e.g., upper, middle, lower bands)
/// that are computed together for efficiency.
pub trait MultiOutputIndicator: Send + Sync {
    /// Type of the output structure
    type Output: IntoMultiVecs;

    /// Computes all outputs at once.
    fn compute_all(&self, bars: &[Bar]) -> Self::Output;

    /// Cache key prefix; each output is stored as `<name>_<output>`.
    fn name(&self) -> &str;

    /// Minimum number of bars for valid output.
    fn warmup_periods(&self) -> usize;

    /// List of output names (used for cache keys).
    fn output_names(&self) -> &'static [&'static str];
}

/// Trait for converting multi-output results into a vector of vectors.
pub trait IntoMultiVecs {
    /// Converts the output structure into a vector of value vectors.
    fn into_vecs(self) -> Vec<Vec<f64>>;
}
