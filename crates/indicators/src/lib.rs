//! Levelscan Indicators
//!
//! Technical indicator pipeline feeding the support/resistance engine.
//!
//! # Features
//! - Indicator trait with vectorized computation
//! - Multi-output indicators (Bollinger Bands)
//! - Per-run cache so shared series (e.g. an SMA also used for a
//!   close comparison) are computed once
//!
//! # Available Indicators
//! - RSI: Relative Strength Index (Wilder smoothing)
//! - ATR: Average True Range (Wilder smoothing)
//! - SMA: Simple Moving Average
//! - Bollinger Bands: Upper, Middle, Lower bands plus breakout flags
//! - Green ratio: share of green candles in a trailing window
//! - MA comparison: close above/below/equal to an SMA

pub mod cache;
pub mod error;
pub mod impl_;
pub mod pipeline;
pub mod traits;

// Re-export main types
pub use cache::IndicatorCache;
pub use error::IndicatorError;
pub use pipeline::{
    BandColumns, BandRow, ComparisonColumn, IndicatorFrame, IndicatorOutput, IndicatorPipeline,
    IndicatorRow, WindowColumn,
};
pub use traits::{Indicator, IndicatorParams, IndicatorSpec, IntoMultiVecs, MultiOutputIndicator};

// Re-export indicator implementations
pub use impl_::{
    atr::ATR,
    bollinger::{BollingerBands, BollingerResult},
    green_ratio::GreenRatio,
    ma_comparison::MaComparison,
    rsi::RSI,
    sma::SMA,
};

#[cfg(test)]
pub(crate) mod test_support {
    use levelscan_types::Bar;

    pub fn make_bar(close: f64) -> Bar {
        make_bar_oc(close, close)
    }

    pub fn make_bar_oc(open: f64, close: f64) -> Bar {
        Bar {
            timestamp_ns: 0,
            open,
            high: open.max(close),
            low: open.min(close),
            close,
            volume: 0,
            spread: 0,
        }
    }
}
