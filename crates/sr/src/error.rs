//! Support/resistance error types.

use levelscan_types::CoreError;
use thiserror::Error;

/// Errors raised by the support/resistance engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SrError {
    /// Rejected search parameters
    #[error(transparent)]
    Config(#[from] CoreError),

    /// The ATR column does not line up with the bars.
    #[error("ATR column has {atr} values for {bars} bars")]
    LengthMismatch {
        /// Number of bars.
        bars: usize,
        /// Number of ATR values.
        atr: usize,
    },

    /// ATR is infinite or negative at a bar.
    #[error("invalid ATR at bar {index}: {value}")]
    InvalidAtr {
        /// Bar index.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// The bar itself has a non-finite price.
    #[error("non-finite price at bar {index}")]
    NonFinitePrice {
        /// Bar index.
        index: usize,
    },

    /// A single-bar lookup past the end of the series.
    #[error("bar {index} out of range for {len} bars")]
    IndexOutOfRange {
        /// Requested bar.
        index: usize,
        /// Number of bars.
        len: usize,
    },
}

impl SrError {
    /// Returns `true` for errors confined to a single bar.
    #[must_use]
    pub fn is_bar_local(&self) -> bool {
        matches!(self, Self::InvalidAtr { .. } | Self::NonFinitePrice { .. })
    }
}
