//! Indicator implementations
//!
//! Contains all concrete indicator implementations.

pub mod atr;
pub mod bollinger;
pub mod green_ratio;
pub mod ma_comparison;
pub(crate) mod rolling;
pub mod rsi;
pub mod sma;
