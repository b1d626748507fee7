//! Levelscan Data
//!
//! Column input, bar series construction and validation.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

/// Data-layer error types.
pub mod error;
/// Column-oriented bar input.
pub mod frame;
/// Validated bar series.
pub mod series;
/// Series validation helpers.
pub mod validation;

/// Re-export: data-layer error type.
pub use error::DataError;
/// Re-export: column input.
pub use frame::RawFrame;
/// Re-export: validated series.
pub use series::BarSeries;
/// Re-export: bar validation.
pub use validation::{validate_bars, validate_continuation};
