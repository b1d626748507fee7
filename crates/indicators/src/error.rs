//! Indicator error types.

use levelscan_types::CoreError;
use thiserror::Error;

/// Errors that can occur while setting up the indicator pipeline.
///
/// Computation itself never fails: undefined values are NaN.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// Rejected pipeline configuration
    #[error(transparent)]
    Config(#[from] CoreError),
}
