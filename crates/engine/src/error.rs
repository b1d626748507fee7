//! Engine error types.

use levelscan_data::DataError;
use levelscan_indicators::IndicatorError;
use levelscan_sr::SrError;
use levelscan_types::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while enriching a series.
#[derive(Debug, Error)]
pub enum EngineError {
    /// JSON request parse error
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Config validation error
    #[error("config validation error: {0}")]
    ConfigValidation(String),

    /// Input columns or bar series rejected
    #[error("data error: {0}")]
    Data(#[from] DataError),

    /// Indicator pipeline setup error
    #[error("indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    /// Support/resistance engine error
    #[error("sr error: {0}")]
    Sr(#[from] SrError),

    /// Previously enriched rows cannot be extended
    #[error("append error: {0}")]
    Append(String),

    /// Result serialization error
    #[error("result serialization error: {0}")]
    ResultSerialize(String),

    /// Runtime error
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        EngineError::ConfigValidation(err.to_string())
    }
}

impl EngineError {
    /// Returns true if this is a config parse/validation error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        self.error_category() == "config"
    }

    /// Returns the error category for the output contract.
    /// Categories: `config`, `data`, `runtime`
    #[must_use]
    pub fn error_category(&self) -> &'static str {
        match self {
            EngineError::ConfigParse(_)
            | EngineError::ConfigValidation(_)
            | EngineError::Indicator(IndicatorError::Config(_))
            | EngineError::Sr(SrError::Config(_)) => "config",

            EngineError::Data(_) | EngineError::Append(_) => "data",

            EngineError::Sr(_) | EngineError::ResultSerialize(_) | EngineError::Runtime(_) => {
                "runtime"
            }
        }
    }
}

/// Serializable error description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error category (`config`, `data`, `runtime`)
    pub category: String,
    /// Human-readable message
    pub message: String,
}

impl From<&EngineError> for ErrorReport {
    fn from(err: &EngineError) -> Self {
        Self {
            category: err.error_category().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<EngineError> for ErrorReport {
    fn from(err: EngineError) -> Self {
        Self::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_config() {
        let err = EngineError::ConfigParse("invalid json".to_string());
        assert_eq!(err.error_category(), "config");
        assert!(err.is_config_error());

        let err: EngineError = CoreError::Config("rsi_period must be > 0".to_string()).into();
        assert!(matches!(err, EngineError::ConfigValidation(_)));
        assert!(err.is_config_error());

        let err: EngineError = SrError::Config(CoreError::Config("x".to_string())).into();
        assert_eq!(err.error_category(), "config");
    }

    #[test]
    fn test_error_category_data() {
        let err: EngineError = DataError::MissingField("close".to_string()).into();
        assert_eq!(err.error_category(), "data");
        assert!(!err.is_config_error());
        assert!(err.to_string().contains("close"));
    }

    #[test]
    fn test_error_category_runtime() {
        let err: EngineError = SrError::LengthMismatch { bars: 3, atr: 2 }.into();
        assert_eq!(err.error_category(), "runtime");

        let err = EngineError::Runtime("worker panicked".to_string());
        assert_eq!(err.error_category(), "runtime");
    }

    #[test]
    fn test_error_report_conversion() {
        let report: ErrorReport = EngineError::Append("gap".to_string()).into();
        assert_eq!(report.category, "data");
        assert!(report.message.contains("gap"));
    }
}
