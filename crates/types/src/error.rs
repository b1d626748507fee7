use thiserror::Error;

/// Errors raised by shared core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Timeframe label could not be parsed
    #[error(transparent)]
    Timeframe(#[from] crate::timeframe::ParseTimeframeError),
}

impl CoreError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
