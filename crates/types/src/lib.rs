//! Levelscan Types
//!
//! Shared data structures for the levelscan engine: bars, timeframes,
//! bid/ask quotes, run configuration, warnings and the core error type.

#![deny(clippy::all)]

pub mod bar;
pub mod config;
pub mod error;
pub mod nullable;
pub mod quote;
pub mod timeframe;
pub mod warning;

// Re-export main types for convenience
pub use bar::Bar;
pub use config::{BollingerSetting, EngineConfig, SrParams};
pub use error::CoreError;
pub use quote::{Quote, pip_size};
pub use timeframe::{ParseTimeframeError, Timeframe};
pub use warning::Warning;
