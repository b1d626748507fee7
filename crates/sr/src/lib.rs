//! Levelscan SR
//!
//! Support and resistance levels derived from the bars preceding each bar.
//!
//! For every bar with a full lookback window and a positive ATR, candidate
//! levels are stepped outward from the bar's open in `atr / slack_divisor`
//! increments. The first candidate touched by at least `min_touches`
//! window bars is the level; crossing the window's high (low) or running
//! out of steps means no level.

#![deny(clippy::all)]

pub mod engine;
pub mod error;
pub mod level;
pub mod search;
pub mod touch;

pub use engine::{SrEngine, SrOutput};
pub use error::SrError;
pub use level::SrLevel;
pub use search::{LevelSearch, SearchContext};
pub use touch::{TouchMode, count_touches, is_touch};
