//! Per-bar support/resistance result.

use crate::search::LevelSearch;

/// Levels found at one bar; `None` means no level.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SrLevel {
    /// Resistance above the open
    pub upper: Option<f64>,
    /// Support below the open
    pub lower: Option<f64>,
}

impl SrLevel {
    /// No level on either side.
    pub const NONE: Self = Self {
        upper: None,
        lower: None,
    };

    /// Combines the two searches of one bar.
    #[must_use]
    pub fn from_searches(upper: LevelSearch, lower: LevelSearch) -> Self {
        Self {
            upper: upper.level(),
            lower: lower.level(),
        }
    }

    /// Returns `true` if either side has a level.
    #[must_use]
    pub fn any(&self) -> bool {
        self.upper.is_some() || self.lower.is_some()
    }
}
