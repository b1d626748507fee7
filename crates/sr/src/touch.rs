//! Touch rule: does a window bar respect a candidate level?

use levelscan_types::Bar;

/// Side of the open a level is searched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchMode {
    /// Resistance above the open
    Upper,
    /// Support below the open
    Lower,
}

/// Returns `true` when `bar` touches `level`.
///
/// Upper mode: the body lies strictly below the level and either the high
/// pierces it, or the candle is larger than `rejection` and its high ends
/// within `rejection / 2` below the level. Lower mode mirrors this.
#[must_use]
#[inline]
pub fn is_touch(bar: &Bar, level: f64, rejection: f64, mode: TouchMode) -> bool {
    if !bar.is_finite() {
        return false;
    }
    let large = bar.range() > rejection;
    let near = rejection / 2.0;
    match mode {
        TouchMode::Upper => {
            bar.open < level
                && bar.close < level
                && (bar.high > level || (large && level - bar.high < near))
        }
        TouchMode::Lower => {
            bar.open > level
                && bar.close > level
                && (bar.low < level || (large && bar.low - level < near))
        }
    }
}

/// Number of bars in `window` touching `level`.
#[must_use]
pub fn count_touches(window: &[Bar], level: f64, rejection: f64, mode: TouchMode) -> usize {
    window
        .iter()
        .filter(|bar| is_touch(bar, level, rejection, mode))
        .count()
}
