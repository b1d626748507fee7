//! Bounded outward search for a level with enough touches.

use levelscan_types::{Bar, SrParams};

use crate::touch::{TouchMode, count_touches};

/// Outcome of one level search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelSearch {
    /// First candidate reaching the touch threshold
    Found(f64),
    /// Window extreme crossed or step budget exhausted
    NotFound,
}

impl LevelSearch {
    /// The level, if one was found.
    #[must_use]
    pub fn level(self) -> Option<f64> {
        match self {
            Self::Found(level) => Some(level),
            Self::NotFound => None,
        }
    }
}

/// Inputs of the searches at one bar.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'a> {
    /// The `lookback_period` bars strictly before the current bar
    pub window: &'a [Bar],
    /// Open of the current bar
    pub open: f64,
    /// Step between candidates, `atr / slack_divisor`
    pub slack: f64,
    /// Rejection band width, `atr * rejection_multiplier`
    pub rejection: f64,
    /// Highest high of the window, bars with non-finite prices left out
    pub local_max: f64,
    /// Lowest low of the window, bars with non-finite prices left out
    pub local_min: f64,
}

impl<'a> SearchContext<'a> {
    /// Derives slack, rejection and window extremes for one bar.
    #[must_use]
    pub fn new(window: &'a [Bar], open: f64, atr: f64, params: &SrParams) -> Self {
        let (local_max, local_min) = window
            .iter()
            .filter(|b| b.is_finite())
            .fold((f64::NEG_INFINITY, f64::INFINITY), |(hi, lo), b| {
                (hi.max(b.high), lo.min(b.low))
            });
        Self {
            window,
            open,
            slack: atr / params.slack_divisor,
            rejection: atr * params.rejection_multiplier,
            local_max,
            local_min,
        }
    }

    /// Steps away from the open in `mode`'s direction until a candidate
    /// collects `min_touches`.
    ///
    /// The first candidate sits `min_slack_steps` slacks from the open. At
    /// most `max_slack_steps` candidates are tried, and a candidate beyond
    /// the window extreme ends the search before it is counted.
    #[must_use]
    pub fn search(&self, params: &SrParams, mode: TouchMode) -> LevelSearch {
        let (start, step) = match mode {
            TouchMode::Upper => (self.open + params.min_slack_steps * self.slack, self.slack),
            TouchMode::Lower => (self.open - params.min_slack_steps * self.slack, -self.slack),
        };

        let mut level = start;
        let mut steps = 0.0;
        while steps < params.max_slack_steps {
            let beyond = match mode {
                TouchMode::Upper => level > self.local_max,
                TouchMode::Lower => level < self.local_min,
            };
            if beyond {
                return LevelSearch::NotFound;
            }
            if count_touches(self.window, level, self.rejection, mode) >= params.min_touches {
                return LevelSearch::Found(level);
            }
            level += step;
            steps += 1.0;
        }
        LevelSearch::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(open: f64, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            timestamp_ns: 0,
            open,
            high,
            low,
            close,
            volume: 0,
            spread: 0,
        }
    }

    fn params() -> SrParams {
        SrParams {
            lookback_period: 4,
            min_touches: 2,
            slack_divisor: 10.0,
            rejection_multiplier: 0.0,
            min_slack_steps: 1.0,
            max_slack_steps: 100.0,
        }
    }

    // Two wicks up to ~1.05 and two down to ~0.95, bodies around 1.00.
    fn window() -> Vec<Bar> {
        vec![
            bar(1.00, 1.052, 0.995, 1.006),
            bar(1.006, 1.053, 0.998, 1.00),
            bar(1.00, 1.008, 0.948, 1.005),
            bar(1.005, 1.008, 0.947, 1.00),
        ]
    }

    #[test]
    fn test_finds_resistance_and_support() {
        let w = window();
        let p = params();
        // atr 0.1 -> slack 0.01, first candidates 1.01 and 0.99
        let ctx = SearchContext::new(&w, 1.00, 0.1, &p);

        let upper = ctx.search(&p, TouchMode::Upper).level().unwrap();
        let lower = ctx.search(&p, TouchMode::Lower).level().unwrap();
        assert!((upper - 1.01).abs() < 1e-9, "upper {upper}");
        assert!((lower - 0.99).abs() < 1e-9, "lower {lower}");
    }

    #[test]
    fn test_stops_at_window_extreme() {
        let w = window();
        let mut p = params();
        p.min_touches = 3;
        let ctx = SearchContext::new(&w, 1.00, 0.1, &p);

        assert_eq!(ctx.search(&p, TouchMode::Upper), LevelSearch::NotFound);
        assert_eq!(ctx.search(&p, TouchMode::Lower), LevelSearch::NotFound);
    }

    #[test]
    fn test_first_candidate_beyond_extreme() {
        let w = window();
        let mut p = params();
        p.min_slack_steps = 10.0;
        // first upper candidate 1.10 > local max 1.053
        let ctx = SearchContext::new(&w, 1.00, 0.1, &p);
        assert_eq!(ctx.search(&p, TouchMode::Upper), LevelSearch::NotFound);
    }

    #[test]
    fn test_step_budget() {
        let w = window();
        let mut p = params();
        // first candidate is the open itself, which no body lies strictly below
        p.min_slack_steps = 0.0;
        let ctx = SearchContext::new(&w, 1.00, 0.1, &p);

        p.max_slack_steps = 0.0;
        assert_eq!(ctx.search(&p, TouchMode::Upper), LevelSearch::NotFound);
        p.max_slack_steps = 1.0;
        assert_eq!(ctx.search(&p, TouchMode::Upper), LevelSearch::NotFound);
        p.max_slack_steps = 2.0;
        assert!(ctx.search(&p, TouchMode::Upper).level().is_some());
    }

    #[test]
    fn test_bad_window_bar_is_ignored() {
        let mut w = window();
        w.push(bar(1.0, f64::INFINITY, f64::NAN, 1.0));
        let p = params();
        let ctx = SearchContext::new(&w, 1.00, 0.1, &p);

        assert!((ctx.local_max - 1.053).abs() < 1e-12);
        assert!((ctx.local_min - 0.947).abs() < 1e-12);
        assert!((ctx.search(&p, TouchMode::Upper).level().unwrap() - 1.01).abs() < 1e-9);
    }

    #[test]
    fn test_context_extremes() {
        let w = window();
        let ctx = SearchContext::new(&w, 1.0, 0.2, &params());
        assert!((ctx.local_max - 1.053).abs() < 1e-12);
        assert!((ctx.local_min - 0.947).abs() < 1e-12);
        assert!((ctx.slack - 0.02).abs() < 1e-12);
        assert!(ctx.rejection.abs() < 1e-12);
    }
}
