//! Scenario and property tests for the support/resistance engine.

use std::num::NonZeroUsize;

use approx::assert_abs_diff_eq;
use levelscan_sr::{LevelSearch, SearchContext, SrEngine, SrLevel, TouchMode, count_touches, is_touch};
use levelscan_types::{Bar, SrParams, Warning};
use proptest::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

const BASE: f64 = 1.0;
const STEP: f64 = 0.001;
const PEAK: f64 = BASE + 10.0 * STEP;

/// Triangle wave between `BASE` and `PEAK` with a 20-bar period.
fn wave(k: usize) -> f64 {
    let m = k % 20;
    let steps = if m <= 10 { m } else { 20 - m };
    BASE + STEP * steps as f64
}

/// Bars following the triangle wave. The up-bar closing at the peak (or the
/// down-bar closing at the base) carries a 5-pip wick past the extreme.
fn zigzag(n: usize, ceiling: bool) -> Vec<Bar> {
    (0..n)
        .map(|j| {
            let open = wave(j);
            let close = wave(j + 1);
            let mut high = open.max(close);
            let mut low = open.min(close);
            if ceiling && close > open && (close - PEAK).abs() < 1e-12 {
                high = close + 0.0005;
            }
            if !ceiling && close < open && (close - BASE).abs() < 1e-12 {
                low = close - 0.0005;
            }
            Bar {
                timestamp_ns: j as i64,
                open,
                high,
                low,
                close,
                volume: 1,
                spread: 0,
            }
        })
        .collect()
}

fn wave_params() -> SrParams {
    SrParams {
        lookback_period: 100,
        min_touches: 3,
        slack_divisor: 10.0,
        rejection_multiplier: 2.0,
        min_slack_steps: 3.0,
        max_slack_steps: 500.0,
    }
}

fn bar_strategy() -> impl Strategy<Value = Bar> {
    (1.0f64..2.0, 0.0001f64..0.02, -1.0f64..1.0, -1.0f64..1.0).prop_map(
        |(base, half, o, c)| Bar {
            timestamp_ns: 0,
            open: base + half * o,
            high: base + half,
            low: base - half,
            close: base + half * c,
            volume: 0,
            spread: 0,
        },
    )
}

fn reflect(bar: &Bar) -> Bar {
    Bar {
        open: -bar.open,
        high: -bar.low,
        low: -bar.high,
        close: -bar.close,
        ..*bar
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_repeated_ceiling_becomes_resistance() {
    let bars = zigzag(200, true);
    let atr = vec![0.001; bars.len()];
    let out = SrEngine::new(wave_params()).unwrap().compute(&bars, &atr).unwrap();
    let slack = 0.001 / 10.0;

    // every bar opening below the peak sees the ceiling within one slack
    for i in 100..200 {
        if bars[i].open < PEAK - 5.0 * slack {
            let upper = out.levels[i].upper.expect("resistance at the ceiling");
            assert!((upper - PEAK).abs() <= slack + 1e-9, "bar {i}: {upper}");
        }
    }
    // nothing below the base to support a trough open
    assert_eq!(out.levels[120].lower, None);
}

#[test]
fn test_repeated_floor_becomes_support() {
    let bars = zigzag(200, false);
    let atr = vec![0.001; bars.len()];
    let out = SrEngine::new(wave_params()).unwrap().compute(&bars, &atr).unwrap();
    let slack = 0.001 / 10.0;

    for i in 100..200 {
        if bars[i].open > BASE + 5.0 * slack {
            let lower = out.levels[i].lower.expect("support at the floor");
            assert!((lower - BASE).abs() <= slack + 1e-9, "bar {i}: {lower}");
        }
    }
    assert_eq!(out.levels[130].upper, None);
}

#[test]
fn test_bars_inside_lookback_have_no_levels() {
    let bars = zigzag(150, true);
    let atr = vec![0.001; bars.len()];
    let out = SrEngine::new(wave_params()).unwrap().compute(&bars, &atr).unwrap();

    assert_eq!(out.levels.len(), 150);
    assert!(out.levels[..100].iter().all(|l| *l == SrLevel::NONE));
    assert!(out.warnings.is_empty());
}

#[test]
fn test_flat_candles_pierced_by_first_candidate() {
    // centred candles of range eps, ATR == eps
    let eps = 0.0002;
    let bars = vec![
        Bar {
            timestamp_ns: 0,
            open: 1.0,
            high: 1.0 + eps / 2.0,
            low: 1.0 - eps / 2.0,
            close: 1.0,
            volume: 0,
            spread: 0,
        };
        150
    ];
    let atr = vec![eps; bars.len()];

    // default 3 / 10: the first candidate lies inside every candle
    let out = SrEngine::new(SrParams::default()).unwrap().compute(&bars, &atr).unwrap();
    let level = out.levels[120];
    assert_abs_diff_eq!(level.upper.unwrap(), 1.0 + 0.3 * eps, epsilon = 1e-12);
    assert_abs_diff_eq!(level.lower.unwrap(), 1.0 - 0.3 * eps, epsilon = 1e-12);

    // 6 / 10: the first candidate is already past the candle extremes
    let params = SrParams {
        min_slack_steps: 6.0,
        ..SrParams::default()
    };
    let out = SrEngine::new(params).unwrap().compute(&bars, &atr).unwrap();
    assert!(out.levels.iter().all(|l| *l == SrLevel::NONE));
}

#[test]
fn test_zero_atr_reported_as_degenerate() {
    let bars = vec![
        Bar {
            timestamp_ns: 0,
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            volume: 0,
            spread: 0,
        };
        12
    ];
    let params = SrParams {
        lookback_period: 10,
        ..SrParams::default()
    };
    let out = SrEngine::new(params).unwrap().compute(&bars, &[0.0; 12]).unwrap();

    assert_eq!(
        out.warnings,
        vec![
            Warning::DegenerateVolatility { index: 10 },
            Warning::DegenerateVolatility { index: 11 },
        ]
    );
}

#[test]
fn test_parallel_matches_sequential() {
    let bars = zigzag(237, true);
    let atr: Vec<f64> = (0..bars.len())
        .map(|i| if i < 14 { f64::NAN } else { 0.0008 + (i % 5) as f64 * 0.0001 })
        .collect();
    let engine = SrEngine::new(wave_params()).unwrap();

    let sequential = engine.compute(&bars, &atr).unwrap();
    for workers in [1, 2, 3, 8, 500] {
        let parallel = engine
            .compute_parallel(&bars, &atr, NonZeroUsize::new(workers).unwrap())
            .unwrap();
        assert_eq!(parallel, sequential, "workers = {workers}");
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_rejection_band_only_adds_touches(
        bar in bar_strategy(),
        level in 0.95f64..2.05,
        rejection in 0.0f64..0.05,
    ) {
        for mode in [TouchMode::Upper, TouchMode::Lower] {
            if is_touch(&bar, level, 0.0, mode) {
                prop_assert!(is_touch(&bar, level, rejection, mode));
            }
        }
    }

    #[test]
    fn prop_wider_band_keeps_touches_of_large_candles(
        window in prop::collection::vec(bar_strategy(), 1..40),
        level in 0.95f64..2.05,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
    ) {
        let min_range = window.iter().map(Bar::range).fold(f64::INFINITY, f64::min);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        // both bands smaller than every candle
        let (r1, r2) = (lo * min_range * 0.99, hi * min_range * 0.99);
        for mode in [TouchMode::Upper, TouchMode::Lower] {
            prop_assert!(count_touches(&window, level, r1, mode) <= count_touches(&window, level, r2, mode));
            prop_assert!(count_touches(&window, level, 0.0, mode) <= count_touches(&window, level, r1, mode));
        }
    }

    #[test]
    fn prop_upper_and_lower_are_mirror_images(
        bar in bar_strategy(),
        level in 0.95f64..2.05,
        rejection in 0.0f64..0.05,
    ) {
        prop_assert_eq!(
            is_touch(&bar, level, rejection, TouchMode::Upper),
            is_touch(&reflect(&bar), -level, rejection, TouchMode::Lower)
        );
    }

    #[test]
    fn prop_found_levels_are_bounded_and_touched(
        window in prop::collection::vec(bar_strategy(), 5..60),
        open in 1.0f64..2.0,
        atr in 0.001f64..0.1,
    ) {
        let params = SrParams { min_touches: 2, ..SrParams::default() };
        let ctx = SearchContext::new(&window, open, atr, &params);
        let tol = 1e-9;

        if let LevelSearch::Found(level) = ctx.search(&params, TouchMode::Upper) {
            prop_assert!(level <= ctx.local_max);
            prop_assert!(level >= open + params.min_slack_steps * ctx.slack - tol);
            prop_assert!(count_touches(&window, level, ctx.rejection, TouchMode::Upper) >= 2);
        }
        if let LevelSearch::Found(level) = ctx.search(&params, TouchMode::Lower) {
            prop_assert!(level >= ctx.local_min);
            prop_assert!(level <= open - params.min_slack_steps * ctx.slack + tol);
            prop_assert!(count_touches(&window, level, ctx.rejection, TouchMode::Lower) >= 2);
        }
    }

    #[test]
    fn prop_scan_is_deterministic_and_length_preserving(
        bars in prop::collection::vec(bar_strategy(), 0..80),
        atr_level in 0.001f64..0.05,
    ) {
        let params = SrParams { lookback_period: 10, ..SrParams::default() };
        let engine = SrEngine::new(params).unwrap();
        let atr = vec![atr_level; bars.len()];

        let a = engine.compute(&bars, &atr).unwrap();
        let b = engine.compute(&bars, &atr).unwrap();
        prop_assert_eq!(a.levels.len(), bars.len());
        prop_assert!(a.levels.iter().take(10).all(|l| *l == SrLevel::NONE));
        prop_assert_eq!(a, b);
    }
}
