use levelscan_types::Bar;

pub const TEST_STEP_NS: i64 = 60_000_000_000;

pub fn sample_bars() -> Vec<Bar> {
    vec![
        Bar {
            timestamp_ns: 1_700_000_000_000_000_000,
            open: 1.1,
            high: 1.2,
            low: 1.0,
            close: 1.15,
            volume: 100,
            spread: 12,
        },
        Bar {
            timestamp_ns: 1_700_000_000_000_000_000 + TEST_STEP_NS,
            open: 1.15,
            high: 1.25,
            low: 1.05,
            close: 1.2,
            volume: 120,
            spread: 8,
        },
    ]
}
