//! Output rows: one enriched bar with the persisted column names.
//!
//! This is the only place where an absent SR level becomes the `0`
//! sentinel. Undefined indicator values are written as `null`.

use std::collections::BTreeMap;

use levelscan_indicators::{IndicatorRow, MaComparison};
use levelscan_sr::SrLevel;
use levelscan_types::{Bar, Quote};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Value of a dynamically named indicator column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Bollinger breakout flag
    Flag(bool),
    /// Close-vs-MA category
    Category(MaComparison),
    /// Defined numeric value
    Value(f64),
    /// Value still in warm-up
    Undefined,
}

impl Cell {
    fn value(v: Option<f64>) -> Self {
        v.map_or(Cell::Undefined, Cell::Value)
    }

    fn category(c: Option<MaComparison>) -> Self {
        c.map_or(Cell::Undefined, Cell::Category)
    }

    /// Numeric content, if any.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Value(v) => Some(*v),
            _ => None,
        }
    }
}

/// Schema column that is always written as `0` and never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Unpopulated;

impl Serialize for Unpopulated {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(0.0)
    }
}

impl<'de> Deserialize<'de> for Unpopulated {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde::de::IgnoredAny::deserialize(deserializer)?;
        Ok(Unpopulated)
    }
}

/// `None` <-> `0`
mod zero_sentinel {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(level: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(level.unwrap_or(0.0))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let value = Option::<f64>::deserialize(deserializer)?;
        Ok(value.filter(|v| *v != 0.0))
    }
}

/// One enriched bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRow {
    /// Input bar (`time, open, high, low, close, tick_volume, spread`)
    #[serde(flatten)]
    pub bar: Bar,
    /// Bid derived from the spread, `null` for a bar with a bad open
    #[serde(default)]
    pub bid: Option<f64>,
    /// Ask derived from the spread, `null` for a bar with a bad open
    #[serde(default)]
    pub ask: Option<f64>,
    /// RSI
    #[serde(rename = "RSI", default)]
    pub rsi: Option<f64>,
    /// ATR
    #[serde(rename = "ATR", default)]
    pub atr: Option<f64>,
    /// Bollinger, MA, comparison and green-ratio columns by name
    #[serde(flatten)]
    pub columns: BTreeMap<String, Cell>,
    /// Resistance, `0` when absent
    #[serde(with = "zero_sentinel", default)]
    pub upper_sr: Option<f64>,
    /// Support, `0` when absent
    #[serde(with = "zero_sentinel", default)]
    pub lower_sr: Option<f64>,
    /// Placeholder column
    #[serde(default)]
    pub prev_upper_sr_level: Unpopulated,
    /// Placeholder column
    #[serde(default)]
    pub prev_lower_sr_level: Unpopulated,
}

impl EnrichedRow {
    /// Assembles the row of one bar.
    #[must_use]
    pub fn new(bar: Bar, quote: Quote, indicators: IndicatorRow, sr: SrLevel) -> Self {
        let mut columns = BTreeMap::new();
        for band in indicators.bands {
            let label = band.label;
            columns.insert(format!("{label}_Upper"), Cell::value(band.upper));
            columns.insert(format!("{label}_Middle"), Cell::value(band.middle));
            columns.insert(format!("{label}_Lower"), Cell::value(band.lower));
            columns.insert(format!("{label}_Bool_Above"), Cell::Flag(band.above));
            columns.insert(format!("{label}_Bool_Below"), Cell::Flag(band.below));
        }
        for (window, ma) in indicators.moving_averages {
            columns.insert(format!("MA_{window}"), Cell::value(ma));
        }
        for (window, comparison) in indicators.comparisons {
            columns.insert(format!("MA_{window}_comp"), Cell::category(comparison));
        }
        for (window, ratio) in indicators.green_ratios {
            columns.insert(format!("GA_{window}"), Cell::value(ratio));
        }

        Self {
            bar,
            bid: Some(quote.bid).filter(|v| v.is_finite()),
            ask: Some(quote.ask).filter(|v| v.is_finite()),
            rsi: indicators.rsi,
            atr: indicators.atr,
            columns,
            upper_sr: sr.upper,
            lower_sr: sr.lower,
            prev_upper_sr_level: Unpopulated,
            prev_lower_sr_level: Unpopulated,
        }
    }

    /// SR levels of the row.
    #[must_use]
    pub fn sr_level(&self) -> SrLevel {
        SrLevel {
            upper: self.upper_sr,
            lower: self.lower_sr,
        }
    }

    /// Dynamic column by its persisted name (e.g. `BB20_Upper`, `MA_7_comp`).
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Cell> {
        self.columns.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelscan_indicators::BandRow;

    fn sample(sr: SrLevel) -> EnrichedRow {
        let bar = Bar {
            timestamp_ns: 1_700_000_000_000_000_000,
            open: 1.1,
            high: 1.2,
            low: 1.0,
            close: 1.15,
            volume: 42,
            spread: 10,
        };
        let indicators = IndicatorRow {
            rsi: Some(55.5),
            atr: None,
            bands: vec![BandRow {
                label: "BB20".to_string(),
                upper: Some(1.3),
                middle: Some(1.1),
                lower: Some(0.9),
                above: false,
                below: true,
            }],
            moving_averages: vec![(7, Some(1.12)), (200, None)],
            comparisons: vec![(7, Some(MaComparison::Above))],
            green_ratios: vec![(50, None)],
        };
        EnrichedRow::new(bar, Quote::from_bar(&bar, 0.0001), indicators, sr)
    }

    #[test]
    fn test_persisted_column_names() {
        let row = sample(SrLevel::NONE);
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["time"], 1_700_000_000_000_000_000i64);
        assert_eq!(json["tick_volume"], 42);
        assert_eq!(json["RSI"], 55.5);
        assert!(json["ATR"].is_null());
        assert_eq!(json["BB20_Upper"], 1.3);
        assert_eq!(json["BB20_Bool_Below"], true);
        assert_eq!(json["MA_7_comp"], "above");
        assert!(json["MA_200"].is_null());
        assert!(json["GA_50"].is_null());
    }

    #[test]
    fn test_absent_levels_written_as_zero() {
        let json = serde_json::to_value(sample(SrLevel::NONE)).unwrap();
        assert_eq!(json["upper_sr"], 0.0);
        assert_eq!(json["lower_sr"], 0.0);
        assert_eq!(json["prev_upper_sr_level"], 0.0);
        assert_eq!(json["prev_lower_sr_level"], 0.0);
    }

    #[test]
    fn test_round_trip_restores_absent_levels() {
        let row = sample(SrLevel {
            upper: Some(1.25),
            lower: None,
        });
        let text = serde_json::to_string(&row).unwrap();
        let back: EnrichedRow = serde_json::from_str(&text).unwrap();

        assert_eq!(back, row);
        assert_eq!(back.sr_level().upper, Some(1.25));
        assert_eq!(back.sr_level().lower, None);
        assert!(back.column("prev_upper_sr_level").is_none());
        assert_eq!(back.column("MA_7").and_then(Cell::as_f64), Some(1.12));
    }

    #[test]
    fn test_bad_bar_row_survives_reload() {
        let mut row = sample(SrLevel::NONE);
        row.bar.open = f64::NAN;
        let row = EnrichedRow::new(
            row.bar,
            Quote::from_bar(&row.bar, 0.0001),
            IndicatorRow {
                rsi: None,
                atr: None,
                bands: Vec::new(),
                moving_averages: Vec::new(),
                comparisons: Vec::new(),
                green_ratios: Vec::new(),
            },
            SrLevel::NONE,
        );
        assert_eq!(row.bid, None);

        let json = serde_json::to_value(&row).unwrap();
        assert!(json["open"].is_null());
        assert!(json["bid"].is_null());

        let back: EnrichedRow = serde_json::from_value(json).unwrap();
        assert!(back.bar.open.is_nan());
        assert_eq!(back.bar.close, 1.15);
        assert_eq!(back.ask, None);
    }
}
