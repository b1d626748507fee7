//! Column-oriented bar input.

use serde::{Deserialize, Serialize};

use crate::error::DataError;
use levelscan_types::Bar;

/// Bars as named columns, the shape produced by upstream loaders.
///
/// `time` and the four prices are required. `tick_volume` (alias `volume`)
/// and `spread` default to zero when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFrame {
    /// Bar open time, epoch-ns.
    pub time: Option<Vec<i64>>,
    /// Open prices. `null` entries read as NaN.
    #[serde(default, deserialize_with = "levelscan_types::nullable::price_column")]
    pub open: Option<Vec<f64>>,
    /// High prices. `null` entries read as NaN.
    #[serde(default, deserialize_with = "levelscan_types::nullable::price_column")]
    pub high: Option<Vec<f64>>,
    /// Low prices. `null` entries read as NaN.
    #[serde(default, deserialize_with = "levelscan_types::nullable::price_column")]
    pub low: Option<Vec<f64>>,
    /// Close prices. `null` entries read as NaN.
    #[serde(default, deserialize_with = "levelscan_types::nullable::price_column")]
    pub close: Option<Vec<f64>>,
    /// Tick volume.
    #[serde(alias = "volume")]
    pub tick_volume: Option<Vec<i64>>,
    /// Spread in points.
    pub spread: Option<Vec<i64>>,
}

/// Borrowed view of the required columns.
struct Prices<'a> {
    time: &'a [i64],
    open: &'a [f64],
    high: &'a [f64],
    low: &'a [f64],
    close: &'a [f64],
}

fn required<'a, T>(column: Option<&'a Vec<T>>, name: &str) -> Result<&'a [T], DataError> {
    column
        .map(Vec::as_slice)
        .ok_or_else(|| DataError::MissingField(name.to_string()))
}

fn check_len(column: &str, expected: usize, actual: usize) -> Result<(), DataError> {
    if actual == expected {
        Ok(())
    } else {
        Err(DataError::ColumnLength {
            column: column.to_string(),
            expected,
            actual,
        })
    }
}

impl RawFrame {
    /// Builds a frame holding every column of `bars`.
    #[must_use]
    pub fn from_bars(bars: &[Bar]) -> Self {
        Self {
            time: Some(bars.iter().map(|b| b.timestamp_ns).collect()),
            open: Some(bars.iter().map(|b| b.open).collect()),
            high: Some(bars.iter().map(|b| b.high).collect()),
            low: Some(bars.iter().map(|b| b.low).collect()),
            close: Some(bars.iter().map(|b| b.close).collect()),
            tick_volume: Some(bars.iter().map(|b| b.volume).collect()),
            spread: Some(bars.iter().map(|b| b.spread).collect()),
        }
    }

    /// Number of rows, taken from `time`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.as_ref().map_or(0, Vec::len)
    }

    /// Returns `true` when `time` is absent or empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fails when any of `time`, `open`, `high`, `low`, `close` is absent.
    ///
    /// # Errors
    /// [`DataError::MissingField`] naming the first absent column.
    pub fn require_prices(&self) -> Result<(), DataError> {
        self.prices().map(|_| ())
    }

    fn prices(&self) -> Result<Prices<'_>, DataError> {
        Ok(Prices {
            time: required(self.time.as_ref(), "time")?,
            open: required(self.open.as_ref(), "open")?,
            high: required(self.high.as_ref(), "high")?,
            low: required(self.low.as_ref(), "low")?,
            close: required(self.close.as_ref(), "close")?,
        })
    }

    /// Zips the columns into bars.
    ///
    /// Values are not validated here; see [`crate::validation::validate_bars`].
    ///
    /// # Errors
    /// - [`DataError::MissingField`] for an absent required column.
    /// - [`DataError::ColumnLength`] when a column length differs from `time`.
    pub fn to_bars(&self) -> Result<Vec<Bar>, DataError> {
        let p = self.prices()?;
        let n = p.time.len();

        check_len("open", n, p.open.len())?;
        check_len("high", n, p.high.len())?;
        check_len("low", n, p.low.len())?;
        check_len("close", n, p.close.len())?;
        if let Some(volume) = &self.tick_volume {
            check_len("tick_volume", n, volume.len())?;
        }
        if let Some(spread) = &self.spread {
            check_len("spread", n, spread.len())?;
        }

        let bars = (0..n)
            .map(|i| Bar {
                timestamp_ns: p.time[i],
                open: p.open[i],
                high: p.high[i],
                low: p.low[i],
                close: p.close[i],
                volume: self.tick_volume.as_ref().map_or(0, |v| v[i]),
                spread: self.spread.as_ref().map_or(0, |v| v[i]),
            })
            .collect();

        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> RawFrame {
        RawFrame {
            time: Some(vec![1, 2]),
            open: Some(vec![1.0, 1.1]),
            high: Some(vec![1.2, 1.3]),
            low: Some(vec![0.9, 1.0]),
            close: Some(vec![1.1, 1.2]),
            tick_volume: None,
            spread: Some(vec![3, 4]),
        }
    }

    #[test]
    fn test_missing_close_is_reported() {
        let mut f = frame();
        f.close = None;
        assert_eq!(
            f.require_prices(),
            Err(DataError::MissingField("close".to_string()))
        );
        assert!(f.to_bars().is_err());
    }

    #[test]
    fn test_optional_columns_default_to_zero() {
        let bars = frame().to_bars().unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].volume, 0);
        assert_eq!(bars[1].spread, 4);
    }

    #[test]
    fn test_length_mismatch() {
        let mut f = frame();
        f.high = Some(vec![1.2]);
        assert_eq!(
            f.to_bars(),
            Err(DataError::ColumnLength {
                column: "high".to_string(),
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_deserialize_accepts_volume_alias() {
        let json = r#"{"time":[1],"open":[1.0],"high":[1.0],"low":[1.0],"close":[1.0],"volume":[7]}"#;
        let f: RawFrame = serde_json::from_str(json).unwrap();
        assert_eq!(f.to_bars().unwrap()[0].volume, 7);
    }

    #[test]
    fn test_from_bars_round_trip() {
        let bars = frame().to_bars().unwrap();
        assert_eq!(RawFrame::from_bars(&bars).to_bars().unwrap(), bars);
    }
}
