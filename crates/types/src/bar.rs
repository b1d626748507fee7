/// One OHLC observation for a fixed interval.
/// `timestamp_ns` is the **open time** of the bar.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bar {
    /// Unix epoch nanoseconds UTC (open time)
    #[serde(rename = "time")]
    pub timestamp_ns: i64,
    /// Open price
    #[serde(deserialize_with = "crate::nullable::price")]
    pub open: f64,
    /// High price
    #[serde(deserialize_with = "crate::nullable::price")]
    pub high: f64,
    /// Low price
    #[serde(deserialize_with = "crate::nullable::price")]
    pub low: f64,
    /// Close price
    #[serde(deserialize_with = "crate::nullable::price")]
    pub close: f64,
    /// Tick volume
    #[serde(rename = "tick_volume", alias = "volume", default)]
    pub volume: i64,
    /// Spread in points
    #[serde(default)]
    pub spread: i64,
}

impl Bar {
    /// Full candle range (`high - low`).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// A green candle closes strictly above its open.
    #[must_use]
    pub fn is_green(&self) -> bool {
        self.close > self.open
    }

    /// True when all four prices are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.open.is_finite() && self.high.is_finite() && self.low.is_finite() && self.close.is_finite()
    }
}
