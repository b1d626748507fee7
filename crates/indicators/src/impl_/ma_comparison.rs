//! Close-vs-moving-average category

use std::fmt;

use levelscan_types::Bar;

/// Position of the close relative to a moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaComparison {
    /// close > MA
    Above,
    /// close < MA
    Below,
    /// close == MA
    Equal,
}

impl MaComparison {
    /// Compares `close` against `ma`; `None` while either is undefined.
    #[must_use]
    pub fn classify(close: f64, ma: f64) -> Option<Self> {
        if ma.is_nan() || close.is_nan() {
            None
        } else if close > ma {
            Some(Self::Above)
        } else if close < ma {
            Some(Self::Below)
        } else {
            Some(Self::Equal)
        }
    }

    /// Classifies every bar against the aligned `ma` series.
    #[must_use]
    pub fn series(bars: &[Bar], ma: &[f64]) -> Vec<Option<Self>> {
        bars.iter()
            .zip(ma)
            .map(|(b, m)| Self::classify(b.close, *m))
            .collect()
    }

    /// Output label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::Below => "below",
            Self::Equal => "equal",
        }
    }
}

impl fmt::Display for MaComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
