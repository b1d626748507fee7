/// Bar interval of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timeframe {
    /// 1 minute
    M1,
    /// 5 minutes
    M5,
    /// 15 minutes
    M15,
    /// 30 minutes
    M30,
    /// 1 hour
    H1,
    /// 4 hours
    H4,
    /// 1 day
    D1,
    /// 1 week
    W1,
}

/// Error parsing a timeframe label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timeframe: {0}")]
pub struct ParseTimeframeError(pub String);

impl Timeframe {
    const ALL: [Timeframe; 8] = [
        Timeframe::M1,
        Timeframe::M5,
        Timeframe::M15,
        Timeframe::M30,
        Timeframe::H1,
        Timeframe::H4,
        Timeframe::D1,
        Timeframe::W1,
    ];

    /// Terminal label (`"H1"`, `"D1"`, ...).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Timeframe::M1 => "M1",
            Timeframe::M5 => "M5",
            Timeframe::M15 => "M15",
            Timeframe::M30 => "M30",
            Timeframe::H1 => "H1",
            Timeframe::H4 => "H4",
            Timeframe::D1 => "D1",
            Timeframe::W1 => "W1",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Timeframe {
    type Err = ParseTimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseTimeframeError(s.to_string()))
    }
}

impl TryFrom<String> for Timeframe {
    type Error = ParseTimeframeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timeframe> for String {
    fn from(tf: Timeframe) -> Self {
        tf.label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_every_label_parses_back() {
        for tf in Timeframe::ALL {
            assert_eq!(tf.label().parse::<Timeframe>(), Ok(tf));
        }
        assert!(Timeframe::M1 < Timeframe::W1);
    }

    #[test]
    fn test_timeframe_parse_is_case_insensitive() {
        assert_eq!(Timeframe::from_str("m15"), Ok(Timeframe::M15));
        assert_eq!(Timeframe::from_str(" D1 "), Ok(Timeframe::D1));
        assert_eq!(
            Timeframe::from_str("H2"),
            Err(ParseTimeframeError("H2".to_string()))
        );
    }

    #[test]
    fn test_timeframe_serde_as_label() {
        let json = serde_json::to_string(&Timeframe::H1).unwrap();
        assert_eq!(json, "\"H1\"");
        let back: Timeframe = serde_json::from_str("\"w1\"").unwrap();
        assert_eq!(back, Timeframe::W1);
        assert!(serde_json::from_str::<Timeframe>("\"X9\"").is_err());
    }
}
