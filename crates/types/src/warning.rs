use std::fmt;

/// Non-fatal conditions reported next to a computed output.
///
/// Warnings never abort a run; the affected fields are left undefined
/// (indicators) or absent (SR levels).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Series is shorter than a window; every value of that output is undefined.
    InsufficientLookback {
        /// Output that could not leave warm-up (e.g. `MA_200`, `sr`)
        output: String,
        /// Window length required
        required: usize,
        /// Bars available
        available: usize,
    },
    /// Bar skipped by the SR scan because its ATR is undefined or zero.
    DegenerateVolatility {
        /// Bar index
        index: usize,
    },
    /// Bar with a non-finite price or a failed SR scan; both levels are absent.
    FaultyBar {
        /// Bar index
        index: usize,
        /// Failure description
        reason: String,
    },
}

impl Warning {
    /// Bar index the warning refers to, if it is bar-specific.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::InsufficientLookback { .. } => None,
            Self::DegenerateVolatility { index } | Self::FaultyBar { index, .. } => Some(*index),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientLookback {
                output,
                required,
                available,
            } => write!(
                f,
                "insufficient lookback for {output}: need {required} bars, have {available}"
            ),
            Self::DegenerateVolatility { index } => {
                write!(f, "undefined or zero ATR at bar {index}, SR search skipped")
            }
            Self::FaultyBar { index, reason } => write!(f, "faulty bar {index}: {reason}"),
        }
    }
}
