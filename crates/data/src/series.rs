//! Validated bar series for one symbol/timeframe pair.

use levelscan_types::{Bar, Quote, Timeframe, pip_size};

use crate::error::DataError;
use crate::frame::RawFrame;
use crate::validation::{validate_bars, validate_continuation};

/// Ordered, validated bars of one symbol/timeframe.
///
/// Immutable once built; [`BarSeries::extended`] returns a new series.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    symbol: String,
    timeframe: Timeframe,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Validates `bars` and wraps them.
    ///
    /// # Errors
    /// [`DataError::InvalidSymbol`] for an empty symbol, otherwise any
    /// error of [`validate_bars`].
    pub fn new(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        bars: Vec<Bar>,
    ) -> Result<Self, DataError> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(DataError::InvalidSymbol(symbol));
        }
        validate_bars(&bars)?;

        tracing::debug!(symbol = %symbol, timeframe = %timeframe, bars = bars.len(), "bar series built");

        Ok(Self {
            symbol,
            timeframe,
            bars,
        })
    }

    /// Builds a series from column input.
    ///
    /// # Errors
    /// Column errors of [`RawFrame::to_bars`] or validation errors.
    pub fn from_frame(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        frame: &RawFrame,
    ) -> Result<Self, DataError> {
        Self::new(symbol, timeframe, frame.to_bars()?)
    }

    /// Returns a new series with `more` appended.
    ///
    /// # Errors
    /// Validation errors for the new bars; the first must be strictly
    /// later than the current last bar.
    pub fn extended(&self, more: &[Bar]) -> Result<Self, DataError> {
        validate_continuation(self.bars.last(), more, self.bars.len())?;
        let mut bars = Vec::with_capacity(self.bars.len() + more.len());
        bars.extend_from_slice(&self.bars);
        bars.extend_from_slice(more);
        Ok(Self {
            symbol: self.symbol.clone(),
            timeframe: self.timeframe,
            bars,
        })
    }

    /// Symbol, e.g. `EURUSD`.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Bar interval.
    #[must_use]
    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Series key, e.g. `EURUSD_H1`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}_{}", self.symbol, self.timeframe)
    }

    /// Bars, oldest first.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns `true` if there are no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Timestamp of the newest bar.
    #[must_use]
    pub fn last_timestamp(&self) -> Option<i64> {
        self.bars.last().map(|b| b.timestamp_ns)
    }

    /// Pip size of the symbol.
    #[must_use]
    pub fn pip_size(&self) -> f64 {
        pip_size(&self.symbol)
    }

    /// Bid/ask per bar.
    #[must_use]
    pub fn quotes(&self) -> Vec<Quote> {
        let pip = self.pip_size();
        self.bars.iter().map(|b| Quote::from_bar(b, pip)).collect()
    }
}
