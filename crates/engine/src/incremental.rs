//! Extending previously enriched rows with newly arrived bars.

use levelscan_data::BarSeries;
use levelscan_types::Bar;

use crate::enrich::{EnrichedSeries, Enricher};
use crate::error::EngineError;

impl Enricher {
    /// Appends `new_bars` to an already enriched series.
    ///
    /// Existing rows are returned unchanged; only rows for the new bars are
    /// added. Every value at a bar depends on that bar and earlier ones
    /// only, so the result equals enriching the combined series from
    /// scratch. Warnings are kept for the new rows only.
    ///
    /// # Errors
    /// - [`EngineError::Append`] when a new bar is not strictly later than
    ///   the last existing row.
    /// - Data errors for invalid existing rows or new bars.
    pub fn append(
        &self,
        previous: &EnrichedSeries,
        new_bars: &[Bar],
    ) -> Result<EnrichedSeries, EngineError> {
        let base = BarSeries::new(previous.symbol.clone(), previous.timeframe, previous.bars())?;
        if let (Some(last), Some(first)) = (base.last_timestamp(), new_bars.first())
            && first.timestamp_ns <= last
        {
            return Err(EngineError::Append(format!(
                "first new bar at {} is not after last row at {last}",
                first.timestamp_ns
            )));
        }
        let combined = base.extended(new_bars)?;
        let fresh = self.enrich(&combined)?;

        let kept = previous.len();
        let mut rows = previous.rows.clone();
        rows.extend(fresh.rows.into_iter().skip(kept));

        let warnings = fresh
            .warnings
            .into_iter()
            .filter(|w| w.index().is_none_or(|i| i >= kept))
            .collect();

        tracing::debug!(
            series = %combined.key(),
            kept,
            appended = new_bars.len(),
            "series extended"
        );

        Ok(EnrichedSeries {
            symbol: previous.symbol.clone(),
            timeframe: previous.timeframe,
            rows,
            warnings,
        })
    }
}
