//! Concurrent enrichment of independent series.

use std::num::NonZeroUsize;
use std::thread;

use levelscan_data::RawFrame;
use levelscan_types::Timeframe;

use crate::enrich::{EnrichedSeries, Enricher};
use crate::error::EngineError;

/// One series to enrich.
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Symbol, e.g. `EURUSD`
    pub symbol: String,
    /// Bar interval
    pub timeframe: Timeframe,
    /// Bars as columns
    pub frame: RawFrame,
}

impl BatchInput {
    /// Series key, e.g. `EURUSD_H1`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}_{}", self.symbol, self.timeframe)
    }
}

/// Outcome of one series in a batch.
#[derive(Debug)]
pub struct BatchItem {
    /// Series key
    pub key: String,
    /// Enriched series or the error that stopped it
    pub result: Result<EnrichedSeries, EngineError>,
}

/// Enriches every input, at most `workers` series at a time.
///
/// Series share only the read-only [`Enricher`]. A failing (or panicking)
/// series yields an error item and does not affect the others. Items are
/// returned in input order.
#[must_use]
pub fn enrich_batch(
    enricher: &Enricher,
    inputs: &[BatchInput],
    workers: NonZeroUsize,
) -> Vec<BatchItem> {
    let mut items = Vec::with_capacity(inputs.len());

    for group in inputs.chunks(workers.get()) {
        thread::scope(|scope| {
            let handles: Vec<_> = group
                .iter()
                .map(|input| {
                    let handle = scope.spawn(move || {
                        enricher.enrich_frame(&input.symbol, input.timeframe, &input.frame)
                    });
                    (input.key(), handle)
                })
                .collect();

            for (key, handle) in handles {
                let result = handle.join().unwrap_or_else(|_| {
                    Err(EngineError::Runtime(format!("worker for {key} panicked")))
                });
                if let Err(err) = &result {
                    tracing::warn!(series = %key, category = err.error_category(), "series failed: {err}");
                }
                items.push(BatchItem { key, result });
            }
        });
    }

    tracing::info!(
        series = items.len(),
        failed = items.iter().filter(|i| i.result.is_err()).count(),
        "batch finished"
    );

    items
}
