//! End-to-end enrichment of one bar series.

use std::num::NonZeroUsize;

use levelscan_data::{BarSeries, RawFrame};
use levelscan_indicators::IndicatorPipeline;
use levelscan_sr::SrEngine;
use levelscan_types::{Bar, EngineConfig, Timeframe, Warning};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::row::EnrichedRow;

/// Enriched rows of one series plus the warnings raised for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedSeries {
    /// Symbol, e.g. `EURUSD`
    pub symbol: String,
    /// Bar interval
    pub timeframe: Timeframe,
    /// One row per input bar, oldest first
    pub rows: Vec<EnrichedRow>,
    /// Non-fatal conditions, indicators first, then SR in bar order
    pub warnings: Vec<Warning>,
}

impl EnrichedSeries {
    /// Series key, e.g. `EURUSD_H1`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}_{}", self.symbol, self.timeframe)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Input bars of the rows.
    #[must_use]
    pub fn bars(&self) -> Vec<Bar> {
        self.rows.iter().map(|r| r.bar).collect()
    }
}

/// Runs the indicator pipeline and the SR engine for one configuration.
///
/// Read-only after construction, so one instance can serve many series
/// concurrently.
#[derive(Debug, Clone)]
pub struct Enricher {
    pipeline: IndicatorPipeline,
    sr: SrEngine,
    sr_workers: Option<NonZeroUsize>,
}

impl Enricher {
    /// Validates `config` and builds both stages.
    ///
    /// # Errors
    /// [`EngineError::ConfigValidation`] for a rejected configuration.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let sr = SrEngine::new(config.sr_params)?;
        let pipeline = IndicatorPipeline::new(config)?;
        Ok(Self {
            pipeline,
            sr,
            sr_workers: None,
        })
    }

    /// Splits the SR scan of each series across `workers` threads.
    #[must_use]
    pub fn with_sr_workers(mut self, workers: NonZeroUsize) -> Self {
        self.sr_workers = Some(workers);
        self
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        self.pipeline.config()
    }

    /// Enriches column input after checking the required fields.
    ///
    /// # Errors
    /// [`EngineError::Data`] for missing fields or invalid bars, before any
    /// indicator runs.
    pub fn enrich_frame(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        frame: &RawFrame,
    ) -> Result<EnrichedSeries, EngineError> {
        frame.require_prices()?;
        let series = BarSeries::from_frame(symbol, timeframe, frame)?;
        self.enrich(&series)
    }

    /// Computes indicators and SR levels for every bar of `series`.
    ///
    /// The output has exactly one row per bar, in input order.
    ///
    /// # Errors
    /// Only structural failures; per-bar problems become warnings.
    pub fn enrich(&self, series: &BarSeries) -> Result<EnrichedSeries, EngineError> {
        let bars = series.bars();
        let indicators = self.pipeline.compute(bars);
        let atr = &indicators.frame.atr;
        let sr = match self.sr_workers {
            Some(workers) => self.sr.compute_parallel(bars, atr, workers)?,
            None => self.sr.compute(bars, atr)?,
        };

        let quotes = series.quotes();
        let rows: Vec<EnrichedRow> = bars
            .iter()
            .zip(&quotes)
            .zip(&sr.levels)
            .enumerate()
            .filter_map(|(i, ((bar, quote), level))| {
                indicators
                    .frame
                    .row(i)
                    .map(|ind| EnrichedRow::new(*bar, *quote, ind, *level))
            })
            .collect();

        if rows.len() != bars.len() {
            return Err(EngineError::Runtime(format!(
                "{} rows built for {} bars",
                rows.len(),
                bars.len()
            )));
        }

        let mut warnings = indicators.warnings;
        warnings.extend(sr.warnings);
        for warning in &warnings {
            tracing::warn!(series = %series.key(), "{warning}");
        }

        tracing::info!(
            series = %series.key(),
            bars = rows.len(),
            upper_levels = rows.iter().filter(|r| r.upper_sr.is_some()).count(),
            lower_levels = rows.iter().filter(|r| r.lower_sr.is_some()).count(),
            warnings = warnings.len(),
            "series enriched"
        );

        Ok(EnrichedSeries {
            symbol: series.symbol().to_string(),
            timeframe: series.timeframe(),
            rows,
            warnings,
        })
    }
}
