//! JSON request/response entry point.

use std::num::NonZeroUsize;
use std::str::FromStr;

use levelscan_data::RawFrame;
use levelscan_types::{EngineConfig, Timeframe, Warning};
use serde::{Deserialize, Serialize};

use crate::enrich::Enricher;
use crate::error::{EngineError, ErrorReport};
use crate::row::EnrichedRow;

/// Enrichment request.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichRequest {
    /// Symbol, e.g. `EURUSD`
    pub symbol: String,
    /// Timeframe label, e.g. `H1`
    pub timeframe: String,
    /// Engine configuration; defaults when absent
    #[serde(default)]
    pub config: Option<EngineConfig>,
    /// Bars as columns
    pub bars: RawFrame,
    /// Threads for the SR scan; sequential when absent
    #[serde(default)]
    pub sr_workers: Option<usize>,
}

/// Enrichment response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichResponse {
    /// `false` when `error` is set
    pub ok: bool,
    /// Symbol of the request
    pub symbol: String,
    /// Timeframe of the request
    pub timeframe: String,
    /// Enriched rows
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rows: Option<Vec<EnrichedRow>>,
    /// Non-fatal conditions
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub warnings: Option<Vec<Warning>>,
    /// Failure description
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<ErrorReport>,
}

/// Main entry point: receives request JSON, returns response JSON.
///
/// Data and runtime failures are reported inside the response with
/// `ok: false`.
///
/// # Errors
/// - [`EngineError::ConfigParse`] when JSON parsing fails.
/// - [`EngineError::ConfigValidation`] for an invalid timeframe or configuration.
/// - [`EngineError::ResultSerialize`] when the response cannot be written.
pub fn run_from_json(request_json: &str) -> Result<String, EngineError> {
    let request: EnrichRequest = serde_json::from_str(request_json)
        .map_err(|e| EngineError::ConfigParse(e.to_string()))?;

    let timeframe = Timeframe::from_str(&request.timeframe).map_err(|_| {
        EngineError::ConfigValidation(format!("invalid timeframe '{}'", request.timeframe))
    })?;
    if request.symbol.trim().is_empty() {
        return Err(EngineError::ConfigValidation("symbol is empty".to_string()));
    }

    let mut enricher = Enricher::new(request.config.unwrap_or_default())?;
    match request.sr_workers.map(NonZeroUsize::new) {
        Some(Some(workers)) => enricher = enricher.with_sr_workers(workers),
        Some(None) => {
            return Err(EngineError::ConfigValidation(
                "sr_workers must be > 0".to_string(),
            ));
        }
        None => {}
    }

    let response = match enricher.enrich_frame(&request.symbol, timeframe, &request.bars) {
        Ok(series) => EnrichResponse {
            ok: true,
            symbol: series.symbol,
            timeframe: timeframe.to_string(),
            rows: Some(series.rows),
            warnings: Some(series.warnings),
            error: None,
        },
        Err(err) => {
            tracing::warn!(symbol = %request.symbol, "enrichment failed: {err}");
            EnrichResponse {
                ok: false,
                symbol: request.symbol,
                timeframe: timeframe.to_string(),
                rows: None,
                warnings: None,
                error: Some(ErrorReport::from(err)),
            }
        }
    };

    serde_json::to_string(&response).map_err(|e| EngineError::ResultSerialize(e.to_string()))
}
