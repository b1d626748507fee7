//! Levelscan Engine
//!
//! Enriches bar series with indicators and support/resistance levels and
//! writes them as rows with the persisted column names.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

pub mod batch;
pub mod enrich;
pub mod error;
pub mod incremental;
pub mod row;
pub mod runner;

pub use batch::{BatchInput, BatchItem, enrich_batch};
pub use enrich::{EnrichedSeries, Enricher};
pub use error::{EngineError, ErrorReport};
pub use row::{Cell, EnrichedRow, Unpopulated};
pub use runner::{EnrichRequest, EnrichResponse, run_from_json};
