//! Indicator cache for avoiding redundant computations.

use crate::traits::{Indicator, IndicatorParams, IndicatorSpec, IntoMultiVecs, MultiOutputIndicator};
use levelscan_types::Bar;
use std::collections::{HashMap, hash_map::Entry};

/// Cache for computed indicator values of one bar series.
///
/// Entries are keyed by the indicator's name and parameters. A cache must
/// not be shared between series; create one per pipeline run.
#[derive(Debug, Default)]
pub struct IndicatorCache {
    cache: HashMap<IndicatorSpec, Vec<f64>>,
}

impl IndicatorCache {
    /// Creates a cache with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: HashMap::with_capacity(capacity),
        }
    }

    /// Gets or computes a single-output indicator.
    pub fn get_or_compute(
        &mut self,
        params: IndicatorParams,
        bars: &[Bar],
        indicator: &dyn Indicator,
    ) -> &[f64] {
        let spec = IndicatorSpec::new(indicator.name(), params);
        let values = match self.cache.entry(spec) {
            Entry::Occupied(entry) => {
                tracing::debug!(indicator = %entry.key().name, "indicator cache hit");
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(indicator.compute(bars)),
        };
        values.as_slice()
    }

    /// Gets or computes a multi-output indicator.
    ///
    /// Computes all outputs together and caches each one under
    /// `name + "_" + output_name`. Returns the outputs in
    /// `output_names()` order.
    pub fn get_or_compute_multi<T>(
        &mut self,
        params: IndicatorParams,
        bars: &[Bar],
        indicator: &T,
    ) -> Vec<Vec<f64>>
    where
        T: MultiOutputIndicator,
    {
        let base_spec = IndicatorSpec::new(indicator.name(), params);
        let keys: Vec<IndicatorSpec> = indicator
            .output_names()
            .iter()
            .map(|name| base_spec.with_output_suffix(name))
            .collect();

        if keys.iter().all(|k| self.cache.contains_key(k)) {
            tracing::debug!(indicator = %base_spec.name, "indicator cache hit");
        } else {
            let vecs = indicator.compute_all(bars).into_vecs();
            for (key, vec) in keys.iter().cloned().zip(vecs) {
                self.cache.insert(key, vec);
            }
        }

        keys.iter()
            .map(|k| self.cache.get(k).cloned().unwrap_or_default())
            .collect()
    }

    /// Number of cached series.
    pub(crate) fn len(&self) -> usize {
        self.cache.len()
    }
}
