//! Serde helpers for prices that may be missing.
//!
//! `serde_json` writes non-finite floats as `null`. These helpers read
//! `null` back as NaN, so a bar with a bad price survives a round trip.

use serde::{Deserialize, Deserializer};

/// Reads a price, mapping `null` to NaN.
///
/// # Errors
/// Any deserializer error other than `null`.
pub fn price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Reads an optional price column, mapping `null` entries to NaN.
///
/// # Errors
/// Any deserializer error other than `null` entries.
pub fn price_column<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<f64>>, D::Error> {
    let column = Option::<Vec<Option<f64>>>::deserialize(deserializer)?;
    Ok(column.map(|values| values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()))
}
