//! Bar series validation.

use crate::error::DataError;
use levelscan_types::Bar;

/// Validates a sequence of bars.
///
/// An empty sequence is valid. Non-finite prices are accepted: they are a
/// per-bar fault that the indicator and SR stages step over, not a reason
/// to reject the series.
///
/// # Errors
/// - [`DataError::CorruptData`] for a broken OHLC ordering between finite
///   prices or a negative volume/spread.
/// - [`DataError::DuplicateTimestamp`] / [`DataError::NonMonotonicTime`]
///   when `time` does not strictly increase.
pub fn validate_bars(bars: &[Bar]) -> Result<(), DataError> {
    validate_continuation(None, bars, 0)
}

/// Validates `bars` as a continuation of a series ending at `previous`.
///
/// `offset` is the index of `bars[0]` in the combined series and is only
/// used for error messages.
///
/// # Errors
/// Same as [`validate_bars`]; the first new bar must be strictly later
/// than `previous`.
pub fn validate_continuation(
    previous: Option<&Bar>,
    bars: &[Bar],
    offset: usize,
) -> Result<(), DataError> {
    let mut prev_ts = previous.map(|b| b.timestamp_ns);

    for (i, bar) in bars.iter().enumerate() {
        let index = offset + i;
        validate_bar(index, bar)?;

        if let Some(prev) = prev_ts {
            if bar.timestamp_ns == prev {
                return Err(DataError::DuplicateTimestamp {
                    index,
                    timestamp: prev,
                });
            }
            if bar.timestamp_ns < prev {
                return Err(DataError::NonMonotonicTime {
                    index,
                    previous: prev,
                    current: bar.timestamp_ns,
                });
            }
        }
        prev_ts = Some(bar.timestamp_ns);
    }

    Ok(())
}

fn validate_bar(index: usize, bar: &Bar) -> Result<(), DataError> {
    if !bar.is_finite() {
        tracing::debug!(index, "bar with non-finite price accepted");
    } else if bar.low > bar.open
        || bar.low > bar.close
        || bar.high < bar.open
        || bar.high < bar.close
        || bar.low > bar.high
    {
        return Err(DataError::CorruptData(format!(
            "Invalid OHLC at index {index}: low={}, high={}, open={}, close={}",
            bar.low, bar.high, bar.open, bar.close
        )));
    }

    if bar.volume < 0 {
        return Err(DataError::CorruptData(format!(
            "Negative volume at index {index}: {}",
            bar.volume
        )));
    }

    if bar.spread < 0 {
        return Err(DataError::CorruptData(format!(
            "Negative spread at index {index}: {}",
            bar.spread
        )));
    }

    Ok(())
}
