//! Per-bar support/resistance scan over a whole series.

use std::num::NonZeroUsize;
use std::thread;

use levelscan_types::{Bar, SrParams, Warning};

use crate::error::SrError;
use crate::level::SrLevel;
use crate::search::SearchContext;
use crate::touch::TouchMode;

/// Levels for every bar plus the warnings raised on the way.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SrOutput {
    /// One entry per input bar
    pub levels: Vec<SrLevel>,
    /// Lookback shortfall, undefined or zero ATR bars and faulty bars, in bar order
    pub warnings: Vec<Warning>,
}

impl SrOutput {
    /// Upper levels as a column.
    #[must_use]
    pub fn upper(&self) -> Vec<Option<f64>> {
        self.levels.iter().map(|l| l.upper).collect()
    }

    /// Lower levels as a column.
    #[must_use]
    pub fn lower(&self) -> Vec<Option<f64>> {
        self.levels.iter().map(|l| l.lower).collect()
    }
}

/// Result of scanning one bar.
enum BarScan {
    Levels(SrLevel),
    Skipped(Option<Warning>),
}

/// Support/resistance engine for one parameter set.
///
/// Holds no state between bars; the same engine can scan many series.
#[derive(Debug, Clone, Copy)]
pub struct SrEngine {
    params: SrParams,
}

impl SrEngine {
    /// Creates an engine after validating `params`.
    ///
    /// # Errors
    /// [`SrError::Config`] for rejected parameters.
    pub fn new(params: SrParams) -> Result<Self, SrError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Parameters in use.
    #[must_use]
    pub fn params(&self) -> &SrParams {
        &self.params
    }

    /// Scans every bar sequentially.
    ///
    /// `atr` must be aligned with `bars`. A NaN past the lookback is reported
    /// as [`Warning::DegenerateVolatility`], like a zero ATR.
    ///
    /// # Errors
    /// [`SrError::LengthMismatch`] when the columns differ in length.
    /// Failures at a single bar, including a bar with a non-finite price,
    /// are reported as [`Warning::FaultyBar`] for that bar only.
    pub fn compute(&self, bars: &[Bar], atr: &[f64]) -> Result<SrOutput, SrError> {
        self.check_lengths(bars, atr)?;
        let scans = self.scan_range(bars, atr, 0, bars.len());
        Ok(self.collect(bars.len(), scans))
    }

    /// Scans the bars on up to `workers` scoped threads.
    ///
    /// Output is identical to [`SrEngine::compute`].
    ///
    /// # Errors
    /// Same as [`SrEngine::compute`].
    pub fn compute_parallel(
        &self,
        bars: &[Bar],
        atr: &[f64],
        workers: NonZeroUsize,
    ) -> Result<SrOutput, SrError> {
        self.check_lengths(bars, atr)?;
        let len = bars.len();
        let chunk = len.div_ceil(workers.get()).max(1);

        let scans = thread::scope(|scope| {
            let handles: Vec<_> = (0..len)
                .step_by(chunk)
                .map(|start| {
                    let end = (start + chunk).min(len);
                    scope.spawn(move || self.scan_range(bars, atr, start, end))
                })
                .collect();

            let mut scans = Vec::with_capacity(len);
            for handle in handles {
                match handle.join() {
                    Ok(part) => scans.extend(part),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            scans
        });

        Ok(self.collect(len, scans))
    }

    /// Levels at bar `i`.
    ///
    /// Bars without a full lookback window or with an undefined or zero
    /// ATR get no levels.
    ///
    /// # Errors
    /// - [`SrError::LengthMismatch`] when the columns differ in length.
    /// - [`SrError::IndexOutOfRange`] when `i` is past the last bar.
    /// - [`SrError::InvalidAtr`] / [`SrError::NonFinitePrice`] for bad input at `i`.
    pub fn level_at(&self, bars: &[Bar], atr: &[f64], i: usize) -> Result<SrLevel, SrError> {
        self.check_lengths(bars, atr)?;
        if i >= bars.len() {
            return Err(SrError::IndexOutOfRange {
                index: i,
                len: bars.len(),
            });
        }
        match self.scan_bar(bars, atr, i)? {
            BarScan::Levels(level) => Ok(level),
            BarScan::Skipped(_) => Ok(SrLevel::NONE),
        }
    }

    fn check_lengths(&self, bars: &[Bar], atr: &[f64]) -> Result<(), SrError> {
        if bars.len() == atr.len() {
            Ok(())
        } else {
            Err(SrError::LengthMismatch {
                bars: bars.len(),
                atr: atr.len(),
            })
        }
    }

    fn scan_range(
        &self,
        bars: &[Bar],
        atr: &[f64],
        start: usize,
        end: usize,
    ) -> Vec<Result<BarScan, SrError>> {
        (start..end).map(|i| self.scan_bar(bars, atr, i)).collect()
    }

    fn scan_bar(&self, bars: &[Bar], atr: &[f64], i: usize) -> Result<BarScan, SrError> {
        if !bars[i].is_finite() {
            return Err(SrError::NonFinitePrice { index: i });
        }

        let lookback = self.params.lookback_period;
        if i < lookback {
            return Ok(BarScan::Skipped(None));
        }

        let atr_i = atr[i];
        if atr_i.is_infinite() || atr_i < 0.0 {
            return Err(SrError::InvalidAtr {
                index: i,
                value: atr_i,
            });
        }
        if atr_i.is_nan() || atr_i == 0.0 {
            tracing::debug!(index = i, atr = atr_i, "undefined or zero ATR, SR search skipped");
            return Ok(BarScan::Skipped(Some(Warning::DegenerateVolatility {
                index: i,
            })));
        }

        // window bars with bad prices are ignored by the search
        let window = &bars[i - lookback..i];
        let ctx = SearchContext::new(window, bars[i].open, atr_i, &self.params);
        Ok(BarScan::Levels(SrLevel::from_searches(
            ctx.search(&self.params, TouchMode::Upper),
            ctx.search(&self.params, TouchMode::Lower),
        )))
    }

    fn collect(&self, len: usize, scans: Vec<Result<BarScan, SrError>>) -> SrOutput {
        let mut warnings = Vec::new();
        let lookback = self.params.lookback_period;
        if len > 0 && len <= lookback {
            warnings.push(Warning::InsufficientLookback {
                output: "SR".to_string(),
                required: lookback + 1,
                available: len,
            });
        }

        let mut levels = Vec::with_capacity(len);
        for (i, scan) in scans.into_iter().enumerate() {
            match scan {
                Ok(BarScan::Levels(level)) => levels.push(level),
                Ok(BarScan::Skipped(warning)) => {
                    warnings.extend(warning);
                    levels.push(SrLevel::NONE);
                }
                Err(err) => {
                    tracing::warn!(index = i, error = %err, "SR scan failed for bar");
                    warnings.push(Warning::FaultyBar {
                        index: i,
                        reason: err.to_string(),
                    });
                    levels.push(SrLevel::NONE);
                }
            }
        }

        tracing::debug!(
            bars = len,
            with_levels = levels.iter().filter(|l| l.any()).count(),
            warnings = warnings.len(),
            "SR scan finished"
        );

        SrOutput { levels, warnings }
    }
}
