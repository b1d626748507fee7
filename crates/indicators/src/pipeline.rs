//! Indicator pipeline: every configured indicator over one bar series.

use levelscan_types::{Bar, EngineConfig, Warning};

use crate::cache::IndicatorCache;
use crate::error::IndicatorError;
use crate::impl_::{
    atr::ATR,
    bollinger::{BollingerBands, BollingerResult},
    green_ratio::GreenRatio,
    ma_comparison::MaComparison,
    rsi::RSI,
    sma::SMA,
};
use crate::traits::{Indicator, IndicatorParams, MultiOutputIndicator};

/// Bollinger outputs of one setting.
#[derive(Debug, Clone, PartialEq)]
pub struct BandColumns {
    /// Column prefix (e.g. `BB20`)
    pub label: String,
    /// Upper, middle and lower band
    pub bands: BollingerResult,
    /// close > upper
    pub above: Vec<bool>,
    /// close < lower
    pub below: Vec<bool>,
}

/// A rolling output keyed by its window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowColumn {
    /// Rolling window
    pub window: usize,
    /// One value per bar, NaN during warm-up
    pub values: Vec<f64>,
}

/// Close-vs-MA categories for one window.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonColumn {
    /// MA window
    pub window: usize,
    /// One category per bar, `None` during warm-up
    pub values: Vec<Option<MaComparison>>,
}

/// Column-oriented indicator output, every column as long as the input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndicatorFrame {
    /// RSI
    pub rsi: Vec<f64>,
    /// ATR
    pub atr: Vec<f64>,
    /// One group per Bollinger setting, in configuration order
    pub bollinger: Vec<BandColumns>,
    /// Simple moving averages, in `ma_windows` order
    pub moving_averages: Vec<WindowColumn>,
    /// Close-vs-MA categories, in `ma_comparison_windows` order
    pub comparisons: Vec<ComparisonColumn>,
    /// Green-candle ratios, in `green_windows` order
    pub green_ratios: Vec<WindowColumn>,
}

/// Bollinger values of one setting at one bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BandRow {
    /// Column prefix
    pub label: String,
    /// Upper band
    pub upper: Option<f64>,
    /// Middle band
    pub middle: Option<f64>,
    /// Lower band
    pub lower: Option<f64>,
    /// close > upper
    pub above: bool,
    /// close < lower
    pub below: bool,
}

/// Indicator values of one bar. `None` marks a value still in warm-up or
/// spoiled by a bar with a bad price.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    /// RSI
    pub rsi: Option<f64>,
    /// ATR
    pub atr: Option<f64>,
    /// Bollinger groups
    pub bands: Vec<BandRow>,
    /// `(window, MA)`
    pub moving_averages: Vec<(usize, Option<f64>)>,
    /// `(window, category)`
    pub comparisons: Vec<(usize, Option<MaComparison>)>,
    /// `(window, green ratio)`
    pub green_ratios: Vec<(usize, Option<f64>)>,
}

fn defined(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

impl IndicatorFrame {
    /// Number of bars covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.atr.len()
    }

    /// Returns `true` for an empty input series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atr.is_empty()
    }

    /// Values of bar `i`, or `None` past the end.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<IndicatorRow> {
        if i >= self.len() {
            return None;
        }
        Some(IndicatorRow {
            rsi: defined(self.rsi[i]),
            atr: defined(self.atr[i]),
            bands: self
                .bollinger
                .iter()
                .map(|g| BandRow {
                    label: g.label.clone(),
                    upper: defined(g.bands.upper[i]),
                    middle: defined(g.bands.middle[i]),
                    lower: defined(g.bands.lower[i]),
                    above: g.above[i],
                    below: g.below[i],
                })
                .collect(),
            moving_averages: self
                .moving_averages
                .iter()
                .map(|c| (c.window, defined(c.values[i])))
                .collect(),
            comparisons: self
                .comparisons
                .iter()
                .map(|c| (c.window, c.values[i]))
                .collect(),
            green_ratios: self
                .green_ratios
                .iter()
                .map(|c| (c.window, defined(c.values[i])))
                .collect(),
        })
    }
}

/// Indicator frame plus the warnings raised while computing it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndicatorOutput {
    /// Computed columns
    pub frame: IndicatorFrame,
    /// One [`Warning::InsufficientLookback`] per output that never leaves warm-up
    pub warnings: Vec<Warning>,
}

/// Computes every indicator of an [`EngineConfig`] in one forward pass per indicator.
#[derive(Debug, Clone)]
pub struct IndicatorPipeline {
    config: EngineConfig,
}

impl IndicatorPipeline {
    /// Creates a pipeline for a validated configuration.
    ///
    /// # Errors
    /// [`IndicatorError::Config`] when the configuration is rejected.
    pub fn new(config: EngineConfig) -> Result<Self, IndicatorError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes all indicators for `bars`.
    ///
    /// Never fails: outputs whose window exceeds the series stay NaN and
    /// are reported as warnings.
    #[must_use]
    pub fn compute(&self, bars: &[Bar]) -> IndicatorOutput {
        let cfg = &self.config;
        let mut cache = IndicatorCache::with_capacity(
            2 + 3 * cfg.bollinger_settings.len() + cfg.ma_windows.len() + cfg.green_windows.len(),
        );
        let mut warnings = Vec::new();
        let mut check = |output: String, required: usize| {
            if !bars.is_empty() && bars.len() < required {
                warnings.push(Warning::InsufficientLookback {
                    output,
                    required,
                    available: bars.len(),
                });
            }
        };

        let rsi = RSI::new(cfg.rsi_period);
        check(rsi.name().to_string(), rsi.warmup_periods());
        let rsi = cache
            .get_or_compute(IndicatorParams::Period(cfg.rsi_period), bars, &rsi)
            .to_vec();

        let atr = ATR::new(cfg.atr_period);
        check(atr.name().to_string(), atr.warmup_periods());
        let atr = cache
            .get_or_compute(IndicatorParams::Period(cfg.atr_period), bars, &atr)
            .to_vec();

        let mut bollinger = Vec::with_capacity(cfg.bollinger_settings.len());
        for setting in &cfg.bollinger_settings {
            let bb = BollingerBands::new(setting.window, setting.deviation);
            check(setting.label.clone(), bb.warmup_periods());
            let params = IndicatorParams::bollinger(setting.window, setting.deviation);
            let mut outputs = cache.get_or_compute_multi(params, bars, &bb).into_iter();
            let bands = BollingerResult::from_vecs(
                outputs.next().unwrap_or_default(),
                outputs.next().unwrap_or_default(),
                outputs.next().unwrap_or_default(),
            );
            bollinger.push(BandColumns {
                label: setting.label.clone(),
                above: bands.above_upper(bars),
                below: bands.below_lower(bars),
                bands,
            });
        }

        let mut moving_averages = Vec::with_capacity(cfg.ma_windows.len());
        for &window in &cfg.ma_windows {
            let sma = SMA::new(window);
            check(format!("{}_{window}", sma.name()), sma.warmup_periods());
            let values = cache
                .get_or_compute(IndicatorParams::Period(window), bars, &sma)
                .to_vec();
            moving_averages.push(WindowColumn { window, values });
        }

        // validated: every comparison window is one of the MA windows
        let comparisons = cfg
            .ma_comparison_windows
            .iter()
            .map(|&window| {
                let ma = cache.get_or_compute(IndicatorParams::Period(window), bars, &SMA::new(window));
                ComparisonColumn {
                    window,
                    values: MaComparison::series(bars, ma),
                }
            })
            .collect();

        let mut green_ratios = Vec::with_capacity(cfg.green_windows.len());
        for &window in &cfg.green_windows {
            let ga = GreenRatio::new(window);
            check(format!("{}_{window}", ga.name()), ga.warmup_periods());
            let values = cache
                .get_or_compute(IndicatorParams::Period(window), bars, &ga)
                .to_vec();
            green_ratios.push(WindowColumn { window, values });
        }

        tracing::debug!(
            bars = bars.len(),
            cached_series = cache.len(),
            warnings = warnings.len(),
            "indicators computed"
        );

        IndicatorOutput {
            frame: IndicatorFrame {
                rsi,
                atr,
                bollinger,
                moving_averages,
                comparisons,
                green_ratios,
            },
            warnings,
        }
    }
}
