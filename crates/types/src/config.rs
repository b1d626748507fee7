use std::collections::HashSet;

use crate::error::CoreError;

/// Full parameter set for one enrichment run.
///
/// Shared read-only by every series of a run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// RSI window
    #[serde(default = "default_period")]
    pub rsi_period: usize,
    /// ATR window
    #[serde(default = "default_period")]
    pub atr_period: usize,
    /// Bollinger band settings, one output group per entry
    #[serde(default = "default_bollinger_settings")]
    pub bollinger_settings: Vec<BollingerSetting>,
    /// Simple moving average windows over close
    #[serde(default = "default_ma_windows")]
    pub ma_windows: Vec<usize>,
    /// Windows (subset of `ma_windows`) that get a close-vs-MA category
    #[serde(default = "default_ma_comparison_windows")]
    pub ma_comparison_windows: Vec<usize>,
    /// Green-candle ratio windows
    #[serde(default = "default_green_windows")]
    pub green_windows: Vec<usize>,
    /// Support/resistance search parameters
    #[serde(default)]
    pub sr_params: SrParams,
}

fn default_period() -> usize {
    14
}

fn default_bollinger_settings() -> Vec<BollingerSetting> {
    vec![
        BollingerSetting::new(20, 1.5, "BB15"),
        BollingerSetting::new(20, 2.0, "BB20"),
        BollingerSetting::new(20, 2.5, "BB25"),
    ]
}

fn default_ma_windows() -> Vec<usize> {
    vec![7, 21, 50, 200]
}

fn default_ma_comparison_windows() -> Vec<usize> {
    vec![7, 21, 50]
}

fn default_green_windows() -> Vec<usize> {
    vec![50, 100, 200, 500]
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rsi_period: default_period(),
            atr_period: default_period(),
            bollinger_settings: default_bollinger_settings(),
            ma_windows: default_ma_windows(),
            ma_comparison_windows: default_ma_comparison_windows(),
            green_windows: default_green_windows(),
            sr_params: SrParams::default(),
        }
    }
}

impl EngineConfig {
    /// Checks every window and threshold before a run starts.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] naming the first offending parameter.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.rsi_period == 0 {
            return Err(CoreError::config("rsi_period must be > 0"));
        }
        if self.atr_period == 0 {
            return Err(CoreError::config("atr_period must be > 0"));
        }

        let mut labels = HashSet::new();
        for setting in &self.bollinger_settings {
            if setting.window == 0 {
                return Err(CoreError::config(format!(
                    "bollinger window must be > 0 ({})",
                    setting.label
                )));
            }
            if !setting.deviation.is_finite() || setting.deviation < 0.0 {
                return Err(CoreError::config(format!(
                    "bollinger deviation must be finite and >= 0 ({}: {})",
                    setting.label, setting.deviation
                )));
            }
            if setting.label.trim().is_empty() {
                return Err(CoreError::config("bollinger label is empty"));
            }
            if !labels.insert(setting.label.as_str()) {
                return Err(CoreError::config(format!(
                    "duplicate bollinger label: {}",
                    setting.label
                )));
            }
        }

        if let Some(w) = self.ma_windows.iter().chain(&self.green_windows).find(|w| **w == 0) {
            return Err(CoreError::config(format!("rolling window must be > 0, got {w}")));
        }

        if let Some(w) = self
            .ma_comparison_windows
            .iter()
            .find(|w| !self.ma_windows.contains(w))
        {
            return Err(CoreError::config(format!(
                "ma_comparison_windows entry {w} is not in ma_windows"
            )));
        }

        self.sr_params.validate()
    }
}

/// One Bollinger band group: rolling window, deviation factor, output label.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BollingerSetting {
    /// Rolling window for mean and standard deviation
    pub window: usize,
    /// Band distance in standard deviations
    pub deviation: f64,
    /// Column prefix (e.g. `BB20`)
    pub label: String,
}

impl BollingerSetting {
    /// Creates a setting.
    #[must_use]
    pub fn new(window: usize, deviation: f64, label: impl Into<String>) -> Self {
        Self {
            window,
            deviation,
            label: label.into(),
        }
    }
}

/// Support/resistance search parameters.
///
/// The aliases accept the key names used by older persisted configs.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SrParams {
    /// Number of bars strictly before the current bar that form the window
    #[serde(default = "default_lookback", alias = "period_for_sr")]
    pub lookback_period: usize,
    /// Touches required to accept a level
    #[serde(default = "default_min_touches", alias = "touches_for_sr")]
    pub min_touches: usize,
    /// `slack = atr / slack_divisor`
    #[serde(default = "default_slack_divisor", alias = "slack_for_sr_atr_div")]
    pub slack_divisor: f64,
    /// `rejection = atr * rejection_multiplier`
    #[serde(default = "default_rejection_multiplier", alias = "atr_rejection_multiplier")]
    pub rejection_multiplier: f64,
    /// Distance of the first candidate from the open, in slack steps
    #[serde(default = "default_min_slack_steps", alias = "min_height_of_sr_distance")]
    pub min_slack_steps: f64,
    /// Iteration budget of one search
    #[serde(default = "default_max_slack_steps", alias = "max_height_of_sr_distance")]
    pub max_slack_steps: f64,
}

fn default_lookback() -> usize {
    100
}
fn default_min_touches() -> usize {
    3
}
fn default_slack_divisor() -> f64 {
    10.0
}
fn default_rejection_multiplier() -> f64 {
    1.0
}
fn default_min_slack_steps() -> f64 {
    3.0
}
fn default_max_slack_steps() -> f64 {
    30.0
}

impl Default for SrParams {
    fn default() -> Self {
        Self {
            lookback_period: default_lookback(),
            min_touches: default_min_touches(),
            slack_divisor: default_slack_divisor(),
            rejection_multiplier: default_rejection_multiplier(),
            min_slack_steps: default_min_slack_steps(),
            max_slack_steps: default_max_slack_steps(),
        }
    }
}

impl SrParams {
    /// Checks search parameters.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] for a zero lookback or touch count,
    /// a non-positive slack divisor, or negative/non-finite multipliers.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.lookback_period == 0 {
            return Err(CoreError::config("sr lookback_period must be > 0"));
        }
        if self.min_touches == 0 {
            return Err(CoreError::config("sr min_touches must be > 0"));
        }
        if !self.slack_divisor.is_finite() || self.slack_divisor <= 0.0 {
            return Err(CoreError::config(format!(
                "sr slack_divisor must be finite and > 0, got {}",
                self.slack_divisor
            )));
        }
        for (name, value) in [
            ("rejection_multiplier", self.rejection_multiplier),
            ("min_slack_steps", self.min_slack_steps),
            ("max_slack_steps", self.max_slack_steps),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::config(format!(
                    "sr {name} must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}
