use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::constant::{Const, DataError};
use crate::tier::PercentageCurve;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    /// Discrete gap above which the step matchers bisect.
    pub refine_tolerance_pips: f64,
    pub converge_tolerance_pips: f64,
    pub min_minute_span: f64,
    pub max_iterations: usize,

    pub atr_multiple: f64,
    pub atr_min_minutes: f64,
    pub atr_max_minutes: f64,
    pub atr_tolerance_pips: f64,

    pub step_decimals: u32,
    pub atr_decimals: u32,

    pub percentage_curve: PercentageCurve,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchConfigPatch {
    pub refine_tolerance_pips: Option<f64>,
    pub converge_tolerance_pips: Option<f64>,
    pub min_minute_span: Option<f64>,
    pub max_iterations: Option<usize>,

    pub atr_multiple: Option<f64>,
    pub atr_min_minutes: Option<f64>,
    pub atr_max_minutes: Option<f64>,
    pub atr_tolerance_pips: Option<f64>,

    pub step_decimals: Option<u32>,
    pub atr_decimals: Option<u32>,

    pub percentage_curve: Option<PercentageCurve>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchProfileConfig {
    #[serde(default)]
    pub default: MatchConfigPatch,
    #[serde(default)]
    pub symbol: HashMap<String, MatchConfigPatch>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            refine_tolerance_pips: 0.1,
            converge_tolerance_pips: 0.01,
            min_minute_span: 1.0,
            max_iterations: Const::MAX_ITERATIONS,

            atr_multiple: 3.0,
            atr_min_minutes: 1.0,
            atr_max_minutes: Const::MINUTES_PER_WEEK,
            atr_tolerance_pips: 0.1,

            step_decimals: 1,
            atr_decimals: 2,

            percentage_curve: PercentageCurve::Stepped,
        }
    }
}

impl MatchConfig {
    pub fn apply_patch(mut self, patch: &MatchConfigPatch) -> Self {
        if let Some(v) = patch.refine_tolerance_pips {
            self.refine_tolerance_pips = v;
        }
        if let Some(v) = patch.converge_tolerance_pips {
            self.converge_tolerance_pips = v;
        }
        if let Some(v) = patch.min_minute_span {
            self.min_minute_span = v;
        }
        if let Some(v) = patch.max_iterations {
            // 100 is a hard ceiling, profiles may only lower it
            self.max_iterations = v.min(Const::MAX_ITERATIONS);
        }

        if let Some(v) = patch.atr_multiple {
            self.atr_multiple = v;
        }
        if let Some(v) = patch.atr_min_minutes {
            self.atr_min_minutes = v;
        }
        if let Some(v) = patch.atr_max_minutes {
            self.atr_max_minutes = v;
        }
        if let Some(v) = patch.atr_tolerance_pips {
            self.atr_tolerance_pips = v;
        }

        if let Some(v) = patch.step_decimals {
            self.step_decimals = v;
        }
        if let Some(v) = patch.atr_decimals {
            self.atr_decimals = v;
        }

        if let Some(v) = patch.percentage_curve {
            self.percentage_curve = v;
        }
        self
    }
}

impl MatchProfileConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        match path.extension().and_then(|x| x.to_str()) {
            Some("json") => Ok(serde_json::from_str(&text)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&text)?),
            _ => Err(DataError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Defaults, then the profile's `default` patch, then the symbol patch.
    pub fn resolve(&self, symbol: &str) -> MatchConfig {
        let config = MatchConfig::default().apply_patch(&self.default);
        match self.symbol.get(symbol) {
            Some(patch) => config.apply_patch(patch),
            None => config,
        }
    }
}
