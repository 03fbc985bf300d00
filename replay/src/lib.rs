//! Offline driver: runs recorded legs through the three matchers.

use std::path::Path;

use serde::{Deserialize, Serialize};
use stepmatch::{
    AtrReference, AtrStepSource, CandidateMap, DEFAULT_LADDER, DataError, DiagnosticsSink,
    LegMatcher, MatchConfig, MatchResult, PercentStepSource, StepLevel, Symbol, ThStepSource,
    price_to_pip,
};

#[derive(Debug, Clone, Deserialize)]
pub struct LegRow {
    #[serde(alias = "leg_price")]
    pub leg: f64,
    #[serde(alias = "close", alias = "close_price")]
    pub price: f64,
    #[serde(default)]
    pub atr_minutes: Option<f64>,
    #[serde(default)]
    pub atr_value: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegReport {
    pub leg: f64,
    pub leg_pips: f64,
    pub step_label: String,
    pub step_pips: f64,
    pub step_residual: f64,
    pub percent_label: String,
    pub percent_pips: f64,
    pub percent_residual: f64,
    pub atr_label: String,
    pub atr_pips: f64,
    pub atr_residual: f64,
}

pub fn load_legs(path: impl AsRef<Path>) -> Result<Vec<LegRow>, DataError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize::<LegRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Builds the default ladders for each row and matches the leg against them.
pub fn run(
    symbol: &Symbol,
    config: &MatchConfig,
    rows: &[LegRow],
    sink: &dyn DiagnosticsSink,
) -> Vec<LegReport> {
    let matcher = LegMatcher::new(symbol)
        .with_config(config.clone())
        .with_sink(sink);

    rows.iter()
        .map(|row| {
            let step_source = ThStepSource::new(symbol, row.price, StepLevel::Structure)
                .with_curve(config.percentage_curve);
            let step = matcher.match_step(
                row.leg,
                &CandidateMap::ladder(&step_source, &DEFAULT_LADDER),
                &step_source,
            );

            let percent_source =
                PercentStepSource::new(row.price).with_curve(config.percentage_curve);
            let percent = matcher.match_percent_step(
                row.leg,
                &CandidateMap::ladder(&percent_source, &DEFAULT_LADDER),
                &percent_source,
            );

            let reference = match (row.atr_minutes, row.atr_value) {
                (Some(minutes), Some(atr)) => match AtrReference::new(minutes, atr) {
                    Ok(reference) => Some(reference),
                    Err(error) => {
                        tracing::warn!(leg = row.leg, %error, "skipping atr reference");
                        None
                    }
                },
                _ => None,
            };
            let atr_candidates = reference
                .map(|reference| {
                    let source = AtrStepSource {
                        reference,
                        multiple: config.atr_multiple,
                    };
                    CandidateMap::ladder(&source, &DEFAULT_LADDER)
                })
                .unwrap_or_default();
            let atr = matcher.match_atr(row.leg, &atr_candidates, reference.as_ref());

            report(row.leg, price_to_pip(row.leg.abs(), symbol), &step, &percent, &atr)
        })
        .collect()
}

fn report(
    leg: f64,
    leg_pips: f64,
    step: &MatchResult,
    percent: &MatchResult,
    atr: &MatchResult,
) -> LegReport {
    LegReport {
        leg,
        leg_pips,
        step_label: step.label().to_string(),
        step_pips: step.matched_value_pips(),
        step_residual: step.residual_pips(),
        percent_label: percent.label().to_string(),
        percent_pips: percent.matched_value_pips(),
        percent_residual: percent.residual_pips(),
        atr_label: atr.label().to_string(),
        atr_pips: atr.matched_value_pips(),
        atr_residual: atr.residual_pips(),
    }
}
