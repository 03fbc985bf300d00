use serde::{Deserialize, Serialize};

use crate::symbol::Symbol;

/// Scales a raw price onto the common footing the percentage constants expect.
fn normalize_price(price: f64, digits: u32) -> f64 {
    match digits {
        0 => price / 100.0,
        1 => price / 10.0,
        2 => price,
        3 => price / 10.0,
        4 | 5 => price * 100.0,
        6 => price * 1000.0,
        _ => price * 10000.0,
    }
}

/// Base threshold step for a price at the given percentage.
pub fn calculate_th(price: f64, digits: u32, percentage: f64) -> f64 {
    if price <= 0.0 || percentage <= 0.0 {
        return 0.0;
    }
    normalize_price(price, digits) * percentage / 10.0
}

/// TH expressed in ticks of the instrument.
pub fn calculate_th_points(symbol: &Symbol, price: f64, percentage: f64) -> f64 {
    if !symbol.has_valid_tick() {
        return 0.0;
    }
    let th = calculate_th(price, symbol.precision(), percentage);
    if th <= 0.0 {
        return 0.0;
    }
    th / 10.0 / symbol.tick_size
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepLevel {
    #[default]
    Structure,
    Pattern,
    Trigger,
    ShortStep,
    LongStep,
}

impl StepLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Pattern => "pattern",
            Self::Trigger => "trigger",
            Self::ShortStep => "short_step",
            Self::LongStep => "long_step",
        }
    }
}

/// The nested step values hanging off one Structure value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalLevels {
    pub structure: f64,
    pub pattern: f64,
    pub trigger: f64,
    pub short_step: f64,
    pub long_step: f64,
}

impl FractalLevels {
    pub fn from_structure(structure: f64) -> Self {
        Self::from_structure_pattern(structure, structure / 2.0)
    }

    pub fn from_structure_pattern(structure: f64, pattern: f64) -> Self {
        Self {
            structure,
            pattern,
            trigger: pattern / 2.0,
            short_step: short_step(structure, pattern),
            long_step: long_step(structure, pattern),
        }
    }

    pub fn level(&self, level: StepLevel) -> f64 {
        match level {
            StepLevel::Structure => self.structure,
            StepLevel::Pattern => self.pattern,
            StepLevel::Trigger => self.trigger,
            StepLevel::ShortStep => self.short_step,
            StepLevel::LongStep => self.long_step,
        }
    }
}

pub fn short_step(structure: f64, pattern: f64) -> f64 {
    2.0 * structure - pattern
}

pub fn long_step(structure: f64, pattern: f64) -> f64 {
    3.0 * structure - 2.0 * pattern
}

/// Pattern sits two fractal steps under Structure: 4x shorter, √4 smaller.
pub fn pattern_atr(structure_atr: f64) -> f64 {
    structure_atr / 4f64.sqrt()
}

pub fn trigger_atr(structure_atr: f64) -> f64 {
    structure_atr / 16f64.sqrt()
}
