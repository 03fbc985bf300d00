//! Timeframe duration → percentage constant.
//!
//! Nine fixed tiers, each percentage double the previous one. The stepped curve
//! is the tier lookup; the interpolated curve runs log-log through the same
//! anchors and keeps rising past both ends.

use serde::{Deserialize, Serialize};

use crate::constant::{Const, DataError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FractalTier {
    M1,
    M5,
    M15,
    M30,
    H1,
    H4,
    D1,
    W1,
    MN1,
}

impl FractalTier {
    pub const ALL: [FractalTier; 9] = [
        Self::M1,
        Self::M5,
        Self::M15,
        Self::M30,
        Self::H1,
        Self::H4,
        Self::D1,
        Self::W1,
        Self::MN1,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::M1 => "M1",
            Self::M5 => "M5",
            Self::M15 => "M15",
            Self::M30 => "M30",
            Self::H1 => "H1",
            Self::H4 => "H4",
            Self::D1 => "D1",
            Self::W1 => "W1",
            Self::MN1 => "MN1",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DataError> {
        let upper = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str() == upper)
            .ok_or_else(|| DataError::InvalidTimeframe(value.to_string()))
    }

    /// Largest minute value still mapped to this tier.
    pub fn upper_bound_minutes(self) -> f64 {
        match self {
            Self::M1 => 1.0,
            Self::M5 => 5.0,
            Self::M15 => 16.0,
            Self::M30 => 30.0,
            Self::H1 => 60.0,
            Self::H4 => 240.0,
            Self::D1 => Const::MINUTES_PER_DAY,
            Self::W1 => Const::MINUTES_PER_WEEK,
            Self::MN1 => Const::MINUTES_PER_MONTH,
        }
    }

    /// Nominal bar length, used when a tier is put on a candidate ladder.
    pub fn nominal_minutes(self) -> f64 {
        match self {
            Self::M15 => 15.0,
            other => other.upper_bound_minutes(),
        }
    }

    pub fn percentage(self) -> f64 {
        match self {
            Self::M1 => 0.02,
            Self::M5 => 0.04,
            Self::M15 => 0.08,
            Self::M30 => 0.16,
            Self::H1 => 0.32,
            Self::H4 => 0.64,
            Self::D1 => 1.28,
            Self::W1 => 2.56,
            Self::MN1 => 5.12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageCurve {
    #[default]
    Stepped,
    Interpolated,
}

impl PercentageCurve {
    pub fn percentage(self, minutes: f64) -> f64 {
        match self {
            Self::Stepped => percentage_from_minutes(minutes),
            Self::Interpolated => interpolated_percentage(minutes),
        }
    }
}

/// Smallest tier whose upper bound covers `minutes`; anything past a week is
/// the month tier.
pub fn timeframe_to_tier(minutes: f64) -> Option<FractalTier> {
    if !minutes.is_finite() || minutes <= 0.0 {
        return None;
    }
    FractalTier::ALL
        .into_iter()
        .find(|tier| minutes <= tier.upper_bound_minutes())
        .or(Some(FractalTier::MN1))
}

pub fn percentage_from_minutes(minutes: f64) -> f64 {
    timeframe_to_tier(minutes)
        .map(FractalTier::percentage)
        .unwrap_or(Const::FALLBACK_PERCENTAGE)
}

fn interpolated_percentage(minutes: f64) -> f64 {
    if !minutes.is_finite() || minutes <= 0.0 {
        return Const::FALLBACK_PERCENTAGE;
    }

    let anchors = FractalTier::ALL.map(|tier| (tier.upper_bound_minutes(), tier.percentage()));
    let last = anchors.len() - 1;
    let segment = anchors
        .windows(2)
        .position(|pair| minutes <= pair[1].0)
        .unwrap_or(last - 1);

    let (m0, p0) = anchors[segment];
    let (m1, p1) = anchors[segment + 1];
    let exponent = (p1 / p0).ln() / (m1 / m0).ln();
    p0 * (minutes / m0).powf(exponent)
}
