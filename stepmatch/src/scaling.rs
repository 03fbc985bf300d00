//! Square-root-of-time ATR scaling.

use crate::bar::SBar;
use crate::constant::DataError;
use crate::indicator::{Atr, Indicator};
use crate::timeframe::TimeframeMinutes;

/// `base_atr × √(target / base)`.
///
/// Unchecked: a zero or negative `base_minutes` yields IEEE-754 infinities or
/// NaN. Go through [`AtrReference`] when the inputs are not already known good.
pub fn estimate_atr(base_atr: f64, base_minutes: f64, target_minutes: f64) -> f64 {
    base_atr * (target_minutes / base_minutes).sqrt()
}

/// A known ATR at a known timeframe, validated once so every later estimate is
/// finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtrReference {
    minutes: TimeframeMinutes,
    atr: f64,
}

impl AtrReference {
    pub fn new(minutes: f64, atr: f64) -> Result<Self, DataError> {
        let invalid = || DataError::InvalidAtrReference { minutes, atr };
        if !atr.is_finite() || atr <= 0.0 {
            return Err(invalid());
        }
        let minutes = TimeframeMinutes::new(minutes).ok_or_else(invalid)?;
        Ok(Self { minutes, atr })
    }

    /// Reference ATR computed from bar history at `minutes`.
    pub fn from_bars(bars: &[SBar], period: usize, minutes: f64) -> Result<Self, DataError> {
        let mut atr = Atr::new(period);
        for bar in bars {
            atr.update(bar);
        }
        Self::new(minutes, atr.value().unwrap_or(0.0))
    }

    pub fn minutes(&self) -> TimeframeMinutes {
        self.minutes
    }

    pub fn atr(&self) -> f64 {
        self.atr
    }

    pub fn estimate_at(&self, target: TimeframeMinutes) -> f64 {
        estimate_atr(self.atr, self.minutes.get(), target.get())
    }
}
