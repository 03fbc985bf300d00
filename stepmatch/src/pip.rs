//! Price distance ⇄ pip distance.
//!
//! Generic instruments count one pip per tick. Symbols that look like currency
//! pairs go through the forex multiplier table instead. Any code containing
//! JPY is pinned to a multiplier of 100.

use crate::constant::Const;
use crate::symbol::Symbol;

const MAX_DIGITS: u32 = 10;

/// Digits after the decimal point in the tick size's shortest decimal form.
pub fn digits_from_tick_size(tick_size: f64) -> u32 {
    if !tick_size.is_finite() || tick_size <= 0.0 {
        return 0;
    }
    // f64 Display never switches to exponent notation and prints the
    // shortest representation that round-trips.
    let text = format!("{tick_size}");
    match text.split_once('.') {
        Some((_, frac)) => (frac.trim_end_matches('0').len() as u32).min(MAX_DIGITS),
        None => 0,
    }
}

pub fn looks_like_forex(code: &str) -> bool {
    code.contains('/') || (code.chars().count() >= 6 && !code.contains('.'))
}

fn is_jpy(code: &str) -> bool {
    code.to_ascii_uppercase().contains("JPY")
}

/// Per-decimal-place multiplier. Forex and generic symbols share this table.
pub fn multiplier_for_precision(precision: u32) -> f64 {
    match precision {
        0 => 1.0,
        1 => 10.0,
        2 => 100.0,
        3..=8 => 10.0,
        _ => Const::DEFAULT_PIP_MULTIPLIER,
    }
}

pub fn pip_multiplier(symbol: &Symbol) -> f64 {
    if !symbol.has_valid_tick() {
        return Const::DEFAULT_PIP_MULTIPLIER;
    }
    if is_jpy(&symbol.code) {
        return 100.0;
    }
    multiplier_for_precision(symbol.precision())
}

pub fn pip_multiplier_or_default(symbol: Option<&Symbol>) -> f64 {
    symbol.map_or(Const::DEFAULT_PIP_MULTIPLIER, pip_multiplier)
}

/// Price units per pip.
pub fn pip_size(symbol: &Symbol) -> f64 {
    let multiplier = pip_multiplier(symbol);
    if !symbol.has_valid_tick() {
        return 1.0 / multiplier;
    }
    if !looks_like_forex(&symbol.code) {
        return symbol.tick_size;
    }

    // Low-precision quotes and JPY pairs: multiplier is pips per price unit.
    // Fractional-pip quotes: multiplier is ticks per pip.
    if is_jpy(&symbol.code) || symbol.precision() <= 2 {
        1.0 / multiplier
    } else {
        symbol.tick_size * multiplier
    }
}

pub fn price_to_pip(price_delta: f64, symbol: &Symbol) -> f64 {
    price_delta / pip_size(symbol)
}

pub fn pip_to_price(pips: f64, symbol: &Symbol) -> f64 {
    pips * pip_size(symbol)
}
