use std::fmt::{Display, Formatter};

use crate::constant::{Const, DataError};
use crate::utils::round_to;

/// Bar-interval duration in minutes. Not restricted to whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeframeMinutes(f64);

impl TimeframeMinutes {
    pub fn new(minutes: f64) -> Option<Self> {
        (minutes.is_finite() && minutes > 0.0).then_some(Self(minutes))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self((self.0 + other.0) / 2.0)
    }

    /// `{H}H{m}m`, `{H}H` or `{m}m` on the value rounded to whole minutes.
    pub fn compound_label(self) -> String {
        let total = self.0.round().max(1.0) as u64;
        let hours = total / 60;
        let rest = total % 60;
        match (hours, rest) {
            (0, m) => format!("{m}m"),
            (h, 0) => format!("{h}H"),
            (h, m) => format!("{h}H{m}m"),
        }
    }

    /// Same layout as [`compound_label`](Self::compound_label) but keeps up to
    /// two decimals of sub-hour minutes.
    pub fn exact_label(self) -> String {
        let total = round_to(self.0, 2);
        let hours = (total / Const::MINUTES_PER_HOUR).floor();
        let rest = round_to(total - hours * Const::MINUTES_PER_HOUR, 2);
        let rest_text = trim_decimal(rest);
        if hours < 1.0 {
            format!("{rest_text}m")
        } else if rest <= 0.0 {
            format!("{}H", hours as u64)
        } else {
            format!("{}H{rest_text}m", hours as u64)
        }
    }

    /// Accepts tier style (`M5`, `H4`, `D1`, `W1`, `MN1`) and compound style
    /// (`1H30m`, `2H`, `45m`, bare minutes).
    pub fn parse_label(label: &str) -> Result<Self, DataError> {
        let err = || DataError::InvalidTimeframe(label.to_string());
        let upper = label.trim().to_ascii_uppercase();
        if upper.is_empty() {
            return Err(err());
        }

        let minutes = if upper.starts_with(|c: char| c.is_ascii_alphabetic()) {
            let (unit, count) = match upper.strip_prefix("MN") {
                Some(rest) => (Const::MINUTES_PER_MONTH, rest),
                None => {
                    let (head, rest) = upper.split_at(1);
                    let unit = match head {
                        "M" => 1.0,
                        "H" => Const::MINUTES_PER_HOUR,
                        "D" => Const::MINUTES_PER_DAY,
                        "W" => Const::MINUTES_PER_WEEK,
                        _ => return Err(err()),
                    };
                    (unit, rest)
                }
            };
            let count = if count.is_empty() {
                1.0
            } else {
                count.parse::<f64>().map_err(|_| err())?
            };
            count * unit
        } else {
            parse_compound(&upper).ok_or_else(err)?
        };

        Self::new(minutes).ok_or_else(err)
    }
}

impl Display for TimeframeMinutes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.compound_label())
    }
}

fn parse_compound(text: &str) -> Option<f64> {
    let mut total = 0.0;
    let mut number = String::new();
    let mut saw_unit = false;

    for ch in text.chars() {
        if ch.is_ascii_digit() || ch == '.' {
            number.push(ch);
            continue;
        }
        let value = number.parse::<f64>().ok()?;
        number.clear();
        let unit = match ch {
            'M' => 1.0,
            'H' => Const::MINUTES_PER_HOUR,
            'D' => Const::MINUTES_PER_DAY,
            'W' => Const::MINUTES_PER_WEEK,
            _ => return None,
        };
        total += value * unit;
        saw_unit = true;
    }

    if !number.is_empty() {
        // a trailing bare number only makes sense on its own
        if saw_unit {
            return None;
        }
        total += number.parse::<f64>().ok()?;
    }
    Some(total)
}

fn trim_decimal(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
