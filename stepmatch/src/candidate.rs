//! Candidate maps and the sources that generate them.

use crate::fractal_value::{FractalLevels, StepLevel, calculate_th_points};
use crate::scaling::AtrReference;
use crate::symbol::Symbol;
use crate::tier::{FractalTier, PercentageCurve};
use crate::timeframe::TimeframeMinutes;

/// Timeframes put on a ladder when the caller does not pick its own.
pub const DEFAULT_LADDER: [FractalTier; 9] = FractalTier::ALL;

/// Reference value (price units) at an arbitrary timeframe.
pub trait CandidateSource {
    fn value_at(&self, minutes: TimeframeMinutes) -> f64;
}

/// TH-based step: percentage model → TH points → step level → price.
#[derive(Debug, Clone, Copy)]
pub struct ThStepSource<'a> {
    pub symbol: &'a Symbol,
    pub price: f64,
    pub level: StepLevel,
    pub curve: PercentageCurve,
}

impl<'a> ThStepSource<'a> {
    pub fn new(symbol: &'a Symbol, price: f64, level: StepLevel) -> Self {
        Self {
            symbol,
            price,
            level,
            curve: PercentageCurve::default(),
        }
    }

    pub fn with_curve(mut self, curve: PercentageCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn levels_at(&self, minutes: TimeframeMinutes) -> FractalLevels {
        let percentage = self.curve.percentage(minutes.get());
        let points = calculate_th_points(self.symbol, self.price, percentage);
        FractalLevels::from_structure(points * self.symbol.tick_size)
    }
}

impl CandidateSource for ThStepSource<'_> {
    fn value_at(&self, minutes: TimeframeMinutes) -> f64 {
        self.levels_at(minutes).level(self.level)
    }
}

/// Plain percentage-of-price step.
#[derive(Debug, Clone, Copy)]
pub struct PercentStepSource {
    pub price: f64,
    pub curve: PercentageCurve,
}

impl PercentStepSource {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            curve: PercentageCurve::default(),
        }
    }

    pub fn with_curve(mut self, curve: PercentageCurve) -> Self {
        self.curve = curve;
        self
    }
}

impl CandidateSource for PercentStepSource {
    fn value_at(&self, minutes: TimeframeMinutes) -> f64 {
        if self.price <= 0.0 {
            return 0.0;
        }
        self.price * self.curve.percentage(minutes.get()) / 100.0
    }
}

/// `multiple × ATR` scaled from a reference timeframe.
#[derive(Debug, Clone, Copy)]
pub struct AtrStepSource {
    pub reference: AtrReference,
    pub multiple: f64,
}

impl CandidateSource for AtrStepSource {
    fn value_at(&self, minutes: TimeframeMinutes) -> f64 {
        self.multiple * self.reference.estimate_at(minutes)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub label: String,
    /// `None` when the label did not parse; such entries never refine.
    pub minutes: Option<TimeframeMinutes>,
    pub value: f64,
}

/// Ordered `label -> value` pairs with unique labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateMap {
    entries: Vec<Candidate>,
}

impl CandidateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Minutes are parsed from the label.
    pub fn insert(&mut self, label: impl Into<String>, value: f64) {
        let label = label.into();
        let minutes = TimeframeMinutes::parse_label(&label).ok();
        self.upsert(Candidate {
            label,
            minutes,
            value,
        });
    }

    pub fn insert_with_minutes(&mut self, label: impl Into<String>, minutes: f64, value: f64) {
        self.upsert(Candidate {
            label: label.into(),
            minutes: TimeframeMinutes::new(minutes),
            value,
        });
    }

    fn upsert(&mut self, candidate: Candidate) {
        match self.entries.iter_mut().find(|x| x.label == candidate.label) {
            Some(existing) => *existing = candidate,
            None => self.entries.push(candidate),
        }
    }

    pub fn get(&self, label: &str) -> Option<&Candidate> {
        self.entries.iter().find(|x| x.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether values are non-decreasing in timeframe. Matching assumes this
    /// but never enforces it.
    pub fn is_monotonic(&self) -> bool {
        let mut timed: Vec<(f64, f64)> = self
            .entries
            .iter()
            .filter_map(|x| x.minutes.map(|m| (m.get(), x.value)))
            .collect();
        timed.sort_by(|a, b| a.0.total_cmp(&b.0));
        timed.windows(2).all(|pair| pair[1].1 >= pair[0].1)
    }

    /// One candidate per tier, valued by `source`.
    pub fn ladder<S: CandidateSource>(source: &S, tiers: &[FractalTier]) -> Self {
        let mut map = Self::new();
        for tier in tiers {
            let minutes = tier.nominal_minutes();
            if let Some(at) = TimeframeMinutes::new(minutes) {
                map.insert_with_minutes(tier.as_str(), minutes, source.value_at(at));
            }
        }
        map
    }
}

impl<L: Into<String>> FromIterator<(L, f64)> for CandidateMap {
    fn from_iter<T: IntoIterator<Item = (L, f64)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (label, value) in iter {
            map.insert(label, value);
        }
        map
    }
}

impl<'a> IntoIterator for &'a CandidateMap {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
