//! Leg matching.
//!
//! All three matchers run the same discrete pass over a candidate map. The
//! step matchers prefer the closest candidate at or above the leg and then
//! bisect over continuous minutes between the bracketing candidates. The ATR
//! matcher prefers whichever side is closer and, given a reference ATR,
//! bisects the minute domain directly against the square-root-of-time law.

use crate::candidate::{CandidateMap, CandidateSource, PercentStepSource, ThStepSource};
use crate::config::MatchConfig;
use crate::constant::{Const, MatchKind, MatchPhase, MatchPreference};
use crate::diagnostics::{DiagnosticsSink, MatchEvent, NullSink};
use crate::pip::price_to_pip;
use crate::scaling::AtrReference;
use crate::symbol::Symbol;
use crate::timeframe::TimeframeMinutes;
use crate::utils::{approx_eq_f64, round_to};

static NULL_SINK: NullSink = NullSink;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    label: String,
    matched_value_pips: f64,
    residual_pips: f64,
}

impl MatchResult {
    fn new(label: String, matched_value_pips: f64, residual_pips: f64) -> Self {
        Self {
            label,
            matched_value_pips,
            residual_pips,
        }
    }

    /// `"-"` with a zero value. The residual is infinite and must not be
    /// compared against other results.
    pub fn degenerate() -> Self {
        Self::new(Const::NO_MATCH_LABEL.to_string(), 0.0, f64::INFINITY)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn matched_value_pips(&self) -> f64 {
        self.matched_value_pips
    }

    pub fn residual_pips(&self) -> f64 {
        self.residual_pips
    }

    pub fn is_degenerate(&self) -> bool {
        self.label == Const::NO_MATCH_LABEL
    }
}

/// One side of the bracket around the leg.
#[derive(Debug, Clone)]
struct Side {
    label: String,
    minutes: Option<TimeframeMinutes>,
    value_pips: f64,
    diff: f64,
}

#[derive(Debug, Default)]
struct Bracket {
    above: Option<Side>,
    below: Option<Side>,
}

impl Bracket {
    fn scan<'c>(
        leg_pips: f64,
        candidates: impl Iterator<Item = (&'c str, Option<TimeframeMinutes>, f64)>,
    ) -> Self {
        let mut bracket = Self::default();
        for (label, minutes, value_pips) in candidates {
            if !value_pips.is_finite() {
                continue;
            }
            let (slot, diff) = if value_pips >= leg_pips {
                (&mut bracket.above, value_pips - leg_pips)
            } else {
                (&mut bracket.below, leg_pips - value_pips)
            };
            if slot.as_ref().is_none_or(|best| diff < best.diff) {
                *slot = Some(Side {
                    label: label.to_string(),
                    minutes,
                    value_pips,
                    diff,
                });
            }
        }
        bracket
    }

    fn choose(&self, preference: MatchPreference) -> Option<&Side> {
        match preference {
            MatchPreference::PreferAbove => self.above.as_ref().or(self.below.as_ref()),
            MatchPreference::PreferClosest => match (&self.above, &self.below) {
                (Some(above), Some(below)) if below.diff < above.diff => Some(below),
                (Some(above), _) => Some(above),
                (None, below) => below.as_ref(),
            },
        }
    }
}

pub struct LegMatcher<'a> {
    symbol: &'a Symbol,
    config: MatchConfig,
    sink: &'a dyn DiagnosticsSink,
}

impl<'a> LegMatcher<'a> {
    pub fn new(symbol: &'a Symbol) -> Self {
        Self {
            symbol,
            config: MatchConfig::default(),
            sink: &NULL_SINK,
        }
    }

    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_sink(mut self, sink: &'a dyn DiagnosticsSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn symbol(&self) -> &Symbol {
        self.symbol
    }

    /// TH step matching; refinement regenerates steps from `source`.
    pub fn match_step(
        &self,
        leg_price: f64,
        candidates: &CandidateMap,
        source: &ThStepSource<'_>,
    ) -> MatchResult {
        self.match_refined(MatchKind::Step, leg_price, candidates, source)
    }

    /// Percentage-of-price step matching.
    pub fn match_percent_step(
        &self,
        leg_price: f64,
        candidates: &CandidateMap,
        source: &PercentStepSource,
    ) -> MatchResult {
        self.match_refined(MatchKind::PercentStep, leg_price, candidates, source)
    }

    /// ATR matching. Candidate values are `atr_multiple × ATR`; the reported
    /// value is the base ATR. With a reference the minute domain is bisected
    /// directly and `candidates` is not consulted.
    pub fn match_atr(
        &self,
        leg_price: f64,
        candidates: &CandidateMap,
        reference: Option<&AtrReference>,
    ) -> MatchResult {
        let kind = MatchKind::Atr;
        let Some(leg_pips) = self.leg_pips(leg_price) else {
            return self.degenerate(kind, f64::NAN);
        };
        if let Some(reference) = reference {
            return self.match_atr_reference(leg_pips, reference);
        }

        let bracket = self.scan(leg_pips, candidates);
        let Some(best) = bracket.choose(kind.preference()) else {
            return self.degenerate(kind, leg_pips);
        };
        let decimals = self.config.atr_decimals;
        let result = MatchResult::new(
            best.label.clone(),
            round_to(best.value_pips / self.config.atr_multiple, decimals),
            round_to(best.diff, decimals),
        );
        let exact = approx_eq_f64(best.diff, 0.0);
        self.report(kind, MatchPhase::Discrete, leg_pips, &result, 0, exact);
        result
    }

    fn max_iterations(&self) -> usize {
        self.config.max_iterations.min(Const::MAX_ITERATIONS)
    }

    fn leg_pips(&self, leg_price: f64) -> Option<f64> {
        let pips = price_to_pip(leg_price.abs(), self.symbol);
        pips.is_finite().then_some(pips)
    }

    fn scan(&self, leg_pips: f64, candidates: &CandidateMap) -> Bracket {
        Bracket::scan(
            leg_pips,
            candidates
                .iter()
                .map(|x| (x.label.as_str(), x.minutes, price_to_pip(x.value, self.symbol))),
        )
    }

    fn match_refined<S: CandidateSource>(
        &self,
        kind: MatchKind,
        leg_price: f64,
        candidates: &CandidateMap,
        source: &S,
    ) -> MatchResult {
        let Some(leg_pips) = self.leg_pips(leg_price) else {
            return self.degenerate(kind, f64::NAN);
        };
        let bracket = self.scan(leg_pips, candidates);
        let Some(best) = bracket.choose(kind.preference()) else {
            return self.degenerate(kind, leg_pips);
        };

        let decimals = self.config.step_decimals;
        let discrete = MatchResult::new(
            best.label.clone(),
            round_to(best.value_pips, decimals),
            round_to(best.diff, decimals),
        );
        let within_tolerance = best.diff <= self.config.refine_tolerance_pips;
        self.report(kind, MatchPhase::Discrete, leg_pips, &discrete, 0, within_tolerance);

        if within_tolerance {
            return discrete;
        }
        let (Some(above), Some(below)) = (&bracket.above, &bracket.below) else {
            return discrete;
        };
        let Some((refined, iterations, converged)) =
            self.bisect_steps(leg_pips, above, below, source)
        else {
            return discrete;
        };

        let result = MatchResult::new(
            refined.label,
            round_to(refined.value_pips, decimals),
            round_to(refined.diff, decimals),
        );
        self.report(kind, MatchPhase::Refined, leg_pips, &result, iterations, converged);
        result
    }

    /// Bisection between the bracketing candidates' timeframes. Returns `None`
    /// when the bracket has no usable minute span.
    fn bisect_steps<S: CandidateSource>(
        &self,
        leg_pips: f64,
        above: &Side,
        below: &Side,
        source: &S,
    ) -> Option<(Side, usize, bool)> {
        let mut high = above.minutes?;
        let mut low = below.minutes?;
        if high <= low {
            return None;
        }

        let max_iterations = self.max_iterations();
        let mut best_above = above.clone();
        let mut best_below = below.clone();
        let mut iterations = 0;
        let mut converged = false;

        while iterations < max_iterations
            && high.get() - low.get() > self.config.min_minute_span
        {
            iterations += 1;
            let mid = low.midpoint(high);
            let value_pips = price_to_pip(source.value_at(mid), self.symbol);
            let side = Side {
                label: mid.compound_label(),
                minutes: Some(mid),
                value_pips,
                diff: (value_pips - leg_pips).abs(),
            };
            let gap = side.diff;

            if value_pips >= leg_pips {
                high = mid;
                best_above = side;
            } else {
                low = mid;
                best_below = side;
            }

            if gap <= self.config.converge_tolerance_pips {
                converged = true;
                break;
            }
        }

        let refined = if best_below.diff < best_above.diff {
            best_below
        } else {
            best_above
        };
        Some((refined, iterations, converged))
    }

    fn match_atr_reference(&self, leg_pips: f64, reference: &AtrReference) -> MatchResult {
        let kind = MatchKind::Atr;
        let multiple = self.config.atr_multiple;
        let (Some(mut low), Some(mut high)) = (
            TimeframeMinutes::new(self.config.atr_min_minutes),
            TimeframeMinutes::new(self.config.atr_max_minutes),
        ) else {
            return self.degenerate(kind, leg_pips);
        };
        if multiple <= 0.0 || high <= low {
            return self.degenerate(kind, leg_pips);
        }

        let target = leg_pips / multiple;
        let max_iterations = self.max_iterations();
        let mut best: Option<(TimeframeMinutes, f64)> = None;
        let mut iterations = 0;
        let mut converged = false;

        while iterations < max_iterations {
            iterations += 1;
            let mid = low.midpoint(high);
            let estimate = price_to_pip(reference.estimate_at(mid), self.symbol);
            let gap = estimate - target;

            if best.is_none_or(|(_, prev)| gap.abs() < (prev - target).abs()) {
                best = Some((mid, estimate));
            }
            if gap.abs() <= self.config.atr_tolerance_pips {
                converged = true;
                break;
            }
            if estimate < target {
                low = mid;
            } else {
                high = mid;
            }
        }

        let Some((minutes, estimate)) = best else {
            return self.degenerate(kind, leg_pips);
        };
        let decimals = self.config.atr_decimals;
        let result = MatchResult::new(
            minutes.exact_label(),
            round_to(estimate, decimals),
            round_to((leg_pips - multiple * estimate).abs(), decimals),
        );
        self.report(kind, MatchPhase::AtrBisection, leg_pips, &result, iterations, converged);
        result
    }

    fn degenerate(&self, kind: MatchKind, leg_pips: f64) -> MatchResult {
        let result = MatchResult::degenerate();
        self.report(kind, MatchPhase::Degenerate, leg_pips, &result, 0, false);
        result
    }

    fn report(
        &self,
        kind: MatchKind,
        phase: MatchPhase,
        leg_pips: f64,
        result: &MatchResult,
        iterations: usize,
        converged: bool,
    ) {
        self.sink.record(&MatchEvent {
            kind,
            phase,
            leg_pips,
            label: result.label.clone(),
            value_pips: result.matched_value_pips,
            residual_pips: result.residual_pips,
            iterations,
            converged,
        });
    }
}
