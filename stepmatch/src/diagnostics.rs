//! Diagnostics the matchers report to.
//!
//! The core never logs through a global dispatcher; callers hand a sink to
//! [`LegMatcher`](crate::matcher::LegMatcher) and decide where events go.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::constant::{MatchKind, MatchPhase};

#[derive(Debug, Clone, PartialEq)]
pub struct MatchEvent {
    pub kind: MatchKind,
    pub phase: MatchPhase,
    pub leg_pips: f64,
    pub label: String,
    pub value_pips: f64,
    pub residual_pips: f64,
    pub iterations: usize,
    pub converged: bool,
}

pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: &MatchEvent);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn record(&self, _event: &MatchEvent) {}
}

/// Forwards every event to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, event: &MatchEvent) {
        tracing::debug!(
            kind = event.kind.as_str(),
            phase = event.phase.as_str(),
            leg_pips = event.leg_pips,
            label = %event.label,
            value_pips = event.value_pips,
            residual_pips = event.residual_pips,
            iterations = event.iterations,
            converged = event.converged,
            "leg match"
        );
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<MatchEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<MatchEvent> {
        self.events
            .lock()
            .expect("recording sink poisoned")
            .clone()
    }

    pub fn last(&self) -> Option<MatchEvent> {
        self.events().pop()
    }
}

impl DiagnosticsSink for RecordingSink {
    fn record(&self, event: &MatchEvent) {
        let mut guard = self.events.lock().expect("recording sink poisoned");
        guard.push(event.clone());
    }
}

pub type Subscriber = Arc<dyn Fn(&MatchEvent) + Send + Sync>;

/// Fan-out to subscribers, either per phase or for every event.
#[derive(Default)]
pub struct Observable {
    subscribers: HashMap<MatchPhase, Vec<Subscriber>>,
    all_subscribers: Vec<Subscriber>,
}

impl Observable {
    pub fn subscribe(&mut self, phase: Option<MatchPhase>, subscriber: Subscriber) {
        if let Some(phase) = phase {
            self.subscribers.entry(phase).or_default().push(subscriber);
        } else {
            self.all_subscribers.push(subscriber);
        }
    }
}

impl DiagnosticsSink for Observable {
    fn record(&self, event: &MatchEvent) {
        if let Some(subscribers) = self.subscribers.get(&event.phase) {
            for subscriber in subscribers {
                subscriber(event);
            }
        }

        for subscriber in &self.all_subscribers {
            subscriber(event);
        }
    }
}
