use crate::bar::{SBar, true_range};

use super::core::Indicator;

/// Wilder-smoothed average true range.
#[derive(Debug, Clone)]
pub struct Atr {
    name: String,
    period: usize,
    value: Option<f64>,
    prev_close: Option<f64>,
}

impl Atr {
    /// A zero period is treated as 1.
    pub fn new(period: usize) -> Self {
        let period = period.max(1);
        Self {
            name: format!("atr_{period}"),
            period,
            value: None,
            prev_close: None,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn push(&mut self, tr: f64, close: f64) -> Option<f64> {
        self.prev_close = Some(close);
        self.value = Some(match self.value {
            None => tr,
            Some(prev) => (prev * (self.period as f64 - 1.0) + tr) / self.period as f64,
        });
        self.value
    }
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) {
        self.value = None;
        self.prev_close = None;
    }

    fn update(&mut self, bar: &SBar) -> Option<f64> {
        let tr = bar.true_range(self.prev_close);
        self.push(tr, bar.close_price)
    }

    fn value(&self) -> Option<f64> {
        self.value
    }

    fn backfill(&mut self, highs: &[f64], lows: &[f64], closes: &[f64]) -> Vec<Option<f64>> {
        self.reset();
        let len = highs.len().min(lows.len()).min(closes.len());
        (0..len)
            .map(|i| {
                let tr = true_range(highs[i], lows[i], self.prev_close);
                self.push(tr, closes[i])
            })
            .collect()
    }
}
