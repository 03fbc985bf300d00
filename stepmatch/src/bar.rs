use chrono::{DateTime, Utc};

/// A source bar used to seed reference ATR values.
#[derive(Debug, Clone)]
pub struct SBar {
    pub datetime: DateTime<Utc>,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    pub volume: f64,
}

impl SBar {
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        true_range(self.high_price, self.low_price, prev_close)
    }
}

pub(crate) fn true_range(high: f64, low: f64, prev_close: Option<f64>) -> f64 {
    match prev_close {
        Some(prev_close) => (high - low)
            .max((high - prev_close).abs())
            .max((low - prev_close).abs()),
        None => high - low,
    }
}
