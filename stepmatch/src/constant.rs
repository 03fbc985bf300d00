use std::fmt::{Display, Formatter};

/// How the discrete phase chooses between the closest candidate above the leg
/// and the closest candidate below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchPreference {
    /// Any candidate at or above the leg wins over every candidate below it.
    PreferAbove,
    /// Strictly smaller absolute difference wins; ties go to the above side.
    PreferClosest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchPhase {
    Discrete,
    Refined,
    AtrBisection,
    Degenerate,
}

impl MatchPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discrete => "discrete",
            Self::Refined => "refined",
            Self::AtrBisection => "atr_bisection",
            Self::Degenerate => "degenerate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    Step,
    PercentStep,
    Atr,
}

impl MatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::PercentStep => "percent_step",
            Self::Atr => "atr",
        }
    }

    pub fn preference(self) -> MatchPreference {
        match self {
            Self::Step | Self::PercentStep => MatchPreference::PreferAbove,
            Self::Atr => MatchPreference::PreferClosest,
        }
    }
}

#[derive(Debug)]
pub enum DataError {
    InvalidTimeframe(String),
    InvalidAtrReference { minutes: f64, atr: f64 },
    UnsupportedFormat(String),
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
}

pub struct Const;

impl Const {
    pub const NO_MATCH_LABEL: &'static str = "-";
    pub const MAX_ITERATIONS: usize = 100;
    pub const DEFAULT_PIP_MULTIPLIER: f64 = 10.0;
    pub const FALLBACK_PERCENTAGE: f64 = 0.32;
    pub const MINUTES_PER_HOUR: f64 = 60.0;
    pub const MINUTES_PER_DAY: f64 = 1440.0;
    pub const MINUTES_PER_WEEK: f64 = 10080.0;
    pub const MINUTES_PER_MONTH: f64 = 43200.0;
}

impl Display for DataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimeframe(v) => write!(f, "invalid timeframe: {v}"),
            Self::InvalidAtrReference { minutes, atr } => {
                write!(f, "invalid atr reference: minutes={minutes} atr={atr}")
            }
            Self::UnsupportedFormat(v) => write!(f, "unsupported file format: {v}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Csv(e) => write!(f, "csv error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
            Self::Yaml(e) => write!(f, "yaml error: {e}"),
        }
    }
}

impl std::error::Error for DataError {}

impl From<std::io::Error> for DataError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for DataError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<serde_json::Error> for DataError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<serde_yaml::Error> for DataError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}
