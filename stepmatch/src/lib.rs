pub mod bar;
pub mod candidate;
pub mod config;
pub mod constant;
pub mod diagnostics;
pub mod fractal_value;
pub mod indicator;
pub mod logging;
pub mod matcher;
pub mod pip;
pub mod scaling;
pub mod symbol;
pub mod tier;
pub mod timeframe;
pub mod utils;

pub use bar::SBar;
pub use candidate::{
	AtrStepSource, Candidate, CandidateMap, CandidateSource, DEFAULT_LADDER, PercentStepSource,
	ThStepSource,
};
pub use config::{MatchConfig, MatchConfigPatch, MatchProfileConfig};
pub use constant::{Const, DataError, MatchKind, MatchPhase, MatchPreference};
pub use diagnostics::{
	DiagnosticsSink, MatchEvent, NullSink, Observable, RecordingSink, Subscriber, TracingSink,
};
pub use fractal_value::{
	FractalLevels, StepLevel, calculate_th, calculate_th_points, long_step, pattern_atr,
	short_step, trigger_atr,
};
pub use indicator::{Atr, Indicator};
pub use logging::{init_logging, init_logging_with_level};
pub use matcher::{LegMatcher, MatchResult};
pub use pip::{
	digits_from_tick_size, looks_like_forex, pip_multiplier, pip_multiplier_or_default, pip_size,
	pip_to_price, price_to_pip,
};
pub use scaling::{AtrReference, estimate_atr};
pub use symbol::{Symbol, SymbolLoader};
pub use tier::{FractalTier, PercentageCurve, percentage_from_minutes, timeframe_to_tier};
pub use timeframe::TimeframeMinutes;
pub use utils::round_to;
