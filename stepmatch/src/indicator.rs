pub mod atr;
pub mod core;

pub use atr::Atr;
pub use core::Indicator;
