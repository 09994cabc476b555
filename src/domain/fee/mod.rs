//! Delivery fee aggregate
//!
//! Contains the fee value types and the weather-dependent fee rules.

pub mod model;
pub mod rules;

pub use model::{Fee, FeeBreakdown, CURRENCY};
pub use rules::FeeRuleEngine;
