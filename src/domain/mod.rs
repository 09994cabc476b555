//! Domain layer - delivery fee rules and weather data
//!
//! Pure types and logic; persistence is reached through the
//! [`WeatherRepository`] port only.

pub mod city;
pub mod error;
pub mod fee;
pub mod phenomenon;
pub mod vehicle;
pub mod weather;

pub use city::City;
pub use error::{DomainError, DomainResult, ForbiddenReason};
pub use fee::{Fee, FeeBreakdown, FeeRuleEngine, CURRENCY};
pub use phenomenon::PhenomenonCategory;
pub use vehicle::VehicleType;
pub use weather::{WeatherObservation, WeatherRepository};
