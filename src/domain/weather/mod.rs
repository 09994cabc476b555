//! Weather observation aggregate
//!
//! Observations are produced by the ingestion job and only read by the
//! fee calculation.

pub mod model;
pub mod repository;

pub use model::WeatherObservation;
pub use repository::WeatherRepository;
