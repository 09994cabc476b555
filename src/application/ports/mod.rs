//! Application ports (hexagonal architecture boundaries)
//!
//! The storage port lives with its aggregate in `domain::weather`.
//! Outbound ports used only by application services live here.

pub mod outbound;

pub use outbound::{FeedError, StationReading, WeatherFeed};
