//! Weather observation repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::WeatherObservation;
use crate::domain::DomainResult;

#[async_trait]
pub trait WeatherRepository: Send + Sync {
    /// Most recent observation of the station.
    async fn latest(&self, station_name: &str) -> DomainResult<Option<WeatherObservation>>;

    /// Observation with the greatest timestamp not after `at`.
    ///
    /// Observations taken after `at` are never returned, even when they are
    /// closer in time.
    async fn as_of(
        &self,
        station_name: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<WeatherObservation>>;

    /// Persist a batch, returning how many observations were stored.
    async fn save_all(&self, observations: Vec<WeatherObservation>) -> DomainResult<usize>;

    /// Every stored observation, newest first.
    async fn find_all(&self) -> DomainResult<Vec<WeatherObservation>>;
}
