//! Weather data ingestion
//!
//! Fetches the observation feed, keeps the stations of the supported
//! cities and stores one observation per station. Every record of a run is
//! stamped with the fetch time.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::ports::{FeedError, StationReading, WeatherFeed};
use crate::domain::{City, DomainError, WeatherObservation, WeatherRepository};
use crate::shared::retry::{retry_with_backoff, RetryPolicy};

const UNKNOWN_WMO_CODE: &str = "Unknown";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Storage(#[from] DomainError),
}

pub struct WeatherIngestService {
    feed: Arc<dyn WeatherFeed>,
    repository: Arc<dyn WeatherRepository>,
    retry: RetryPolicy,
}

impl WeatherIngestService {
    pub fn new(
        feed: Arc<dyn WeatherFeed>,
        repository: Arc<dyn WeatherRepository>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            feed,
            repository,
            retry,
        }
    }

    /// Fetch the feed once and store the monitored stations.
    /// Returns the number of stored observations.
    pub async fn fetch_and_store(&self) -> Result<usize, IngestError> {
        let readings = retry_with_backoff(
            &self.retry,
            "weather_feed_fetch",
            || self.feed.fetch(),
            FeedError::is_transient,
        )
        .await?;

        let fetched_at = Utc::now();
        let total = readings.len();
        let observations = select_monitored(readings, fetched_at);

        if observations.is_empty() {
            warn!(stations = total, "Feed contained no monitored stations");
            return Ok(0);
        }

        let stored = self.repository.save_all(observations).await?;
        metrics::counter!("weather_ingest_records_total").increment(stored as u64);

        info!(stations = total, stored, fetched_at = %fetched_at, "Weather data stored");
        Ok(stored)
    }
}

/// Convert the readings of monitored stations into observations.
pub fn select_monitored(
    readings: Vec<StationReading>,
    fetched_at: DateTime<Utc>,
) -> Vec<WeatherObservation> {
    readings
        .into_iter()
        .filter_map(|reading| {
            let name = reading.name?;
            if City::from_station_name(&name).is_none() {
                return None;
            }
            debug!(station = %name, "Monitored station found");

            let phenomenon = reading
                .phenomenon
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty());
            let wmo_code = reading
                .wmo_code
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| UNKNOWN_WMO_CODE.to_string());

            Some(
                WeatherObservation::new(
                    name,
                    reading.air_temperature.unwrap_or(0.0),
                    reading.wind_speed.unwrap_or(0.0),
                    phenomenon,
                    fetched_at,
                )
                .with_wmo_code(wmo_code),
            )
        })
        .collect()
}
