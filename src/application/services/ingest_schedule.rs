//! Background task that ingests weather data once an hour.
//!
//! Runs at minute `fetch_minute` of every hour (UTC), optionally with an
//! extra run right after startup so fees can be served immediately.

use std::sync::Arc;

use chrono::{DateTime, Duration, Timelike, Utc};
use tracing::{error, info};

use super::weather_ingest::WeatherIngestService;
use crate::shared::shutdown::ShutdownSignal;

#[derive(Debug, Clone, Copy)]
pub struct IngestSchedule {
    /// Minute of the hour to run at, 0..=59
    pub fetch_minute: u32,
    pub run_on_startup: bool,
}

impl Default for IngestSchedule {
    fn default() -> Self {
        Self {
            fetch_minute: 15,
            run_on_startup: true,
        }
    }
}

/// Next instant strictly after `now` whose minute is `fetch_minute` and
/// second is zero.
pub fn next_run_after(now: DateTime<Utc>, fetch_minute: u32) -> DateTime<Utc> {
    let minute = i64::from(fetch_minute.min(59));
    let hour_start = now
        .date_naive()
        .and_hms_opt(now.hour(), 0, 0)
        .map(|t| t.and_utc())
        .unwrap_or(now);
    let candidate = hour_start + Duration::minutes(minute);

    if candidate > now {
        candidate
    } else {
        candidate + Duration::hours(1)
    }
}

/// Start the weather ingestion background task.
pub fn start_weather_ingest_task(
    service: Arc<WeatherIngestService>,
    schedule: IngestSchedule,
    shutdown: ShutdownSignal,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            fetch_minute = schedule.fetch_minute,
            run_on_startup = schedule.run_on_startup,
            "🌦️ Weather ingest task started"
        );

        if schedule.run_on_startup {
            tokio::select! {
                _ = run_once(&service) => {}
                _ = shutdown.wait() => {
                    info!("🌦️ Weather ingest task shutting down");
                    return;
                }
            }
        }

        loop {
            let now = Utc::now();
            let next = next_run_after(now, schedule.fetch_minute);
            let wait = (next - now).to_std().unwrap_or_default();
            info!(next_run = %next, "Next weather ingest scheduled");

            tokio::select! {
                _ = tokio::time::sleep(wait) => run_once(&service).await,
                _ = shutdown.wait() => {
                    info!("🌦️ Weather ingest task shutting down");
                    break;
                }
            }
        }

        info!("🌦️ Weather ingest task stopped");
    })
}

async fn run_once(service: &WeatherIngestService) {
    if let Err(e) = service.fetch_and_store().await {
        error!(error = %e, "Weather ingest run failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{FeedError, StationReading, WeatherFeed};
    use crate::infrastructure::storage::InMemoryWeatherRepository;
    use crate::domain::WeatherRepository;
    use crate::shared::retry::RetryPolicy;
    use async_trait::async_trait;
    use chrono::TimeZone;

    fn utc(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, h, m, s).unwrap()
    }

    #[test]
    fn next_run_later_in_same_hour() {
        assert_eq!(next_run_after(utc(10, 3, 27), 15), utc(10, 15, 0));
    }

    #[test]
    fn next_run_rolls_over_to_next_hour() {
        assert_eq!(next_run_after(utc(10, 40, 0), 15), utc(11, 15, 0));
        assert_eq!(next_run_after(utc(10, 15, 0), 15), utc(11, 15, 0));
        assert_eq!(next_run_after(utc(10, 15, 1), 15), utc(11, 15, 0));
    }

    #[test]
    fn next_run_crosses_midnight() {
        let now = utc(23, 50, 0);
        let expected = Utc.with_ymd_and_hms(2024, 3, 2, 0, 15, 0).unwrap();
        assert_eq!(next_run_after(now, 15), expected);
    }

    struct OneStationFeed;

    #[async_trait]
    impl WeatherFeed for OneStationFeed {
        async fn fetch(&self) -> Result<Vec<StationReading>, FeedError> {
            Ok(vec![StationReading {
                name: Some("Pärnu".to_string()),
                air_temperature: Some(3.0),
                wind_speed: Some(4.0),
                ..Default::default()
            }])
        }
    }

    #[tokio::test]
    async fn runs_on_startup_and_stops_on_shutdown() {
        let repo = Arc::new(InMemoryWeatherRepository::new());
        let service = Arc::new(WeatherIngestService::new(
            Arc::new(OneStationFeed),
            repo.clone(),
            RetryPolicy::default(),
        ));
        let shutdown = ShutdownSignal::new();

        let handle = start_weather_ingest_task(service, IngestSchedule::default(), shutdown.clone());

        for _ in 0..100 {
            if !repo.find_all().await.unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert!(repo.latest("Pärnu").await.unwrap().is_some());

        shutdown.trigger();
        tokio::time::timeout(std::time::Duration::from_secs(1), handle)
            .await
            .expect("task should stop")
            .unwrap();
    }
}
