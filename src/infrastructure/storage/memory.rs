//! In-memory weather storage

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::{DomainResult, WeatherObservation, WeatherRepository};

/// In-memory weather repository for development and testing.
///
/// Observations are grouped per station; ties on the timestamp resolve to
/// the most recently stored observation, like the database repository.
pub struct InMemoryWeatherRepository {
    observations: DashMap<String, Vec<WeatherObservation>>,
    id_counter: AtomicI32,
}

impl InMemoryWeatherRepository {
    pub fn new() -> Self {
        Self {
            observations: DashMap::new(),
            id_counter: AtomicI32::new(1),
        }
    }

    fn newest_matching(
        &self,
        station_name: &str,
        accept: impl Fn(&WeatherObservation) -> bool,
    ) -> Option<WeatherObservation> {
        self.observations.get(station_name).and_then(|entries| {
            entries
                .iter()
                .filter(|o| accept(o))
                .max_by_key(|o| (o.observed_at, o.id))
                .cloned()
        })
    }
}

impl Default for InMemoryWeatherRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherRepository for InMemoryWeatherRepository {
    async fn latest(&self, station_name: &str) -> DomainResult<Option<WeatherObservation>> {
        Ok(self.newest_matching(station_name, |_| true))
    }

    async fn as_of(
        &self,
        station_name: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<WeatherObservation>> {
        Ok(self.newest_matching(station_name, |o| o.observed_at <= at))
    }

    async fn save_all(&self, observations: Vec<WeatherObservation>) -> DomainResult<usize> {
        let count = observations.len();
        for mut observation in observations {
            observation.id = self.id_counter.fetch_add(1, Ordering::SeqCst);
            self.observations
                .entry(observation.station_name.clone())
                .or_default()
                .push(observation);
        }
        Ok(count)
    }

    async fn find_all(&self) -> DomainResult<Vec<WeatherObservation>> {
        let mut all: Vec<WeatherObservation> = self
            .observations
            .iter()
            .flat_map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| (b.observed_at, b.id).cmp(&(a.observed_at, a.id)));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 15, 0).unwrap()
    }

    fn obs(station: &str, temp: f64, hour: u32) -> WeatherObservation {
        WeatherObservation::new(station, temp, 1.0, None, at(hour))
    }

    #[tokio::test]
    async fn latest_and_as_of() {
        let repo = InMemoryWeatherRepository::new();
        repo.save_all(vec![
            obs("Pärnu", 1.0, 8),
            obs("Pärnu", 3.0, 10),
            obs("Pärnu", 2.0, 9),
            obs("Tallinn-Harku", 9.0, 11),
        ])
        .await
        .unwrap();

        assert_eq!(repo.latest("Pärnu").await.unwrap().unwrap().air_temperature, 3.0);
        assert_eq!(
            repo.as_of("Pärnu", at(9)).await.unwrap().unwrap().air_temperature,
            2.0
        );
        assert!(repo.as_of("Pärnu", at(7)).await.unwrap().is_none());
        assert!(repo.latest("Tartu-Tõravere").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn equal_timestamps_resolve_to_last_saved() {
        let repo = InMemoryWeatherRepository::new();
        repo.save_all(vec![obs("Pärnu", 1.0, 8)]).await.unwrap();
        repo.save_all(vec![obs("Pärnu", 5.0, 8)]).await.unwrap();

        assert_eq!(repo.latest("Pärnu").await.unwrap().unwrap().air_temperature, 5.0);
    }

    #[tokio::test]
    async fn find_all_is_newest_first() {
        let repo = InMemoryWeatherRepository::new();
        let saved = repo
            .save_all(vec![obs("Pärnu", 1.0, 8), obs("Tallinn-Harku", 2.0, 10), obs("Pärnu", 3.0, 9)])
            .await
            .unwrap();
        assert_eq!(saved, 3);

        let temps: Vec<f64> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|o| o.air_temperature)
            .collect();
        assert_eq!(temps, [2.0, 3.0, 1.0]);
    }
}
