//! SeaORM implementation of WeatherRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Select, Set,
};
use tracing::debug;

use crate::domain::{DomainError, DomainResult, WeatherObservation, WeatherRepository};
use crate::infrastructure::database::entities::weather_data;

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

fn entity_to_domain(m: weather_data::Model) -> WeatherObservation {
    WeatherObservation {
        id: m.id,
        station_name: m.station_name,
        wmo_code: m.wmo_code,
        air_temperature: m.air_temperature,
        wind_speed: m.wind_speed,
        phenomenon: m.weather_phenomenon,
        observed_at: m.timestamp,
    }
}

fn domain_to_active(o: WeatherObservation) -> weather_data::ActiveModel {
    weather_data::ActiveModel {
        id: NotSet,
        station_name: Set(o.station_name),
        wmo_code: Set(o.wmo_code),
        air_temperature: Set(o.air_temperature),
        wind_speed: Set(o.wind_speed),
        weather_phenomenon: Set(o.phenomenon),
        timestamp: Set(o.observed_at),
    }
}

fn newest_first(query: Select<weather_data::Entity>) -> Select<weather_data::Entity> {
    query
        .order_by_desc(weather_data::Column::Timestamp)
        .order_by_desc(weather_data::Column::Id)
}

// ── SeaOrmWeatherRepository ─────────────────────────────────────

pub struct SeaOrmWeatherRepository {
    db: DatabaseConnection,
}

impl SeaOrmWeatherRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WeatherRepository for SeaOrmWeatherRepository {
    async fn latest(&self, station_name: &str) -> DomainResult<Option<WeatherObservation>> {
        let model = newest_first(
            weather_data::Entity::find()
                .filter(weather_data::Column::StationName.eq(station_name)),
        )
        .one(&self.db)
        .await
        .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn as_of(
        &self,
        station_name: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<WeatherObservation>> {
        let model = newest_first(
            weather_data::Entity::find()
                .filter(weather_data::Column::StationName.eq(station_name))
                .filter(weather_data::Column::Timestamp.lte(at)),
        )
        .one(&self.db)
        .await
        .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn save_all(&self, observations: Vec<WeatherObservation>) -> DomainResult<usize> {
        if observations.is_empty() {
            return Ok(0);
        }

        let count = observations.len();
        weather_data::Entity::insert_many(observations.into_iter().map(domain_to_active))
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)?;
        debug!(count, "Weather observations saved");
        Ok(count)
    }

    async fn find_all(&self) -> DomainResult<Vec<WeatherObservation>> {
        let models = newest_first(weather_data::Entity::find())
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use chrono::TimeZone;
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    async fn repository() -> SeaOrmWeatherRepository {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmWeatherRepository::new(db)
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 15, 0).unwrap()
    }

    fn obs(station: &str, temp: f64, hour: u32) -> WeatherObservation {
        WeatherObservation::new(station, temp, 4.5, Some("Light rain".into()), at(hour))
            .with_wmo_code("26038")
    }

    #[tokio::test]
    async fn stores_and_reads_back_fields() {
        let repo = repository().await;
        assert_eq!(repo.save_all(vec![obs("Tallinn-Harku", -2.5, 9)]).await.unwrap(), 1);

        let stored = repo.latest("Tallinn-Harku").await.unwrap().unwrap();
        assert!(stored.id > 0);
        assert_eq!(stored.air_temperature, -2.5);
        assert_eq!(stored.wind_speed, 4.5);
        assert_eq!(stored.wmo_code.as_deref(), Some("26038"));
        assert_eq!(stored.phenomenon.as_deref(), Some("Light rain"));
        assert_eq!(stored.observed_at, at(9));
    }

    #[tokio::test]
    async fn latest_and_as_of_per_station() {
        let repo = repository().await;
        repo.save_all(vec![
            obs("Pärnu", 1.0, 8),
            obs("Pärnu", 3.0, 10),
            obs("Pärnu", 2.0, 9),
            obs("Tartu-Tõravere", 7.0, 11),
        ])
        .await
        .unwrap();

        assert_eq!(repo.latest("Pärnu").await.unwrap().unwrap().air_temperature, 3.0);
        assert_eq!(
            repo.as_of("Pärnu", at(9)).await.unwrap().unwrap().air_temperature,
            2.0
        );
        assert!(repo.as_of("Pärnu", at(7)).await.unwrap().is_none());
        assert!(repo.latest("Tallinn-Harku").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn equal_timestamps_resolve_to_last_saved() {
        let repo = repository().await;
        repo.save_all(vec![obs("Pärnu", 1.0, 8)]).await.unwrap();
        repo.save_all(vec![obs("Pärnu", 5.0, 8)]).await.unwrap();

        assert_eq!(repo.latest("Pärnu").await.unwrap().unwrap().air_temperature, 5.0);
    }

    #[tokio::test]
    async fn empty_batch_and_listing() {
        let repo = repository().await;
        assert_eq!(repo.save_all(Vec::new()).await.unwrap(), 0);

        repo.save_all(vec![obs("Pärnu", 1.0, 8), obs("Tallinn-Harku", 2.0, 10)])
            .await
            .unwrap();
        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].station_name, "Tallinn-Harku");
    }
}
