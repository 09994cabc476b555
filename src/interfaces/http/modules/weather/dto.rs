//! Weather observation DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::WeatherObservation;

/// Stored weather observation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WeatherObservationDto {
    pub id: i32,
    #[schema(example = "Tallinn-Harku")]
    pub station_name: String,
    #[schema(example = "26038")]
    pub wmo_code: Option<String>,
    /// °C
    pub air_temperature: f64,
    /// m/s
    pub wind_speed: f64,
    #[schema(example = "Light snow shower")]
    pub weather_phenomenon: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<WeatherObservation> for WeatherObservationDto {
    fn from(o: WeatherObservation) -> Self {
        Self {
            id: o.id,
            station_name: o.station_name,
            wmo_code: o.wmo_code,
            air_temperature: o.air_temperature,
            wind_speed: o.wind_speed,
            weather_phenomenon: o.phenomenon,
            timestamp: o.observed_at,
        }
    }
}
