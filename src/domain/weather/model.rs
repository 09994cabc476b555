//! Weather observation domain entity

use chrono::{DateTime, Utc};

use crate::domain::PhenomenonCategory;

/// One observation of a weather station.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    /// Storage id, 0 until persisted
    pub id: i32,
    pub station_name: String,
    pub wmo_code: Option<String>,
    /// Air temperature in °C
    pub air_temperature: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Raw phenomenon text as reported by the feed
    pub phenomenon: Option<String>,
    pub observed_at: DateTime<Utc>,
}

impl WeatherObservation {
    pub fn new(
        station_name: impl Into<String>,
        air_temperature: f64,
        wind_speed: f64,
        phenomenon: Option<String>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            station_name: station_name.into(),
            wmo_code: None,
            air_temperature,
            wind_speed,
            phenomenon,
            observed_at,
        }
    }

    pub fn with_wmo_code(mut self, wmo_code: impl Into<String>) -> Self {
        self.wmo_code = Some(wmo_code.into());
        self
    }

    pub fn phenomenon_category(&self) -> PhenomenonCategory {
        PhenomenonCategory::classify(self.phenomenon.as_deref())
    }
}
