//! Weather observation entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One station observation stored by an ingestion run
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weather_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Station name as reported by the feed (e.g., "Tallinn-Harku")
    pub station_name: String,

    /// WMO station code, "Unknown" when the feed had none
    pub wmo_code: Option<String>,

    /// Air temperature in °C
    pub air_temperature: f64,

    /// Wind speed in m/s
    pub wind_speed: f64,

    pub weather_phenomenon: Option<String>,

    /// Fetch time of the ingestion run
    pub timestamp: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
