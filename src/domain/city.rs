//! Delivery cities and their weather stations

use std::str::FromStr;

use super::error::DomainError;

/// City served by the delivery platform.
///
/// Each city is observed by exactly one weather station; the station name
/// must match the ingested feed byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Tallinn,
    Tartu,
    Parnu,
}

impl City {
    pub const ALL: [City; 3] = [City::Tallinn, City::Tartu, City::Parnu];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tallinn => "TALLINN",
            Self::Tartu => "TARTU",
            Self::Parnu => "PARNU",
        }
    }

    /// Weather station observing this city
    pub fn station_name(&self) -> &'static str {
        match self {
            Self::Tallinn => "Tallinn-Harku",
            Self::Tartu => "Tartu-Tõravere",
            Self::Parnu => "Pärnu",
        }
    }

    /// Reverse lookup used by ingestion to keep only monitored stations.
    pub fn from_station_name(station: &str) -> Option<City> {
        Self::ALL
            .into_iter()
            .find(|city| city.station_name() == station)
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Tallinn => 0,
            Self::Tartu => 1,
            Self::Parnu => 2,
        }
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for City {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "TALLINN" => Ok(Self::Tallinn),
            "TARTU" => Ok(Self::Tartu),
            "PARNU" => Ok(Self::Parnu),
            _ => Err(DomainError::InvalidInput(format!(
                "Unknown city '{value}'. Supported cities: TALLINN, TARTU, PARNU."
            ))),
        }
    }
}
