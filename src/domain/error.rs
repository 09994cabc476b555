//! Domain errors

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Why a vehicle type may not be dispatched under the current weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenReason {
    HighWindSpeed,
    DangerousWeather,
}

impl ForbiddenReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighWindSpeed => "high wind speed",
            Self::DangerousWeather => "dangerous weather conditions",
        }
    }
}

impl std::fmt::Display for ForbiddenReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain-level error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Weather makes the requested vehicle type unsafe
    #[error("Usage of selected vehicle type is forbidden due to {0}")]
    UsageForbidden(ForbiddenReason),

    /// No observation exists for the station (latest or as-of)
    #[error("No weather data available for station {station}{}", as_of_suffix(.at))]
    WeatherDataNotFound {
        station: String,
        at: Option<DateTime<Utc>>,
    },

    /// Malformed request value (city, vehicle type, datetime)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage/database error
    #[error("Storage error: {0}")]
    Storage(String),
}

fn as_of_suffix(at: &Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => format!(" at or before {}", at.to_rfc3339()),
        None => String::new(),
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
