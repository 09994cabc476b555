//! Delivery fee DTOs

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::FeeQuote;
use crate::domain::{DomainError, FeeBreakdown, CURRENCY};

/// Delivery fee for a city and vehicle type
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeliveryFeeResponse {
    /// City (TALLINN, TARTU, PARNU)
    #[schema(example = "TALLINN")]
    pub city: String,
    /// Vehicle type (CAR, SCOOTER, BIKE)
    #[schema(example = "BIKE")]
    pub vehicle_type: String,
    /// Total fee with two decimals
    #[schema(example = "5.00")]
    pub fee: String,
    #[schema(example = "EUR")]
    pub currency: String,
    pub breakdown: FeeBreakdownDto,
    /// Time of the weather observation the fee is based on
    pub observed_at: DateTime<Utc>,
}

/// Components of the total fee
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeeBreakdownDto {
    #[schema(example = "3.00")]
    pub regional_base_fee: String,
    #[schema(example = "0.50")]
    pub air_temperature_fee: String,
    #[schema(example = "0.50")]
    pub wind_speed_fee: String,
    #[schema(example = "1.00")]
    pub weather_phenomenon_fee: String,
}

impl From<&FeeBreakdown> for FeeBreakdownDto {
    fn from(b: &FeeBreakdown) -> Self {
        Self {
            regional_base_fee: b.regional_base_fee.to_string(),
            air_temperature_fee: b.air_temperature_fee.to_string(),
            wind_speed_fee: b.wind_speed_fee.to_string(),
            weather_phenomenon_fee: b.weather_phenomenon_fee.to_string(),
        }
    }
}

impl From<FeeQuote> for DeliveryFeeResponse {
    fn from(q: FeeQuote) -> Self {
        Self {
            city: q.city.to_string(),
            vehicle_type: q.vehicle_type.to_string(),
            fee: q.fee().to_string(),
            currency: CURRENCY.to_string(),
            breakdown: FeeBreakdownDto::from(&q.breakdown),
            observed_at: q.observed_at,
        }
    }
}

/// Query of the historical fee endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeeAtQuery {
    /// Point in time, RFC 3339 or `yyyy-MM-ddTHH:mm:ss` (UTC). A `+` offset
    /// may be sent unescaped; the space it decodes to is read back as `+`.
    #[param(example = "2024-03-01T12:00:00")]
    pub datetime: Option<String>,
}

const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a query datetime. Values without an offset are taken as UTC.
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, DomainError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    // `+02:00` arrives as ` 02:00` after query decoding
    if let Some((datetime, offset)) = value.rsplit_once(' ') {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&format!("{datetime}+{offset}")) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            DomainError::InvalidInput(format!(
                "Invalid datetime '{value}'. Expected ISO-8601, e.g. 2024-03-01T12:00:00"
            ))
        })
}
