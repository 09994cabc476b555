//! Delivery fee calculation service
//!
//! Looks up the weather observation of the city's station and runs it
//! through [`FeeRuleEngine`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::{
    City, DomainError, DomainResult, Fee, FeeBreakdown, FeeRuleEngine, VehicleType,
    WeatherRepository,
};

/// A computed fee together with the observation it was based on.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeQuote {
    pub city: City,
    pub vehicle_type: VehicleType,
    pub breakdown: FeeBreakdown,
    pub station_name: String,
    pub observed_at: DateTime<Utc>,
}

impl FeeQuote {
    pub fn fee(&self) -> Fee {
        self.breakdown.total()
    }
}

pub struct DeliveryFeeService {
    weather: Arc<dyn WeatherRepository>,
}

impl DeliveryFeeService {
    pub fn new(weather: Arc<dyn WeatherRepository>) -> Self {
        Self { weather }
    }

    /// Fee based on the latest observation of the city's station.
    pub async fn calculate_fee(&self, city: City, vehicle: VehicleType) -> DomainResult<Fee> {
        self.quote(city, vehicle, None).await.map(|q| q.fee())
    }

    /// Fee based on the latest observation taken at or before `at`.
    pub async fn calculate_fee_at(
        &self,
        city: City,
        vehicle: VehicleType,
        at: DateTime<Utc>,
    ) -> DomainResult<Fee> {
        self.quote(city, vehicle, Some(at)).await.map(|q| q.fee())
    }

    /// Full fee breakdown. `at = None` uses the latest observation.
    pub async fn quote(
        &self,
        city: City,
        vehicle: VehicleType,
        at: Option<DateTime<Utc>>,
    ) -> DomainResult<FeeQuote> {
        let result = self.compute_quote(city, vehicle, at).await;
        record_outcome(&result);

        match &result {
            Ok(quote) => info!(
                city = %city,
                vehicle = %vehicle,
                fee = %quote.breakdown.format_total(),
                observed_at = %quote.observed_at,
                "Delivery fee calculated"
            ),
            Err(DomainError::UsageForbidden(reason)) => info!(
                city = %city,
                vehicle = %vehicle,
                reason = reason.as_str(),
                "Vehicle usage forbidden"
            ),
            Err(e) => warn!(city = %city, vehicle = %vehicle, error = %e, "Fee calculation failed"),
        }

        result
    }

    async fn compute_quote(
        &self,
        city: City,
        vehicle: VehicleType,
        at: Option<DateTime<Utc>>,
    ) -> DomainResult<FeeQuote> {
        let station = city.station_name();

        let observation = match at {
            Some(at) => self.weather.as_of(station, at).await?,
            None => self.weather.latest(station).await?,
        }
        .ok_or_else(|| DomainError::WeatherDataNotFound {
            station: station.to_string(),
            at,
        })?;

        debug!(
            station,
            air_temperature = observation.air_temperature,
            wind_speed = observation.wind_speed,
            phenomenon = ?observation.phenomenon,
            "Using weather observation"
        );

        let breakdown = FeeRuleEngine::breakdown(city, vehicle, &observation)?;

        Ok(FeeQuote {
            city,
            vehicle_type: vehicle,
            breakdown,
            station_name: observation.station_name,
            observed_at: observation.observed_at,
        })
    }
}

fn record_outcome(result: &DomainResult<FeeQuote>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(DomainError::UsageForbidden(_)) => "forbidden",
        Err(DomainError::WeatherDataNotFound { .. }) => "no_data",
        Err(_) => "error",
    };
    metrics::counter!("delivery_fee_calculations_total", "outcome" => outcome).increment(1);
}
