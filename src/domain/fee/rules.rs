//! Delivery fee rules
//!
//! Total fee = regional base fee + extra fees for air temperature, wind
//! speed and weather phenomenon. Extra fees only apply to the vehicles
//! exposed to the weather:
//!
//! | extra fee          | Car | Scooter | Bike |
//! |--------------------|-----|---------|------|
//! | air temperature    |     | x       | x    |
//! | wind speed         |     |         | x    |
//! | weather phenomenon |     | x       | x    |
//!
//! Wind is evaluated before phenomenon, so a bike facing both a storm and
//! high wind is refused for the wind.

use super::model::{Fee, FeeBreakdown};
use crate::domain::{
    City, DomainError, DomainResult, ForbiddenReason, PhenomenonCategory, VehicleType,
    WeatherObservation,
};

/// Regional base fees, indexed by `[city][vehicle]`.
const REGIONAL_BASE_FEES: [[Fee; 3]; 3] = [
    // Car, Scooter, Bike
    [Fee::from_cents(400), Fee::from_cents(350), Fee::from_cents(300)], // Tallinn
    [Fee::from_cents(350), Fee::from_cents(300), Fee::from_cents(250)], // Tartu
    [Fee::from_cents(300), Fee::from_cents(250), Fee::from_cents(200)], // Pärnu
];

const COLD_TEMPERATURE: f64 = -10.0;
const COOL_TEMPERATURE: f64 = 0.0;
const COLD_TEMPERATURE_FEE: Fee = Fee::from_cents(100);
const COOL_TEMPERATURE_FEE: Fee = Fee::from_cents(50);

const MAX_WIND_SPEED: f64 = 20.0;
const MODERATE_WIND_SPEED: f64 = 10.0;
const MODERATE_WIND_FEE: Fee = Fee::from_cents(50);

const SNOW_OR_SLEET_FEE: Fee = Fee::from_cents(100);
const RAIN_FEE: Fee = Fee::from_cents(50);

/// Stateless fee calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeeRuleEngine;

impl FeeRuleEngine {
    /// Total delivery fee, or `UsageForbidden` when the weather rules the
    /// vehicle out.
    pub fn compute_fee(
        city: City,
        vehicle: VehicleType,
        observation: &WeatherObservation,
    ) -> DomainResult<Fee> {
        Self::breakdown(city, vehicle, observation).map(|b| b.total())
    }

    pub fn breakdown(
        city: City,
        vehicle: VehicleType,
        observation: &WeatherObservation,
    ) -> DomainResult<FeeBreakdown> {
        let regional_base_fee = Self::regional_base_fee(city, vehicle);
        let air_temperature_fee = Self::air_temperature_fee(vehicle, observation.air_temperature);
        let wind_speed_fee = Self::wind_speed_fee(vehicle, observation.wind_speed)?;
        let weather_phenomenon_fee =
            Self::weather_phenomenon_fee(vehicle, observation.phenomenon_category())?;

        Ok(FeeBreakdown {
            regional_base_fee,
            air_temperature_fee,
            wind_speed_fee,
            weather_phenomenon_fee,
        })
    }

    pub fn regional_base_fee(city: City, vehicle: VehicleType) -> Fee {
        REGIONAL_BASE_FEES[city.index()][vehicle.index()]
    }

    pub fn air_temperature_fee(vehicle: VehicleType, temperature: f64) -> Fee {
        if vehicle == VehicleType::Car {
            return Fee::ZERO;
        }

        if temperature < COLD_TEMPERATURE {
            COLD_TEMPERATURE_FEE
        } else if temperature <= COOL_TEMPERATURE {
            COOL_TEMPERATURE_FEE
        } else {
            Fee::ZERO
        }
    }

    pub fn wind_speed_fee(vehicle: VehicleType, wind_speed: f64) -> DomainResult<Fee> {
        if vehicle != VehicleType::Bike {
            return Ok(Fee::ZERO);
        }

        if wind_speed > MAX_WIND_SPEED {
            Err(DomainError::UsageForbidden(ForbiddenReason::HighWindSpeed))
        } else if wind_speed >= MODERATE_WIND_SPEED {
            Ok(MODERATE_WIND_FEE)
        } else {
            Ok(Fee::ZERO)
        }
    }

    pub fn weather_phenomenon_fee(
        vehicle: VehicleType,
        category: PhenomenonCategory,
    ) -> DomainResult<Fee> {
        if vehicle == VehicleType::Car {
            return Ok(Fee::ZERO);
        }

        match category {
            PhenomenonCategory::Forbidden => {
                Err(DomainError::UsageForbidden(ForbiddenReason::DangerousWeather))
            }
            PhenomenonCategory::Snow | PhenomenonCategory::Sleet => Ok(SNOW_OR_SLEET_FEE),
            PhenomenonCategory::Rain => Ok(RAIN_FEE),
            PhenomenonCategory::Normal => Ok(Fee::ZERO),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
