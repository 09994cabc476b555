//! Courier vehicle types

use std::str::FromStr;

use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleType {
    Car,
    Scooter,
    Bike,
}

impl VehicleType {
    pub const ALL: [VehicleType; 3] = [VehicleType::Car, VehicleType::Scooter, VehicleType::Bike];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "CAR",
            Self::Scooter => "SCOOTER",
            Self::Bike => "BIKE",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Car => 0,
            Self::Scooter => 1,
            Self::Bike => 2,
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "CAR" => Ok(Self::Car),
            "SCOOTER" => Ok(Self::Scooter),
            "BIKE" => Ok(Self::Bike),
            _ => Err(DomainError::InvalidInput(format!(
                "Unknown vehicle type '{value}'. Supported vehicle types: CAR, SCOOTER, BIKE."
            ))),
        }
    }
}
