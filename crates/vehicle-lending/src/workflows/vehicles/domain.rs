use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for vehicles held by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub u64);

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reported physical condition of a listed vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCondition {
    Excellent,
    Good,
    Fair,
    Poor,
    #[serde(other)]
    Unspecified,
}

impl VehicleCondition {
    pub const fn label(self) -> &'static str {
        match self {
            VehicleCondition::Excellent => "excellent",
            VehicleCondition::Good => "good",
            VehicleCondition::Fair => "fair",
            VehicleCondition::Poor => "poor",
            VehicleCondition::Unspecified => "unspecified",
        }
    }
}

/// Intake payload for a vehicle; identity and timestamps are assigned by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVehicle {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: u32,
    pub condition: VehicleCondition,
    pub price: f64,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Stored vehicle record referenced by valuations and loan applications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: u32,
    pub condition: VehicleCondition,
    pub price: f64,
    pub color: Option<String>,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn from_new(id: VehicleId, vehicle: NewVehicle, now: DateTime<Utc>) -> Self {
        Self {
            id,
            vin: vehicle.vin,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            mileage: vehicle.mileage,
            condition: vehicle.condition,
            price: vehicle.price,
            color: vehicle.color,
            images: vehicle.images,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whole years since the model year, floored at zero for future model years.
    pub fn age_in_years(&self, current_year: i32) -> u32 {
        (current_year - self.year).max(0) as u32
    }
}
