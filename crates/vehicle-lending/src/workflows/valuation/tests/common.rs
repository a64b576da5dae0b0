use std::sync::Arc;

use chrono::Utc;

use crate::workflows::memory::{InMemoryValuationStore, InMemoryVehicleRepository};

use crate::workflows::testing::REFERENCE_YEAR;
use crate::workflows::valuation::{PricingResponse, ValuationConfig, ValuationService};
use crate::workflows::vehicles::{NewVehicle, Vehicle, VehicleCondition, VehicleId};

pub(super) fn vehicle_with(make: &str, year: i32, mileage: u32, condition: VehicleCondition) -> Vehicle {
    Vehicle::from_new(
        VehicleId(7),
        NewVehicle {
            vin: "JN1AZ4EH8DM123456".to_string(),
            make: make.to_string(),
            model: "Sample".to_string(),
            year,
            mileage,
            condition,
            price: 25_000.0,
            color: None,
            images: Vec::new(),
        },
        Utc::now(),
    )
}

pub(super) fn full_response() -> PricingResponse {
    PricingResponse {
        retail_value: None,
        adjusted_trade_in_value: Some(10_000.0),
        trade_in_value: Some(9_000.0),
        loan_value: Some(8_000.0),
        average_trade_in: None,
        mileage_adjustment_percent: None,
        make: Some("Honda".to_string()),
        model: Some("Accord".to_string()),
        year: Some(2020),
        trim: Some("EX-L".to_string()),
        msrp_value: Some(32_000.0),
    }
}

pub(super) fn neutral_market_config() -> ValuationConfig {
    ValuationConfig {
        market_adjustment_factor: 1.0,
        ..ValuationConfig::default()
    }
}

pub(super) fn build_service() -> (
    ValuationService<InMemoryVehicleRepository, InMemoryValuationStore>,
    Arc<InMemoryVehicleRepository>,
    Arc<InMemoryValuationStore>,
) {
    let vehicles = Arc::new(InMemoryVehicleRepository::default());
    let store = Arc::new(InMemoryValuationStore::default());
    let service = ValuationService::new(vehicles.clone(), store.clone(), ValuationConfig::default())
        .with_reference_year(REFERENCE_YEAR);
    (service, vehicles, store)
}
