//! Fixtures and failing collaborators shared by the workflow unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::loans::{ApplicationDraft, ApplicationId, ApplicationStore, LoanApplication};
use super::valuation::{
    PricingError, PricingLookup, PricingQuote, PricingResponse, Valuation, ValuationDraft,
    ValuationStore,
};
use super::vehicles::{NewVehicle, RepositoryError, Vehicle, VehicleCondition, VehicleId};

pub(crate) const REFERENCE_YEAR: i32 = 2025;

pub(crate) fn new_vehicle(vin: &str, make: &str, year: i32) -> NewVehicle {
    NewVehicle {
        vin: vin.to_string(),
        make: make.to_string(),
        model: "Camry".to_string(),
        year,
        mileage: 35_000,
        condition: VehicleCondition::Good,
        price: 30_000.0,
        color: Some("Silver".to_string()),
        images: Vec::new(),
    }
}

pub(crate) fn vehicle(year: i32) -> Vehicle {
    Vehicle::from_new(
        VehicleId(1),
        new_vehicle("1HGBH41JXMN109186", "Toyota", year),
        Utc::now(),
    )
}

/// Store that fails every call, for propagation tests.
pub(crate) struct OfflineStore;

impl ApplicationStore for OfflineStore {
    fn insert(&self, _draft: ApplicationDraft) -> Result<LoanApplication, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _application: LoanApplication) -> Result<LoanApplication, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: ApplicationId) -> Result<Option<LoanApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<LoanApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

impl ValuationStore for OfflineStore {
    fn insert(&self, _draft: ValuationDraft) -> Result<Valuation, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn latest(&self, _vehicle_id: VehicleId) -> Result<Option<Valuation>, RepositoryError> {
        Ok(None)
    }

    fn history(&self, _vehicle_id: VehicleId) -> Result<Vec<Valuation>, RepositoryError> {
        Ok(Vec::new())
    }
}

/// Pricing provider returning a canned response and counting calls.
pub(crate) struct StubPricing {
    quote: Option<PricingQuote>,
    pub(crate) calls: AtomicUsize,
}

impl StubPricing {
    pub(crate) fn answering(response: PricingResponse) -> Arc<Self> {
        let raw = serde_json::to_value(&response).expect("pricing response serializes");
        Arc::new(Self {
            quote: Some(PricingQuote { response, raw }),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            quote: None,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl PricingLookup for StubPricing {
    async fn lookup(&self, _vin: &str) -> Result<PricingQuote, PricingError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.quote
            .clone()
            .ok_or(PricingError::Status { status: 503 })
    }
}
