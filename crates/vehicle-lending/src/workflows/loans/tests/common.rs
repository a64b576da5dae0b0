use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::loans::{
    EligibilityConfig, EmploymentStatus, LoanApplicationService, LoanApplicationSubmission,
};
use crate::workflows::memory::{
    InMemoryApplicationStore, InMemoryOfferStore, InMemoryValuationStore,
    InMemoryVehicleRepository,
};
use crate::workflows::testing::{new_vehicle, REFERENCE_YEAR};
use crate::workflows::valuation::{
    ValuationConfig, ValuationDraft, ValuationEstimate, ValuationService, ValuationSource,
    ValuationStore,
};
use crate::workflows::vehicles::{Vehicle, VehicleId, VehicleRepository};

pub(super) type MemoryLoanService = LoanApplicationService<
    InMemoryVehicleRepository,
    InMemoryValuationStore,
    InMemoryApplicationStore,
    InMemoryOfferStore,
>;

pub(super) struct Harness {
    pub service: MemoryLoanService,
    pub vehicles: Arc<InMemoryVehicleRepository>,
    pub valuations: Arc<InMemoryValuationStore>,
    pub applications: Arc<InMemoryApplicationStore>,
    pub offers: Arc<InMemoryOfferStore>,
}

impl Harness {
    /// Register a vehicle whose latest valuation is pinned to `value`.
    pub fn vehicle_valued_at(&self, vin: &str, year: i32, value: f64) -> Vehicle {
        let vehicle = self
            .vehicles
            .insert(new_vehicle(vin, "Toyota", year))
            .expect("vehicle stored");
        self.valuations
            .insert(ValuationDraft {
                vehicle_id: vehicle.id,
                estimate: ValuationEstimate {
                    estimated_value: value,
                    source: ValuationSource::External,
                    confidence_score: 0.9,
                    raw_payload: None,
                },
            })
            .expect("valuation stored");
        vehicle
    }
}

pub(super) fn harness() -> Harness {
    let vehicles = Arc::new(InMemoryVehicleRepository::default());
    let valuations = Arc::new(InMemoryValuationStore::default());
    let applications = Arc::new(InMemoryApplicationStore::default());
    let offers = Arc::new(InMemoryOfferStore::default());
    let valuation_service = ValuationService::new(
        vehicles.clone(),
        valuations.clone(),
        ValuationConfig::default(),
    )
    .with_reference_year(REFERENCE_YEAR);
    let service = LoanApplicationService::new(
        Arc::new(valuation_service),
        applications.clone(),
        offers.clone(),
        EligibilityConfig::default(),
    );

    Harness {
        service,
        vehicles,
        valuations,
        applications,
        offers,
    }
}

/// Well-qualified applicant asking for 5M.
pub(super) fn submission(vehicle_id: VehicleId) -> LoanApplicationSubmission {
    LoanApplicationSubmission {
        vehicle_id,
        applicant_name: "Adaeze Okafor".to_string(),
        applicant_email: "adaeze@example.com".to_string(),
        applicant_phone: "+2348012345678".to_string(),
        requested_amount: 5_000_000.0,
        employment_status: EmploymentStatus::Employed,
        monthly_income: 500_000.0,
    }
}

/// Unemployed low earner asking for most of a 6M vehicle.
pub(super) fn weak_submission(vehicle_id: VehicleId) -> LoanApplicationSubmission {
    LoanApplicationSubmission {
        monthly_income: 100_000.0,
        employment_status: EmploymentStatus::Unemployed,
        ..submission(vehicle_id)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
