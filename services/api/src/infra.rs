use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};
use vehicle_lending::config::AppConfig;
use vehicle_lending::workflows::loans::{EligibilityConfig, LoanApplicationService};
use vehicle_lending::workflows::memory::{
    InMemoryApplicationStore, InMemoryOfferStore, InMemoryValuationStore,
    InMemoryVehicleRepository,
};
use vehicle_lending::workflows::valuation::{HttpPricingClient, PricingError, ValuationService};
use vehicle_lending::workflows::vehicles::{VehicleCondition, VehicleService};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type Vehicles = VehicleService<InMemoryVehicleRepository, InMemoryValuationStore>;
pub(crate) type Loans = LoanApplicationService<
    InMemoryVehicleRepository,
    InMemoryValuationStore,
    InMemoryApplicationStore,
    InMemoryOfferStore,
>;

/// Services sharing one set of in-memory stores.
pub(crate) struct LendingServices {
    pub(crate) vehicles: Arc<Vehicles>,
    pub(crate) loans: Arc<Loans>,
}

/// Wire the services, attaching the pricing provider when credentials are configured.
pub(crate) fn build_services(config: &AppConfig) -> Result<LendingServices, PricingError> {
    let mut valuations = ValuationService::new(
        Arc::new(InMemoryVehicleRepository::default()),
        Arc::new(InMemoryValuationStore::default()),
        config.valuation.clone(),
    );

    match HttpPricingClient::from_config(&config.pricing)? {
        Some(client) => {
            info!(base_url = %config.pricing.base_url, "external pricing lookup enabled");
            valuations = valuations.with_pricing(Arc::new(client));
        }
        None => warn!("pricing credentials missing; valuations use the simulated model"),
    }

    let valuations = Arc::new(valuations);
    Ok(LendingServices {
        vehicles: Arc::new(VehicleService::new(valuations.clone())),
        loans: Arc::new(LoanApplicationService::new(
            valuations,
            Arc::new(InMemoryApplicationStore::default()),
            Arc::new(InMemoryOfferStore::default()),
            EligibilityConfig::default(),
        )),
    })
}

pub(crate) fn parse_condition(raw: &str) -> Result<VehicleCondition, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "excellent" => Ok(VehicleCondition::Excellent),
        "good" => Ok(VehicleCondition::Good),
        "fair" => Ok(VehicleCondition::Fair),
        "poor" => Ok(VehicleCondition::Poor),
        other => Err(format!(
            "unknown condition '{other}' (expected excellent, good, fair or poor)"
        )),
    }
}
