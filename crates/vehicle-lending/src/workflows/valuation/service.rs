use std::sync::Arc;

use tracing::{info, warn};

use super::config::ValuationConfig;
use super::domain::{Valuation, ValuationDraft, ValuationEstimate};
use super::estimator::ValuationEstimator;
use super::pricing::PricingLookup;
use super::repository::ValuationStore;
use crate::workflows::current_year;
use crate::workflows::vehicles::{RepositoryError, Vehicle, VehicleId, VehicleRepository};

/// Service composing the vehicle repository, valuation store, estimator, and optional
/// pricing provider.
pub struct ValuationService<V, S> {
    vehicles: Arc<V>,
    store: Arc<S>,
    estimator: Arc<ValuationEstimator>,
    pricing: Option<Arc<dyn PricingLookup>>,
    reference_year: Option<i32>,
}

impl<V, S> ValuationService<V, S>
where
    V: VehicleRepository + 'static,
    S: ValuationStore + 'static,
{
    pub fn new(vehicles: Arc<V>, store: Arc<S>, config: ValuationConfig) -> Self {
        Self {
            vehicles,
            store,
            estimator: Arc::new(ValuationEstimator::new(config)),
            pricing: None,
            reference_year: None,
        }
    }

    /// Attach the external pricing provider used before falling back to simulation.
    pub fn with_pricing(mut self, pricing: Arc<dyn PricingLookup>) -> Self {
        self.pricing = Some(pricing);
        self
    }

    /// Pin the calendar year used for depreciation instead of reading the clock.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn estimator(&self) -> &ValuationEstimator {
        &self.estimator
    }

    pub(crate) fn vehicles(&self) -> &Arc<V> {
        &self.vehicles
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year.unwrap_or_else(current_year)
    }

    /// Value a stored vehicle and persist the result.
    pub async fn create_valuation(
        &self,
        vehicle_id: VehicleId,
    ) -> Result<Valuation, ValuationServiceError> {
        let vehicle = self
            .vehicles
            .get(vehicle_id)?
            .ok_or(ValuationServiceError::VehicleNotFound(vehicle_id))?;
        self.create_for(&vehicle).await
    }

    /// Value an already-resolved vehicle and persist the result.
    pub async fn create_for(&self, vehicle: &Vehicle) -> Result<Valuation, ValuationServiceError> {
        let estimate = self.estimate(vehicle).await;
        let valuation = self.store.insert(ValuationDraft {
            vehicle_id: vehicle.id,
            estimate,
        })?;

        info!(
            vehicle_id = %vehicle.id,
            estimated_value = valuation.estimated_value,
            source = valuation.source.label(),
            "valuation created"
        );
        Ok(valuation)
    }

    /// Provider-backed estimate when available, simulated otherwise.
    pub async fn estimate(&self, vehicle: &Vehicle) -> ValuationEstimate {
        let year = self.reference_year();

        let Some(pricing) = &self.pricing else {
            return self.estimator.simulate(vehicle, year);
        };

        match pricing.lookup(&vehicle.vin).await {
            Ok(quote) => self.estimator.from_quote(&quote, year),
            Err(error) => {
                warn!(vin = %vehicle.vin, %error, "pricing lookup failed, using simulation");
                self.estimator.simulate(vehicle, year)
            }
        }
    }

    pub fn latest(&self, vehicle_id: VehicleId) -> Result<Option<Valuation>, ValuationServiceError> {
        Ok(self.store.latest(vehicle_id)?)
    }

    /// Latest stored valuation, creating one synchronously when the vehicle has none.
    pub async fn latest_or_create(
        &self,
        vehicle: &Vehicle,
    ) -> Result<Valuation, ValuationServiceError> {
        match self.store.latest(vehicle.id)? {
            Some(valuation) => Ok(valuation),
            None => self.create_for(vehicle).await,
        }
    }

    pub fn history(&self, vehicle_id: VehicleId) -> Result<Vec<Valuation>, ValuationServiceError> {
        Ok(self.store.history(vehicle_id)?)
    }
}

/// Error raised by the valuation service.
#[derive(Debug, thiserror::Error)]
pub enum ValuationServiceError {
    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
