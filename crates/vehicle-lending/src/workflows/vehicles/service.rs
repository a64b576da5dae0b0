use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{NewVehicle, Vehicle, VehicleId};
use super::repository::{RepositoryError, VehicleRepository};
use crate::workflows::valuation::{Valuation, ValuationService, ValuationServiceError, ValuationStore};

/// Vehicle intake and lookup, with a best-effort valuation triggered after creation.
pub struct VehicleService<V, S> {
    vehicles: Arc<V>,
    valuations: Arc<ValuationService<V, S>>,
}

impl<V, S> VehicleService<V, S>
where
    V: VehicleRepository + 'static,
    S: ValuationStore + 'static,
{
    pub fn new(valuations: Arc<ValuationService<V, S>>) -> Self {
        Self {
            vehicles: valuations.vehicles().clone(),
            valuations,
        }
    }

    /// Register a vehicle. A failing post-creation valuation is logged and never returned.
    pub async fn register(&self, vehicle: NewVehicle) -> Result<Vehicle, VehicleServiceError> {
        if self.vehicles.find_by_vin(&vehicle.vin)?.is_some() {
            return Err(VehicleServiceError::DuplicateVin(vehicle.vin));
        }

        let stored = self.vehicles.insert(vehicle)?;
        info!(vehicle_id = %stored.id, vin = %stored.vin, "vehicle registered");

        if let Err(error) = self.valuations.create_for(&stored).await {
            warn!(vehicle_id = %stored.id, %error, "automatic valuation failed");
        }

        Ok(stored)
    }

    pub fn get(&self, id: VehicleId) -> Result<Vehicle, VehicleServiceError> {
        self.vehicles
            .get(id)?
            .ok_or(VehicleServiceError::NotFound(id))
    }

    pub fn list(&self) -> Result<Vec<Vehicle>, VehicleServiceError> {
        Ok(self.vehicles.list()?)
    }

    /// Produce a fresh valuation on demand.
    pub async fn request_valuation(
        &self,
        id: VehicleId,
    ) -> Result<VehicleValuationView, VehicleServiceError> {
        let vehicle = self.get(id)?;
        let valuation = self.valuations.create_for(&vehicle).await?;
        Ok(VehicleValuationView {
            vehicle,
            valuation,
            message: "Valuation completed successfully".to_string(),
        })
    }

    pub fn valuations(&self, id: VehicleId) -> Result<Vec<Valuation>, VehicleServiceError> {
        self.get(id)?;
        Ok(self.valuations.history(id)?)
    }
}

/// Response body for an explicit valuation request.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleValuationView {
    pub vehicle: Vehicle,
    pub valuation: Valuation,
    pub message: String,
}

/// Error raised by the vehicle service.
#[derive(Debug, thiserror::Error)]
pub enum VehicleServiceError {
    #[error("vehicle with VIN {0} already exists")]
    DuplicateVin(String),
    #[error("vehicle {0} not found")]
    NotFound(VehicleId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Valuation(#[from] ValuationServiceError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::memory::{InMemoryValuationStore, InMemoryVehicleRepository};
    use crate::workflows::testing::{new_vehicle, OfflineStore, REFERENCE_YEAR};
    use crate::workflows::valuation::ValuationConfig;

    fn build_service() -> (
        VehicleService<InMemoryVehicleRepository, InMemoryValuationStore>,
        Arc<InMemoryValuationStore>,
    ) {
        let store = Arc::new(InMemoryValuationStore::default());
        let valuations = ValuationService::new(
            Arc::new(InMemoryVehicleRepository::default()),
            store.clone(),
            ValuationConfig::default(),
        )
        .with_reference_year(REFERENCE_YEAR);
        (VehicleService::new(Arc::new(valuations)), store)
    }

    #[tokio::test]
    async fn register_triggers_a_valuation() {
        let (service, store) = build_service();

        let vehicle = service
            .register(new_vehicle("1HGBH41JXMN109186", "Toyota", 2020))
            .await
            .expect("vehicle registered");

        assert_eq!(store.len(), 1);
        assert_eq!(service.valuations(vehicle.id).expect("history").len(), 1);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_vin() {
        let (service, _) = build_service();
        service
            .register(new_vehicle("1HGBH41JXMN109186", "Toyota", 2020))
            .await
            .expect("first registration");

        match service
            .register(new_vehicle("1HGBH41JXMN109186", "Honda", 2021))
            .await
        {
            Err(VehicleServiceError::DuplicateVin(vin)) => assert_eq!(vin, "1HGBH41JXMN109186"),
            other => panic!("expected duplicate VIN, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_survives_failed_valuation() {
        let valuations = ValuationService::new(
            Arc::new(InMemoryVehicleRepository::default()),
            Arc::new(OfflineStore),
            ValuationConfig::default(),
        );
        let service = VehicleService::new(Arc::new(valuations));

        let vehicle = service
            .register(new_vehicle("JN1AZ4EH8DM123456", "Honda", 2021))
            .await
            .expect("registration succeeds despite valuation failure");

        assert_eq!(service.get(vehicle.id).expect("vehicle stored").vin, vehicle.vin);
    }

    #[tokio::test]
    async fn request_valuation_requires_existing_vehicle() {
        let (service, _) = build_service();

        match service.request_valuation(VehicleId(99)).await {
            Err(VehicleServiceError::NotFound(VehicleId(99))) => {}
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn request_valuation_appends_to_history() {
        let (service, store) = build_service();
        let vehicle = service
            .register(new_vehicle("1HGBH41JXMN109186", "Toyota", 2020))
            .await
            .expect("vehicle registered");

        let view = service
            .request_valuation(vehicle.id)
            .await
            .expect("valuation requested");

        assert_eq!(view.vehicle.id, vehicle.id);
        assert_eq!(store.len(), 2);
        assert_eq!(service.list().expect("list").len(), 1);
    }
}
