use super::domain::{NewVehicle, Vehicle, VehicleId};

/// Storage abstraction for vehicle records so services can be exercised in isolation.
pub trait VehicleRepository: Send + Sync {
    fn get(&self, id: VehicleId) -> Result<Option<Vehicle>, RepositoryError>;
    fn find_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, RepositoryError>;
    fn insert(&self, vehicle: NewVehicle) -> Result<Vehicle, RepositoryError>;
    /// All vehicles, newest first.
    fn list(&self) -> Result<Vec<Vehicle>, RepositoryError>;
}

/// Error enumeration for store failures, shared by every repository in the crate.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
