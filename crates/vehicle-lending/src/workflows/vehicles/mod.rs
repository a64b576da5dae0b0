//! Vehicle intake and lookup.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{NewVehicle, Vehicle, VehicleCondition, VehicleId};
pub use repository::{RepositoryError, VehicleRepository};
pub use router::vehicle_router;
pub use service::{VehicleService, VehicleServiceError, VehicleValuationView};
