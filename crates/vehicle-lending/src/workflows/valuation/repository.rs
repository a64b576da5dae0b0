use super::domain::{Valuation, ValuationDraft};
use crate::workflows::vehicles::{RepositoryError, VehicleId};

/// Valuation history storage. Records are append-only.
pub trait ValuationStore: Send + Sync {
    fn insert(&self, draft: ValuationDraft) -> Result<Valuation, RepositoryError>;
    /// Most recent valuation by creation time, if any.
    fn latest(&self, vehicle_id: VehicleId) -> Result<Option<Valuation>, RepositoryError>;
    /// Every valuation for the vehicle, newest first.
    fn history(&self, vehicle_id: VehicleId) -> Result<Vec<Valuation>, RepositoryError>;
}
