//! Mutex-backed stores for the demo service, local runs, and tests.
//!
//! Identifiers come from per-store counters. Listings are newest first.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::loans::{
    ApplicationDraft, ApplicationId, ApplicationStore, LoanApplication, LoanOffer, OfferDraft,
    OfferId, OfferStore,
};
use super::valuation::{Valuation, ValuationDraft, ValuationId, ValuationStore};
use super::vehicles::{NewVehicle, RepositoryError, Vehicle, VehicleId, VehicleRepository};

#[derive(Default, Clone)]
pub struct InMemoryVehicleRepository {
    sequence: Arc<AtomicU64>,
    records: Arc<Mutex<Vec<Vehicle>>>,
}

impl InMemoryVehicleRepository {
    pub fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VehicleRepository for InMemoryVehicleRepository {
    fn get(&self, id: VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|vehicle| vehicle.id == id).cloned())
    }

    fn find_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|vehicle| vehicle.vin == vin).cloned())
    }

    fn insert(&self, vehicle: NewVehicle) -> Result<Vehicle, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.vin == vehicle.vin) {
            return Err(RepositoryError::Conflict);
        }
        let id = VehicleId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
        let stored = Vehicle::from_new(id, vehicle, Utc::now());
        guard.push(stored.clone());
        Ok(stored)
    }

    fn list(&self) -> Result<Vec<Vehicle>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().rev().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryValuationStore {
    sequence: Arc<AtomicU64>,
    records: Arc<Mutex<Vec<Valuation>>>,
}

impl InMemoryValuationStore {
    pub fn len(&self) -> usize {
        self.records.lock().expect("valuation mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ValuationStore for InMemoryValuationStore {
    fn insert(&self, draft: ValuationDraft) -> Result<Valuation, RepositoryError> {
        let mut guard = self.records.lock().expect("valuation mutex poisoned");
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        // never older than the previous record
        let now = Utc::now();
        let created_at = guard
            .last()
            .map_or(now, |previous| previous.created_at.max(now));
        let stored = Valuation::from_draft(ValuationId(sequence), draft, created_at);
        guard.push(stored.clone());
        Ok(stored)
    }

    fn latest(&self, vehicle_id: VehicleId) -> Result<Option<Valuation>, RepositoryError> {
        let guard = self.records.lock().expect("valuation mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .find(|valuation| valuation.vehicle_id == vehicle_id)
            .cloned())
    }

    fn history(&self, vehicle_id: VehicleId) -> Result<Vec<Valuation>, RepositoryError> {
        let guard = self.records.lock().expect("valuation mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|valuation| valuation.vehicle_id == vehicle_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryApplicationStore {
    sequence: Arc<AtomicU64>,
    records: Arc<Mutex<Vec<LoanApplication>>>,
}

impl InMemoryApplicationStore {
    pub fn len(&self) -> usize {
        self.records.lock().expect("application mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ApplicationStore for InMemoryApplicationStore {
    fn insert(&self, draft: ApplicationDraft) -> Result<LoanApplication, RepositoryError> {
        let id = ApplicationId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
        let stored = LoanApplication::from_draft(id, draft, Utc::now());
        self.records
            .lock()
            .expect("application mutex poisoned")
            .push(stored.clone());
        Ok(stored)
    }

    fn update(&self, application: LoanApplication) -> Result<LoanApplication, RepositoryError> {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == application.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = application.clone();
        Ok(application)
    }

    fn fetch(&self, id: ApplicationId) -> Result<Option<LoanApplication>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard.iter().find(|application| application.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<LoanApplication>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard.iter().rev().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryOfferStore {
    sequence: Arc<AtomicU64>,
    records: Arc<Mutex<Vec<LoanOffer>>>,
}

impl InMemoryOfferStore {
    pub fn len(&self) -> usize {
        self.records.lock().expect("offer mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OfferStore for InMemoryOfferStore {
    fn insert_batch(&self, drafts: Vec<OfferDraft>) -> Result<Vec<LoanOffer>, RepositoryError> {
        let mut guard = self.records.lock().expect("offer mutex poisoned");
        let now = Utc::now();
        let stored: Vec<LoanOffer> = drafts
            .into_iter()
            .map(|draft| {
                let id = OfferId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
                LoanOffer::from_draft(id, draft, now)
            })
            .collect();
        guard.extend(stored.iter().cloned());
        Ok(stored)
    }

    fn active_for_application(
        &self,
        application_id: ApplicationId,
    ) -> Result<Vec<LoanOffer>, RepositoryError> {
        let guard = self.records.lock().expect("offer mutex poisoned");
        let mut offers: Vec<LoanOffer> = guard
            .iter()
            .filter(|offer| offer.application_id == application_id && offer.is_active)
            .cloned()
            .collect();
        offers.sort_by(|a, b| a.monthly_payment.total_cmp(&b.monthly_payment));
        Ok(offers)
    }
}
