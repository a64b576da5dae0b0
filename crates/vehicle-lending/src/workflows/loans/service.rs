use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::domain::{
    ApplicationDraft, ApplicationId, LoanApplication, LoanApplicationSubmission, LoanOffer,
    LoanStatus,
};
use super::evaluation::{EligibilityConfig, EligibilityEngine};
use super::offers::OfferGenerator;
use super::repository::{ApplicationStore, OfferStore};
use crate::workflows::valuation::{ValuationService, ValuationServiceError, ValuationStore};
use crate::workflows::vehicles::{RepositoryError, VehicleId, VehicleRepository};

/// Service composing valuation resolution, the eligibility rubric, and offer generation.
pub struct LoanApplicationService<V, S, A, O> {
    valuations: Arc<ValuationService<V, S>>,
    applications: Arc<A>,
    offers: Arc<O>,
    engine: Arc<EligibilityEngine>,
    generator: OfferGenerator,
}

impl<V, S, A, O> LoanApplicationService<V, S, A, O>
where
    V: VehicleRepository + 'static,
    S: ValuationStore + 'static,
    A: ApplicationStore + 'static,
    O: OfferStore + 'static,
{
    pub fn new(
        valuations: Arc<ValuationService<V, S>>,
        applications: Arc<A>,
        offers: Arc<O>,
        config: EligibilityConfig,
    ) -> Self {
        Self {
            valuations,
            applications,
            offers,
            engine: Arc::new(EligibilityEngine::new(config)),
            generator: OfferGenerator::new(),
        }
    }

    /// Evaluate a submission end to end and persist the decided application.
    ///
    /// Rejection is a successful outcome. Only a missing vehicle or a store failure errors.
    pub async fn submit(
        &self,
        submission: LoanApplicationSubmission,
    ) -> Result<SubmissionOutcome, LoanServiceError> {
        let vehicle_id = submission.vehicle_id;
        let vehicle = self
            .valuations
            .vehicles()
            .get(vehicle_id)?
            .ok_or(LoanServiceError::VehicleNotFound(vehicle_id))?;

        let valuation = self.valuations.latest_or_create(&vehicle).await?;
        let vehicle_value = valuation.estimated_value;

        let verdict = self.engine.evaluate(
            &submission,
            &vehicle,
            vehicle_value,
            self.valuations.reference_year(),
        );

        if !verdict.eligible {
            let application = self.applications.insert(ApplicationDraft {
                submission,
                status: LoanStatus::Rejected,
                eligibility_score: verdict.score,
                rejection_reason: verdict.rejection_reason(),
            })?;

            info!(
                application_id = %application.id,
                score = verdict.score,
                reasons = verdict.reasons.len(),
                "loan application rejected"
            );

            return Ok(SubmissionOutcome {
                application,
                eligible: false,
                reasons: verdict.reasons,
                offers: Vec::new(),
                vehicle_value: None,
                message: "Loan application rejected due to eligibility criteria".to_string(),
            });
        }

        let requested_amount = submission.requested_amount;
        let application = self.applications.insert(ApplicationDraft {
            submission,
            status: LoanStatus::Approved,
            eligibility_score: verdict.score,
            rejection_reason: None,
        })?;

        let drafts = self
            .generator
            .generate(application.id, requested_amount, vehicle_value);
        let offers = self.offers.insert_batch(drafts)?;

        info!(
            application_id = %application.id,
            offers = offers.len(),
            "loan application approved"
        );

        Ok(SubmissionOutcome {
            application,
            eligible: true,
            reasons: Vec::new(),
            offers,
            vehicle_value: Some(vehicle_value),
            message: "Loan application approved successfully".to_string(),
        })
    }

    pub fn get(&self, id: ApplicationId) -> Result<LoanApplication, LoanServiceError> {
        self.applications
            .fetch(id)?
            .ok_or(LoanServiceError::ApplicationNotFound(id))
    }

    pub fn list(&self) -> Result<Vec<LoanApplication>, LoanServiceError> {
        Ok(self.applications.list()?)
    }

    /// Overwrite the status. Any status may follow any other.
    pub fn update_status(
        &self,
        id: ApplicationId,
        status: LoanStatus,
    ) -> Result<LoanApplication, LoanServiceError> {
        let mut application = self.get(id)?;
        let previous = application.status;
        application.status = status;
        application.updated_at = Utc::now();

        let updated = self.applications.update(application)?;
        info!(
            application_id = %id,
            from = previous.label(),
            to = status.label(),
            "loan application status updated"
        );
        Ok(updated)
    }

    /// Active offers for an existing application, cheapest monthly payment first.
    pub fn offers(&self, id: ApplicationId) -> Result<Vec<LoanOffer>, LoanServiceError> {
        let application = self.get(id)?;
        Ok(self.offers.active_for_application(application.id)?)
    }
}

/// Result of a submission, returned for approvals and rejections alike.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub application: LoanApplication,
    pub eligible: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub offers: Vec<LoanOffer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_value: Option<f64>,
    pub message: String,
}

/// Error raised by the loan application service.
#[derive(Debug, thiserror::Error)]
pub enum LoanServiceError {
    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),
    #[error("loan application {0} not found")]
    ApplicationNotFound(ApplicationId),
    #[error(transparent)]
    Valuation(#[from] ValuationServiceError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
