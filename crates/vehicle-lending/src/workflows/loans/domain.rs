use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::vehicles::VehicleId;

/// Identifier wrapper for loan applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub u64);

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for generated loan offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Unemployed,
}

/// Lifecycle status of a loan application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
    Disbursed,
}

impl LoanStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LoanStatus::Pending => "pending",
            LoanStatus::UnderReview => "under_review",
            LoanStatus::Approved => "approved",
            LoanStatus::Rejected => "rejected",
            LoanStatus::Disbursed => "disbursed",
        }
    }
}

/// Applicant-provided submission. Field validation happens before it reaches the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplicationSubmission {
    pub vehicle_id: VehicleId,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: String,
    pub requested_amount: f64,
    pub employment_status: EmploymentStatus,
    pub monthly_income: f64,
}

/// Unsaved application with its decided status; the store assigns identity and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationDraft {
    pub submission: LoanApplicationSubmission,
    pub status: LoanStatus,
    pub eligibility_score: u8,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub id: ApplicationId,
    pub vehicle_id: VehicleId,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: String,
    pub requested_amount: f64,
    pub employment_status: EmploymentStatus,
    pub monthly_income: f64,
    pub status: LoanStatus,
    pub eligibility_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LoanApplication {
    pub fn from_draft(id: ApplicationId, draft: ApplicationDraft, now: DateTime<Utc>) -> Self {
        let ApplicationDraft {
            submission,
            status,
            eligibility_score,
            rejection_reason,
        } = draft;
        Self {
            id,
            vehicle_id: submission.vehicle_id,
            applicant_name: submission.applicant_name,
            applicant_email: submission.applicant_email,
            applicant_phone: submission.applicant_phone,
            requested_amount: submission.requested_amount,
            employment_status: submission.employment_status,
            monthly_income: submission.monthly_income,
            status,
            eligibility_score,
            rejection_reason,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Offer terms computed by the generator before the batch is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferDraft {
    pub application_id: ApplicationId,
    pub approved_amount: f64,
    pub interest_rate: f64,
    pub term_months: u32,
    pub monthly_payment: f64,
    pub total_repayment: f64,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOffer {
    pub id: OfferId,
    pub application_id: ApplicationId,
    pub approved_amount: f64,
    pub interest_rate: f64,
    pub term_months: u32,
    pub monthly_payment: f64,
    pub total_repayment: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl LoanOffer {
    pub fn from_draft(id: OfferId, draft: OfferDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            application_id: draft.application_id,
            approved_amount: draft.approved_amount,
            interest_rate: draft.interest_rate,
            term_months: draft.term_months,
            monthly_payment: draft.monthly_payment,
            total_repayment: draft.total_repayment,
            is_active: draft.is_active,
            created_at: now,
        }
    }
}
