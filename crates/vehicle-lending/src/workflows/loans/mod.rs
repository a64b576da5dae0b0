//! Loan application intake: eligibility scoring, offer generation, and the submission workflow.

pub mod amortization;
pub mod domain;
pub mod evaluation;
pub mod offers;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationDraft, ApplicationId, EmploymentStatus, LoanApplication, LoanApplicationSubmission,
    LoanOffer, LoanStatus, OfferDraft, OfferId,
};
pub use evaluation::{
    EligibilityConfig, EligibilityEngine, EligibilityFactor, EligibilityVerdict, PenaltyComponent,
};
pub use offers::{OfferGenerator, OfferTerms, STANDARD_OFFER_MENU};
pub use repository::{ApplicationStore, OfferStore};
pub use router::loan_router;
pub use service::{LoanApplicationService, LoanServiceError, SubmissionOutcome};
