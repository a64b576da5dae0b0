use super::domain::{ApplicationDraft, ApplicationId, LoanApplication, LoanOffer, OfferDraft};
use crate::workflows::vehicles::RepositoryError;

/// Storage abstraction for loan applications.
pub trait ApplicationStore: Send + Sync {
    fn insert(&self, draft: ApplicationDraft) -> Result<LoanApplication, RepositoryError>;
    fn update(&self, application: LoanApplication) -> Result<LoanApplication, RepositoryError>;
    fn fetch(&self, id: ApplicationId) -> Result<Option<LoanApplication>, RepositoryError>;
    /// All applications, newest first.
    fn list(&self) -> Result<Vec<LoanApplication>, RepositoryError>;
}

/// Storage abstraction for generated offers.
pub trait OfferStore: Send + Sync {
    /// Persist the whole batch or nothing.
    fn insert_batch(&self, drafts: Vec<OfferDraft>) -> Result<Vec<LoanOffer>, RepositoryError>;
    /// Active offers for the application, cheapest monthly payment first.
    fn active_for_application(
        &self,
        application_id: ApplicationId,
    ) -> Result<Vec<LoanOffer>, RepositoryError>;
}
