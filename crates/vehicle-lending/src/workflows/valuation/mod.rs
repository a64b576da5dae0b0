//! Vehicle valuation: simulated depreciation model, external pricing conversion, and the
//! create-valuation workflow that falls back from one to the other.

pub mod config;
pub mod domain;
pub mod estimator;
pub mod pricing;
pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use config::ValuationConfig;
pub use domain::{
    PricingQuote, PricingResponse, Valuation, ValuationDraft, ValuationEstimate, ValuationId,
    ValuationSource,
};
pub use estimator::ValuationEstimator;
pub use pricing::{HttpPricingClient, PricingApiConfig, PricingError, PricingLookup};
pub use repository::ValuationStore;
pub use service::{ValuationService, ValuationServiceError};
