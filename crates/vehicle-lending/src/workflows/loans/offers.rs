use serde::{Deserialize, Serialize};

use super::amortization::{monthly_payment, total_repayment};
use super::domain::{ApplicationId, OfferDraft};

/// Term/rate pair offered to approved applicants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OfferTerms {
    pub term_months: u32,
    pub annual_rate_percent: f64,
}

/// Standard, shorter-cheaper, and longer-dearer terms, in presentation order.
pub const STANDARD_OFFER_MENU: [OfferTerms; 3] = [
    OfferTerms {
        term_months: 48,
        annual_rate_percent: 12.0,
    },
    OfferTerms {
        term_months: 36,
        annual_rate_percent: 10.0,
    },
    OfferTerms {
        term_months: 60,
        annual_rate_percent: 14.0,
    },
];

const MAXIMUM_FINANCED_SHARE: f64 = 0.80;

/// Builds the fixed offer menu for an approved application.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfferGenerator;

impl OfferGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Principal is capped at 80% of the vehicle value.
    pub fn approved_principal(&self, requested_amount: f64, vehicle_value: f64) -> f64 {
        requested_amount.min(vehicle_value * MAXIMUM_FINANCED_SHARE)
    }

    pub fn generate(
        &self,
        application_id: ApplicationId,
        requested_amount: f64,
        vehicle_value: f64,
    ) -> Vec<OfferDraft> {
        let principal = self.approved_principal(requested_amount, vehicle_value);

        STANDARD_OFFER_MENU
            .iter()
            .map(|terms| {
                let payment =
                    monthly_payment(principal, terms.annual_rate_percent, terms.term_months);
                OfferDraft {
                    application_id,
                    approved_amount: principal,
                    interest_rate: terms.annual_rate_percent,
                    term_months: terms.term_months,
                    monthly_payment: payment,
                    total_repayment: total_repayment(payment, terms.term_months),
                    is_active: true,
                }
            })
            .collect()
    }
}
