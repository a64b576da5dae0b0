use serde::{Deserialize, Serialize};

/// Underwriting thresholds applied by the eligibility rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub minimum_monthly_income: f64,
    pub maximum_loan_to_value: f64,
    pub maximum_vehicle_age: u32,
    pub maximum_debt_to_income: f64,
    /// APR used to estimate the payment behind the debt-to-income check.
    pub reference_rate_percent: f64,
    pub reference_term_months: u32,
    pub minimum_loan_amount: f64,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            minimum_monthly_income: 200_000.0,
            maximum_loan_to_value: 0.80,
            maximum_vehicle_age: 10,
            maximum_debt_to_income: 0.40,
            reference_rate_percent: 12.0,
            reference_term_months: 48,
            minimum_loan_amount: 500_000.0,
        }
    }
}
