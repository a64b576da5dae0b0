mod config;
mod policy;
mod rules;

pub use config::EligibilityConfig;

use super::domain::LoanApplicationSubmission;
use crate::workflows::vehicles::Vehicle;
use policy::decide_verdict;
use serde::{Deserialize, Serialize};

/// Stateless evaluator applying the underwriting rules to a submission.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    pub fn evaluate(
        &self,
        submission: &LoanApplicationSubmission,
        vehicle: &Vehicle,
        vehicle_value: f64,
        current_year: i32,
    ) -> EligibilityVerdict {
        let (components, signals) =
            rules::assess_application(submission, vehicle, vehicle_value, &self.config, current_year);
        decide_verdict(components, signals)
    }
}

/// Underwriting factors checked for every application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityFactor {
    MonthlyIncome,
    EmploymentStatus,
    LoanToValue,
    VehicleAge,
    DebtToIncome,
    MinimumAmount,
}

/// A triggered rule, allowing transparent audits of the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyComponent {
    pub factor: EligibilityFactor,
    pub penalty: u8,
    pub notes: String,
}

/// Evaluation output: verdict, ordered reasons, and a 0-100 score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub eligible: bool,
    pub reasons: Vec<String>,
    pub score: u8,
    pub components: Vec<PenaltyComponent>,
    pub loan_to_value: f64,
    pub debt_to_income: f64,
    pub vehicle_age: u32,
}

impl EligibilityVerdict {
    /// Reasons as stored on a rejected application.
    pub fn rejection_reason(&self) -> Option<String> {
        if self.reasons.is_empty() {
            None
        } else {
            Some(self.reasons.join("; "))
        }
    }
}
