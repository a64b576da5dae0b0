use super::super::amortization::monthly_payment;
use super::super::domain::{EmploymentStatus, LoanApplicationSubmission};
use super::config::EligibilityConfig;
use super::{EligibilityFactor, PenaltyComponent};
use crate::workflows::vehicles::Vehicle;

const LOW_INCOME_PENALTY: u8 = 30;
const UNEMPLOYED_PENALTY: u8 = 40;
const LOAN_TO_VALUE_PENALTY: u8 = 25;
const VEHICLE_AGE_PENALTY: u8 = 20;
const DEBT_TO_INCOME_PENALTY: u8 = 15;
const MINIMUM_AMOUNT_PENALTY: u8 = 10;

/// Ratios observed while applying the rules, kept for audit views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RuleSignals {
    pub loan_to_value: f64,
    pub debt_to_income: f64,
    pub vehicle_age: u32,
}

/// Apply every rule; each one either passes silently or contributes a penalty.
pub(crate) fn assess_application(
    submission: &LoanApplicationSubmission,
    vehicle: &Vehicle,
    vehicle_value: f64,
    config: &EligibilityConfig,
    current_year: i32,
) -> (Vec<PenaltyComponent>, RuleSignals) {
    let mut components = Vec::new();

    if submission.monthly_income < config.minimum_monthly_income {
        components.push(PenaltyComponent {
            factor: EligibilityFactor::MonthlyIncome,
            penalty: LOW_INCOME_PENALTY,
            notes: format!(
                "Monthly income below minimum requirement of ₦{}",
                group_thousands(config.minimum_monthly_income)
            ),
        });
    }

    if submission.employment_status == EmploymentStatus::Unemployed {
        components.push(PenaltyComponent {
            factor: EligibilityFactor::EmploymentStatus,
            penalty: UNEMPLOYED_PENALTY,
            notes: "Applicant must be employed or self-employed".to_string(),
        });
    }

    let loan_to_value = submission.requested_amount / vehicle_value;
    if loan_to_value > config.maximum_loan_to_value {
        components.push(PenaltyComponent {
            factor: EligibilityFactor::LoanToValue,
            penalty: LOAN_TO_VALUE_PENALTY,
            notes: format!(
                "Loan-to-value ratio ({:.1}%) exceeds maximum {:.0}%",
                loan_to_value * 100.0,
                config.maximum_loan_to_value * 100.0
            ),
        });
    }

    let vehicle_age = vehicle.age_in_years(current_year);
    if vehicle_age > config.maximum_vehicle_age {
        components.push(PenaltyComponent {
            factor: EligibilityFactor::VehicleAge,
            penalty: VEHICLE_AGE_PENALTY,
            notes: format!(
                "Vehicle is {vehicle_age} years old, maximum age is {} years",
                config.maximum_vehicle_age
            ),
        });
    }

    let estimated_payment = monthly_payment(
        submission.requested_amount,
        config.reference_rate_percent,
        config.reference_term_months,
    );
    let debt_to_income = estimated_payment / submission.monthly_income;
    if debt_to_income > config.maximum_debt_to_income {
        components.push(PenaltyComponent {
            factor: EligibilityFactor::DebtToIncome,
            penalty: DEBT_TO_INCOME_PENALTY,
            notes: format!(
                "Debt-to-income ratio ({:.1}%) exceeds maximum {:.0}%",
                debt_to_income * 100.0,
                config.maximum_debt_to_income * 100.0
            ),
        });
    }

    if submission.requested_amount < config.minimum_loan_amount {
        components.push(PenaltyComponent {
            factor: EligibilityFactor::MinimumAmount,
            penalty: MINIMUM_AMOUNT_PENALTY,
            notes: format!(
                "Minimum loan amount is ₦{}",
                group_thousands(config.minimum_loan_amount)
            ),
        });
    }

    let signals = RuleSignals {
        loan_to_value,
        debt_to_income,
        vehicle_age,
    };

    (components, signals)
}

fn group_thousands(amount: f64) -> String {
    let digits = format!("{:.0}", amount.max(0.0));
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
