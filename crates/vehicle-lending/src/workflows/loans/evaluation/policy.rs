use super::rules::RuleSignals;
use super::{EligibilityVerdict, PenaltyComponent};

const STARTING_SCORE: i16 = 100;

/// Fold triggered rules into a verdict.
///
/// Eligibility is gated on the reason list being empty; the score is informational only.
pub(crate) fn decide_verdict(
    components: Vec<PenaltyComponent>,
    signals: RuleSignals,
) -> EligibilityVerdict {
    let deducted: i16 = components
        .iter()
        .map(|component| i16::from(component.penalty))
        .sum();
    let score = (STARTING_SCORE - deducted).max(0) as u8;

    let reasons: Vec<String> = components
        .iter()
        .map(|component| component.notes.clone())
        .collect();

    EligibilityVerdict {
        eligible: reasons.is_empty(),
        reasons,
        score,
        components,
        loan_to_value: signals.loan_to_value,
        debt_to_income: signals.debt_to_income,
        vehicle_age: signals.vehicle_age,
    }
}
