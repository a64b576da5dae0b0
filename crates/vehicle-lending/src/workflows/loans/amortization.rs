//! Fixed-rate amortization.

/// Level monthly payment for `principal` at `annual_rate_percent` over `term_months`.
///
/// A zero rate yields straight-line `principal / term_months`, left unrounded. Otherwise the
/// payment is rounded to cents. `term_months` must be at least 1.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_months: u32) -> f64 {
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let periods = f64::from(term_months);

    if monthly_rate == 0.0 {
        return principal / periods;
    }

    let growth = (1.0 + monthly_rate).powi(term_months as i32);
    let payment = principal * monthly_rate * growth / (growth - 1.0);

    (payment * 100.0).round() / 100.0
}

pub fn total_repayment(monthly_payment: f64, term_months: u32) -> f64 {
    monthly_payment * f64::from(term_months)
}
