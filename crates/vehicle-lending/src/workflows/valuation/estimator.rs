use super::config::ValuationConfig;
use super::domain::{PricingQuote, PricingResponse, ValuationEstimate, ValuationSource};
use crate::workflows::vehicles::{Vehicle, VehicleCondition};

const SIMULATED_BASE_VALUE: f64 = 8_000_000.0;
const SIMULATED_ROUNDING_UNIT: f64 = 50_000.0;
const SIMULATED_CONFIDENCE: f64 = 0.80;
const PREMIUM_BRAND_MULTIPLIER: f64 = 1.3;
const ANNUAL_DEPRECIATION: f64 = 0.85;
const EXPECTED_ANNUAL_MILEAGE: f64 = 15_000.0;
const PREMIUM_BRANDS: &[&str] = &[
    "mercedes",
    "mercedes-benz",
    "bmw",
    "audi",
    "lexus",
    "toyota",
    "honda",
];

const EXTERNAL_BASE_CONFIDENCE: f64 = 0.5;
const EXTERNAL_CONFIDENCE_CAP: f64 = 0.90;

/// Stateless estimator producing either a simulated or a provider-backed valuation.
#[derive(Debug, Clone, Default)]
pub struct ValuationEstimator {
    config: ValuationConfig,
}

impl ValuationEstimator {
    pub fn new(config: ValuationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Deterministic depreciation model used when no pricing provider answers.
    pub fn simulate(&self, vehicle: &Vehicle, current_year: i32) -> ValuationEstimate {
        let mut value = SIMULATED_BASE_VALUE;

        if is_premium_brand(&vehicle.make) {
            value *= PREMIUM_BRAND_MULTIPLIER;
        }

        let age = vehicle.age_in_years(current_year);
        value *= ANNUAL_DEPRECIATION.powi(age as i32);

        let expected_mileage = f64::from(age) * EXPECTED_ANNUAL_MILEAGE;
        let excess_mileage = (f64::from(vehicle.mileage) - expected_mileage).max(0.0);
        let mileage_factor = 1.0 - (excess_mileage / 200_000.0) * 0.2;
        value *= mileage_factor.max(0.5);

        value *= condition_multiplier(vehicle.condition);

        ValuationEstimate {
            estimated_value: round_to_unit(value, SIMULATED_ROUNDING_UNIT),
            source: ValuationSource::Simulated,
            confidence_score: SIMULATED_CONFIDENCE,
            raw_payload: None,
        }
    }

    /// Convert a pricing response into a local-currency estimate with a heuristic confidence.
    pub fn from_pricing(&self, response: &PricingResponse, current_year: i32) -> ValuationEstimate {
        let config = &self.config;

        let mut value = select_source_value(response, config);
        value *= config.exchange_rate;

        if let Some(pct) = response.mileage_adjustment_percent {
            if pct != 0.0 && pct.is_finite() {
                value *= 1.0 + pct / 100.0;
            }
        }

        value *= config.market_adjustment_factor;
        let value = round_to_unit(value, config.value_rounding_unit).max(config.minimum_value_floor);

        ValuationEstimate {
            estimated_value: value,
            source: ValuationSource::External,
            confidence_score: external_confidence(response, current_year),
            raw_payload: None,
        }
    }

    /// Same conversion as [`Self::from_pricing`], keeping the provider body for audit.
    pub fn from_quote(&self, quote: &PricingQuote, current_year: i32) -> ValuationEstimate {
        ValuationEstimate {
            raw_payload: Some(quote.raw.clone()),
            ..self.from_pricing(&quote.response, current_year)
        }
    }
}

fn is_premium_brand(make: &str) -> bool {
    let make = make.trim().to_lowercase();
    PREMIUM_BRANDS.contains(&make.as_str())
}

fn condition_multiplier(condition: VehicleCondition) -> f64 {
    match condition {
        VehicleCondition::Excellent => 1.1,
        VehicleCondition::Good => 1.0,
        VehicleCondition::Fair => 0.85,
        VehicleCondition::Poor => 0.65,
        VehicleCondition::Unspecified => 1.0,
    }
}

fn round_to_unit(value: f64, unit: f64) -> f64 {
    if unit > 0.0 {
        (value / unit).round() * unit
    } else {
        (value * 100.0).round() / 100.0
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|amount| amount.is_finite() && *amount > 0.0)
}

fn select_source_value(response: &PricingResponse, config: &ValuationConfig) -> f64 {
    positive(response.retail_value)
        .or_else(|| positive(response.adjusted_trade_in_value).map(|v| v * config.retail_markup))
        .or_else(|| positive(response.trade_in_value).map(|v| v * config.retail_markup))
        .or_else(|| positive(response.loan_value).map(|v| v * config.loan_value_adjustment))
        .or_else(|| positive(response.average_trade_in).map(|v| v * config.retail_markup))
        .unwrap_or(config.default_base_value)
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().map(|text| !text.trim().is_empty()).unwrap_or(false)
}

fn external_confidence(response: &PricingResponse, current_year: i32) -> f64 {
    let mut confidence = EXTERNAL_BASE_CONFIDENCE;

    let retail = positive(response.retail_value).is_some();
    let trade_in = positive(response.adjusted_trade_in_value).is_some()
        || positive(response.trade_in_value).is_some();
    let loan = positive(response.loan_value).is_some();

    if retail {
        confidence += 0.25;
    }
    if trade_in {
        confidence += 0.15;
    }
    if loan {
        confidence += 0.10;
    }
    if has_text(&response.make) && has_text(&response.model) {
        confidence += 0.10;
    }
    if response
        .year
        .map(|year| (1900..=current_year + 1).contains(&year))
        .unwrap_or(false)
    {
        confidence += 0.10;
    }
    if has_text(&response.trim) {
        confidence += 0.05;
    }
    if positive(response.msrp_value).is_some() {
        confidence += 0.05;
    }

    let value_sources = [
        response.retail_value,
        response.adjusted_trade_in_value,
        response.trade_in_value,
        response.loan_value,
        response.average_trade_in,
    ]
    .into_iter()
    .filter(|value| positive(*value).is_some())
    .count();

    if value_sources >= 3 {
        confidence += 0.10;
    } else if value_sources == 2 {
        confidence += 0.05;
    }

    (confidence.min(EXTERNAL_CONFIDENCE_CAP) * 100.0).round() / 100.0
}
