use serde_json::json;

use super::common::*;
use crate::workflows::testing::REFERENCE_YEAR;
use crate::workflows::valuation::{
    PricingQuote, PricingResponse, ValuationEstimate, ValuationEstimator, ValuationSource,
};
use crate::workflows::vehicles::VehicleCondition;

#[test]
fn simulation_applies_brand_premium_and_depreciation() {
    let estimator = ValuationEstimator::default();
    let vehicle = vehicle_with("Toyota", 2020, 35_000, VehicleCondition::Good);

    let estimate = estimator.simulate(&vehicle, REFERENCE_YEAR);

    assert_eq!(estimate.estimated_value, 4_600_000.0);
    assert_eq!(estimate.source, ValuationSource::Simulated);
    assert_eq!(estimate.confidence_score, 0.80);
    assert!(estimate.raw_payload.is_none());
}

#[test]
fn simulation_matches_brands_case_insensitively() {
    let estimator = ValuationEstimator::default();
    let upper = vehicle_with("BMW", 2025, 0, VehicleCondition::Good);
    let hyphenated = vehicle_with("Mercedes-Benz", 2025, 0, VehicleCondition::Good);
    let plain = vehicle_with("Kia", 2025, 0, VehicleCondition::Good);

    assert_eq!(estimator.simulate(&upper, REFERENCE_YEAR).estimated_value, 10_400_000.0);
    assert_eq!(
        estimator.simulate(&hyphenated, REFERENCE_YEAR).estimated_value,
        10_400_000.0
    );
    assert_eq!(estimator.simulate(&plain, REFERENCE_YEAR).estimated_value, 8_000_000.0);
}

#[test]
fn simulation_penalises_excess_mileage_and_condition() {
    let estimator = ValuationEstimator::default();
    let worn = vehicle_with("Ford", 2023, 130_000, VehicleCondition::Poor);

    assert_eq!(estimator.simulate(&worn, REFERENCE_YEAR).estimated_value, 3_400_000.0);
}

#[test]
fn simulation_floors_mileage_factor_at_half() {
    let estimator = ValuationEstimator::default();
    let extreme = vehicle_with("Kia", 2025, 1_000_000, VehicleCondition::Good);

    assert_eq!(estimator.simulate(&extreme, REFERENCE_YEAR).estimated_value, 4_000_000.0);
}

#[test]
fn simulation_condition_multipliers() {
    let estimator = ValuationEstimator::default();
    let value = |condition| {
        estimator
            .simulate(&vehicle_with("Kia", 2025, 0, condition), REFERENCE_YEAR)
            .estimated_value
    };

    assert_eq!(value(VehicleCondition::Excellent), 8_800_000.0);
    assert_eq!(value(VehicleCondition::Good), 8_000_000.0);
    assert_eq!(value(VehicleCondition::Fair), 6_800_000.0);
    assert_eq!(value(VehicleCondition::Poor), 5_200_000.0);
    assert_eq!(value(VehicleCondition::Unspecified), 8_000_000.0);
}

#[test]
fn simulation_treats_future_model_years_as_new() {
    let estimator = ValuationEstimator::default();
    let future = vehicle_with("Kia", REFERENCE_YEAR + 2, 0, VehicleCondition::Good);

    assert_eq!(estimator.simulate(&future, REFERENCE_YEAR).estimated_value, 8_000_000.0);
}

#[test]
fn simulation_is_deterministic() {
    let estimator = ValuationEstimator::default();
    let vehicle = vehicle_with("Honda", 2018, 140_000, VehicleCondition::Fair);

    let first = estimator.simulate(&vehicle, REFERENCE_YEAR);
    let second = estimator.simulate(&vehicle, REFERENCE_YEAR);

    assert_eq!(first, second);
    assert_eq!(first.estimated_value % 50_000.0, 0.0);
}

#[test]
fn external_prefers_retail_value() {
    let estimator = ValuationEstimator::default();
    let response = PricingResponse {
        retail_value: Some(20_000.0),
        loan_value: Some(1.0),
        ..PricingResponse::default()
    };

    let estimate = estimator.from_pricing(&response, REFERENCE_YEAR);

    assert_eq!(estimate.estimated_value, 25_500_000.0);
    assert_eq!(estimate.source, ValuationSource::External);
    assert!(estimate.raw_payload.is_none());
}

#[test]
fn quote_keeps_the_provider_body_verbatim() {
    let estimator = ValuationEstimator::default();
    let raw = json!({ "retail_value": 20000.0, "dealer_notes": "clean title" });
    let quote = PricingQuote {
        response: PricingResponse {
            retail_value: Some(20_000.0),
            ..PricingResponse::default()
        },
        raw: raw.clone(),
    };

    let estimate = estimator.from_quote(&quote, REFERENCE_YEAR);

    let converted = estimator.from_pricing(&quote.response, REFERENCE_YEAR);
    assert_eq!(
        estimate,
        ValuationEstimate {
            raw_payload: Some(raw),
            ..converted
        }
    );
}

#[test]
fn external_marks_up_trade_in_values() {
    let estimator = ValuationEstimator::default();

    let estimate = estimator.from_pricing(&full_response(), REFERENCE_YEAR);

    assert_eq!(estimate.estimated_value, 14_650_000.0);
}

#[test]
fn external_uses_loan_value_before_average_trade_in() {
    let estimator = ValuationEstimator::new(neutral_market_config());
    let response = PricingResponse {
        loan_value: Some(10_000.0),
        average_trade_in: Some(20_000.0),
        ..PricingResponse::default()
    };

    assert_eq!(
        estimator.from_pricing(&response, REFERENCE_YEAR).estimated_value,
        16_500_000.0
    );
}

#[test]
fn external_ignores_non_positive_figures() {
    let estimator = ValuationEstimator::new(neutral_market_config());
    let response = PricingResponse {
        retail_value: Some(0.0),
        trade_in_value: Some(-5.0),
        ..PricingResponse::default()
    };

    let estimate = estimator.from_pricing(&response, REFERENCE_YEAR);

    assert_eq!(estimate.estimated_value, 7_500_000.0);
    assert_eq!(estimate.confidence_score, 0.5);
}

#[test]
fn external_applies_mileage_adjustment() {
    let estimator = ValuationEstimator::default();
    let response = PricingResponse {
        retail_value: Some(20_000.0),
        mileage_adjustment_percent: Some(-10.0),
        ..PricingResponse::default()
    };

    assert_eq!(
        estimator.from_pricing(&response, REFERENCE_YEAR).estimated_value,
        22_950_000.0
    );
}

#[test]
fn external_clamps_to_minimum_floor() {
    let estimator = ValuationEstimator::default();
    let response = PricingResponse {
        loan_value: Some(100.0),
        ..PricingResponse::default()
    };

    let estimate = estimator.from_pricing(&response, REFERENCE_YEAR);

    assert_eq!(estimate.estimated_value, 500_000.0);
    assert_eq!(estimate.confidence_score, 0.6);
}

#[test]
fn external_confidence_accumulates_and_caps() {
    let estimator = ValuationEstimator::default();

    let retail_only = PricingResponse {
        retail_value: Some(20_000.0),
        ..PricingResponse::default()
    };
    assert_eq!(
        estimator.from_pricing(&retail_only, REFERENCE_YEAR).confidence_score,
        0.75
    );

    let two_sources = PricingResponse {
        retail_value: Some(20_000.0),
        trade_in_value: Some(15_000.0),
        ..PricingResponse::default()
    };
    assert_eq!(
        estimator.from_pricing(&two_sources, REFERENCE_YEAR).confidence_score,
        0.9
    );

    assert_eq!(
        estimator.from_pricing(&full_response(), REFERENCE_YEAR).confidence_score,
        0.9
    );
}

#[test]
fn external_confidence_requires_plausible_year() {
    let estimator = ValuationEstimator::default();
    let implausible = PricingResponse {
        year: Some(1850),
        ..PricingResponse::default()
    };
    let plausible = PricingResponse {
        year: Some(REFERENCE_YEAR + 1),
        ..PricingResponse::default()
    };

    assert_eq!(
        estimator.from_pricing(&implausible, REFERENCE_YEAR).confidence_score,
        0.5
    );
    assert_eq!(
        estimator.from_pricing(&plausible, REFERENCE_YEAR).confidence_score,
        0.6
    );
}
