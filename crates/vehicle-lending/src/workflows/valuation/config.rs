use serde::{Deserialize, Serialize};

/// Immutable knobs for external-price conversion, built once and handed to the estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    /// Source-currency to local-currency rate.
    pub exchange_rate: f64,
    /// Markup applied to trade-in style figures to approximate retail.
    pub retail_markup: f64,
    pub loan_value_adjustment: f64,
    /// Flat local-market correction applied after conversion.
    pub market_adjustment_factor: f64,
    pub value_rounding_unit: f64,
    pub minimum_value_floor: f64,
    /// Fallback figure in source currency when the response carries no usable value.
    pub default_base_value: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            exchange_rate: 1500.0,
            retail_markup: 1.15,
            loan_value_adjustment: 1.10,
            market_adjustment_factor: 0.85,
            value_rounding_unit: 50_000.0,
            minimum_value_floor: 500_000.0,
            default_base_value: 5_000.0,
        }
    }
}
