use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::workflows::vehicles::VehicleId;

/// Identifier wrapper for stored valuations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValuationId(pub u64);

/// Where an estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationSource {
    External,
    Simulated,
}

impl ValuationSource {
    pub const fn label(self) -> &'static str {
        match self {
            ValuationSource::External => "external",
            ValuationSource::Simulated => "simulated",
        }
    }
}

/// Estimator output before it is attached to a vehicle and persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationEstimate {
    pub estimated_value: f64,
    pub source: ValuationSource,
    pub confidence_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_payload: Option<Value>,
}

/// Unsaved valuation handed to the store, which assigns identity and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationDraft {
    pub vehicle_id: VehicleId,
    pub estimate: ValuationEstimate,
}

/// Immutable valuation record. A vehicle may carry many; the newest one is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub id: ValuationId,
    pub vehicle_id: VehicleId,
    pub estimated_value: f64,
    pub source: ValuationSource,
    pub confidence_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_payload: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl Valuation {
    pub fn from_draft(id: ValuationId, draft: ValuationDraft, now: DateTime<Utc>) -> Self {
        let ValuationDraft {
            vehicle_id,
            estimate,
        } = draft;
        Self {
            id,
            vehicle_id,
            estimated_value: estimate.estimated_value,
            source: estimate.source,
            confidence_score: estimate.confidence_score,
            raw_payload: estimate.raw_payload,
            created_at: now,
        }
    }
}

/// Pricing lookup response. Every field is optional; providers populate different subsets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingResponse {
    #[serde(default)]
    pub retail_value: Option<f64>,
    #[serde(default)]
    pub adjusted_trade_in_value: Option<f64>,
    #[serde(default)]
    pub trade_in_value: Option<f64>,
    #[serde(default)]
    pub loan_value: Option<f64>,
    #[serde(default)]
    pub average_trade_in: Option<f64>,
    #[serde(default)]
    pub mileage_adjustment_percent: Option<f64>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub trim: Option<String>,
    #[serde(default)]
    pub msrp_value: Option<f64>,
}

/// Decoded provider answer together with the body exactly as the provider sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingQuote {
    pub response: PricingResponse,
    pub raw: Value,
}
