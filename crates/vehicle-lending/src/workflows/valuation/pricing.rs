//! Outbound pricing lookup keyed by VIN.
//!
//! Any failure here is recoverable: the valuation service falls back to the simulated model.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::domain::{PricingQuote, PricingResponse};

pub const DEFAULT_PRICING_URL: &str = "https://vin-lookup-by-api-ninjas.p.rapidapi.com/v1/vinlookup";
const USER_AGENT: &str = "vehicle-lending/0.1.0";

/// External collaborator returning market figures for a VIN.
#[async_trait]
pub trait PricingLookup: Send + Sync {
    async fn lookup(&self, vin: &str) -> Result<PricingQuote, PricingError>;
}

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("pricing provider returned status {status}")]
    Status { status: u16 },
    #[error("pricing payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Credentials and endpoint for the pricing provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingApiConfig {
    pub api_key: Option<String>,
    pub api_host: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for PricingApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_host: None,
            base_url: DEFAULT_PRICING_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl PricingApiConfig {
    pub fn is_configured(&self) -> bool {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(|text| !text.trim().is_empty())
                .unwrap_or(false)
        };
        present(&self.api_key) && present(&self.api_host)
    }
}

/// `reqwest` implementation of [`PricingLookup`] speaking the RapidAPI header convention.
#[derive(Clone)]
pub struct HttpPricingClient {
    http: Client,
    base_url: String,
    api_key: String,
    api_host: String,
}

impl HttpPricingClient {
    /// Build a client, or `Ok(None)` when key or host is missing.
    pub fn from_config(config: &PricingApiConfig) -> Result<Option<Self>, PricingError> {
        if !config.is_configured() {
            return Ok(None);
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Some(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
            api_host: config.api_host.clone().unwrap_or_default(),
        }))
    }
}

#[async_trait]
impl PricingLookup for HttpPricingClient {
    async fn lookup(&self, vin: &str) -> Result<PricingQuote, PricingError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("vin", vin)])
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.api_host)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PricingError::Status {
                status: status.as_u16(),
            });
        }

        let raw = response.json::<serde_json::Value>().await?;
        let response = PricingResponse::deserialize(&raw)?;
        Ok(PricingQuote { response, raw })
    }
}
