use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::valuation::{PricingApiConfig, ValuationConfig};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub pricing: PricingApiConfig,
    pub valuation: ValuationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            pricing: load_pricing()?,
            valuation: load_valuation()?,
        })
    }
}

fn load_pricing() -> Result<PricingApiConfig, ConfigError> {
    let defaults = PricingApiConfig::default();
    let timeout_secs = match env::var("PRICING_TIMEOUT_SECS") {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber {
                key: "PRICING_TIMEOUT_SECS",
                value: raw,
            })?,
        Err(_) => defaults.timeout_secs,
    };

    Ok(PricingApiConfig {
        api_key: env::var("PRICING_API_KEY").ok(),
        api_host: env::var("PRICING_API_HOST").ok(),
        base_url: env::var("PRICING_API_URL").unwrap_or(defaults.base_url),
        timeout_secs,
    })
}

fn load_valuation() -> Result<ValuationConfig, ConfigError> {
    let defaults = ValuationConfig::default();
    Ok(ValuationConfig {
        exchange_rate: env_f64("VALUATION_EXCHANGE_RATE", defaults.exchange_rate)?,
        retail_markup: env_f64("VALUATION_RETAIL_MARKUP", defaults.retail_markup)?,
        loan_value_adjustment: env_f64(
            "VALUATION_LOAN_VALUE_ADJUSTMENT",
            defaults.loan_value_adjustment,
        )?,
        market_adjustment_factor: env_f64(
            "VALUATION_MARKET_ADJUSTMENT",
            defaults.market_adjustment_factor,
        )?,
        value_rounding_unit: env_f64("VALUATION_ROUNDING_UNIT", defaults.value_rounding_unit)?,
        minimum_value_floor: env_f64("VALUATION_MINIMUM_FLOOR", defaults.minimum_value_floor)?,
        default_base_value: env_f64("VALUATION_DEFAULT_BASE_VALUE", defaults.default_base_value)?,
    })
}

fn env_f64(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ConfigError::InvalidNumber { key, value: raw }),
        },
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a finite number, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
