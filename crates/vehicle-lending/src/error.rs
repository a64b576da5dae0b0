use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::loans::LoanServiceError;
use crate::workflows::valuation::PricingError;
use crate::workflows::vehicles::VehicleServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Pricing(PricingError),
    Vehicle(VehicleServiceError),
    Loan(LoanServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Pricing(err) => write!(f, "pricing client error: {}", err),
            AppError::Vehicle(err) => write!(f, "vehicle error: {}", err),
            AppError::Loan(err) => write!(f, "loan application error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Pricing(err) => Some(err),
            AppError::Vehicle(err) => Some(err),
            AppError::Loan(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Vehicle(VehicleServiceError::NotFound(_))
            | AppError::Loan(LoanServiceError::VehicleNotFound(_))
            | AppError::Loan(LoanServiceError::ApplicationNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Vehicle(VehicleServiceError::DuplicateVin(_)) => StatusCode::CONFLICT,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Pricing(_)
            | AppError::Vehicle(_)
            | AppError::Loan(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<PricingError> for AppError {
    fn from(value: PricingError) -> Self {
        Self::Pricing(value)
    }
}

impl From<VehicleServiceError> for AppError {
    fn from(value: VehicleServiceError) -> Self {
        Self::Vehicle(value)
    }
}

impl From<LoanServiceError> for AppError {
    fn from(value: LoanServiceError) -> Self {
        Self::Loan(value)
    }
}
