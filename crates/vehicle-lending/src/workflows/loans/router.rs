use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationId, LoanApplicationSubmission, LoanStatus};
use super::repository::{ApplicationStore, OfferStore};
use super::service::{LoanApplicationService, LoanServiceError};
use crate::workflows::valuation::{ValuationServiceError, ValuationStore};
use crate::workflows::vehicles::VehicleRepository;

/// Body of a manual status change.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: LoanStatus,
}

/// Router builder exposing loan application submission and lookup endpoints.
pub fn loan_router<V, S, A, O>(service: Arc<LoanApplicationService<V, S, A, O>>) -> Router
where
    V: VehicleRepository + 'static,
    S: ValuationStore + 'static,
    A: ApplicationStore + 'static,
    O: OfferStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/loan-applications",
            post(submit_handler::<V, S, A, O>).get(list_handler::<V, S, A, O>),
        )
        .route(
            "/api/v1/loan-applications/:application_id",
            get(get_handler::<V, S, A, O>),
        )
        .route(
            "/api/v1/loan-applications/:application_id/status",
            patch(status_handler::<V, S, A, O>),
        )
        .route(
            "/api/v1/loan-applications/:application_id/offers",
            get(offers_handler::<V, S, A, O>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<V, S, A, O>(
    State(service): State<Arc<LoanApplicationService<V, S, A, O>>>,
    axum::Json(submission): axum::Json<LoanApplicationSubmission>,
) -> Response
where
    V: VehicleRepository + 'static,
    S: ValuationStore + 'static,
    A: ApplicationStore + 'static,
    O: OfferStore + 'static,
{
    match service.submit(submission).await {
        Ok(outcome) => (StatusCode::CREATED, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<V, S, A, O>(
    State(service): State<Arc<LoanApplicationService<V, S, A, O>>>,
) -> Response
where
    V: VehicleRepository + 'static,
    S: ValuationStore + 'static,
    A: ApplicationStore + 'static,
    O: OfferStore + 'static,
{
    match service.list() {
        Ok(applications) => (StatusCode::OK, axum::Json(applications)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<V, S, A, O>(
    State(service): State<Arc<LoanApplicationService<V, S, A, O>>>,
    Path(application_id): Path<u64>,
) -> Response
where
    V: VehicleRepository + 'static,
    S: ValuationStore + 'static,
    A: ApplicationStore + 'static,
    O: OfferStore + 'static,
{
    match service.get(ApplicationId(application_id)) {
        Ok(application) => (StatusCode::OK, axum::Json(application)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<V, S, A, O>(
    State(service): State<Arc<LoanApplicationService<V, S, A, O>>>,
    Path(application_id): Path<u64>,
    axum::Json(request): axum::Json<StatusUpdateRequest>,
) -> Response
where
    V: VehicleRepository + 'static,
    S: ValuationStore + 'static,
    A: ApplicationStore + 'static,
    O: OfferStore + 'static,
{
    match service.update_status(ApplicationId(application_id), request.status) {
        Ok(application) => (StatusCode::OK, axum::Json(application)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn offers_handler<V, S, A, O>(
    State(service): State<Arc<LoanApplicationService<V, S, A, O>>>,
    Path(application_id): Path<u64>,
) -> Response
where
    V: VehicleRepository + 'static,
    S: ValuationStore + 'static,
    A: ApplicationStore + 'static,
    O: OfferStore + 'static,
{
    match service.offers(ApplicationId(application_id)) {
        Ok(offers) => (StatusCode::OK, axum::Json(offers)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: LoanServiceError) -> Response {
    let status = match &error {
        LoanServiceError::VehicleNotFound(_)
        | LoanServiceError::ApplicationNotFound(_)
        | LoanServiceError::Valuation(ValuationServiceError::VehicleNotFound(_)) => {
            StatusCode::NOT_FOUND
        }
        LoanServiceError::Valuation(_) | LoanServiceError::Repository(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
