use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{NewVehicle, VehicleId};
use super::repository::VehicleRepository;
use super::service::{VehicleService, VehicleServiceError};
use crate::workflows::valuation::{ValuationServiceError, ValuationStore};

/// Router builder exposing vehicle intake, lookup, and valuation endpoints.
pub fn vehicle_router<V, S>(service: Arc<VehicleService<V, S>>) -> Router
where
    V: VehicleRepository + 'static,
    S: ValuationStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/vehicles",
            post(register_handler::<V, S>).get(list_handler::<V, S>),
        )
        .route("/api/v1/vehicles/:vehicle_id", get(get_handler::<V, S>))
        .route(
            "/api/v1/vehicles/:vehicle_id/valuate",
            post(valuate_handler::<V, S>),
        )
        .route(
            "/api/v1/vehicles/:vehicle_id/valuations",
            get(valuations_handler::<V, S>),
        )
        .with_state(service)
}

pub(crate) async fn register_handler<V, S>(
    State(service): State<Arc<VehicleService<V, S>>>,
    axum::Json(vehicle): axum::Json<NewVehicle>,
) -> Response
where
    V: VehicleRepository + 'static,
    S: ValuationStore + 'static,
{
    match service.register(vehicle).await {
        Ok(vehicle) => (StatusCode::CREATED, axum::Json(vehicle)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<V, S>(State(service): State<Arc<VehicleService<V, S>>>) -> Response
where
    V: VehicleRepository + 'static,
    S: ValuationStore + 'static,
{
    match service.list() {
        Ok(vehicles) => (StatusCode::OK, axum::Json(vehicles)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<V, S>(
    State(service): State<Arc<VehicleService<V, S>>>,
    Path(vehicle_id): Path<u64>,
) -> Response
where
    V: VehicleRepository + 'static,
    S: ValuationStore + 'static,
{
    match service.get(VehicleId(vehicle_id)) {
        Ok(vehicle) => (StatusCode::OK, axum::Json(vehicle)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn valuate_handler<V, S>(
    State(service): State<Arc<VehicleService<V, S>>>,
    Path(vehicle_id): Path<u64>,
) -> Response
where
    V: VehicleRepository + 'static,
    S: ValuationStore + 'static,
{
    match service.request_valuation(VehicleId(vehicle_id)).await {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn valuations_handler<V, S>(
    State(service): State<Arc<VehicleService<V, S>>>,
    Path(vehicle_id): Path<u64>,
) -> Response
where
    V: VehicleRepository + 'static,
    S: ValuationStore + 'static,
{
    match service.valuations(VehicleId(vehicle_id)) {
        Ok(valuations) => (StatusCode::OK, axum::Json(valuations)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: VehicleServiceError) -> Response {
    let status = match &error {
        VehicleServiceError::DuplicateVin(_) => StatusCode::CONFLICT,
        VehicleServiceError::NotFound(_)
        | VehicleServiceError::Valuation(ValuationServiceError::VehicleNotFound(_)) => {
            StatusCode::NOT_FOUND
        }
        VehicleServiceError::Repository(_) | VehicleServiceError::Valuation(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::memory::{InMemoryValuationStore, InMemoryVehicleRepository};
    use crate::workflows::testing::{new_vehicle, REFERENCE_YEAR};
    use crate::workflows::valuation::{ValuationConfig, ValuationService};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn service() -> Arc<VehicleService<InMemoryVehicleRepository, InMemoryValuationStore>> {
        let valuations = ValuationService::new(
            Arc::new(InMemoryVehicleRepository::default()),
            Arc::new(InMemoryValuationStore::default()),
            ValuationConfig::default(),
        )
        .with_reference_year(REFERENCE_YEAR);
        Arc::new(VehicleService::new(Arc::new(valuations)))
    }

    fn register_request(vehicle: &NewVehicle) -> Request<Body> {
        Request::post("/api/v1/vehicles")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(vehicle).expect("serialize vehicle")))
            .expect("request builds")
    }

    async fn read_json_body(response: Response) -> Value {
        let body = to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn register_route_creates_vehicle() {
        let router = vehicle_router(service());

        let response = router
            .oneshot(register_request(&new_vehicle("1HGBH41JXMN109186", "Toyota", 2020)))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::CREATED);
        let payload = read_json_body(response).await;
        assert_eq!(payload["vin"], "1HGBH41JXMN109186");
        assert_eq!(payload["condition"], "good");
    }

    #[tokio::test]
    async fn register_route_rejects_duplicate_vin() {
        let service = service();
        let vehicle = new_vehicle("1HGBH41JXMN109186", "Toyota", 2020);
        service.register(vehicle.clone()).await.expect("first registration");

        let response = vehicle_router(service)
            .oneshot(register_request(&vehicle))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn valuate_route_returns_fresh_valuation() {
        let service = service();
        let vehicle = service
            .register(new_vehicle("1HGBH41JXMN109186", "Toyota", 2020))
            .await
            .expect("vehicle registered");

        let response = vehicle_router(service)
            .oneshot(
                Request::post(format!("/api/v1/vehicles/{}/valuate", vehicle.id))
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::CREATED);
        let payload = read_json_body(response).await;
        assert_eq!(payload["valuation"]["source"], "simulated");
        assert_eq!(payload["valuation"]["estimated_value"], 4_600_000.0);
        assert_eq!(payload["message"], "Valuation completed successfully");
    }

    #[tokio::test]
    async fn get_route_returns_not_found() {
        let response = vehicle_router(service())
            .oneshot(
                Request::get("/api/v1/vehicles/404")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
