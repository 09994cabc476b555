//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::FromRef, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::modules::delivery_fee::{self, DeliveryFeeResponse, DeliveryFeeState, FeeBreakdownDto};
use super::modules::health::{self, ComponentHealth, HealthResponse, HealthState, StationFreshness};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::weather::{self, WeatherObservationDto, WeatherState};
use crate::application::DeliveryFeeService;
use crate::domain::WeatherRepository;

/// Shared state for all routes.
/// Axum extracts the specific handler state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub fee_service: Arc<DeliveryFeeService>,
    pub weather: Arc<dyn WeatherRepository>,
    pub db: DatabaseConnection,
    pub prometheus: PrometheusHandle,
    pub started_at: Arc<Instant>,
}

impl ApiState {
    pub fn new(
        fee_service: Arc<DeliveryFeeService>,
        weather: Arc<dyn WeatherRepository>,
        db: DatabaseConnection,
        prometheus: PrometheusHandle,
    ) -> Self {
        Self {
            fee_service,
            weather,
            db,
            prometheus,
            started_at: Arc::new(Instant::now()),
        }
    }
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for DeliveryFeeState {
    fn from_ref(s: &ApiState) -> Self {
        DeliveryFeeState {
            service: Arc::clone(&s.fee_service),
        }
    }
}

impl FromRef<ApiState> for WeatherState {
    fn from_ref(s: &ApiState) -> Self {
        WeatherState {
            repository: Arc::clone(&s.weather),
        }
    }
}

impl FromRef<ApiState> for HealthState {
    fn from_ref(s: &ApiState) -> Self {
        HealthState {
            db: s.db.clone(),
            repository: Arc::clone(&s.weather),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<ApiState> for MetricsState {
    fn from_ref(s: &ApiState) -> Self {
        MetricsState {
            handle: s.prometheus.clone(),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        delivery_fee::get_delivery_fee,
        delivery_fee::get_delivery_fee_at,
        weather::list_weather,
    ),
    components(
        schemas(
            ApiResponse<String>,
            DeliveryFeeResponse,
            FeeBreakdownDto,
            WeatherObservationDto,
            HealthResponse,
            ComponentHealth,
            StationFreshness,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Delivery Fee", description = "Weather-adjusted delivery fee calculation"),
        (name = "Weather", description = "Stored weather observations"),
    ),
    info(
        title = "Delivery Fee API",
        version = "1.0.0",
        description = "Delivery fees for food couriers in Tallinn, Tartu and Pärnu, adjusted for the current weather",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let api_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(prometheus_metrics))
        .route(
            "/api/delivery-fee/{city}/{vehicle_type}",
            get(delivery_fee::get_delivery_fee),
        )
        .route(
            "/api/delivery-fee/{city}/{vehicle_type}/at",
            get(delivery_fee::get_delivery_fee_at),
        )
        .route("/api/weather", get(weather::list_weather))
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .with_state(state);

    Router::new()
        .merge(swagger_routes)
        .merge(api_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
