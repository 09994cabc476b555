//! Delivery fee REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{parse_datetime, DeliveryFeeResponse, FeeAtQuery};
use crate::application::DeliveryFeeService;
use crate::domain::{City, DomainError, VehicleType};
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse};

#[derive(Clone)]
pub struct DeliveryFeeState {
    pub service: Arc<DeliveryFeeService>,
}

fn parse_target(city: &str, vehicle_type: &str) -> Result<(City, VehicleType), ApiError> {
    let city = city.parse::<City>().map_err(domain_error)?;
    let vehicle = vehicle_type.parse::<VehicleType>().map_err(domain_error)?;
    Ok((city, vehicle))
}

#[utoipa::path(
    get,
    path = "/api/delivery-fee/{city}/{vehicle_type}",
    tag = "Delivery Fee",
    params(
        ("city" = String, Path, description = "TALLINN, TARTU or PARNU (case-insensitive)"),
        ("vehicle_type" = String, Path, description = "CAR, SCOOTER or BIKE (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Fee based on the latest weather", body = ApiResponse<DeliveryFeeResponse>),
        (status = 400, description = "Invalid input or vehicle usage forbidden"),
        (status = 404, description = "No weather data for the city")
    )
)]
pub async fn get_delivery_fee(
    State(state): State<DeliveryFeeState>,
    Path((city, vehicle_type)): Path<(String, String)>,
) -> Result<Json<ApiResponse<DeliveryFeeResponse>>, ApiError> {
    let (city, vehicle) = parse_target(&city, &vehicle_type)?;

    let quote = state
        .service
        .quote(city, vehicle, None)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(quote.into())))
}

#[utoipa::path(
    get,
    path = "/api/delivery-fee/{city}/{vehicle_type}/at",
    tag = "Delivery Fee",
    params(
        ("city" = String, Path, description = "TALLINN, TARTU or PARNU (case-insensitive)"),
        ("vehicle_type" = String, Path, description = "CAR, SCOOTER or BIKE (case-insensitive)"),
        FeeAtQuery
    ),
    responses(
        (status = 200, description = "Fee based on the weather at the given time", body = ApiResponse<DeliveryFeeResponse>),
        (status = 400, description = "Invalid input or vehicle usage forbidden"),
        (status = 404, description = "No weather data at or before the given time")
    )
)]
pub async fn get_delivery_fee_at(
    State(state): State<DeliveryFeeState>,
    Path((city, vehicle_type)): Path<(String, String)>,
    Query(query): Query<FeeAtQuery>,
) -> Result<Json<ApiResponse<DeliveryFeeResponse>>, ApiError> {
    let (city, vehicle) = parse_target(&city, &vehicle_type)?;

    let raw = query.datetime.ok_or_else(|| {
        domain_error(DomainError::InvalidInput(
            "Missing required query parameter 'datetime'".to_string(),
        ))
    })?;
    let at = parse_datetime(&raw).map_err(domain_error)?;

    let quote = state
        .service
        .quote(city, vehicle, Some(at))
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(quote.into())))
}
