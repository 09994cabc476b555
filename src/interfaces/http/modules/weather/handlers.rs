//! Weather data REST API handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use super::dto::WeatherObservationDto;
use crate::domain::WeatherRepository;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse};

#[derive(Clone)]
pub struct WeatherState {
    pub repository: Arc<dyn WeatherRepository>,
}

#[utoipa::path(
    get,
    path = "/api/weather",
    tag = "Weather",
    responses(
        (status = 200, description = "Stored observations, newest first", body = ApiResponse<Vec<WeatherObservationDto>>)
    )
)]
pub async fn list_weather(
    State(state): State<WeatherState>,
) -> Result<Json<ApiResponse<Vec<WeatherObservationDto>>>, ApiError> {
    let observations = state.repository.find_all().await.map_err(domain_error)?;
    let dtos = observations.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(dtos)))
}
