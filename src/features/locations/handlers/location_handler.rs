use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::locations::dtos::{
    LocationQueryParams, LocationRequestDto, LocationResponseDto, PatchLocationDto,
};
use crate::features::locations::services::LocationService;
use crate::shared::types::ApiResponse;

/// List locations with pagination and filters
#[utoipa::path(
    get,
    path = "/api/v1/locations",
    params(LocationQueryParams),
    responses(
        (status = 200, description = "Locations retrieved successfully", body = ApiResponse<Vec<LocationResponseDto>>)
    ),
    tag = "locations"
)]
pub async fn list_locations(
    State(service): State<Arc<LocationService>>,
    AppQuery(params): AppQuery<LocationQueryParams>,
) -> Result<Json<ApiResponse<Vec<LocationResponseDto>>>> {
    let page = service.list(&params).await?;
    Ok(Json(ApiResponse::paged(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/locations/{id}",
    params(
        ("id" = i64, Path, description = "Location ID")
    ),
    responses(
        (status = 200, description = "Location found", body = ApiResponse<LocationResponseDto>),
        (status = 404, description = "Location not found")
    ),
    tag = "locations"
)]
pub async fn get_location(
    State(service): State<Arc<LocationService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<LocationResponseDto>>> {
    let location = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(location), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/v1/locations",
    request_body = LocationRequestDto,
    responses(
        (status = 201, description = "Location created successfully", body = ApiResponse<LocationResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "locations"
)]
pub async fn create_location(
    State(service): State<Arc<LocationService>>,
    AppJson(dto): AppJson<LocationRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<LocationResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let location = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(location), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/locations/{id}",
    params(
        ("id" = i64, Path, description = "Location ID")
    ),
    request_body = LocationRequestDto,
    responses(
        (status = 204, description = "Location updated"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Location not found")
    ),
    tag = "locations"
)]
pub async fn update_location(
    State(service): State<Arc<LocationService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<LocationRequestDto>,
) -> Result<StatusCode> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.replace(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/api/v1/locations/{id}",
    params(
        ("id" = i64, Path, description = "Location ID")
    ),
    request_body = PatchLocationDto,
    responses(
        (status = 204, description = "Location updated"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Location not found")
    ),
    tag = "locations"
)]
pub async fn patch_location(
    State(service): State<Arc<LocationService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<PatchLocationDto>,
) -> Result<StatusCode> {
    let dto = dto.normalized();
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.patch(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/locations/{id}",
    params(
        ("id" = i64, Path, description = "Location ID")
    ),
    responses(
        (status = 204, description = "Location deleted"),
        (status = 404, description = "Location not found"),
        (status = 409, description = "Location already deleted")
    ),
    tag = "locations"
)]
pub async fn delete_location(
    State(service): State<Arc<LocationService>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
