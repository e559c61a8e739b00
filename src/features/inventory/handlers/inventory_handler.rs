use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::inventory::dtos::{
    InventoryQueryParams, InventoryRequestDto, InventoryResponseDto, PatchInventoryDto,
};
use crate::features::inventory::services::InventoryService;
use crate::shared::types::ApiResponse;

/// List stock levels with pagination and filters
#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    params(InventoryQueryParams),
    responses(
        (status = 200, description = "Inventory retrieved successfully", body = ApiResponse<Vec<InventoryResponseDto>>)
    ),
    tag = "inventory"
)]
pub async fn list_inventory(
    State(service): State<Arc<InventoryService>>,
    AppQuery(params): AppQuery<InventoryQueryParams>,
) -> Result<Json<ApiResponse<Vec<InventoryResponseDto>>>> {
    let page = service.list(&params).await?;
    Ok(Json(ApiResponse::paged(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory/{id}",
    params(
        ("id" = i64, Path, description = "Inventory ID")
    ),
    responses(
        (status = 200, description = "Inventory found", body = ApiResponse<InventoryResponseDto>),
        (status = 404, description = "Inventory not found")
    ),
    tag = "inventory"
)]
pub async fn get_inventory(
    State(service): State<Arc<InventoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<InventoryResponseDto>>> {
    let inventory = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(inventory), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory",
    request_body = InventoryRequestDto,
    responses(
        (status = 201, description = "Inventory created successfully", body = ApiResponse<InventoryResponseDto>),
        (status = 400, description = "Validation error or unknown product/location"),
        (status = 409, description = "Product already stocked at this location")
    ),
    tag = "inventory"
)]
pub async fn create_inventory(
    State(service): State<Arc<InventoryService>>,
    AppJson(dto): AppJson<InventoryRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<InventoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let inventory = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(inventory), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/inventory/{id}",
    params(
        ("id" = i64, Path, description = "Inventory ID")
    ),
    request_body = InventoryRequestDto,
    responses(
        (status = 204, description = "Inventory updated"),
        (status = 400, description = "Validation error or unknown product/location"),
        (status = 404, description = "Inventory not found"),
        (status = 409, description = "Product already stocked at this location")
    ),
    tag = "inventory"
)]
pub async fn update_inventory(
    State(service): State<Arc<InventoryService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<InventoryRequestDto>,
) -> Result<StatusCode> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.replace(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/api/v1/inventory/{id}",
    params(
        ("id" = i64, Path, description = "Inventory ID")
    ),
    request_body = PatchInventoryDto,
    responses(
        (status = 204, description = "Inventory updated"),
        (status = 400, description = "Validation error or unknown product/location"),
        (status = 404, description = "Inventory not found"),
        (status = 409, description = "Product already stocked at this location")
    ),
    tag = "inventory"
)]
pub async fn patch_inventory(
    State(service): State<Arc<InventoryService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<PatchInventoryDto>,
) -> Result<StatusCode> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.patch(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/inventory/{id}",
    params(
        ("id" = i64, Path, description = "Inventory ID")
    ),
    responses(
        (status = 204, description = "Inventory deleted"),
        (status = 404, description = "Inventory not found"),
        (status = 409, description = "Inventory already deleted")
    ),
    tag = "inventory"
)]
pub async fn delete_inventory(
    State(service): State<Arc<InventoryService>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
