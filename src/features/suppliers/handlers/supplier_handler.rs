use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::suppliers::dtos::{
    PatchSupplierDto, SupplierQueryParams, SupplierRequestDto, SupplierResponseDto,
};
use crate::features::suppliers::services::SupplierService;
use crate::shared::types::ApiResponse;

/// List suppliers with pagination and filters
#[utoipa::path(
    get,
    path = "/api/v1/suppliers",
    params(SupplierQueryParams),
    responses(
        (status = 200, description = "Suppliers retrieved successfully", body = ApiResponse<Vec<SupplierResponseDto>>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "suppliers"
)]
pub async fn list_suppliers(
    State(service): State<Arc<SupplierService>>,
    AppQuery(params): AppQuery<SupplierQueryParams>,
) -> Result<Json<ApiResponse<Vec<SupplierResponseDto>>>> {
    let page = service.list(&params).await?;
    Ok(Json(ApiResponse::paged(page)))
}

/// Get a supplier by ID
#[utoipa::path(
    get,
    path = "/api/v1/suppliers/{id}",
    params(
        ("id" = i64, Path, description = "Supplier ID")
    ),
    responses(
        (status = 200, description = "Supplier found", body = ApiResponse<SupplierResponseDto>),
        (status = 404, description = "Supplier not found")
    ),
    tag = "suppliers"
)]
pub async fn get_supplier(
    State(service): State<Arc<SupplierService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<SupplierResponseDto>>> {
    let supplier = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(supplier), None, None)))
}

/// Create a supplier
#[utoipa::path(
    post,
    path = "/api/v1/suppliers",
    request_body = SupplierRequestDto,
    responses(
        (status = 201, description = "Supplier created successfully", body = ApiResponse<SupplierResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "suppliers"
)]
pub async fn create_supplier(
    State(service): State<Arc<SupplierService>>,
    AppJson(dto): AppJson<SupplierRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<SupplierResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let supplier = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(supplier), None, None)),
    ))
}

/// Replace a supplier
#[utoipa::path(
    put,
    path = "/api/v1/suppliers/{id}",
    params(
        ("id" = i64, Path, description = "Supplier ID")
    ),
    request_body = SupplierRequestDto,
    responses(
        (status = 204, description = "Supplier updated"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Supplier not found")
    ),
    tag = "suppliers"
)]
pub async fn update_supplier(
    State(service): State<Arc<SupplierService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<SupplierRequestDto>,
) -> Result<StatusCode> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.replace(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Partially update a supplier
#[utoipa::path(
    patch,
    path = "/api/v1/suppliers/{id}",
    params(
        ("id" = i64, Path, description = "Supplier ID")
    ),
    request_body = PatchSupplierDto,
    responses(
        (status = 204, description = "Supplier updated"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Supplier not found")
    ),
    tag = "suppliers"
)]
pub async fn patch_supplier(
    State(service): State<Arc<SupplierService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<PatchSupplierDto>,
) -> Result<StatusCode> {
    let dto = dto.normalized();
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.patch(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a supplier (soft delete)
#[utoipa::path(
    delete,
    path = "/api/v1/suppliers/{id}",
    params(
        ("id" = i64, Path, description = "Supplier ID")
    ),
    responses(
        (status = 204, description = "Supplier deleted"),
        (status = 404, description = "Supplier not found"),
        (status = 409, description = "Supplier already deleted")
    ),
    tag = "suppliers"
)]
pub async fn delete_supplier(
    State(service): State<Arc<SupplierService>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
