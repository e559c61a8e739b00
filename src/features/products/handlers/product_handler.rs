use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::products::dtos::{
    PatchProductDto, ProductQueryParams, ProductRequestDto, ProductResponseDto,
};
use crate::features::products::services::ProductService;
use crate::shared::types::ApiResponse;

/// List products with pagination and filters
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ProductQueryParams),
    responses(
        (status = 200, description = "Products retrieved successfully", body = ApiResponse<Vec<ProductResponseDto>>)
    ),
    tag = "products"
)]
pub async fn list_products(
    State(service): State<Arc<ProductService>>,
    AppQuery(params): AppQuery<ProductQueryParams>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let page = service.list(&params).await?;
    Ok(Json(ApiResponse::paged(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponseDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = ProductRequestDto,
    responses(
        (status = 201, description = "Product created successfully", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error or unknown category/supplier"),
        (status = 409, description = "SKU already in use")
    ),
    tag = "products"
)]
pub async fn create_product(
    State(service): State<Arc<ProductService>>,
    AppJson(dto): AppJson<ProductRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(product), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductRequestDto,
    responses(
        (status = 204, description = "Product updated"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "SKU already in use")
    ),
    tag = "products"
)]
pub async fn update_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<ProductRequestDto>,
) -> Result<StatusCode> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.replace(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/api/v1/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = PatchProductDto,
    responses(
        (status = 204, description = "Product updated"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "SKU already in use")
    ),
    tag = "products"
)]
pub async fn patch_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<PatchProductDto>,
) -> Result<StatusCode> {
    let dto = dto.normalized();
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.patch(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product already deleted")
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
