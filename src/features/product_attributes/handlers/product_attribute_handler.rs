use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::product_attributes::dtos::{
    PatchProductAttributeDto, ProductAttributeQueryParams, ProductAttributeRequestDto,
    ProductAttributeResponseDto,
};
use crate::features::product_attributes::services::ProductAttributeService;
use crate::shared::types::ApiResponse;

/// List product attributes with pagination and filters
#[utoipa::path(
    get,
    path = "/api/v1/product-attributes",
    params(ProductAttributeQueryParams),
    responses(
        (status = 200, description = "Product attributes retrieved successfully", body = ApiResponse<Vec<ProductAttributeResponseDto>>)
    ),
    tag = "product-attributes"
)]
pub async fn list_product_attributes(
    State(service): State<Arc<ProductAttributeService>>,
    AppQuery(params): AppQuery<ProductAttributeQueryParams>,
) -> Result<Json<ApiResponse<Vec<ProductAttributeResponseDto>>>> {
    let page = service.list(&params).await?;
    Ok(Json(ApiResponse::paged(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/product-attributes/{id}",
    params(
        ("id" = i64, Path, description = "Product attribute ID")
    ),
    responses(
        (status = 200, description = "Product attribute found", body = ApiResponse<ProductAttributeResponseDto>),
        (status = 404, description = "Product attribute not found")
    ),
    tag = "product-attributes"
)]
pub async fn get_product_attribute(
    State(service): State<Arc<ProductAttributeService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ProductAttributeResponseDto>>> {
    let attribute = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(attribute), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/v1/product-attributes",
    request_body = ProductAttributeRequestDto,
    responses(
        (status = 201, description = "Product attribute created successfully", body = ApiResponse<ProductAttributeResponseDto>),
        (status = 400, description = "Validation error or unknown product")
    ),
    tag = "product-attributes"
)]
pub async fn create_product_attribute(
    State(service): State<Arc<ProductAttributeService>>,
    AppJson(dto): AppJson<ProductAttributeRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProductAttributeResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let attribute = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(attribute), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/product-attributes/{id}",
    params(
        ("id" = i64, Path, description = "Product attribute ID")
    ),
    request_body = ProductAttributeRequestDto,
    responses(
        (status = 204, description = "Product attribute updated"),
        (status = 400, description = "Validation error or unknown product"),
        (status = 404, description = "Product attribute not found")
    ),
    tag = "product-attributes"
)]
pub async fn update_product_attribute(
    State(service): State<Arc<ProductAttributeService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<ProductAttributeRequestDto>,
) -> Result<StatusCode> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.replace(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/api/v1/product-attributes/{id}",
    params(
        ("id" = i64, Path, description = "Product attribute ID")
    ),
    request_body = PatchProductAttributeDto,
    responses(
        (status = 204, description = "Product attribute updated"),
        (status = 400, description = "Validation error or unknown product"),
        (status = 404, description = "Product attribute not found")
    ),
    tag = "product-attributes"
)]
pub async fn patch_product_attribute(
    State(service): State<Arc<ProductAttributeService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<PatchProductAttributeDto>,
) -> Result<StatusCode> {
    let dto = dto.normalized();
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.patch(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/product-attributes/{id}",
    params(
        ("id" = i64, Path, description = "Product attribute ID")
    ),
    responses(
        (status = 204, description = "Product attribute deleted"),
        (status = 404, description = "Product attribute not found"),
        (status = 409, description = "Product attribute already deleted")
    ),
    tag = "product-attributes"
)]
pub async fn delete_product_attribute(
    State(service): State<Arc<ProductAttributeService>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::shared::test_helpers::{create, create_product, test_server};

    #[tokio::test]
    async fn test_create_and_filter_by_product() {
        let server = test_server();
        let shirt = create_product(&server, "TSH-01").await;
        let mug = create_product(&server, "MUG-01").await;

        for (product, name, value) in [
            (shirt, "Colour", "Blue"),
            (shirt, "Size", "M"),
            (mug, "Colour", "White"),
        ] {
            create(
                &server,
                "/api/v1/product-attributes",
                json!({ "product_id": product, "name": name, "value": value }),
            )
            .await;
        }

        let body = server
            .get("/api/v1/product-attributes")
            .add_query_param("product_id", shirt)
            .await
            .json::<Value>();
        assert_eq!(body["meta"]["total_records"], 2);

        let body = server
            .get("/api/v1/product-attributes")
            .add_query_param("name", "colour")
            .await
            .json::<Value>();
        assert_eq!(body["meta"]["total_records"], 2);
    }

    #[tokio::test]
    async fn test_unknown_product_rejected() {
        let server = test_server();

        server
            .post("/api/v1/product-attributes")
            .json(&json!({ "product_id": 404, "name": "Colour", "value": "Blue" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_name_too_long_rejected() {
        let server = test_server();
        let product = create_product(&server, "TSH-01").await;

        server
            .post("/api/v1/product-attributes")
            .json(&json!({ "product_id": product, "name": "n".repeat(101), "value": "Blue" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_patch_and_delete() {
        let server = test_server();
        let product = create_product(&server, "TSH-01").await;
        let id = create(
            &server,
            "/api/v1/product-attributes",
            json!({ "product_id": product, "name": "Colour", "value": "Blue" }),
        )
        .await;
        let path = format!("/api/v1/product-attributes/{}", id);

        server
            .patch(&path)
            .json(&json!({ "value": "Green", "name": "" }))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let body = server.get(&path).await.json::<Value>();
        assert_eq!(body["data"]["name"], "Colour");
        assert_eq!(body["data"]["value"], "Green");

        server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
        server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
        server.delete(&path).await.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_hidden_after_product_deleted() {
        let server = test_server();
        let product = create_product(&server, "TSH-01").await;
        let id = create(
            &server,
            "/api/v1/product-attributes",
            json!({ "product_id": product, "name": "Colour", "value": "Blue" }),
        )
        .await;

        server
            .delete(&format!("/api/v1/products/{}", product))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/api/v1/product-attributes/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        let body = server.get("/api/v1/product-attributes").await.json::<Value>();
        assert_eq!(body["meta"]["total_records"], 0);
    }
}
