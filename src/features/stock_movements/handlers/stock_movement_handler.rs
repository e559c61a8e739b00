use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::stock_movements::dtos::{
    CreateStockMovementDto, StockMovementQueryParams, StockMovementResponseDto,
};
use crate::features::stock_movements::services::StockMovementService;
use crate::shared::types::ApiResponse;

/// List stock movements with pagination and filters
#[utoipa::path(
    get,
    path = "/api/v1/stock-movements",
    params(StockMovementQueryParams),
    responses(
        (status = 200, description = "Stock movements retrieved successfully", body = ApiResponse<Vec<StockMovementResponseDto>>)
    ),
    tag = "stock-movements"
)]
pub async fn list_stock_movements(
    State(service): State<Arc<StockMovementService>>,
    AppQuery(params): AppQuery<StockMovementQueryParams>,
) -> Result<Json<ApiResponse<Vec<StockMovementResponseDto>>>> {
    let page = service.list(&params).await?;
    Ok(Json(ApiResponse::paged(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/stock-movements/{id}",
    params(
        ("id" = i64, Path, description = "Stock movement ID")
    ),
    responses(
        (status = 200, description = "Stock movement found", body = ApiResponse<StockMovementResponseDto>),
        (status = 404, description = "Stock movement not found")
    ),
    tag = "stock-movements"
)]
pub async fn get_stock_movement(
    State(service): State<Arc<StockMovementService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<StockMovementResponseDto>>> {
    let movement = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(movement), None, None)))
}

/// Record a stock movement
#[utoipa::path(
    post,
    path = "/api/v1/stock-movements",
    request_body = CreateStockMovementDto,
    responses(
        (status = 201, description = "Stock movement recorded", body = ApiResponse<StockMovementResponseDto>),
        (status = 400, description = "Validation error, bad location combination or unknown reference")
    ),
    tag = "stock-movements"
)]
pub async fn create_stock_movement(
    State(service): State<Arc<StockMovementService>>,
    AppJson(dto): AppJson<CreateStockMovementDto>,
) -> Result<(StatusCode, Json<ApiResponse<StockMovementResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let movement = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(movement), None, None)),
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::shared::test_helpers::{create, create_location, test_server};

    async fn create_product(server: &axum_test::TestServer) -> i64 {
        create(
            server,
            "/api/v1/products",
            json!({ "sku": "DRL-18V", "name": "Cordless drill", "cost_price": "60", "sale_price": "99.90" }),
        )
        .await
    }

    #[tokio::test]
    async fn test_record_and_fetch_transfer() {
        let server = test_server();
        let product = create_product(&server).await;
        let warehouse = create_location(&server).await;
        let store = create_location(&server).await;

        let id = create(
            &server,
            "/api/v1/stock-movements",
            json!({
                "product_id": product,
                "from_location_id": warehouse,
                "to_location_id": store,
                "quantity_moved": 12,
                "movement_type": "TRANSFER",
                "notes": "Weekly restock"
            }),
        )
        .await;

        let body = server
            .get(&format!("/api/v1/stock-movements/{}", id))
            .await
            .json::<Value>();
        assert_eq!(body["data"]["movement_type"], "TRANSFER");
        assert_eq!(body["data"]["quantity_moved"], 12);
        assert!(body["data"]["created_at"].is_string());
    }

    #[tokio::test]
    async fn test_sale_with_destination_rejected() {
        let server = test_server();
        let product = create_product(&server).await;
        let store = create_location(&server).await;

        server
            .post("/api/v1/stock-movements")
            .json(&json!({
                "product_id": product,
                "to_location_id": store,
                "quantity_moved": 1,
                "movement_type": "SALE"
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_zero_quantity_rejected() {
        let server = test_server();
        let product = create_product(&server).await;
        let warehouse = create_location(&server).await;

        server
            .post("/api/v1/stock-movements")
            .json(&json!({
                "product_id": product,
                "to_location_id": warehouse,
                "quantity_moved": 0,
                "movement_type": "PURCHASE"
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_movement_type_rejected() {
        let server = test_server();

        server
            .post("/api/v1/stock-movements")
            .json(&json!({ "product_id": 1, "quantity_moved": 1, "movement_type": "THEFT" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ledger_has_no_delete_route() {
        let server = test_server();

        server
            .delete("/api/v1/stock-movements/1")
            .await
            .assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_list_filters_by_movement_type() {
        let server = test_server();
        let product = create_product(&server).await;
        let warehouse = create_location(&server).await;

        for movement_type in ["ADJUSTMENT_IN", "PURCHASE", "PURCHASE"] {
            create(
                &server,
                "/api/v1/stock-movements",
                json!({
                    "product_id": product,
                    "to_location_id": warehouse,
                    "quantity_moved": 3,
                    "movement_type": movement_type
                }),
            )
            .await;
        }

        let body = server
            .get("/api/v1/stock-movements")
            .add_query_param("movement_type", "PURCHASE")
            .await
            .json::<Value>();

        assert_eq!(body["meta"]["total_records"], 2);
    }

    #[tokio::test]
    async fn test_movements_hidden_after_product_deleted() {
        let server = test_server();
        let product = create_product(&server).await;
        let warehouse = create_location(&server).await;

        let id = create(
            &server,
            "/api/v1/stock-movements",
            json!({
                "product_id": product,
                "to_location_id": warehouse,
                "quantity_moved": 5,
                "movement_type": "PURCHASE"
            }),
        )
        .await;

        server
            .delete(&format!("/api/v1/products/{}", product))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let body = server.get("/api/v1/stock-movements").await.json::<Value>();
        assert_eq!(body["meta"]["total_records"], 0);
        assert_eq!(body["data"].as_array().unwrap().len(), 0);

        server
            .get(&format!("/api/v1/stock-movements/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_movements_hidden_after_source_location_deleted() {
        let server = test_server();
        let product = create_product(&server).await;
        let warehouse = create_location(&server).await;
        let store = create_location(&server).await;

        for (from, to) in [(warehouse, store), (store, warehouse)] {
            create(
                &server,
                "/api/v1/stock-movements",
                json!({
                    "product_id": product,
                    "from_location_id": from,
                    "to_location_id": to,
                    "quantity_moved": 2,
                    "movement_type": "TRANSFER"
                }),
            )
            .await;
        }
        create(
            &server,
            "/api/v1/stock-movements",
            json!({
                "product_id": product,
                "to_location_id": warehouse,
                "quantity_moved": 2,
                "movement_type": "PURCHASE"
            }),
        )
        .await;

        server
            .delete(&format!("/api/v1/locations/{}", store))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let body = server.get("/api/v1/stock-movements").await.json::<Value>();
        assert_eq!(body["meta"]["total_records"], 1);
        assert_eq!(body["data"][0]["movement_type"], "PURCHASE");
    }
}
