use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::categories::dtos::{
    CategoryQueryParams, CategoryRequestDto, CategoryResponseDto, CategoryTreeDto,
    PatchCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::ApiResponse;

/// List categories with pagination and filters
///
/// Each item carries its non-deleted direct sub-categories.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    params(CategoryQueryParams),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    AppQuery(params): AppQuery<CategoryQueryParams>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let page = service.list(&params).await?;
    Ok(Json(ApiResponse::paged(page)))
}

/// Whole active category forest
#[utoipa::path(
    get,
    path = "/api/v1/categories/tree",
    responses(
        (status = 200, description = "Category tree", body = ApiResponse<Vec<CategoryTreeDto>>),
    ),
    tag = "categories"
)]
pub async fn get_category_tree(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryTreeDto>>>> {
    let tree = service.tree().await?;
    Ok(Json(ApiResponse::success(Some(tree), None, None)))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CategoryRequestDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error or unknown parent")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CategoryRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(category), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    request_body = CategoryRequestDto,
    responses(
        (status = 204, description = "Category updated"),
        (status = 400, description = "Validation error or invalid parent"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<CategoryRequestDto>,
) -> Result<StatusCode> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.replace(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/api/v1/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    request_body = PatchCategoryDto,
    responses(
        (status = 204, description = "Category updated"),
        (status = 400, description = "Validation error or invalid parent"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn patch_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<PatchCategoryDto>,
) -> Result<StatusCode> {
    let dto = dto.normalized();
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.patch(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a category (soft delete)
///
/// Refused with 409 while the category has active sub-categories or when it
/// is already deleted.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category has sub-categories or is already deleted")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::shared::test_helpers::{create_category, test_server};

    #[tokio::test]
    async fn test_get_includes_sub_categories() {
        let server = test_server();
        let tools = create_category(&server, "Tools", None).await;
        create_category(&server, "Hammers", Some(tools)).await;
        create_category(&server, "Saws", Some(tools)).await;

        let body = server
            .get(&format!("/api/v1/categories/{}", tools))
            .await
            .json::<Value>();

        let names: Vec<&str> = body["data"]["sub_categories"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|c| c["name"].as_str())
            .collect();
        assert_eq!(names, vec!["Hammers", "Saws"]);
    }

    #[tokio::test]
    async fn test_missing_parent_rejected() {
        let server = test_server();

        server
            .post("/api/v1/categories")
            .json(&json!({ "name": "Orphan", "parent_category_id": 42 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_with_active_child_conflicts() {
        let server = test_server();
        let parent = create_category(&server, "Garden", None).await;
        let child = create_category(&server, "Hoses", Some(parent)).await;

        server
            .delete(&format!("/api/v1/categories/{}", parent))
            .await
            .assert_status(StatusCode::CONFLICT);

        server
            .delete(&format!("/api/v1/categories/{}", child))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .delete(&format!("/api/v1/categories/{}", parent))
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_tree_nests_children() {
        let server = test_server();
        let root = create_category(&server, "Hardware", None).await;
        let fasteners = create_category(&server, "Fasteners", Some(root)).await;
        create_category(&server, "Screws", Some(fasteners)).await;
        create_category(&server, "Paint", None).await;

        let body = server.get("/api/v1/categories/tree").await.json::<Value>();

        let roots = body["data"].as_array().unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0]["name"], "Hardware");
        assert_eq!(roots[0]["children"][0]["name"], "Fasteners");
        assert_eq!(roots[0]["children"][0]["children"][0]["name"], "Screws");
    }

    #[tokio::test]
    async fn test_reparent_under_descendant_rejected() {
        let server = test_server();
        let root = create_category(&server, "Electrical", None).await;
        let child = create_category(&server, "Cables", Some(root)).await;

        server
            .put(&format!("/api/v1/categories/{}", root))
            .json(&json!({ "name": "Electrical", "parent_category_id": child }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
