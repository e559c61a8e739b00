use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;
use crate::shared::constants::API_V1;

/// Create routes for the categories feature
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            &format!("{}/categories", API_V1),
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            &format!("{}/categories/tree", API_V1),
            get(handlers::get_category_tree),
        )
        .route(
            &format!("{}/categories/{{id}}", API_V1),
            get(handlers::get_category)
                .put(handlers::update_category)
                .patch(handlers::patch_category)
                .delete(handlers::delete_category),
        )
        .with_state(service)
}
