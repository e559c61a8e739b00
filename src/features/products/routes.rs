use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;
use crate::shared::constants::API_V1;

pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            &format!("{}/products", API_V1),
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            &format!("{}/products/{{id}}", API_V1),
            get(handlers::get_product)
                .put(handlers::update_product)
                .patch(handlers::patch_product)
                .delete(handlers::delete_product),
        )
        .with_state(service)
}
