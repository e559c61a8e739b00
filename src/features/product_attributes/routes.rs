use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::product_attributes::handlers;
use crate::features::product_attributes::services::ProductAttributeService;
use crate::shared::constants::API_V1;

pub fn routes(service: Arc<ProductAttributeService>) -> Router {
    Router::new()
        .route(
            &format!("{}/product-attributes", API_V1),
            get(handlers::list_product_attributes).post(handlers::create_product_attribute),
        )
        .route(
            &format!("{}/product-attributes/{{id}}", API_V1),
            get(handlers::get_product_attribute)
                .put(handlers::update_product_attribute)
                .patch(handlers::patch_product_attribute)
                .delete(handlers::delete_product_attribute),
        )
        .with_state(service)
}
