use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::suppliers::handlers;
use crate::features::suppliers::services::SupplierService;
use crate::shared::constants::API_V1;

pub fn routes(service: Arc<SupplierService>) -> Router {
    Router::new()
        .route(
            &format!("{}/suppliers", API_V1),
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route(
            &format!("{}/suppliers/{{id}}", API_V1),
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .patch(handlers::patch_supplier)
                .delete(handlers::delete_supplier),
        )
        .with_state(service)
}
