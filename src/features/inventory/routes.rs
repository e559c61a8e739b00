use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::inventory::handlers;
use crate::features::inventory::services::InventoryService;
use crate::shared::constants::API_V1;

pub fn routes(service: Arc<InventoryService>) -> Router {
    Router::new()
        .route(
            &format!("{}/inventory", API_V1),
            get(handlers::list_inventory).post(handlers::create_inventory),
        )
        .route(
            &format!("{}/inventory/{{id}}", API_V1),
            get(handlers::get_inventory)
                .put(handlers::update_inventory)
                .patch(handlers::patch_inventory)
                .delete(handlers::delete_inventory),
        )
        .with_state(service)
}
