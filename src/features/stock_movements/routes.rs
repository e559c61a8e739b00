use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::stock_movements::handlers;
use crate::features::stock_movements::services::StockMovementService;
use crate::shared::constants::API_V1;

/// Ledger routes; movements are never updated or deleted
pub fn routes(service: Arc<StockMovementService>) -> Router {
    Router::new()
        .route(
            &format!("{}/stock-movements", API_V1),
            get(handlers::list_stock_movements).post(handlers::create_stock_movement),
        )
        .route(
            &format!("{}/stock-movements/{{id}}", API_V1),
            get(handlers::get_stock_movement),
        )
        .with_state(service)
}
