use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::locations::handlers;
use crate::features::locations::services::LocationService;
use crate::shared::constants::API_V1;

pub fn routes(service: Arc<LocationService>) -> Router {
    Router::new()
        .route(
            &format!("{}/locations", API_V1),
            get(handlers::list_locations).post(handlers::create_location),
        )
        .route(
            &format!("{}/locations/{{id}}", API_V1),
            get(handlers::get_location)
                .put(handlers::update_location)
                .patch(handlers::patch_location)
                .delete(handlers::delete_location),
        )
        .with_state(service)
}
