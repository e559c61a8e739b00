//! Wiring of stores, services and feature routers.

use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};
use sqlx::PgPool;

use crate::core::config::QueryConfig;
use crate::core::storage::{MemoryStore, PgStore, Repository, Tombstones};
use crate::features::categories::{models::Category, routes as categories_routes, CategoryService};
use crate::features::inventory::{models::Inventory, routes as inventory_routes, InventoryService};
use crate::features::locations::{models::Location, routes as locations_routes, LocationService};
use crate::features::product_attributes::{
    models::ProductAttribute, routes as product_attributes_routes, ProductAttributeService,
};
use crate::features::products::{models::Product, routes as products_routes, ProductService};
use crate::features::stock_movements::{
    models::StockMovement, routes as stock_movements_routes, StockMovementService,
};
use crate::features::suppliers::{models::Supplier, routes as suppliers_routes, SupplierService};
use crate::shared::record::Record;

/// One repository per entity, all on the same backend
#[derive(Clone)]
pub struct Repositories {
    pub suppliers: Repository<Supplier>,
    pub locations: Repository<Location>,
    pub categories: Repository<Category>,
    pub products: Repository<Product>,
    pub product_attributes: Repository<ProductAttribute>,
    pub inventory: Repository<Inventory>,
    pub stock_movements: Repository<StockMovement>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            suppliers: Repository::new(Arc::new(PgStore::<Supplier>::new(pool.clone()))),
            locations: Repository::new(Arc::new(PgStore::<Location>::new(pool.clone()))),
            categories: Repository::new(Arc::new(PgStore::<Category>::new(pool.clone()))),
            products: Repository::new(Arc::new(PgStore::<Product>::new(pool.clone()))),
            product_attributes: Repository::new(Arc::new(PgStore::<ProductAttribute>::new(
                pool.clone(),
            ))),
            inventory: Repository::new(Arc::new(PgStore::<Inventory>::new(pool.clone()))),
            stock_movements: Repository::new(Arc::new(PgStore::<StockMovement>::new(pool))),
        }
    }

    /// Process-local stores; contents are lost on shutdown
    pub fn memory() -> Self {
        let tombstones = Tombstones::new();
        Self {
            suppliers: memory_repository(&tombstones),
            locations: memory_repository(&tombstones),
            categories: memory_repository(&tombstones),
            products: memory_repository(&tombstones),
            product_attributes: memory_repository(&tombstones),
            inventory: memory_repository(&tombstones),
            stock_movements: memory_repository(&tombstones),
        }
    }
}

fn memory_repository<T: Record>(tombstones: &Tombstones) -> Repository<T> {
    Repository::new(Arc::new(MemoryStore::<T>::with_tombstones(tombstones.clone())))
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Build the API router (feature routes plus `/health`), without
/// middleware layers or Swagger UI
pub fn build_router(repos: Repositories, query: QueryConfig) -> Router {
    let text_match = query.text_match;

    let supplier_service = Arc::new(SupplierService::new(repos.suppliers.clone(), text_match));
    let location_service = Arc::new(LocationService::new(repos.locations.clone(), text_match));
    let category_service = Arc::new(CategoryService::new(repos.categories.clone(), text_match));
    let product_service = Arc::new(ProductService::new(
        repos.products.clone(),
        repos.categories.clone(),
        repos.suppliers.clone(),
        text_match,
    ));
    let product_attribute_service = Arc::new(ProductAttributeService::new(
        repos.product_attributes,
        repos.products.clone(),
        text_match,
    ));
    let inventory_service = Arc::new(InventoryService::new(
        repos.inventory,
        repos.products.clone(),
        repos.locations.clone(),
        text_match,
    ));
    let stock_movement_service = Arc::new(StockMovementService::new(
        repos.stock_movements,
        repos.products,
        repos.locations,
        text_match,
    ));
    tracing::info!("Feature services initialized");

    Router::new()
        .route("/health", get(health_check))
        .merge(suppliers_routes::routes(supplier_service))
        .merge(locations_routes::routes(location_service))
        .merge(categories_routes::routes(category_service))
        .merge(products_routes::routes(product_service))
        .merge(product_attributes_routes::routes(product_attribute_service))
        .merge(inventory_routes::routes(inventory_service))
        .merge(stock_movements_routes::routes(stock_movement_service))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::shared::test_helpers::test_server;

    #[tokio::test]
    async fn test_health() {
        let server = test_server();
        server.get("/health").await.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let server = test_server();
        for path in [
            "/api/v1/suppliers/99",
            "/api/v1/locations/99",
            "/api/v1/categories/99",
            "/api/v1/products/99",
            "/api/v1/product-attributes/99",
            "/api/v1/inventory/99",
            "/api/v1/stock-movements/99",
        ] {
            server.get(path).await.assert_status(StatusCode::NOT_FOUND);
        }
    }
}
