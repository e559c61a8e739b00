use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::inventory::{dtos as inventory_dtos, handlers as inventory_handlers};
use crate::features::locations::{dtos as locations_dtos, handlers as locations_handlers};
use crate::features::product_attributes::{
    dtos as product_attributes_dtos, handlers as product_attributes_handlers,
};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::stock_movements::{
    dtos as stock_movements_dtos, handlers as stock_movements_handlers,
    models as stock_movements_models,
};
use crate::features::suppliers::{dtos as suppliers_dtos, handlers as suppliers_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Suppliers
        suppliers_handlers::list_suppliers,
        suppliers_handlers::get_supplier,
        suppliers_handlers::create_supplier,
        suppliers_handlers::update_supplier,
        suppliers_handlers::patch_supplier,
        suppliers_handlers::delete_supplier,
        // Locations
        locations_handlers::list_locations,
        locations_handlers::get_location,
        locations_handlers::create_location,
        locations_handlers::update_location,
        locations_handlers::patch_location,
        locations_handlers::delete_location,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category_tree,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::patch_category,
        categories_handlers::delete_category,
        // Products
        products_handlers::list_products,
        products_handlers::get_product,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::patch_product,
        products_handlers::delete_product,
        // Product attributes
        product_attributes_handlers::list_product_attributes,
        product_attributes_handlers::get_product_attribute,
        product_attributes_handlers::create_product_attribute,
        product_attributes_handlers::update_product_attribute,
        product_attributes_handlers::patch_product_attribute,
        product_attributes_handlers::delete_product_attribute,
        // Inventory
        inventory_handlers::list_inventory,
        inventory_handlers::get_inventory,
        inventory_handlers::create_inventory,
        inventory_handlers::update_inventory,
        inventory_handlers::patch_inventory,
        inventory_handlers::delete_inventory,
        // Stock movements
        stock_movements_handlers::list_stock_movements,
        stock_movements_handlers::get_stock_movement,
        stock_movements_handlers::create_stock_movement,
    ),
    components(
        schemas(
            Meta,
            // Suppliers
            suppliers_dtos::SupplierRequestDto,
            suppliers_dtos::PatchSupplierDto,
            suppliers_dtos::SupplierResponseDto,
            ApiResponse<suppliers_dtos::SupplierResponseDto>,
            ApiResponse<Vec<suppliers_dtos::SupplierResponseDto>>,
            // Locations
            locations_dtos::LocationRequestDto,
            locations_dtos::PatchLocationDto,
            locations_dtos::LocationResponseDto,
            ApiResponse<locations_dtos::LocationResponseDto>,
            ApiResponse<Vec<locations_dtos::LocationResponseDto>>,
            // Categories
            categories_dtos::CategoryRequestDto,
            categories_dtos::PatchCategoryDto,
            categories_dtos::CategorySummaryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<Vec<categories_dtos::CategoryTreeDto>>,
            // Products
            products_dtos::ProductRequestDto,
            products_dtos::PatchProductDto,
            products_dtos::ProductResponseDto,
            ApiResponse<products_dtos::ProductResponseDto>,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            // Product attributes
            product_attributes_dtos::ProductAttributeRequestDto,
            product_attributes_dtos::PatchProductAttributeDto,
            product_attributes_dtos::ProductAttributeResponseDto,
            ApiResponse<product_attributes_dtos::ProductAttributeResponseDto>,
            ApiResponse<Vec<product_attributes_dtos::ProductAttributeResponseDto>>,
            // Inventory
            inventory_dtos::InventoryRequestDto,
            inventory_dtos::PatchInventoryDto,
            inventory_dtos::InventoryResponseDto,
            ApiResponse<inventory_dtos::InventoryResponseDto>,
            ApiResponse<Vec<inventory_dtos::InventoryResponseDto>>,
            // Stock movements
            stock_movements_models::MovementType,
            stock_movements_dtos::CreateStockMovementDto,
            stock_movements_dtos::StockMovementResponseDto,
            ApiResponse<stock_movements_dtos::StockMovementResponseDto>,
            ApiResponse<Vec<stock_movements_dtos::StockMovementResponseDto>>,
        )
    ),
    tags(
        (name = "suppliers", description = "Supplier management"),
        (name = "locations", description = "Warehouses, stores and other stock locations"),
        (name = "categories", description = "Hierarchical product categories"),
        (name = "products", description = "Product catalogue"),
        (name = "product-attributes", description = "Named product properties such as colour or size"),
        (name = "inventory", description = "Stock levels per product and location"),
        (name = "stock-movements", description = "Append-only stock movement ledger"),
    ),
    info(
        title = "StockHive API",
        version = "1.0",
        description = "Inventory management API",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/suppliers",
            "/api/v1/locations/{id}",
            "/api/v1/categories/tree",
            "/api/v1/products/{id}",
            "/api/v1/product-attributes/{id}",
            "/api/v1/inventory",
            "/api/v1/stock-movements",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Inventory".to_string(),
            version: "2.0".to_string(),
            description: "Internal".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Inventory");
        assert_eq!(doc.info.version, "2.0");
    }
}
