use crate::core::error::{AppError, Result};
use crate::core::storage::Repository;
use crate::features::locations::models::Location;
use crate::features::products::models::Product;
use crate::features::stock_movements::dtos::{
    CreateStockMovementDto, StockMovementQueryParams, StockMovementResponseDto,
};
use crate::features::stock_movements::models::StockMovement;
use crate::shared::audit::AuditFields;
use crate::shared::pagination::Paged;
use crate::shared::query::TextMatch;

/// Append-only stock ledger. Recording a movement does not touch any
/// inventory balance.
pub struct StockMovementService {
    repo: Repository<StockMovement>,
    products: Repository<Product>,
    locations: Repository<Location>,
    text_match: TextMatch,
}

impl StockMovementService {
    pub fn new(
        repo: Repository<StockMovement>,
        products: Repository<Product>,
        locations: Repository<Location>,
        text_match: TextMatch,
    ) -> Self {
        Self {
            repo,
            products,
            locations,
            text_match,
        }
    }

    pub async fn list(
        &self,
        params: &StockMovementQueryParams,
    ) -> Result<Paged<StockMovementResponseDto>> {
        let filter = params.to_filter(self.text_match);
        let page = self.repo.list(&filter, params.page_request()).await?;
        Ok(page.map(StockMovementResponseDto::from))
    }

    pub async fn get(&self, id: i64) -> Result<StockMovementResponseDto> {
        self.repo.get(id).await.map(Into::into)
    }

    pub async fn create(&self, dto: CreateStockMovementDto) -> Result<StockMovementResponseDto> {
        dto.movement_type
            .check_locations(dto.from_location_id, dto.to_location_id)
            .map_err(AppError::Validation)?;

        if !self.products.exists(dto.product_id).await? {
            return Err(AppError::Validation(format!(
                "Product with id {} does not exist",
                dto.product_id
            )));
        }
        for location_id in [dto.from_location_id, dto.to_location_id].into_iter().flatten() {
            if !self.locations.exists(location_id).await? {
                return Err(AppError::Validation(format!(
                    "Location with id {} does not exist",
                    location_id
                )));
            }
        }

        let movement = StockMovement {
            id: 0,
            product_id: dto.product_id,
            from_location_id: dto.from_location_id,
            to_location_id: dto.to_location_id,
            quantity_moved: dto.quantity_moved,
            movement_type: dto.movement_type,
            notes: dto.notes,
            audit: AuditFields::default(),
        };

        let created = self.repo.create(movement).await?;
        tracing::info!(
            "Stock movement recorded: id={}, type={}, product_id={}, quantity={}",
            created.id,
            created.movement_type,
            created.product_id,
            created.quantity_moved
        );
        Ok(created.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;
    use crate::features::stock_movements::models::MovementType;
    use std::sync::Arc;

    struct Fixture {
        service: StockMovementService,
        product_id: i64,
        warehouse_id: i64,
        store_id: i64,
    }

    async fn fixture() -> Fixture {
        let products = Repository::new(Arc::new(MemoryStore::<Product>::default()));
        let locations = Repository::new(Arc::new(MemoryStore::<Location>::default()));

        let product = products
            .create(Product {
                sku: "HAM-001".to_string(),
                name: "Claw hammer".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let warehouse = locations
            .create(Location {
                name: "Warehouse".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let store = locations
            .create(Location {
                name: "Store".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        Fixture {
            service: StockMovementService::new(
                Repository::new(Arc::new(MemoryStore::<StockMovement>::default())),
                products,
                locations,
                TextMatch::Insensitive,
            ),
            product_id: product.id,
            warehouse_id: warehouse.id,
            store_id: store.id,
        }
    }

    fn movement(
        product_id: i64,
        movement_type: MovementType,
        from: Option<i64>,
        to: Option<i64>,
    ) -> CreateStockMovementDto {
        CreateStockMovementDto {
            product_id,
            from_location_id: from,
            to_location_id: to,
            quantity_moved: 5,
            movement_type,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_transfer_recorded() {
        let f = fixture().await;
        let created = f
            .service
            .create(movement(
                f.product_id,
                MovementType::Transfer,
                Some(f.warehouse_id),
                Some(f.store_id),
            ))
            .await
            .unwrap();

        let fetched = f.service.get(created.id).await.unwrap();
        assert_eq!(fetched.movement_type, MovementType::Transfer);
        assert_eq!(fetched.to_location_id, Some(f.store_id));
    }

    #[tokio::test]
    async fn test_unknown_location_rejected() {
        let f = fixture().await;
        let result = f
            .service
            .create(movement(f.product_id, MovementType::Purchase, None, Some(999)))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_unknown_product_rejected() {
        let f = fixture().await;
        let result = f
            .service
            .create(movement(999, MovementType::Sale, Some(f.store_id), None))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_filter_by_type() {
        let f = fixture().await;
        f.service
            .create(movement(f.product_id, MovementType::Purchase, None, Some(f.warehouse_id)))
            .await
            .unwrap();
        f.service
            .create(movement(f.product_id, MovementType::Sale, Some(f.store_id), None))
            .await
            .unwrap();

        let params = StockMovementQueryParams {
            page_number: 1,
            page_size: 10,
            product_id: Some(f.product_id),
            movement_type: Some(MovementType::Sale),
            created_at_from: None,
            created_at_to: None,
        };
        let page = f.service.list(&params).await.unwrap();

        assert_eq!(page.total_records, 1);
        assert_eq!(page.items[0].movement_type, MovementType::Sale);
    }
}
