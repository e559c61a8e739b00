use crate::core::error::{AppError, Result};
use crate::core::storage::Repository;
use crate::features::inventory::dtos::{
    InventoryQueryParams, InventoryRequestDto, InventoryResponseDto, PatchInventoryDto,
};
use crate::features::inventory::models::Inventory;
use crate::features::locations::models::Location;
use crate::features::products::models::Product;
use crate::shared::pagination::Paged;
use crate::shared::query::{QueryFilter, TextMatch};

/// Stock levels per product and location
pub struct InventoryService {
    repo: Repository<Inventory>,
    products: Repository<Product>,
    locations: Repository<Location>,
    text_match: TextMatch,
}

impl InventoryService {
    pub fn new(
        repo: Repository<Inventory>,
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

    pub async fn list(&self, params: &InventoryQueryParams) -> Result<Paged<InventoryResponseDto>> {
        let filter = params.to_filter(self.text_match);
        let page = self.repo.list(&filter, params.page_request()).await?;
        Ok(page.map(InventoryResponseDto::from))
    }

    pub async fn get(&self, id: i64) -> Result<InventoryResponseDto> {
        self.repo.get(id).await.map(Into::into)
    }

    pub async fn create(&self, dto: InventoryRequestDto) -> Result<InventoryResponseDto> {
        self.ensure_references(Some(dto.product_id), Some(dto.location_id))
            .await?;
        self.ensure_pair_available(dto.product_id, dto.location_id, None)
            .await?;

        let inventory = Inventory {
            product_id: dto.product_id,
            location_id: dto.location_id,
            quantity: dto.quantity,
            low_stock_threshold: dto.low_stock_threshold,
            ..Default::default()
        };

        let created = self.repo.create(inventory).await?;
        tracing::info!(
            "Inventory created: id={}, product_id={}, location_id={}",
            created.id,
            created.product_id,
            created.location_id
        );
        Ok(created.into())
    }

    pub async fn replace(&self, id: i64, dto: InventoryRequestDto) -> Result<()> {
        let mut inventory = self.repo.get(id).await?;
        self.check_move(&inventory, dto.product_id, dto.location_id)
            .await?;

        inventory.product_id = dto.product_id;
        inventory.location_id = dto.location_id;
        inventory.quantity = dto.quantity;
        inventory.low_stock_threshold = dto.low_stock_threshold;

        self.repo.save(inventory).await?;
        tracing::info!("Inventory updated: id={}", id);
        Ok(())
    }

    pub async fn patch(&self, id: i64, dto: PatchInventoryDto) -> Result<()> {
        let mut inventory = self.repo.get(id).await?;
        let product_id = dto.product_id.unwrap_or(inventory.product_id);
        let location_id = dto.location_id.unwrap_or(inventory.location_id);
        self.check_move(&inventory, product_id, location_id).await?;

        dto.apply(&mut inventory);

        self.repo.save(inventory).await?;
        tracing::info!("Inventory patched: id={}", id);
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repo.soft_delete(id).await?;
        tracing::info!("Inventory deleted: id={}", id);
        Ok(())
    }

    /// Checks for a row being pointed at another product or location
    async fn check_move(
        &self,
        current: &Inventory,
        product_id: i64,
        location_id: i64,
    ) -> Result<()> {
        if (product_id, location_id) == (current.product_id, current.location_id) {
            return Ok(());
        }

        self.ensure_references(
            Some(product_id).filter(|p| *p != current.product_id),
            Some(location_id).filter(|l| *l != current.location_id),
        )
        .await?;
        self.ensure_pair_available(product_id, location_id, Some(current.id))
            .await
    }

    async fn ensure_references(
        &self,
        product_id: Option<i64>,
        location_id: Option<i64>,
    ) -> Result<()> {
        if let Some(product_id) = product_id {
            if !self.products.exists(product_id).await? {
                return Err(AppError::Validation(format!(
                    "Product with id {} does not exist",
                    product_id
                )));
            }
        }
        if let Some(location_id) = location_id {
            if !self.locations.exists(location_id).await? {
                return Err(AppError::Validation(format!(
                    "Location with id {} does not exist",
                    location_id
                )));
            }
        }
        Ok(())
    }

    /// One active row per product and location
    async fn ensure_pair_available(
        &self,
        product_id: i64,
        location_id: i64,
        except: Option<i64>,
    ) -> Result<()> {
        let filter = QueryFilter::default()
            .equals("product_id", Some(product_id))
            .equals("location_id", Some(location_id));
        let taken = self
            .repo
            .all(&filter)
            .await?
            .into_iter()
            .any(|i| Some(i.id) != except);

        if taken {
            return Err(AppError::Conflict(format!(
                "Inventory for product {} at location {} already exists",
                product_id, location_id
            )));
        }
        Ok(())
    }
}
