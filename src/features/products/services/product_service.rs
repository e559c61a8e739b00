use crate::core::error::{AppError, Result};
use crate::core::storage::Repository;
use crate::features::categories::models::Category;
use crate::features::products::dtos::{
    PatchProductDto, ProductQueryParams, ProductRequestDto, ProductResponseDto,
};
use crate::features::products::models::Product;
use crate::features::suppliers::models::Supplier;
use crate::shared::pagination::Paged;
use crate::shared::query::{QueryFilter, TextMatch};

pub struct ProductService {
    repo: Repository<Product>,
    categories: Repository<Category>,
    suppliers: Repository<Supplier>,
    text_match: TextMatch,
}

impl ProductService {
    pub fn new(
        repo: Repository<Product>,
        categories: Repository<Category>,
        suppliers: Repository<Supplier>,
        text_match: TextMatch,
    ) -> Self {
        Self {
            repo,
            categories,
            suppliers,
            text_match,
        }
    }

    pub async fn list(&self, params: &ProductQueryParams) -> Result<Paged<ProductResponseDto>> {
        let filter = params.to_filter(self.text_match);
        let page = self.repo.list(&filter, params.page_request()).await?;
        Ok(page.map(ProductResponseDto::from))
    }

    pub async fn get(&self, id: i64) -> Result<ProductResponseDto> {
        self.repo.get(id).await.map(Into::into)
    }

    pub async fn create(&self, dto: ProductRequestDto) -> Result<ProductResponseDto> {
        self.ensure_sku_available(&dto.sku, None).await?;
        self.ensure_references(dto.category_id, dto.supplier_id).await?;

        let product = Product {
            sku: dto.sku,
            name: dto.name,
            description: dto.description,
            category_id: dto.category_id,
            supplier_id: dto.supplier_id,
            cost_price: dto.cost_price,
            sale_price: dto.sale_price,
            ..Default::default()
        };

        let created = self.repo.create(product).await?;
        tracing::info!("Product created: id={}, sku={}", created.id, created.sku);
        Ok(created.into())
    }

    pub async fn replace(&self, id: i64, dto: ProductRequestDto) -> Result<()> {
        let mut product = self.repo.get(id).await?;

        if dto.sku != product.sku {
            self.ensure_sku_available(&dto.sku, Some(id)).await?;
        }
        self.ensure_references(
            changed(product.category_id, dto.category_id),
            changed(product.supplier_id, dto.supplier_id),
        )
        .await?;

        product.sku = dto.sku;
        product.name = dto.name;
        product.description = dto.description;
        product.category_id = dto.category_id;
        product.supplier_id = dto.supplier_id;
        product.cost_price = dto.cost_price;
        product.sale_price = dto.sale_price;

        self.repo.save(product).await?;
        tracing::info!("Product updated: id={}", id);
        Ok(())
    }

    pub async fn patch(&self, id: i64, dto: PatchProductDto) -> Result<()> {
        let mut product = self.repo.get(id).await?;

        if let Some(sku) = dto.sku.as_deref() {
            if sku != product.sku {
                self.ensure_sku_available(sku, Some(id)).await?;
            }
        }
        self.ensure_references(
            changed(product.category_id, dto.category_id),
            changed(product.supplier_id, dto.supplier_id),
        )
        .await?;

        dto.apply(&mut product);

        self.repo.save(product).await?;
        tracing::info!("Product patched: id={}", id);
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repo.soft_delete(id).await?;
        tracing::info!("Product deleted: id={}", id);
        Ok(())
    }

    async fn ensure_references(
        &self,
        category_id: Option<i64>,
        supplier_id: Option<i64>,
    ) -> Result<()> {
        if let Some(category_id) = category_id {
            if !self.categories.exists(category_id).await? {
                return Err(AppError::Validation(format!(
                    "Category with id {} does not exist",
                    category_id
                )));
            }
        }
        if let Some(supplier_id) = supplier_id {
            if !self.suppliers.exists(supplier_id).await? {
                return Err(AppError::Validation(format!(
                    "Supplier with id {} does not exist",
                    supplier_id
                )));
            }
        }
        Ok(())
    }

    /// SKUs are unique among active products
    async fn ensure_sku_available(&self, sku: &str, except: Option<i64>) -> Result<()> {
        let taken = self
            .repo
            .all(&QueryFilter::default().text_equals("sku", Some(sku)))
            .await?
            .into_iter()
            .any(|p| Some(p.id) != except);

        if taken {
            return Err(AppError::Conflict(format!(
                "Product with SKU '{}' already exists",
                sku
            )));
        }
        Ok(())
    }
}

/// New reference worth validating, if it differs from the current one
fn changed(current: Option<i64>, new: Option<i64>) -> Option<i64> {
    new.filter(|id| current != Some(*id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    struct Fixture {
        service: ProductService,
        categories: Repository<Category>,
        suppliers: Repository<Supplier>,
    }

    fn fixture() -> Fixture {
        let categories = Repository::new(Arc::new(MemoryStore::<Category>::default()));
        let suppliers = Repository::new(Arc::new(MemoryStore::<Supplier>::default()));
        let service = ProductService::new(
            Repository::new(Arc::new(MemoryStore::<Product>::default())),
            categories.clone(),
            suppliers.clone(),
            TextMatch::Insensitive,
        );
        Fixture {
            service,
            categories,
            suppliers,
        }
    }

    fn request(sku: &str, category_id: Option<i64>, supplier_id: Option<i64>) -> ProductRequestDto {
        ProductRequestDto {
            sku: sku.to_string(),
            name: "Claw hammer".to_string(),
            description: None,
            category_id,
            supplier_id,
            cost_price: Decimal::new(1250, 2),
            sale_price: Decimal::new(1999, 2),
        }
    }

    #[tokio::test]
    async fn test_create_checks_references() {
        let f = fixture();

        let result = f.service.create(request("HAM-001", Some(1), None)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let category = f
            .categories
            .create(Category {
                name: "Tools".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let supplier = f
            .suppliers
            .create(Supplier {
                name: "Acme".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let created = f
            .service
            .create(request("HAM-001", Some(category.id), Some(supplier.id)))
            .await
            .unwrap();
        assert_eq!(created.category_id, Some(category.id));
    }

    #[tokio::test]
    async fn test_duplicate_sku_conflicts() {
        let f = fixture();
        f.service.create(request("HAM-001", None, None)).await.unwrap();

        let result = f.service.create(request("HAM-001", None, None)).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_sku_reusable_after_delete() {
        let f = fixture();
        let first = f.service.create(request("HAM-001", None, None)).await.unwrap();
        f.service.delete(first.id).await.unwrap();

        assert!(f.service.create(request("HAM-001", None, None)).await.is_ok());
    }

    #[tokio::test]
    async fn test_patch_to_deleted_supplier_rejected() {
        let f = fixture();
        let supplier = f
            .suppliers
            .create(Supplier {
                name: "Gone Ltd".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        f.suppliers.soft_delete(supplier.id).await.unwrap();

        let product = f.service.create(request("HAM-001", None, None)).await.unwrap();
        let result = f
            .service
            .patch(
                product.id,
                PatchProductDto {
                    supplier_id: Some(supplier.id),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
