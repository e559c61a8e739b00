use crate::core::error::{AppError, Result};
use crate::core::storage::Repository;
use crate::features::product_attributes::dtos::{
    PatchProductAttributeDto, ProductAttributeQueryParams, ProductAttributeRequestDto,
    ProductAttributeResponseDto,
};
use crate::features::product_attributes::models::ProductAttribute;
use crate::features::products::models::Product;
use crate::shared::pagination::Paged;
use crate::shared::query::TextMatch;

pub struct ProductAttributeService {
    repo: Repository<ProductAttribute>,
    products: Repository<Product>,
    text_match: TextMatch,
}

impl ProductAttributeService {
    pub fn new(
        repo: Repository<ProductAttribute>,
        products: Repository<Product>,
        text_match: TextMatch,
    ) -> Self {
        Self {
            repo,
            products,
            text_match,
        }
    }

    pub async fn list(
        &self,
        params: &ProductAttributeQueryParams,
    ) -> Result<Paged<ProductAttributeResponseDto>> {
        let filter = params.to_filter(self.text_match);
        let page = self.repo.list(&filter, params.page_request()).await?;
        Ok(page.map(ProductAttributeResponseDto::from))
    }

    pub async fn get(&self, id: i64) -> Result<ProductAttributeResponseDto> {
        self.repo.get(id).await.map(Into::into)
    }

    pub async fn create(
        &self,
        dto: ProductAttributeRequestDto,
    ) -> Result<ProductAttributeResponseDto> {
        self.ensure_product_exists(dto.product_id).await?;

        let attribute = ProductAttribute {
            product_id: dto.product_id,
            name: dto.name,
            value: dto.value,
            ..Default::default()
        };

        let created = self.repo.create(attribute).await?;
        tracing::info!(
            "Product attribute created: id={}, product_id={}",
            created.id,
            created.product_id
        );
        Ok(created.into())
    }

    pub async fn replace(&self, id: i64, dto: ProductAttributeRequestDto) -> Result<()> {
        let mut attribute = self.repo.get(id).await?;
        if dto.product_id != attribute.product_id {
            self.ensure_product_exists(dto.product_id).await?;
        }

        attribute.product_id = dto.product_id;
        attribute.name = dto.name;
        attribute.value = dto.value;

        self.repo.save(attribute).await?;
        tracing::info!("Product attribute updated: id={}", id);
        Ok(())
    }

    pub async fn patch(&self, id: i64, dto: PatchProductAttributeDto) -> Result<()> {
        let mut attribute = self.repo.get(id).await?;
        if let Some(product_id) = dto.product_id.filter(|p| *p != attribute.product_id) {
            self.ensure_product_exists(product_id).await?;
        }

        dto.apply(&mut attribute);

        self.repo.save(attribute).await?;
        tracing::info!("Product attribute patched: id={}", id);
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repo.soft_delete(id).await?;
        tracing::info!("Product attribute deleted: id={}", id);
        Ok(())
    }

    async fn ensure_product_exists(&self, product_id: i64) -> Result<()> {
        if !self.products.exists(product_id).await? {
            return Err(AppError::Validation(format!(
                "Product with id {} does not exist",
                product_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    struct Fixture {
        service: ProductAttributeService,
        products: Repository<Product>,
    }

    fn fixture() -> Fixture {
        let products = Repository::new(Arc::new(MemoryStore::<Product>::default()));
        let service = ProductAttributeService::new(
            Repository::new(Arc::new(MemoryStore::<ProductAttribute>::default())),
            products.clone(),
            TextMatch::Insensitive,
        );
        Fixture { service, products }
    }

    async fn product(f: &Fixture, sku: &str) -> i64 {
        f.products
            .create(Product {
                sku: sku.to_string(),
                name: sku.to_string(),
                sale_price: Decimal::ONE,
                ..Default::default()
            })
            .await
            .unwrap()
            .id
    }

    fn request(product_id: i64) -> ProductAttributeRequestDto {
        ProductAttributeRequestDto {
            product_id,
            name: "Colour".to_string(),
            value: "Blue".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_requires_product() {
        let f = fixture();
        let result = f.service.create(request(404)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let id = product(&f, "HAM-001").await;
        let created = f.service.create(request(id)).await.unwrap();
        assert_eq!(created.product_id, id);
    }

    #[tokio::test]
    async fn test_patch_to_deleted_product_rejected() {
        let f = fixture();
        let kept = product(&f, "HAM-001").await;
        let gone = product(&f, "HAM-002").await;
        f.products.soft_delete(gone).await.unwrap();

        let attribute = f.service.create(request(kept)).await.unwrap();
        let result = f
            .service
            .patch(
                attribute.id,
                PatchProductAttributeDto {
                    product_id: Some(gone),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_replace_keeps_id() {
        let f = fixture();
        let id = product(&f, "HAM-001").await;
        let attribute = f.service.create(request(id)).await.unwrap();

        f.service
            .replace(
                attribute.id,
                ProductAttributeRequestDto {
                    product_id: id,
                    name: "Size".to_string(),
                    value: "XL".to_string(),
                },
            )
            .await
            .unwrap();

        let stored = f.service.get(attribute.id).await.unwrap();
        assert_eq!(stored.name, "Size");
        assert_eq!(stored.value, "XL");
    }
}
