use crate::core::error::Result;
use crate::core::storage::Repository;
use crate::features::locations::dtos::{
    LocationQueryParams, LocationRequestDto, LocationResponseDto, PatchLocationDto,
};
use crate::features::locations::models::Location;
use crate::shared::pagination::Paged;
use crate::shared::query::TextMatch;

pub struct LocationService {
    repo: Repository<Location>,
    text_match: TextMatch,
}

impl LocationService {
    pub fn new(repo: Repository<Location>, text_match: TextMatch) -> Self {
        Self { repo, text_match }
    }

    pub async fn list(&self, params: &LocationQueryParams) -> Result<Paged<LocationResponseDto>> {
        let filter = params.to_filter(self.text_match);
        let page = self.repo.list(&filter, params.page_request()).await?;
        Ok(page.map(LocationResponseDto::from))
    }

    pub async fn get(&self, id: i64) -> Result<LocationResponseDto> {
        self.repo.get(id).await.map(Into::into)
    }

    pub async fn create(&self, dto: LocationRequestDto) -> Result<LocationResponseDto> {
        let location = Location {
            name: dto.name,
            address: dto.address,
            ..Default::default()
        };

        let created = self.repo.create(location).await?;
        tracing::info!("Location created: id={}", created.id);
        Ok(created.into())
    }

    pub async fn replace(&self, id: i64, dto: LocationRequestDto) -> Result<()> {
        let mut location = self.repo.get(id).await?;
        location.name = dto.name;
        location.address = dto.address;

        self.repo.save(location).await?;
        tracing::info!("Location updated: id={}", id);
        Ok(())
    }

    pub async fn patch(&self, id: i64, dto: PatchLocationDto) -> Result<()> {
        let mut location = self.repo.get(id).await?;
        dto.apply(&mut location);

        self.repo.save(location).await?;
        tracing::info!("Location patched: id={}", id);
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repo.soft_delete(id).await?;
        tracing::info!("Location deleted: id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::core::storage::MemoryStore;
    use std::sync::Arc;

    fn service() -> LocationService {
        LocationService::new(
            Repository::new(Arc::new(MemoryStore::<Location>::default())),
            TextMatch::Insensitive,
        )
    }

    #[tokio::test]
    async fn test_patch_address_only() {
        let service = service();
        let created = service
            .create(LocationRequestDto {
                name: "Main Warehouse".to_string(),
                address: Some("1 Dock Road".to_string()),
            })
            .await
            .unwrap();

        service
            .patch(
                created.id,
                PatchLocationDto {
                    name: Some(String::new()),
                    address: Some("123 Main St".to_string()),
                }
                .normalized(),
            )
            .await
            .unwrap();

        let location = service.get(created.id).await.unwrap();
        assert_eq!(location.name, "Main Warehouse");
        assert_eq!(location.address.as_deref(), Some("123 Main St"));
        assert!(location.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_deleted_location_is_not_found_for_update() {
        let service = service();
        let created = service
            .create(LocationRequestDto {
                name: "Overflow".to_string(),
                address: None,
            })
            .await
            .unwrap();
        service.delete(created.id).await.unwrap();

        let result = service
            .replace(
                created.id,
                LocationRequestDto {
                    name: "Overflow 2".to_string(),
                    address: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
