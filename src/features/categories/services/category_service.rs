use std::collections::HashSet;

use crate::core::error::{AppError, Result};
use crate::core::storage::Repository;
use crate::features::categories::dtos::category_dto::children_index;
use crate::features::categories::dtos::{
    CategoryQueryParams, CategoryRequestDto, CategoryResponseDto, CategorySummaryDto,
    CategoryTreeDto, PatchCategoryDto,
};
use crate::features::categories::models::Category;
use crate::shared::pagination::Paged;
use crate::shared::query::{QueryFilter, TextMatch};

/// Service for category operations
pub struct CategoryService {
    repo: Repository<Category>,
    text_match: TextMatch,
}

impl CategoryService {
    pub fn new(repo: Repository<Category>, text_match: TextMatch) -> Self {
        Self { repo, text_match }
    }

    pub async fn list(&self, params: &CategoryQueryParams) -> Result<Paged<CategoryResponseDto>> {
        let filter = params.to_filter(self.text_match);
        let page = self.repo.list(&filter, params.page_request()).await?;

        let ids = page.items.iter().map(|c| c.id).collect::<Vec<_>>();
        let children = self
            .repo
            .all(&QueryFilter::default().in_ids("parent_category_id", ids))
            .await?;
        let mut index = children_index(&children);

        Ok(page.map(|category| {
            let sub_categories = index.remove(&category.id).unwrap_or_default();
            CategoryResponseDto::new(category, sub_categories)
        }))
    }

    /// All active categories as tree structure
    pub async fn tree(&self) -> Result<Vec<CategoryTreeDto>> {
        let categories = self.repo.all(&QueryFilter::default()).await?;
        Ok(CategoryTreeDto::build_tree(&categories))
    }

    pub async fn get(&self, id: i64) -> Result<CategoryResponseDto> {
        let category = self.repo.get(id).await?;
        let sub_categories = self.sub_categories(id).await?;
        Ok(CategoryResponseDto::new(category, sub_categories))
    }

    pub async fn create(&self, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        if let Some(parent_id) = dto.parent_category_id {
            self.ensure_parent_exists(parent_id).await?;
        }

        let category = Category {
            name: dto.name,
            parent_category_id: dto.parent_category_id,
            ..Default::default()
        };

        let created = self.repo.create(category).await?;
        tracing::info!("Category created: id={}", created.id);
        Ok(CategoryResponseDto::new(created, Vec::new()))
    }

    pub async fn replace(&self, id: i64, dto: CategoryRequestDto) -> Result<()> {
        let mut category = self.repo.get(id).await?;
        if dto.parent_category_id != category.parent_category_id {
            if let Some(parent_id) = dto.parent_category_id {
                self.ensure_valid_parent(id, parent_id).await?;
            }
        }

        category.name = dto.name;
        category.parent_category_id = dto.parent_category_id;

        self.repo.save(category).await?;
        tracing::info!("Category updated: id={}", id);
        Ok(())
    }

    pub async fn patch(&self, id: i64, dto: PatchCategoryDto) -> Result<()> {
        let mut category = self.repo.get(id).await?;

        if let Some(parent_id) = dto.parent_category_id {
            if category.parent_category_id != Some(parent_id) {
                self.ensure_valid_parent(id, parent_id).await?;
            }
            category.parent_category_id = Some(parent_id);
        }
        if let Some(name) = dto.name {
            category.name = name;
        }

        self.repo.save(category).await?;
        tracing::info!("Category patched: id={}", id);
        Ok(())
    }

    /// Soft delete, refused while the category still has active children
    pub async fn delete(&self, id: i64) -> Result<()> {
        let category = self.repo.find_deletable(id).await?;

        let children = self
            .repo
            .count(&QueryFilter::default().equals("parent_category_id", Some(id)))
            .await?;
        if children > 0 {
            return Err(AppError::Conflict(format!(
                "Category with id {} has {} active sub-categories",
                id, children
            )));
        }

        self.repo.delete(category).await?;
        tracing::info!("Category deleted: id={}", id);
        Ok(())
    }

    async fn sub_categories(&self, id: i64) -> Result<Vec<CategorySummaryDto>> {
        let children = self
            .repo
            .all(&QueryFilter::default().equals("parent_category_id", Some(id)))
            .await?;
        Ok(children.iter().map(CategorySummaryDto::from).collect())
    }

    async fn ensure_parent_exists(&self, parent_id: i64) -> Result<()> {
        if self.repo.exists(parent_id).await? {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Parent category with id {} does not exist",
                parent_id
            )))
        }
    }

    /// Parent must exist and must not be `id` itself or one of its descendants
    async fn ensure_valid_parent(&self, id: i64, parent_id: i64) -> Result<()> {
        if parent_id == id {
            return Err(AppError::Validation(
                "A category cannot be its own parent".to_string(),
            ));
        }
        self.ensure_parent_exists(parent_id).await?;

        let mut seen = HashSet::new();
        let mut current = Some(parent_id);
        while let Some(ancestor_id) = current {
            if ancestor_id == id {
                return Err(AppError::Validation(format!(
                    "Category {} is a descendant of category {}",
                    parent_id, id
                )));
            }
            if !seen.insert(ancestor_id) {
                break;
            }
            current = self
                .repo
                .find(ancestor_id)
                .await?
                .and_then(|c| c.parent_category_id);
        }

        Ok(())
    }
}
