use std::sync::Arc;

use chrono::Utc;

use super::{Store, Visibility};
use crate::core::error::{AppError, Result};
use crate::shared::audit::{AuditStamper, WriteKind};
use crate::shared::pagination::{PageRequest, Paged};
use crate::shared::query::QueryFilter;
use crate::shared::record::Record;

/// Entity access shared by every feature service.
///
/// All writes pass through [`AuditStamper`] here, so no backend and no
/// service sets audit timestamps on its own.
pub struct Repository<T> {
    store: Arc<dyn Store<T>>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<T: Record> Repository<T> {
    pub fn new(store: Arc<dyn Store<T>>) -> Self {
        Self { store }
    }

    /// Count-then-fetch listing. See [`crate::shared::pagination`] for the
    /// consistency caveat between the two passes.
    pub async fn list(&self, filter: &QueryFilter, page: PageRequest) -> Result<Paged<T>> {
        let total = self.store.count(filter).await?;
        let items = self.store.fetch(filter, Some(page.window())).await?;
        Ok(Paged::new(items, page, total))
    }

    /// Every active row matching `filter`, unpaginated
    pub async fn all(&self, filter: &QueryFilter) -> Result<Vec<T>> {
        self.store.fetch(filter, None).await
    }

    pub async fn count(&self, filter: &QueryFilter) -> Result<i64> {
        self.store.count(filter).await
    }

    pub async fn find(&self, id: i64) -> Result<Option<T>> {
        self.store.find(id, Visibility::Active).await
    }

    /// Active record by id, NotFound otherwise
    pub async fn get(&self, id: i64) -> Result<T> {
        self.find(id)
            .await?
            .ok_or_else(|| not_found::<T>(id))
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        Ok(self.find(id).await?.is_some())
    }

    pub async fn create(&self, mut record: T) -> Result<T> {
        AuditStamper::stamp(&mut record, WriteKind::Insert, Utc::now());
        self.store.insert(record).await
    }

    pub async fn save(&self, mut record: T) -> Result<T> {
        AuditStamper::stamp(&mut record, WriteKind::Update, Utc::now());
        self.store.update(record).await
    }

    /// Record about to be soft deleted.
    ///
    /// Unknown ids are NotFound; ids that are already deleted are Conflict.
    pub async fn find_deletable(&self, id: i64) -> Result<T> {
        let record = self
            .store
            .find(id, Visibility::IncludeDeleted)
            .await?
            .ok_or_else(|| not_found::<T>(id))?;

        if record.audit().is_deleted() {
            return Err(AppError::Conflict(format!(
                "{} with id {} is already deleted",
                T::LABEL,
                id
            )));
        }

        Ok(record)
    }

    /// Soft delete a record obtained from [`Repository::find_deletable`]
    pub async fn delete(&self, mut record: T) -> Result<T> {
        let now = Utc::now();
        AuditStamper::mark_deleted(&mut record, now);
        AuditStamper::stamp(&mut record, WriteKind::Update, now);
        self.store.update(record).await
    }

    pub async fn soft_delete(&self, id: i64) -> Result<T> {
        let record = self.find_deletable(id).await?;
        self.delete(record).await
    }
}

fn not_found<T: Record>(id: i64) -> AppError {
    AppError::NotFound(format!("{} with id {} not found", T::LABEL, id))
}
