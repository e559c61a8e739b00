use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Store, Visibility};
use crate::core::error::{AppError, Result};
use crate::shared::pagination::Window;
use crate::shared::query::QueryFilter;
use crate::shared::record::{FieldValue, Record};

/// Soft-deleted ids per table, shared by the stores of one backend
#[derive(Clone, Default)]
pub struct Tombstones {
    inner: Arc<RwLock<HashMap<&'static str, HashSet<i64>>>>,
}

impl Tombstones {
    pub fn new() -> Self {
        Self::default()
    }

    async fn mark(&self, table: &'static str, id: i64, deleted: bool) {
        let mut inner = self.inner.write().await;
        if deleted {
            inner.entry(table).or_default().insert(id);
        } else if let Some(ids) = inner.get_mut(table) {
            ids.remove(&id);
        }
    }
}

/// Process-local backend keyed by id.
///
/// Rows are kept in a `BTreeMap`, so iteration order is id order, the same
/// order the Postgres backend uses.
pub struct MemoryStore<T> {
    rows: RwLock<BTreeMap<i64, T>>,
    next_id: AtomicI64,
    tombstones: Tombstones,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::with_tombstones(Tombstones::new())
    }
}

impl<T> MemoryStore<T> {
    /// Store that sees deletions made through other stores sharing
    /// `tombstones`
    pub fn with_tombstones(tombstones: Tombstones) -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            tombstones,
        }
    }
}

/// Every non-null foreign key of `record` points at a row not yet deleted
fn references_active<T: Record>(
    record: &T,
    deleted: &HashMap<&'static str, HashSet<i64>>,
) -> bool {
    T::REFERENCES.iter().all(|reference| {
        match (record.field(reference.column), deleted.get(reference.table)) {
            (FieldValue::Id(Some(id)), Some(ids)) => !ids.contains(&id),
            _ => true,
        }
    })
}

#[async_trait]
impl<T: Record> Store<T> for MemoryStore<T> {
    async fn count(&self, filter: &QueryFilter) -> Result<i64> {
        let rows = self.rows.read().await;
        let deleted = self.tombstones.inner.read().await;
        Ok(rows
            .values()
            .filter(|r| filter.matches(*r) && references_active(*r, &deleted))
            .count() as i64)
    }

    async fn fetch(&self, filter: &QueryFilter, window: Option<Window>) -> Result<Vec<T>> {
        let rows = self.rows.read().await;
        let deleted = self.tombstones.inner.read().await;
        let matching = rows
            .values()
            .filter(|r| filter.matches(*r) && references_active(*r, &deleted));

        let items = match window {
            Some(window) => matching
                .skip(window.offset.max(0) as usize)
                .take(window.limit.max(0) as usize)
                .cloned()
                .collect(),
            None => matching.cloned().collect(),
        };

        Ok(items)
    }

    async fn find(&self, id: i64, visibility: Visibility) -> Result<Option<T>> {
        let rows = self.rows.read().await;
        let deleted = self.tombstones.inner.read().await;
        Ok(rows
            .get(&id)
            .filter(|r| {
                visibility == Visibility::IncludeDeleted
                    || (!r.audit().is_deleted() && references_active(*r, &deleted))
            })
            .cloned())
    }

    async fn insert(&self, mut record: T) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        record.set_id(id);

        self.rows.write().await.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, record: T) -> Result<T> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&record.id()) {
            Some(slot) => {
                *slot = record.clone();
                self.tombstones
                    .mark(T::TABLE, record.id(), record.audit().is_deleted())
                    .await;
                Ok(record)
            }
            None => Err(AppError::NotFound(format!(
                "{} with id {} not found",
                T::LABEL,
                record.id()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::audit::{AuditFields, Auditable};
    use crate::shared::record::Reference;

    #[derive(Clone, Default)]
    struct Shelf {
        id: i64,
        audit: AuditFields,
    }

    #[derive(Clone, Default)]
    struct Bin {
        id: i64,
        shelf_id: Option<i64>,
        audit: AuditFields,
    }

    macro_rules! auditable {
        ($ty:ty) => {
            impl Auditable for $ty {
                fn audit(&self) -> &AuditFields {
                    &self.audit
                }
                fn audit_mut(&mut self) -> &mut AuditFields {
                    &mut self.audit
                }
            }
        };
    }

    auditable!(Shelf);
    auditable!(Bin);

    impl Record for Shelf {
        const TABLE: &'static str = "shelves";
        const LABEL: &'static str = "Shelf";

        fn id(&self) -> i64 {
            self.id
        }
        fn set_id(&mut self, id: i64) {
            self.id = id;
        }
        fn field(&self, _column: &str) -> FieldValue<'_> {
            FieldValue::Unknown
        }
    }

    impl Record for Bin {
        const TABLE: &'static str = "bins";
        const LABEL: &'static str = "Bin";
        const REFERENCES: &'static [Reference] = &[Reference {
            column: "shelf_id",
            table: "shelves",
        }];

        fn id(&self) -> i64 {
            self.id
        }
        fn set_id(&mut self, id: i64) {
            self.id = id;
        }
        fn field(&self, column: &str) -> FieldValue<'_> {
            match column {
                "shelf_id" => FieldValue::Id(self.shelf_id),
                _ => FieldValue::Unknown,
            }
        }
    }

    #[tokio::test]
    async fn test_rows_hidden_once_parent_deleted() {
        let tombstones = Tombstones::new();
        let shelves = MemoryStore::<Shelf>::with_tombstones(tombstones.clone());
        let bins = MemoryStore::<Bin>::with_tombstones(tombstones);

        let shelf = shelves.insert(Shelf::default()).await.unwrap();
        let bin = bins
            .insert(Bin {
                shelf_id: Some(shelf.id),
                ..Bin::default()
            })
            .await
            .unwrap();
        let loose = bins.insert(Bin::default()).await.unwrap();

        let mut deleted = shelf.clone();
        deleted.audit.deleted_at = Some(chrono::Utc::now());
        shelves.update(deleted).await.unwrap();

        let filter = QueryFilter::default();
        assert_eq!(bins.count(&filter).await.unwrap(), 1);
        let visible = bins.fetch(&filter, None).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, loose.id);

        assert!(bins.find(bin.id, Visibility::Active).await.unwrap().is_none());
        assert!(bins
            .find(bin.id, Visibility::IncludeDeleted)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_unshared_registry_ignores_other_deletions() {
        let shelves = MemoryStore::<Shelf>::default();
        let bins = MemoryStore::<Bin>::default();

        let mut shelf = shelves.insert(Shelf::default()).await.unwrap();
        bins.insert(Bin {
            shelf_id: Some(shelf.id),
            ..Bin::default()
        })
        .await
        .unwrap();

        shelf.audit.deleted_at = Some(chrono::Utc::now());
        shelves.update(shelf).await.unwrap();

        assert_eq!(bins.count(&QueryFilter::default()).await.unwrap(), 1);
    }
}
