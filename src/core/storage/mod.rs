//! Storage backends behind a single async interface.
//!
//! Handlers and services never talk to a backend directly; they go through
//! [`Repository`], which owns audit stamping, soft delete and pagination.

mod memory;
mod postgres;
mod repository;

pub use memory::{MemoryStore, Tombstones};
pub use postgres::{PgRecord, PgStore};
pub use repository::Repository;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::shared::pagination::Window;
use crate::shared::query::QueryFilter;
use crate::shared::record::Record;

/// Whether a lookup by id may return soft-deleted rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Active,
    IncludeDeleted,
}

/// Raw persistence operations for one entity type
#[async_trait]
pub trait Store<T: Record>: Send + Sync {
    /// Number of rows matching `filter`
    async fn count(&self, filter: &QueryFilter) -> Result<i64>;

    /// Rows matching `filter` ordered by id, optionally windowed
    async fn fetch(&self, filter: &QueryFilter, window: Option<Window>) -> Result<Vec<T>>;

    async fn find(&self, id: i64, visibility: Visibility) -> Result<Option<T>>;

    /// Persist a new row and return it with its assigned id
    async fn insert(&self, record: T) -> Result<T>;

    /// Overwrite an existing row
    async fn update(&self, record: T) -> Result<T>;
}
