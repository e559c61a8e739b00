use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::query_builder::Separated;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::{Store, Visibility};
use crate::core::error::{AppError, Result};
use crate::shared::pagination::Window;
use crate::shared::query::{like_pattern, Condition, QueryFilter, TextMatch};
use crate::shared::record::{Record, Reference};

/// Row mapping for the Postgres backend
pub trait PgRecord: Record + for<'r> FromRow<'r, PgRow> + Unpin {
    /// Writable columns, excluding `id` and the audit columns
    const COLUMNS: &'static [&'static str];

    /// Bind one value per entry of [`PgRecord::COLUMNS`], in the same order
    fn push_values<'args>(&self, values: &mut Separated<'_, 'args, Postgres, &'static str>);
}

/// Convert database error to more specific AppError with user-friendly messages
pub fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Unique constraint violation
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            return AppError::Conflict("A record with the same unique value already exists.".to_string());
        }

        // Foreign key violation
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23503")) {
            return AppError::BadRequest("Referenced record does not exist.".to_string());
        }
    }

    tracing::error!("Database error: {:?}", e);
    AppError::Database(e)
}

/// Render `filter` as a WHERE clause, soft-delete predicate first
pub fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &QueryFilter) {
    qb.push(" WHERE deleted_at IS NULL");

    let like = match filter.text_match() {
        TextMatch::Sensitive => "LIKE",
        TextMatch::Insensitive => "ILIKE",
    };

    for condition in filter.conditions() {
        match condition {
            Condition::Contains { column, needle } => {
                qb.push(format!(" AND {} {} ", column, like));
                qb.push_bind(like_pattern(needle));
            }
            Condition::Equals { column, value } => {
                qb.push(format!(" AND {} = ", column));
                qb.push_bind(*value);
            }
            Condition::TextEquals { column, value } => {
                qb.push(format!(" AND {}::text = ", column));
                qb.push_bind(value.clone());
            }
            Condition::In { values, .. } if values.is_empty() => {
                qb.push(" AND FALSE");
            }
            Condition::In { column, values } => {
                qb.push(format!(" AND {} = ANY(", column));
                qb.push_bind(values.clone());
                qb.push(")");
            }
            Condition::CreatedFrom(at) => {
                qb.push(" AND created_at >= ");
                qb.push_bind(*at);
            }
            Condition::CreatedBefore(at) => {
                qb.push(" AND created_at < ");
                qb.push_bind(*at);
            }
        }
    }
}

/// Hide rows whose referenced parent row is soft deleted
pub fn push_references(qb: &mut QueryBuilder<'_, Postgres>, references: &[Reference]) {
    for reference in references {
        qb.push(format!(
            " AND ({col} IS NULL OR {col} IN (SELECT id FROM {table} WHERE deleted_at IS NULL))",
            col = reference.column,
            table = reference.table
        ));
    }
}

/// Generic table access through `sqlx::QueryBuilder`
pub struct PgStore<T> {
    pool: PgPool,
    _record: PhantomData<fn() -> T>,
}

impl<T> PgStore<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }
}

fn push_row<'args, T: PgRecord>(qb: &mut QueryBuilder<'args, Postgres>, record: &T) {
    let mut values = qb.separated(", ");
    record.push_values(&mut values);
    let audit = record.audit();
    values.push_bind(audit.created_at);
    values.push_bind(audit.updated_at);
    values.push_bind(audit.deleted_at);
}

fn column_list<T: PgRecord>() -> String {
    format!(
        "{}, created_at, updated_at, deleted_at",
        T::COLUMNS.join(", ")
    )
}

#[async_trait]
impl<T: PgRecord> Store<T> for PgStore<T> {
    async fn count(&self, filter: &QueryFilter) -> Result<i64> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {}", T::TABLE));
        push_filter(&mut qb, filter);
        push_references(&mut qb, T::REFERENCES);

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count {}: {:?}", T::TABLE, e);
                AppError::Database(e)
            })
    }

    async fn fetch(&self, filter: &QueryFilter, window: Option<Window>) -> Result<Vec<T>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT * FROM {}", T::TABLE));
        push_filter(&mut qb, filter);
        push_references(&mut qb, T::REFERENCES);
        qb.push(" ORDER BY id");

        if let Some(window) = window {
            qb.push(" LIMIT ").push_bind(window.limit);
            qb.push(" OFFSET ").push_bind(window.offset);
        }

        qb.build_query_as::<T>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list {}: {:?}", T::TABLE, e);
                AppError::Database(e)
            })
    }

    async fn find(&self, id: i64, visibility: Visibility) -> Result<Option<T>> {
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT * FROM {} WHERE id = ", T::TABLE));
        qb.push_bind(id);
        if visibility == Visibility::Active {
            qb.push(" AND deleted_at IS NULL");
            push_references(&mut qb, T::REFERENCES);
        }

        qb.build_query_as::<T>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get {} {}: {:?}", T::TABLE, id, e);
                AppError::Database(e)
            })
    }

    async fn insert(&self, record: T) -> Result<T> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "INSERT INTO {} ({}) VALUES (",
            T::TABLE,
            column_list::<T>()
        ));
        push_row(&mut qb, &record);
        qb.push(") RETURNING *");

        qb.build_query_as::<T>()
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn update(&self, record: T) -> Result<T> {
        let id = record.id();
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "UPDATE {} SET ({}) = ROW(",
            T::TABLE,
            column_list::<T>()
        ));
        push_row(&mut qb, &record);
        qb.push(") WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        qb.build_query_as::<T>()
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| AppError::NotFound(format!("{} with id {} not found", T::LABEL, id)))
    }
}
