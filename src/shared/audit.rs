//! Audit timestamps shared by every persisted entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Creation, update and soft-delete markers.
///
/// Embedded in each model with `#[sqlx(flatten)]`, so the columns
/// `created_at`, `updated_at` and `deleted_at` live on every table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct AuditFields {
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Default for AuditFields {
    fn default() -> Self {
        Self {
            created_at: Utc::now(),
            updated_at: None,
            deleted_at: None,
        }
    }
}

impl AuditFields {
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Capability of carrying [`AuditFields`]
pub trait Auditable {
    fn audit(&self) -> &AuditFields;
    fn audit_mut(&mut self) -> &mut AuditFields;
}

/// Kind of write about to be persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Insert,
    Update,
}

/// Stamps audit fields right before a record reaches the store.
///
/// Insert sets both `created_at` and `updated_at`; update only refreshes
/// `updated_at`. No entity type overrides this.
pub struct AuditStamper;

impl AuditStamper {
    pub fn stamp<T: Auditable>(record: &mut T, kind: WriteKind, now: DateTime<Utc>) {
        let audit = record.audit_mut();
        if kind == WriteKind::Insert {
            audit.created_at = now;
        }
        audit.updated_at = Some(now);
    }

    pub fn mark_deleted<T: Auditable>(record: &mut T, now: DateTime<Utc>) {
        record.audit_mut().deleted_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Default)]
    struct Thing {
        audit: AuditFields,
    }

    impl Auditable for Thing {
        fn audit(&self) -> &AuditFields {
            &self.audit
        }
        fn audit_mut(&mut self) -> &mut AuditFields {
            &mut self.audit
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_insert_sets_created_and_updated() {
        let mut thing = Thing::default();
        AuditStamper::stamp(&mut thing, WriteKind::Insert, at(8));

        assert_eq!(thing.audit().created_at, at(8));
        assert_eq!(thing.audit().updated_at, Some(at(8)));
        assert!(!thing.audit().is_deleted());
    }

    #[test]
    fn test_update_keeps_created_at() {
        let mut thing = Thing::default();
        AuditStamper::stamp(&mut thing, WriteKind::Insert, at(8));
        AuditStamper::stamp(&mut thing, WriteKind::Update, at(12));

        assert_eq!(thing.audit().created_at, at(8));
        assert_eq!(thing.audit().updated_at, Some(at(12)));
    }

    #[test]
    fn test_mark_deleted() {
        let mut thing = Thing::default();
        AuditStamper::mark_deleted(&mut thing, at(9));
        assert!(thing.audit().is_deleted());
        assert_eq!(thing.audit().deleted_at, Some(at(9)));
    }
}
