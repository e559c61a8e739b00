use sqlx::query_builder::Separated;
use sqlx::{FromRow, Postgres};

use crate::core::storage::PgRecord;
use crate::shared::audit::{AuditFields, Auditable};
use crate::shared::record::{FieldValue, Record};

/// Database model for category.
///
/// Categories form a forest through `parent_category_id`. Children are never
/// stored on the parent; they are looked up by parent id when needed.
#[derive(Debug, Clone, Default, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub parent_category_id: Option<i64>,
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

impl Auditable for Category {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

impl Record for Category {
    const TABLE: &'static str = "categories";
    const LABEL: &'static str = "Category";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn field(&self, column: &str) -> FieldValue<'_> {
        match column {
            "name" => FieldValue::Text(Some(self.name.as_str())),
            "parent_category_id" => FieldValue::Id(self.parent_category_id),
            _ => FieldValue::Unknown,
        }
    }
}

impl PgRecord for Category {
    const COLUMNS: &'static [&'static str] = &["name", "parent_category_id"];

    fn push_values<'args>(&self, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values.push_bind(self.name.clone());
        values.push_bind(self.parent_category_id);
    }
}
