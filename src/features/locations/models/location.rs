use sqlx::query_builder::Separated;
use sqlx::{FromRow, Postgres};

use crate::core::storage::PgRecord;
use crate::shared::audit::{AuditFields, Auditable};
use crate::shared::record::{FieldValue, Record};

/// Warehouse, shelf or store where stock is kept
#[derive(Debug, Clone, Default, FromRow)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

impl Auditable for Location {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

impl Record for Location {
    const TABLE: &'static str = "locations";
    const LABEL: &'static str = "Location";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn field(&self, column: &str) -> FieldValue<'_> {
        match column {
            "name" => FieldValue::Text(Some(self.name.as_str())),
            "address" => FieldValue::Text(self.address.as_deref()),
            _ => FieldValue::Unknown,
        }
    }
}

impl PgRecord for Location {
    const COLUMNS: &'static [&'static str] = &["name", "address"];

    fn push_values<'args>(&self, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values.push_bind(self.name.clone());
        values.push_bind(self.address.clone());
    }
}
