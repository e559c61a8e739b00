use sqlx::query_builder::Separated;
use sqlx::{FromRow, Postgres};

use crate::core::storage::PgRecord;
use crate::shared::audit::{AuditFields, Auditable};
use crate::shared::record::{FieldValue, Record, Reference};

/// Named property of a product, e.g. colour = blue
#[derive(Debug, Clone, Default, FromRow)]
pub struct ProductAttribute {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub value: String,
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

impl Auditable for ProductAttribute {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

impl Record for ProductAttribute {
    const TABLE: &'static str = "product_attributes";
    const LABEL: &'static str = "Product attribute";
    const REFERENCES: &'static [Reference] = &[Reference {
        column: "product_id",
        table: "products",
    }];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn field(&self, column: &str) -> FieldValue<'_> {
        match column {
            "product_id" => FieldValue::Id(Some(self.product_id)),
            "name" => FieldValue::Text(Some(self.name.as_str())),
            "value" => FieldValue::Text(Some(self.value.as_str())),
            _ => FieldValue::Unknown,
        }
    }
}

impl PgRecord for ProductAttribute {
    const COLUMNS: &'static [&'static str] = &["product_id", "name", "value"];

    fn push_values<'args>(&self, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values.push_bind(self.product_id);
        values.push_bind(self.name.clone());
        values.push_bind(self.value.clone());
    }
}
