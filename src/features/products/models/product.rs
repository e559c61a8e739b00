use rust_decimal::Decimal;
use sqlx::query_builder::Separated;
use sqlx::{FromRow, Postgres};

use crate::core::storage::PgRecord;
use crate::shared::audit::{AuditFields, Auditable};
use crate::shared::record::{FieldValue, Record};

/// Database model for product
#[derive(Debug, Clone, Default, FromRow)]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub cost_price: Decimal,
    pub sale_price: Decimal,
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

impl Auditable for Product {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

impl Record for Product {
    const TABLE: &'static str = "products";
    const LABEL: &'static str = "Product";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn field(&self, column: &str) -> FieldValue<'_> {
        match column {
            "sku" => FieldValue::Text(Some(self.sku.as_str())),
            "name" => FieldValue::Text(Some(self.name.as_str())),
            "description" => FieldValue::Text(self.description.as_deref()),
            "category_id" => FieldValue::Id(self.category_id),
            "supplier_id" => FieldValue::Id(self.supplier_id),
            _ => FieldValue::Unknown,
        }
    }
}

impl PgRecord for Product {
    const COLUMNS: &'static [&'static str] = &[
        "sku",
        "name",
        "description",
        "category_id",
        "supplier_id",
        "cost_price",
        "sale_price",
    ];

    fn push_values<'args>(&self, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values.push_bind(self.sku.clone());
        values.push_bind(self.name.clone());
        values.push_bind(self.description.clone());
        values.push_bind(self.category_id);
        values.push_bind(self.supplier_id);
        values.push_bind(self.cost_price);
        values.push_bind(self.sale_price);
    }
}
