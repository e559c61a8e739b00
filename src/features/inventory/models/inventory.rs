use sqlx::query_builder::Separated;
use sqlx::{FromRow, Postgres};

use crate::core::storage::PgRecord;
use crate::shared::audit::{AuditFields, Auditable};
use crate::shared::record::{FieldValue, Record, Reference};

pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;

/// Stock level of one product at one location.
///
/// At most one active row exists per (product, location) pair.
/// `audit.updated_at` is the last time the level changed.
#[derive(Debug, Clone, FromRow)]
pub struct Inventory {
    pub id: i64,
    pub product_id: i64,
    pub location_id: i64,
    pub quantity: i32,
    pub low_stock_threshold: i32,
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            id: 0,
            product_id: 0,
            location_id: 0,
            quantity: 0,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            audit: AuditFields::default(),
        }
    }
}

impl Inventory {
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.low_stock_threshold
    }
}

impl Auditable for Inventory {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

impl Record for Inventory {
    const TABLE: &'static str = "inventory";
    const LABEL: &'static str = "Inventory";
    const REFERENCES: &'static [Reference] = &[
        Reference {
            column: "product_id",
            table: "products",
        },
        Reference {
            column: "location_id",
            table: "locations",
        },
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn field(&self, column: &str) -> FieldValue<'_> {
        match column {
            "product_id" => FieldValue::Id(Some(self.product_id)),
            "location_id" => FieldValue::Id(Some(self.location_id)),
            _ => FieldValue::Unknown,
        }
    }
}

impl PgRecord for Inventory {
    const COLUMNS: &'static [&'static str] =
        &["product_id", "location_id", "quantity", "low_stock_threshold"];

    fn push_values<'args>(&self, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values.push_bind(self.product_id);
        values.push_bind(self.location_id);
        values.push_bind(self.quantity);
        values.push_bind(self.low_stock_threshold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_stock_at_threshold() {
        let mut inventory = Inventory {
            quantity: 11,
            ..Default::default()
        };
        assert!(!inventory.is_low_stock());

        inventory.quantity = DEFAULT_LOW_STOCK_THRESHOLD;
        assert!(inventory.is_low_stock());
    }
}
