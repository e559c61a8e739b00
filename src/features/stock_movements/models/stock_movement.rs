use serde::{Deserialize, Serialize};
use sqlx::query_builder::Separated;
use sqlx::{FromRow, Postgres, Type};
use utoipa::ToSchema;

use crate::core::storage::PgRecord;
use crate::shared::audit::{AuditFields, Auditable};
use crate::shared::record::{FieldValue, Record, Reference};

/// Movement type enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "movement_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Purchase,
    Sale,
    Transfer,
    AdjustmentIn,
    AdjustmentOut,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Purchase => "PURCHASE",
            MovementType::Sale => "SALE",
            MovementType::Transfer => "TRANSFER",
            MovementType::AdjustmentIn => "ADJUSTMENT_IN",
            MovementType::AdjustmentOut => "ADJUSTMENT_OUT",
        }
    }

    /// Check which ends of the movement are set.
    ///
    /// Inbound movements have only a destination, outbound ones only a
    /// source, and a transfer needs two distinct locations.
    pub fn check_locations(&self, from: Option<i64>, to: Option<i64>) -> Result<(), String> {
        match (self, from, to) {
            (MovementType::Purchase | MovementType::AdjustmentIn, None, Some(_)) => Ok(()),
            (MovementType::Purchase | MovementType::AdjustmentIn, _, _) => Err(format!(
                "{} requires to_location_id and no from_location_id",
                self
            )),
            (MovementType::Sale | MovementType::AdjustmentOut, Some(_), None) => Ok(()),
            (MovementType::Sale | MovementType::AdjustmentOut, _, _) => Err(format!(
                "{} requires from_location_id and no to_location_id",
                self
            )),
            (MovementType::Transfer, Some(from), Some(to)) if from != to => Ok(()),
            (MovementType::Transfer, Some(_), Some(_)) => {
                Err("TRANSFER requires two different locations".to_string())
            }
            (MovementType::Transfer, _, _) => {
                Err("TRANSFER requires from_location_id and to_location_id".to_string())
            }
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the append-only stock ledger.
///
/// `audit.created_at` is the moment the movement happened.
#[derive(Debug, Clone, FromRow)]
pub struct StockMovement {
    pub id: i64,
    pub product_id: i64,
    pub from_location_id: Option<i64>,
    pub to_location_id: Option<i64>,
    pub quantity_moved: i32,
    pub movement_type: MovementType,
    pub notes: Option<String>,
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

impl Auditable for StockMovement {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

impl Record for StockMovement {
    const TABLE: &'static str = "stock_movements";
    const LABEL: &'static str = "Stock movement";
    const REFERENCES: &'static [Reference] = &[
        Reference {
            column: "product_id",
            table: "products",
        },
        Reference {
            column: "from_location_id",
            table: "locations",
        },
        Reference {
            column: "to_location_id",
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
            "from_location_id" => FieldValue::Id(self.from_location_id),
            "to_location_id" => FieldValue::Id(self.to_location_id),
            "movement_type" => FieldValue::Text(Some(self.movement_type.as_str())),
            "notes" => FieldValue::Text(self.notes.as_deref()),
            _ => FieldValue::Unknown,
        }
    }
}

impl PgRecord for StockMovement {
    const COLUMNS: &'static [&'static str] = &[
        "product_id",
        "from_location_id",
        "to_location_id",
        "quantity_moved",
        "movement_type",
        "notes",
    ];

    fn push_values<'args>(&self, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values.push_bind(self.product_id);
        values.push_bind(self.from_location_id);
        values.push_bind(self.to_location_id);
        values.push_bind(self.quantity_moved);
        values.push_bind(self.movement_type);
        values.push_bind(self.notes.clone());
    }
}
