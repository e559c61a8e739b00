use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::stock_movements::models::{MovementType, StockMovement};
use crate::shared::pagination::{default_page_number, default_page_size, PageRequest};
use crate::shared::query::{QueryFilter, TextMatch};

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StockMovementQueryParams {
    #[serde(default = "default_page_number")]
    #[param(minimum = 1)]
    pub page_number: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    pub product_id: Option<i64>,
    pub movement_type: Option<MovementType>,
    pub created_at_from: Option<NaiveDate>,
    pub created_at_to: Option<NaiveDate>,
}

impl StockMovementQueryParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page_number, self.page_size)
    }

    pub fn to_filter(&self, text_match: TextMatch) -> QueryFilter {
        QueryFilter::new(text_match)
            .equals("product_id", self.product_id)
            .text_equals(
                "movement_type",
                self.movement_type.as_ref().map(MovementType::as_str),
            )
            .created_between(self.created_at_from, self.created_at_to)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStockMovementDto {
    pub product_id: i64,
    pub from_location_id: Option<i64>,
    pub to_location_id: Option<i64>,

    #[validate(range(min = 1, message = "Quantity moved must be at least 1"))]
    pub quantity_moved: i32,

    pub movement_type: MovementType,

    #[validate(length(max = 1000, message = "Notes must not exceed 1000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockMovementResponseDto {
    pub id: i64,
    pub product_id: i64,
    pub from_location_id: Option<i64>,
    pub to_location_id: Option<i64>,
    pub quantity_moved: i32,
    pub movement_type: MovementType,
    pub notes: Option<String>,
    /// When the movement was recorded
    pub created_at: DateTime<Utc>,
}

impl From<StockMovement> for StockMovementResponseDto {
    fn from(m: StockMovement) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            from_location_id: m.from_location_id,
            to_location_id: m.to_location_id,
            quantity_moved: m.quantity_moved,
            movement_type: m.movement_type,
            notes: m.notes,
            created_at: m.audit.created_at,
        }
    }
}
