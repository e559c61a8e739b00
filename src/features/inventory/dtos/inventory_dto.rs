use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::inventory::models::{Inventory, DEFAULT_LOW_STOCK_THRESHOLD};
use crate::shared::pagination::{default_page_number, default_page_size, PageRequest};
use crate::shared::query::{QueryFilter, TextMatch};

fn default_low_stock_threshold() -> i32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryQueryParams {
    #[serde(default = "default_page_number")]
    #[param(minimum = 1)]
    pub page_number: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    pub product_id: Option<i64>,
    pub location_id: Option<i64>,
    pub created_at_from: Option<NaiveDate>,
    pub created_at_to: Option<NaiveDate>,
}

impl InventoryQueryParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page_number, self.page_size)
    }

    pub fn to_filter(&self, text_match: TextMatch) -> QueryFilter {
        QueryFilter::new(text_match)
            .equals("product_id", self.product_id)
            .equals("location_id", self.location_id)
            .created_between(self.created_at_from, self.created_at_to)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct InventoryRequestDto {
    pub product_id: i64,
    pub location_id: i64,

    #[serde(default)]
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i32,

    #[serde(default = "default_low_stock_threshold")]
    #[schema(default = 10)]
    #[validate(range(min = 0, message = "Low stock threshold must not be negative"))]
    pub low_stock_threshold: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PatchInventoryDto {
    pub product_id: Option<i64>,
    pub location_id: Option<i64>,

    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: Option<i32>,

    #[validate(range(min = 0, message = "Low stock threshold must not be negative"))]
    pub low_stock_threshold: Option<i32>,
}

impl PatchInventoryDto {
    pub fn apply(self, inventory: &mut Inventory) {
        if let Some(product_id) = self.product_id {
            inventory.product_id = product_id;
        }
        if let Some(location_id) = self.location_id {
            inventory.location_id = location_id;
        }
        if let Some(quantity) = self.quantity {
            inventory.quantity = quantity;
        }
        if let Some(threshold) = self.low_stock_threshold {
            inventory.low_stock_threshold = threshold;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InventoryResponseDto {
    pub id: i64,
    pub product_id: i64,
    pub location_id: i64,
    pub quantity: i32,
    pub low_stock_threshold: i32,
    /// Quantity is at or below the threshold
    pub low_stock: bool,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl From<Inventory> for InventoryResponseDto {
    fn from(i: Inventory) -> Self {
        Self {
            low_stock: i.is_low_stock(),
            id: i.id,
            product_id: i.product_id,
            location_id: i.location_id,
            quantity: i.quantity,
            low_stock_threshold: i.low_stock_threshold,
            created_at: i.audit.created_at,
            last_updated_at: i.audit.updated_at,
        }
    }
}
