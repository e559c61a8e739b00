use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::products::models::Product;
use crate::shared::pagination::{default_page_number, default_page_size, PageRequest};
use crate::shared::query::{QueryFilter, TextMatch};
use crate::shared::validation::{non_empty, validate_non_negative, validate_positive};

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQueryParams {
    #[serde(default = "default_page_number")]
    #[param(minimum = 1)]
    pub page_number: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    pub name: Option<String>,
    pub sku: Option<String>,
    pub category_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub created_at_from: Option<NaiveDate>,
    pub created_at_to: Option<NaiveDate>,
}

impl ProductQueryParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page_number, self.page_size)
    }

    pub fn to_filter(&self, text_match: TextMatch) -> QueryFilter {
        QueryFilter::new(text_match)
            .contains("name", self.name.as_deref())
            .contains("sku", self.sku.as_deref())
            .equals("category_id", self.category_id)
            .equals("supplier_id", self.supplier_id)
            .created_between(self.created_at_from, self.created_at_to)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductRequestDto {
    #[validate(length(min = 1, max = 100, message = "SKU must be 1-100 characters"))]
    pub sku: String,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,

    pub category_id: Option<i64>,
    pub supplier_id: Option<i64>,

    #[schema(value_type = String, example = "12.50")]
    #[validate(custom(function = "validate_non_negative"))]
    pub cost_price: Decimal,

    #[schema(value_type = String, example = "19.99")]
    #[validate(custom(function = "validate_positive"))]
    pub sale_price: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PatchProductDto {
    #[validate(length(max = 100, message = "SKU must not exceed 100 characters"))]
    pub sku: Option<String>,

    #[validate(length(max = 255, message = "Name must not exceed 255 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,

    pub category_id: Option<i64>,
    pub supplier_id: Option<i64>,

    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "validate_non_negative"))]
    pub cost_price: Option<Decimal>,

    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "validate_positive"))]
    pub sale_price: Option<Decimal>,
}

impl PatchProductDto {
    pub fn normalized(self) -> Self {
        Self {
            sku: non_empty(self.sku),
            name: non_empty(self.name),
            description: non_empty(self.description),
            ..self
        }
    }

    pub fn apply(self, product: &mut Product) {
        if let Some(sku) = self.sku {
            product.sku = sku;
        }
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = Some(description);
        }
        if let Some(category_id) = self.category_id {
            product.category_id = Some(category_id);
        }
        if let Some(supplier_id) = self.supplier_id {
            product.supplier_id = Some(supplier_id);
        }
        if let Some(cost_price) = self.cost_price {
            product.cost_price = cost_price;
        }
        if let Some(sale_price) = self.sale_price {
            product.sale_price = sale_price;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub supplier_id: Option<i64>,
    #[schema(value_type = String)]
    pub cost_price: Decimal,
    #[schema(value_type = String)]
    pub sale_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            sku: p.sku,
            name: p.name,
            description: p.description,
            category_id: p.category_id,
            supplier_id: p.supplier_id,
            cost_price: p.cost_price,
            sale_price: p.sale_price,
            created_at: p.audit.created_at,
            updated_at: p.audit.updated_at,
        }
    }
}
