use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::product_attributes::models::ProductAttribute;
use crate::shared::pagination::{default_page_number, default_page_size, PageRequest};
use crate::shared::query::{QueryFilter, TextMatch};
use crate::shared::validation::non_empty;

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductAttributeQueryParams {
    #[serde(default = "default_page_number")]
    #[param(minimum = 1)]
    pub page_number: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    pub product_id: Option<i64>,
    /// Substring of the attribute name
    pub name: Option<String>,
    pub value: Option<String>,
    pub created_at_from: Option<NaiveDate>,
    pub created_at_to: Option<NaiveDate>,
}

impl ProductAttributeQueryParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page_number, self.page_size)
    }

    pub fn to_filter(&self, text_match: TextMatch) -> QueryFilter {
        QueryFilter::new(text_match)
            .equals("product_id", self.product_id)
            .contains("name", self.name.as_deref())
            .contains("value", self.value.as_deref())
            .created_between(self.created_at_from, self.created_at_to)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductAttributeRequestDto {
    pub product_id: i64,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Value must be 1-255 characters"))]
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PatchProductAttributeDto {
    pub product_id: Option<i64>,

    #[validate(length(max = 100, message = "Name must not exceed 100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 255, message = "Value must not exceed 255 characters"))]
    pub value: Option<String>,
}

impl PatchProductAttributeDto {
    pub fn normalized(self) -> Self {
        Self {
            name: non_empty(self.name),
            value: non_empty(self.value),
            ..self
        }
    }

    pub fn apply(self, attribute: &mut ProductAttribute) {
        if let Some(product_id) = self.product_id {
            attribute.product_id = product_id;
        }
        if let Some(name) = self.name {
            attribute.name = name;
        }
        if let Some(value) = self.value {
            attribute.value = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductAttributeResponseDto {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ProductAttribute> for ProductAttributeResponseDto {
    fn from(a: ProductAttribute) -> Self {
        Self {
            id: a.id,
            product_id: a.product_id,
            name: a.name,
            value: a.value,
            created_at: a.audit.created_at,
            updated_at: a.audit.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_value_rejected() {
        let dto = ProductAttributeRequestDto {
            product_id: 1,
            name: "Colour".to_string(),
            value: String::new(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_patch_ignores_empty_strings() {
        let mut attribute = ProductAttribute {
            product_id: 1,
            name: "Colour".to_string(),
            value: "Blue".to_string(),
            ..Default::default()
        };

        PatchProductAttributeDto {
            name: Some(String::new()),
            value: Some("Red".to_string()),
            ..Default::default()
        }
        .normalized()
        .apply(&mut attribute);

        assert_eq!(attribute.name, "Colour");
        assert_eq!(attribute.value, "Red");
        assert_eq!(attribute.product_id, 1);
    }
}
