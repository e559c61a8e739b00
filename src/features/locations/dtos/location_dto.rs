use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::locations::models::Location;
use crate::shared::pagination::{default_page_number, default_page_size, PageRequest};
use crate::shared::query::{QueryFilter, TextMatch};
use crate::shared::validation::non_empty;

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LocationQueryParams {
    #[serde(default = "default_page_number")]
    #[param(minimum = 1)]
    pub page_number: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    pub name: Option<String>,
    pub address: Option<String>,
    pub created_at_from: Option<NaiveDate>,
    pub created_at_to: Option<NaiveDate>,
}

impl LocationQueryParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page_number, self.page_size)
    }

    pub fn to_filter(&self, text_match: TextMatch) -> QueryFilter {
        QueryFilter::new(text_match)
            .contains("name", self.name.as_deref())
            .contains("address", self.address.as_deref())
            .created_between(self.created_at_from, self.created_at_to)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LocationRequestDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 150, message = "Address must not exceed 150 characters"))]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PatchLocationDto {
    #[validate(length(max = 255, message = "Name must not exceed 255 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 150, message = "Address must not exceed 150 characters"))]
    pub address: Option<String>,
}

impl PatchLocationDto {
    pub fn normalized(self) -> Self {
        Self {
            name: non_empty(self.name),
            address: non_empty(self.address),
        }
    }

    pub fn apply(self, location: &mut Location) {
        if let Some(name) = self.name {
            location.name = name;
        }
        if let Some(address) = self.address {
            location.address = Some(address);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationResponseDto {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Location> for LocationResponseDto {
    fn from(l: Location) -> Self {
        Self {
            id: l.id,
            name: l.name,
            address: l.address,
            created_at: l.audit.created_at,
            updated_at: l.audit.updated_at,
        }
    }
}
