use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::suppliers::models::Supplier;
use crate::shared::pagination::{default_page_number, default_page_size, PageRequest};
use crate::shared::query::{QueryFilter, TextMatch};
use crate::shared::validation::{non_empty, PHONE_REGEX};

/// Query params for listing suppliers
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SupplierQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page_number")]
    #[param(minimum = 1)]
    pub page_number: i64,

    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Substring of the supplier name
    pub name: Option<String>,

    /// Substring of the email address
    pub email: Option<String>,

    /// Substring of the phone number
    pub phone: Option<String>,

    /// Created on or after this date (YYYY-MM-DD)
    pub created_at_from: Option<NaiveDate>,

    /// Created on or before this date (YYYY-MM-DD)
    pub created_at_to: Option<NaiveDate>,
}

impl SupplierQueryParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page_number, self.page_size)
    }

    pub fn to_filter(&self, text_match: TextMatch) -> QueryFilter {
        QueryFilter::new(text_match)
            .contains("name", self.name.as_deref())
            .contains("email", self.email.as_deref())
            .contains("phone", self.phone.as_deref())
            .created_between(self.created_at_from, self.created_at_to)
    }
}

/// Body for create and full replace
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SupplierRequestDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 150, message = "Contact person must not exceed 150 characters"))]
    pub contact_person: Option<String>,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 100, message = "Email must not exceed 100 characters")
    )]
    pub email: Option<String>,

    #[validate(
        length(max = 20, message = "Phone must not exceed 20 characters"),
        regex(path = *PHONE_REGEX, message = "Invalid phone format")
    )]
    pub phone: Option<String>,

    pub address: Option<String>,
}

/// Body for partial update. Absent, null and empty fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PatchSupplierDto {
    #[validate(length(max = 255, message = "Name must not exceed 255 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 150, message = "Contact person must not exceed 150 characters"))]
    pub contact_person: Option<String>,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 100, message = "Email must not exceed 100 characters")
    )]
    pub email: Option<String>,

    #[validate(
        length(max = 20, message = "Phone must not exceed 20 characters"),
        regex(path = *PHONE_REGEX, message = "Invalid phone format")
    )]
    pub phone: Option<String>,

    pub address: Option<String>,
}

impl PatchSupplierDto {
    /// Drop empty strings so they are neither validated nor applied
    pub fn normalized(self) -> Self {
        Self {
            name: non_empty(self.name),
            contact_person: non_empty(self.contact_person),
            email: non_empty(self.email),
            phone: non_empty(self.phone),
            address: non_empty(self.address),
        }
    }

    pub fn apply(self, supplier: &mut Supplier) {
        if let Some(name) = self.name {
            supplier.name = name;
        }
        if let Some(contact_person) = self.contact_person {
            supplier.contact_person = Some(contact_person);
        }
        if let Some(email) = self.email {
            supplier.email = Some(email);
        }
        if let Some(phone) = self.phone {
            supplier.phone = Some(phone);
        }
        if let Some(address) = self.address {
            supplier.address = Some(address);
        }
    }
}

/// Response DTO for supplier
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupplierResponseDto {
    pub id: i64,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Supplier> for SupplierResponseDto {
    fn from(s: Supplier) -> Self {
        Self {
            id: s.id,
            name: s.name,
            contact_person: s.contact_person,
            email: s.email,
            phone: s.phone,
            address: s.address,
            created_at: s.audit.created_at,
            updated_at: s.audit.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(phone: Option<&str>, email: Option<&str>) -> SupplierRequestDto {
        SupplierRequestDto {
            name: "Acme Tools".to_string(),
            contact_person: None,
            email: email.map(str::to_string),
            phone: phone.map(str::to_string),
            address: None,
        }
    }

    #[test]
    fn test_request_validation() {
        assert!(request(Some("+1 555 123 4567"), Some("sales@acme.test"))
            .validate()
            .is_ok());
        assert!(request(Some("call me"), None).validate().is_err());
        assert!(request(None, Some("not-an-email")).validate().is_err());
        assert!(request(Some("+1 555 123 4567 8901 2345"), None)
            .validate()
            .is_err());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut dto = request(None, None);
        dto.name = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_patch_ignores_empty_strings() {
        let mut supplier = Supplier {
            id: 1,
            name: "Acme".to_string(),
            address: Some("1 Old Road".to_string()),
            ..Default::default()
        };

        let patch = PatchSupplierDto {
            address: Some(String::new()),
            email: Some(String::new()),
            ..Default::default()
        }
        .normalized();
        assert!(patch.validate().is_ok());
        patch.apply(&mut supplier);

        assert_eq!(supplier.name, "Acme");
        assert_eq!(supplier.address.as_deref(), Some("1 Old Road"));
        assert_eq!(supplier.email, None);
    }

    #[test]
    fn test_patch_sets_present_fields_only() {
        let mut supplier = Supplier {
            id: 1,
            name: "Acme".to_string(),
            ..Default::default()
        };

        PatchSupplierDto {
            address: Some("123 Main St".to_string()),
            ..Default::default()
        }
        .normalized()
        .apply(&mut supplier);

        assert_eq!(supplier.name, "Acme");
        assert_eq!(supplier.address.as_deref(), Some("123 Main St"));
    }
}
