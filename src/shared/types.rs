use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::pagination::Paged;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

/// Pagination metadata attached to list responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub page_number: i64,
    pub page_size: i64,
    pub total_records: i64,
    pub total_pages: i64,
}

impl<T> From<&Paged<T>> for Meta {
    fn from(page: &Paged<T>) -> Self {
        Self {
            page_number: page.page_number,
            page_size: page.page_size,
            total_records: page.total_records,
            total_pages: page.total_pages(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    /// Wrap one page of results, moving the page items into `data`
    pub fn paged(page: Paged<T>) -> ApiResponse<Vec<T>> {
        let meta = Meta::from(&page);
        ApiResponse::success(Some(page.items), None, Some(meta))
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}
