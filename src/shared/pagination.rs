//! Page windowing for list endpoints.
//!
//! A listing is evaluated in two independent passes over the same filter: a
//! `COUNT` for the total and a windowed fetch for the items. The passes are
//! not wrapped in a snapshot, so a write landing between them can make
//! `total_records` and `items` disagree (read skew). Callers get whatever
//! each pass observed.

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

pub fn default_page_number() -> i64 {
    1
}

pub fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Requested page, already normalized.
///
/// `page_size` is clamped to `1..=MAX_PAGE_SIZE` and `page_number` to
/// `1..=MAX_PAGE_NUMBER`, so the offset can neither go negative nor
/// overflow, and the page count never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: i64,
    page_size: i64,
}

/// Largest page number whose offset still fits in an `i64`
pub const MAX_PAGE_NUMBER: i64 = i64::MAX / MAX_PAGE_SIZE;

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number: page_number.clamp(1, MAX_PAGE_NUMBER),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Calculate SQL OFFSET from page number
    pub fn offset(&self) -> i64 {
        (self.page_number - 1) * self.page_size
    }

    pub fn window(&self) -> Window {
        Window {
            offset: self.offset(),
            limit: self.page_size,
        }
    }
}

/// OFFSET/LIMIT pair handed to the storage backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: i64,
    pub limit: i64,
}

/// One page of a filtered listing
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub page_number: i64,
    pub page_size: i64,
    /// Matching records before the window was applied
    pub total_records: i64,
}

impl<T> Paged<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_records: i64) -> Self {
        Self {
            items,
            page_number: request.page_number(),
            page_size: request.page_size(),
            total_records,
        }
    }

    pub fn total_pages(&self) -> i64 {
        if self.page_size <= 0 {
            return 0;
        }
        (self.total_records + self.page_size - 1) / self.page_size
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_records: self.total_records,
        }
    }
}
