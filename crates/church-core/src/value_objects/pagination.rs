//! Offset pagination

use crate::error::DomainError;

/// A validated page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Create a page request; both values must be at least 1
    pub fn new(page: u32, page_size: u32) -> Result<Self, DomainError> {
        if page < 1 {
            return Err(DomainError::ValidationError(
                "page must be greater than or equal to 1".to_string(),
            ));
        }
        if page_size < 1 {
            return Err(DomainError::ValidationError(
                "pageSize must be greater than or equal to 1".to_string(),
            ));
        }
        Ok(Self { page, page_size })
    }

    #[inline]
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[inline]
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of rows to skip
    #[must_use]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }

    /// Row limit for the query
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

/// One page of results together with the unpaged total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page(),
            page_size: request.page_size(),
        }
    }

    /// `ceil(total / page_size)`, or 0 for an empty result
    #[must_use]
    pub fn total_pages(&self) -> i64 {
        if self.total <= 0 {
            return 0;
        }
        let size = i64::from(self.page_size.max(1));
        (self.total + size - 1) / size
    }

    /// Transform every item, keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
