//! Page selection.

use std::fmt;

use crate::query::{QueryBuilder, QueryFragment};

/// The largest page size the API accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// The first page number.
pub const MIN_PAGE: u32 = 1;

/// Selects a page of a list call.
///
/// `page` is clamped up to [`MIN_PAGE`] and `per_page` down to
/// [`MAX_PER_PAGE`]. Unset values are left out of the query so the API's
/// own defaults apply.
///
/// # Example
///
/// ```rust
/// use freshbooks_api::query::{PaginationQueryBuilder, QueryBuilder};
/// use freshbooks_api::rest::Dialect;
///
/// let pagination = PaginationQueryBuilder::new(0, 200);
/// assert_eq!(pagination.render(Dialect::AccountingLike), "&page=1&per_page=100");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaginationQueryBuilder {
    page: Option<u32>,
    per_page: Option<u32>,
}

impl PaginationQueryBuilder {
    /// Creates a builder with both values set (and clamped).
    #[must_use]
    pub const fn new(page: u32, per_page: u32) -> Self {
        Self::empty().page(page).per_page(per_page)
    }

    /// Creates a builder with neither value set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            page: None,
            per_page: None,
        }
    }

    /// Sets the page number, clamped to at least 1.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(if page < MIN_PAGE { MIN_PAGE } else { page });
        self
    }

    /// Sets the page size, clamped to at most 100. A page size of zero is
    /// not sent.
    #[must_use]
    pub const fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(if per_page > MAX_PER_PAGE {
            MAX_PER_PAGE
        } else {
            per_page
        });
        self
    }

    /// Returns the page number, if set.
    #[must_use]
    pub const fn page_number(&self) -> Option<u32> {
        self.page
    }

    /// Returns the page size, if set.
    #[must_use]
    pub const fn page_size(&self) -> Option<u32> {
        self.per_page
    }
}

impl QueryBuilder for PaginationQueryBuilder {
    fn fragments(&self) -> Vec<QueryFragment> {
        if self.page.is_none() && self.per_page.is_none() {
            return Vec::new();
        }
        vec![QueryFragment::Pagination {
            page: self.page,
            per_page: self.per_page,
        }]
    }
}

impl fmt::Display for PaginationQueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PaginationQueryBuilder{{page={}, per_page={}}}",
            self.page.unwrap_or_default(),
            self.per_page.unwrap_or_default()
        )
    }
}
