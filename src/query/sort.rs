//! Sort order.

use std::fmt;

use crate::query::{QueryBuilder, QueryFragment};

/// Orders a list call by a single field.
///
/// Each call to [`ascending`](Self::ascending) or
/// [`descending`](Self::descending) replaces the previous sort key.
///
/// # Example
///
/// ```rust
/// use freshbooks_api::query::{QueryBuilder, SortQueryBuilder};
/// use freshbooks_api::rest::Dialect;
///
/// let sort = SortQueryBuilder::new().descending("due_date");
/// assert_eq!(sort.render(Dialect::AccountingLike), "&sort=due_date_desc");
/// assert_eq!(sort.render(Dialect::ProjectLike), "&sort=-due_date");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortQueryBuilder {
    sort: Option<(String, bool)>,
}

impl SortQueryBuilder {
    /// Creates a builder with no sort key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorts ascending on `field`.
    #[must_use]
    pub fn ascending(mut self, field: impl Into<String>) -> Self {
        self.sort = Some((field.into(), true));
        self
    }

    /// Sorts descending on `field`.
    #[must_use]
    pub fn descending(mut self, field: impl Into<String>) -> Self {
        self.sort = Some((field.into(), false));
        self
    }
}

impl QueryBuilder for SortQueryBuilder {
    fn fragments(&self) -> Vec<QueryFragment> {
        self.sort
            .iter()
            .map(|(field, ascending)| QueryFragment::Sort {
                field: field.clone(),
                ascending: *ascending,
            })
            .collect()
    }
}

impl fmt::Display for SortQueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sort {
            Some((field, true)) => write!(f, "SortQueryBuilder{{sort={field};ascending}}"),
            Some((field, false)) => write!(f, "SortQueryBuilder{{sort={field};descending}}"),
            None => f.write_str("SortQueryBuilder{}"),
        }
    }
}
