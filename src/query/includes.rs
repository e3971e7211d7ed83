//! Optional sub-resources.

use std::fmt;

use crate::query::{QueryBuilder, QueryFragment};

/// Requests optional sub-resources or flags on a get or list call.
///
/// Keys are sent in order; duplicates are kept.
///
/// # Example
///
/// ```rust
/// use freshbooks_api::query::{IncludesQueryBuilder, QueryBuilder};
/// use freshbooks_api::rest::Dialect;
///
/// let includes = IncludesQueryBuilder::new().include("lines");
/// assert_eq!(includes.render(Dialect::AccountingLike), "&include[]=lines");
/// assert_eq!(includes.render(Dialect::ProjectLike), "&lines=true");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IncludesQueryBuilder {
    includes: Vec<String>,
}

impl IncludesQueryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an include key.
    #[must_use]
    pub fn include(mut self, key: impl Into<String>) -> Self {
        self.includes.push(key.into());
        self
    }
}

impl QueryBuilder for IncludesQueryBuilder {
    fn fragments(&self) -> Vec<QueryFragment> {
        self.includes
            .iter()
            .map(|key| QueryFragment::Include { key: key.clone() })
            .collect()
    }
}

impl fmt::Display for IncludesQueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IncludesQueryBuilder{{includes={:?}}}", self.includes)
    }
}
