//! Query-string construction for list and get calls.
//!
//! A query is built from independent builders, each producing a list of
//! [`QueryFragment`]s:
//!
//! - [`PaginationQueryBuilder`]: `page` and `per_page`
//! - [`FilterQueryBuilder`]: equality, range, boolean, date, search and list filters
//! - [`SortQueryBuilder`]: a single sort key
//! - [`IncludesQueryBuilder`]: optional sub-resources
//!
//! The wire syntax depends on the [`Dialect`] of the target resource.
//! [`build_query_string`] joins the rendered builders into the final
//! `?...` suffix.
//!
//! # Example
//!
//! ```rust
//! use freshbooks_api::query::{
//!     build_query_string, FilterQueryBuilder, PaginationQueryBuilder, SortQueryBuilder,
//! };
//! use freshbooks_api::rest::Dialect;
//!
//! let pagination = PaginationQueryBuilder::new(2, 3);
//! let filters = FilterQueryBuilder::new().add_equals("userid", 1);
//! let sort = SortQueryBuilder::new().descending("updated");
//!
//! assert_eq!(
//!     build_query_string(&[&pagination, &filters, &sort], Dialect::AccountingLike),
//!     "?page=2&per_page=3&search[userid]=1&sort=updated_desc"
//! );
//! assert_eq!(build_query_string(&[], Dialect::AccountingLike), "");
//! ```

mod filter;
mod fragment;
mod includes;
mod pagination;
mod sort;

pub use filter::FilterQueryBuilder;
pub use fragment::QueryFragment;
pub use includes::IncludesQueryBuilder;
pub use pagination::{PaginationQueryBuilder, MAX_PER_PAGE, MIN_PAGE};
pub use sort::SortQueryBuilder;

use std::fmt;

use crate::rest::Dialect;

/// A source of query fragments.
///
/// Implementors only supply [`fragments`](Self::fragments); rendering is
/// shared. The `Display` form is a short summary used in trace logging.
pub trait QueryBuilder: fmt::Display {
    /// Returns this builder's fragments in insertion order.
    fn fragments(&self) -> Vec<QueryFragment>;

    /// Renders every fragment for `dialect`, each starting with `&`.
    fn render(&self, dialect: Dialect) -> String {
        self.fragments()
            .iter()
            .map(|fragment| fragment.render(dialect))
            .collect()
    }
}

/// Joins builders into a query string.
///
/// Returns an empty string when nothing renders; otherwise `?` followed by
/// the rendered fragments with the first `&` removed.
#[must_use]
pub fn build_query_string(builders: &[&dyn QueryBuilder], dialect: Dialect) -> String {
    let rendered: String = builders
        .iter()
        .map(|builder| builder.render(dialect))
        .collect();

    if rendered.is_empty() {
        return String::new();
    }
    let rendered = rendered.strip_prefix('&').unwrap_or(&rendered);
    format!("?{rendered}")
}

/// Joins the `Display` forms of `builders` for logging.
pub(crate) fn describe_builders(builders: &[&dyn QueryBuilder]) -> String {
    builders
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
