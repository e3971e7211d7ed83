//! Endpoint dialects and their URL templates.
//!
//! FreshBooks serves three API families that differ in URL shape, query
//! syntax and response envelope:
//!
//! | Template | URL prefix | Dialect |
//! |---|---|---|
//! | [`UrlTemplate::Accounting`] | `/accounting/account/{account_id}` | [`Dialect::AccountingLike`] |
//! | [`UrlTemplate::Project`] | `/{topic}/business/{business_id}` | [`Dialect::ProjectLike`] |
//! | [`UrlTemplate::Auth`] | `/auth/api/v1` | [`Dialect::Auth`] |

use std::fmt;

/// The envelope and query conventions a resource follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// `/accounting/...` resources: `{response: {result | errors}}` envelopes
    /// and `search[...]` filters.
    AccountingLike,
    /// `/auth/api/v1/...`: bare payloads and `{error, error_description}`.
    Auth,
    /// Projects, comments and time tracking: top-level payloads and
    /// `{errno, error}`.
    ProjectLike,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AccountingLike => "accounting_like",
            Self::Auth => "auth",
            Self::ProjectLike => "project_like",
        })
    }
}

/// The leading path segment of a project-like URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    /// `/projects/...`
    Projects,
    /// `/comments/...` (services and their rates)
    Comments,
    /// `/timetracking/...`
    TimeTracking,
}

impl Topic {
    /// Returns the path segment for this topic.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Comments => "comments",
            Self::TimeTracking => "timetracking",
        }
    }
}

/// How a resource's URL prefix is built from its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UrlTemplate {
    /// `/accounting/account/{owner}/{path}`, owned by an account id.
    Accounting,
    /// `/{topic}/business/{owner}/{path}`, owned by a business id.
    Project(Topic),
    /// `/auth/api/v1/{path}`; the owner is ignored.
    Auth,
}

impl UrlTemplate {
    /// Returns the dialect implied by this template.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        match self {
            Self::Accounting => Dialect::AccountingLike,
            Self::Project(_) => Dialect::ProjectLike,
            Self::Auth => Dialect::Auth,
        }
    }

    /// Renders `{prefix}/{path}` for `owner`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use freshbooks_api::rest::{Topic, UrlTemplate};
    ///
    /// assert_eq!(
    ///     UrlTemplate::Accounting.base("ABC123", "users/clients"),
    ///     "/accounting/account/ABC123/users/clients"
    /// );
    /// assert_eq!(
    ///     UrlTemplate::Project(Topic::TimeTracking).base("439000", "time_entries"),
    ///     "/timetracking/business/439000/time_entries"
    /// );
    /// ```
    #[must_use]
    pub fn base(&self, owner: &str, path: &str) -> String {
        match self {
            Self::Accounting => format!("/accounting/account/{owner}/{path}"),
            Self::Project(topic) => format!("/{}/business/{owner}/{path}", topic.as_str()),
            Self::Auth => format!("/auth/api/v1/{path}"),
        }
    }
}
