//! Query-string fragments and their per-dialect rendering.

use std::fmt;

use crate::rest::Dialect;

/// One atomic query-string constraint.
///
/// A fragment carries no knowledge of how it is written on the wire until
/// [`render`](Self::render) is given a [`Dialect`]. The whole
/// dialect-by-fragment matrix lives in that one `match`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryFragment {
    /// `field == value`.
    Equals {
        /// Field name.
        field: String,
        /// Value, already rendered as text.
        value: String,
    },
    /// A two-sided range, rendered as `field_min` and `field_max`.
    Between {
        /// Field name without suffix.
        field: String,
        /// Lower bound.
        min: String,
        /// Upper bound.
        max: String,
    },
    /// A single range bound whose field name already carries its suffix
    /// (e.g. `amount_min`, `updated_since`).
    Bound {
        /// Field name, used verbatim.
        field: String,
        /// Bound value.
        value: String,
    },
    /// A boolean flag.
    Boolean {
        /// Field name.
        field: String,
        /// Flag value.
        value: bool,
    },
    /// A date, formatted `YYYY-MM-DD`.
    Date {
        /// Field name.
        field: String,
        /// Formatted date.
        value: String,
    },
    /// A date-time, formatted as an ISO local date-time.
    DateTime {
        /// Field name.
        field: String,
        /// Formatted date-time.
        value: String,
    },
    /// A substring search.
    Like {
        /// Field name.
        field: String,
        /// Substring to match.
        value: String,
    },
    /// Membership in a list of ids. The field is already pluralized.
    InList {
        /// Plural field name.
        field: String,
        /// Ids, in insertion order.
        values: Vec<i64>,
    },
    /// Sort order on a single field.
    Sort {
        /// Field name.
        field: String,
        /// `true` for ascending, `false` for descending.
        ascending: bool,
    },
    /// An optional sub-resource or flag to include in the response.
    Include {
        /// The include key.
        key: String,
    },
    /// Page selection. `None` or zero values are omitted.
    Pagination {
        /// Page number.
        page: Option<u32>,
        /// Page size.
        per_page: Option<u32>,
    },
}

impl QueryFragment {
    /// Renders this fragment for `dialect`, always starting with `&`.
    ///
    /// Renders to an empty string when there is nothing to say (an empty
    /// id list, or pagination with neither value set).
    ///
    /// # Example
    ///
    /// ```rust
    /// use freshbooks_api::query::QueryFragment;
    /// use freshbooks_api::rest::Dialect;
    ///
    /// let sort = QueryFragment::Sort { field: "due_date".to_string(), ascending: false };
    /// assert_eq!(sort.render(Dialect::AccountingLike), "&sort=due_date_desc");
    /// assert_eq!(sort.render(Dialect::ProjectLike), "&sort=-due_date");
    /// ```
    #[must_use]
    pub fn render(&self, dialect: Dialect) -> String {
        let accounting = dialect == Dialect::AccountingLike;
        match self {
            Self::Equals { field, value } if accounting => format!("&search[{field}]={value}"),
            Self::Equals { field, value } => format!("&{field}={value}"),
            Self::Between { field, min, max } => {
                format!("&search[{field}_min]={min}&search[{field}_max]={max}")
            }
            Self::Bound { field, value } | Self::Like { field, value } => {
                format!("&search[{field}]={value}")
            }
            Self::Boolean { field, value } => format!("&{field}={value}"),
            Self::Date { field, value } | Self::DateTime { field, value } => {
                format!("&{field}={value}")
            }
            Self::InList { field, values } => values
                .iter()
                .map(|value| format!("&search[{field}][]={value}"))
                .collect(),
            Self::Sort { field, ascending } if accounting => {
                let suffix = if *ascending { "asc" } else { "desc" };
                format!("&sort={field}_{suffix}")
            }
            Self::Sort { field, ascending } => {
                let prefix = if *ascending { "" } else { "-" };
                format!("&sort={prefix}{field}")
            }
            Self::Include { key } if accounting => format!("&include[]={key}"),
            Self::Include { key } => format!("&{key}=true"),
            Self::Pagination { page, per_page } => {
                let mut rendered = String::new();
                if let Some(page) = page.filter(|p| *p > 0) {
                    rendered.push_str(&format!("&page={page}"));
                }
                if let Some(per_page) = per_page.filter(|p| *p > 0) {
                    rendered.push_str(&format!("&per_page={per_page}"));
                }
                rendered
            }
        }
    }
}

impl fmt::Display for QueryFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals { field, value }
            | Self::Bound { field, value }
            | Self::Date { field, value }
            | Self::DateTime { field, value }
            | Self::Like { field, value } => write!(f, "({field}={value})"),
            Self::Between { field, min, max } => {
                write!(f, "({field}_min={min}),({field}_max={max})")
            }
            Self::Boolean { field, value } => write!(f, "({field}={value})"),
            Self::InList { field, values } => {
                let joined: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "({field}=[{}])", joined.join(","))
            }
            Self::Sort { field, ascending } => {
                let order = if *ascending { "ascending" } else { "descending" };
                write!(f, "sort={field};{order}")
            }
            Self::Include { key } => f.write_str(key),
            Self::Pagination { page, per_page } => write!(
                f,
                "page={}, per_page={}",
                page.unwrap_or_default(),
                per_page.unwrap_or_default()
            ),
        }
    }
}
