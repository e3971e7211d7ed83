//! Field filters.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Timelike};

use crate::query::{QueryBuilder, QueryFragment};

/// Accumulates field filters for a list call.
///
/// No value is validated; each is converted to text as given. Filters
/// render in the order they were added.
///
/// # Example
///
/// ```rust
/// use freshbooks_api::query::{FilterQueryBuilder, QueryBuilder};
/// use freshbooks_api::rest::Dialect;
///
/// let filters = FilterQueryBuilder::new()
///     .add_equals("userid", 1)
///     .add_between("amount", 1, 10)
///     .add_in_list("clientid", [4, 5]);
///
/// assert_eq!(
///     filters.render(Dialect::AccountingLike),
///     "&search[userid]=1&search[amount_min]=1&search[amount_max]=10\
///      &search[clientids][]=4&search[clientids][]=5"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterQueryBuilder {
    filters: Vec<QueryFragment>,
}

impl FilterQueryBuilder {
    /// Creates an empty filter builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters on `field == value`.
    #[must_use]
    pub fn add_equals(mut self, field: impl Into<String>, value: impl fmt::Display) -> Self {
        self.filters.push(QueryFragment::Equals {
            field: field.into(),
            value: value.to_string(),
        });
        self
    }

    /// Filters on `min <= field <= max`, sent as `field_min` and `field_max`.
    #[must_use]
    pub fn add_between(
        mut self,
        field: impl Into<String>,
        min: impl fmt::Display,
        max: impl fmt::Display,
    ) -> Self {
        self.filters.push(QueryFragment::Between {
            field: field.into(),
            min: min.to_string(),
            max: max.to_string(),
        });
        self
    }

    /// Adds a single range bound. The field name is sent verbatim, so it
    /// must carry its own suffix (`amount_min`, `updated_since`, ...).
    #[must_use]
    pub fn add_between_value(mut self, field: impl Into<String>, value: impl fmt::Display) -> Self {
        self.filters.push(QueryFragment::Bound {
            field: field.into(),
            value: value.to_string(),
        });
        self
    }

    /// Filters on a boolean flag, sent as `true` or `false`.
    #[must_use]
    pub fn add_boolean(mut self, field: impl Into<String>, value: bool) -> Self {
        self.filters.push(QueryFragment::Boolean {
            field: field.into(),
            value,
        });
        self
    }

    /// Filters on a date, sent as `YYYY-MM-DD`.
    #[must_use]
    pub fn add_date(mut self, field: impl Into<String>, value: NaiveDate) -> Self {
        self.filters.push(QueryFragment::Date {
            field: field.into(),
            value: value.format("%Y-%m-%d").to_string(),
        });
        self
    }

    /// Filters on a date-time, sent as the local date-time of `value`
    /// (`YYYY-MM-DDTHH:MM:SS`). Fractional seconds are only sent when
    /// non-zero, without trailing zeros (`13:14:07.5`).
    #[must_use]
    pub fn add_date_time<Tz: TimeZone>(
        mut self,
        field: impl Into<String>,
        value: &DateTime<Tz>,
    ) -> Self {
        self.filters.push(QueryFragment::DateTime {
            field: field.into(),
            value: iso_local_date_time(&value.naive_local()),
        });
        self
    }

    /// Filters on a substring match.
    #[must_use]
    pub fn add_like(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(QueryFragment::Like {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Filters on membership in a list of ids.
    ///
    /// An `s` is appended to `field` unless it already ends in one, so
    /// `clientid` and `clientids` are equivalent.
    #[must_use]
    pub fn add_in_list(
        mut self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = i64>,
    ) -> Self {
        let mut field = field.into();
        if !field.ends_with('s') {
            field.push('s');
        }
        self.filters.push(QueryFragment::InList {
            field,
            values: values.into_iter().collect(),
        });
        self
    }

    /// Returns `true` if no filters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

fn iso_local_date_time(value: &NaiveDateTime) -> String {
    let seconds = value.format("%Y-%m-%dT%H:%M:%S").to_string();
    // Leap seconds carry nanoseconds past 999_999_999
    let nanos = value.nanosecond() % 1_000_000_000;
    if nanos == 0 {
        return seconds;
    }
    let fraction = format!("{nanos:09}");
    format!("{seconds}.{}", fraction.trim_end_matches('0'))
}

impl QueryBuilder for FilterQueryBuilder {
    fn fragments(&self) -> Vec<QueryFragment> {
        self.filters.clone()
    }
}

impl fmt::Display for FilterQueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.filters.iter().map(ToString::to_string).collect();
        write!(f, "FilterQueryBuilder{{{}}}", parts.join(","))
    }
}
