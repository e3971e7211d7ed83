//! List results and their paging information.
//!
//! [`ListResult`] implements `Deref<Target = [Payload]>`, so it can be used
//! like the slice of items directly:
//!
//! ```rust,ignore
//! let clients = client.clients().list("ABC123", &[&pagination]).await?;
//!
//! for row in clients.iter() {
//!     println!("{}", row["organization"]);
//! }
//!
//! if clients.pages.has_next_page() {
//!     // fetch page clients.pages.page + 1 ...
//! }
//! ```

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::Payload;

/// Paging information returned alongside a list.
///
/// Missing fields read as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pages {
    /// The current page number.
    pub page: u32,
    /// The total number of pages.
    pub pages: u32,
    /// The number of items per page.
    pub per_page: u32,
    /// The total number of items across all pages.
    pub total: u32,
}

impl Pages {
    /// Reads `page`, `pages`, `per_page` and `total` from `object`, ignoring
    /// every other key.
    ///
    /// Each field is read on its own: numbers and numeric strings are
    /// accepted, anything else reads as 0 without affecting its siblings.
    #[must_use]
    pub fn from_object(object: &Payload) -> Self {
        Self {
            page: page_field(object, "page"),
            pages: page_field(object, "pages"),
            per_page: page_field(object, "per_page"),
            total: page_field(object, "total"),
        }
    }

    /// Returns `true` if there is a page after the current one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.page < self.pages
    }

    /// Returns `true` if there is a page before the current one.
    #[must_use]
    pub const fn has_prev_page(&self) -> bool {
        self.page > 1
    }
}

fn page_field(object: &Payload, key: &str) -> u32 {
    match object.get(key) {
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or_default(),
        Some(Value::String(text)) => text.trim().parse().unwrap_or_default(),
        _ => 0,
    }
}

/// One page of a list call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListResult {
    /// The items on this page, in API order.
    pub items: Vec<Payload>,
    /// Paging information.
    pub pages: Pages,
}

impl ListResult {
    /// Consumes the result, returning the items.
    #[must_use]
    pub fn into_items(self) -> Vec<Payload> {
        self.items
    }
}

impl Deref for ListResult {
    type Target = [Payload];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl IntoIterator for ListResult {
    type Item = Payload;
    type IntoIter = std::vec::IntoIter<Payload>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
