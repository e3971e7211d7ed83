//! Resource request/response infrastructure for the FreshBooks API.
//!
//! - **[`Dialect`] / [`UrlTemplate`]**: how each API family shapes URLs, queries and envelopes
//! - **[`ResourceEndpoint`]**: get, list, create, update and delete for any resource
//! - **[`ResourceDescriptor`]**: const description of a resource ([`resources`] holds them all)
//! - **[`SubResourceEndpoint`]**: resources nested under a parent, such as service rates
//! - **[`envelope::parse`]**: unwraps a raw response or produces a normalized error
//! - **[`FreshBooksError`]**: the one error type every failed call returns
//! - **[`ListResult`] / [`Pages`]**: a page of items with its paging information
//!
//! # Example
//!
//! ```rust,ignore
//! use freshbooks_api::rest::{resources, ResourceEndpoint};
//! use freshbooks_api::query::IncludesQueryBuilder;
//! use serde_json::json;
//!
//! let invoices = ResourceEndpoint::new(&http_client, &resources::INVOICES);
//!
//! let includes = IncludesQueryBuilder::new().include("lines");
//! let invoice = invoices.get("ABC123", 9876, Some(&includes)).await?;
//!
//! let data = json!({"notes": "Thanks!"}).as_object().unwrap().clone();
//! let updated = invoices.update("ABC123", 9876, data).await?;
//!
//! invoices.delete("ABC123", 9876).await?;
//! ```

mod dialect;
mod endpoint;
pub mod envelope;
mod errors;
pub mod resources;
mod response;
mod sub_resource;

pub use dialect::{Dialect, Topic, UrlTemplate};
pub use endpoint::{execute, DeleteStyle, PathTarget, ResourceDescriptor, ResourceEndpoint};
pub(crate) use endpoint::{exchange, take_object};
pub use sub_resource::{SubResourceDescriptor, SubResourceEndpoint};
pub use envelope::Payload;
pub use errors::{ErrorKind, FreshBooksError, NOT_FOUND_MESSAGE, UNEXPECTED_RESPONSE_MESSAGE};
pub use resources::AccountingReports;
pub use response::{ListResult, Pages};
