//! # FreshBooks API Rust SDK
//!
//! A Rust SDK for the FreshBooks API, providing type-safe configuration,
//! dialect-aware query building, and a single normalized error model across
//! the accounting, project and auth API families.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`FreshBooksConfig`] and [`FreshBooksConfigBuilder`]
//! - Validated newtypes for credentials and hosts
//! - Chainable query builders for pagination, filters, sorting and includes
//! - One [`ResourceEndpoint`] for get, list, create, update and delete on every resource
//! - Envelope unwrapping that turns every failure into a [`FreshBooksError`]
//! - An async HTTP client with retry handling for 429 and 500 responses
//! - OAuth authorization URL construction
//!
//! ## Quick Start
//!
//! ```rust
//! use freshbooks_api::{AccessToken, ClientId, FreshBooksClient, FreshBooksConfig};
//!
//! let config = FreshBooksConfig::builder()
//!     .client_id(ClientId::new("your-client-id").unwrap())
//!     .access_token(AccessToken::new("your-access-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = FreshBooksClient::new(config).unwrap();
//! ```
//!
//! ## Listing Resources
//!
//! ```rust,ignore
//! use freshbooks_api::query::{FilterQueryBuilder, PaginationQueryBuilder, SortQueryBuilder};
//!
//! let pagination = PaginationQueryBuilder::new(1, 50);
//! let filters = FilterQueryBuilder::new()
//!     .add_like("email_like", "@freshbooks.com")
//!     .add_in_list("userid", [12, 13]);
//! let sort = SortQueryBuilder::new().descending("updated");
//!
//! // GET /accounting/account/ABC123/users/clients?page=1&per_page=50&search[email_like]=...
//! let clients = client
//!     .clients()
//!     .list("ABC123", &[&pagination, &filters, &sort])
//!     .await?;
//!
//! for row in clients.iter() {
//!     println!("{}", row["organization"]);
//! }
//! println!("page {} of {}", clients.pages.page, clients.pages.pages);
//! ```
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use freshbooks_api::ErrorKind;
//!
//! match client.projects().get(439000, 654321, None).await {
//!     Ok(project) => println!("{}", project["title"]),
//!     Err(e) if e.kind() == ErrorKind::ApiError => {
//!         eprintln!("{} (status {}, errno {})", e.message(), e.status_code(), e.errno());
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! ## Custom Transports
//!
//! Every endpoint is generic over [`clients::Transport`], so requests can be
//! routed through something other than [`HttpClient`]:
//!
//! ```rust,ignore
//! use freshbooks_api::rest::{resources, ResourceEndpoint};
//!
//! let clients = ResourceEndpoint::new(&my_transport, &resources::CLIENTS);
//! let client = clients.get("ABC123", 12345, None).await?;
//! ```

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod query;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, BaseUrl, ClientId, ClientSecret, FreshBooksConfig, FreshBooksConfigBuilder,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    FreshBooksClient, HttpClient, HttpMethod, HttpResponse, Transport, TransportError,
};

// Re-export resource types
pub use rest::{
    Dialect, ErrorKind, FreshBooksError, ListResult, Pages, Payload, ResourceDescriptor,
    ResourceEndpoint, SubResourceEndpoint,
};
