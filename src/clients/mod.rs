//! HTTP client types for FreshBooks API communication.
//!
//! This module provides the transport layer underneath the resource
//! endpoints:
//!
//! - [`Transport`]: the trait endpoints send requests through
//! - [`HttpClient`]: the `reqwest`-backed [`Transport`]
//! - [`FreshBooksClient`]: the top-level entry point handing out endpoints
//! - [`HttpResponse`]: a raw response, before envelope parsing
//! - [`HttpMethod`]: supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`TransportError`]: network and body-decoding failures
//!
//! # Example
//!
//! ```rust,ignore
//! use freshbooks_api::{AccessToken, ClientId, FreshBooksClient, FreshBooksConfig};
//!
//! let config = FreshBooksConfig::builder()
//!     .client_id(ClientId::new("my-client-id")?)
//!     .access_token(AccessToken::new("my-token")?)
//!     .build()?;
//! let client = FreshBooksClient::new(config)?;
//!
//! let me = client.current_user().await?;
//! let clients = client.clients().list("ABC123", &[]).await?;
//! ```
//!
//! # Retry Behavior
//!
//! [`HttpClient`] retries transient failures up to `max_tries` attempts:
//!
//! - **429 (Rate Limited)**: waits for `Retry-After`, or 1 second if not present
//! - **500 (Server Error)**: waits a fixed 1 second
//! - **Other statuses**: returned immediately
//!
//! The default `max_tries` is 1, meaning no automatic retries.

mod api_client;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use api_client::FreshBooksClient;
pub use errors::TransportError;
pub use http_client::{HttpClient, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::HttpMethod;
pub use http_response::HttpResponse;
pub use transport::Transport;
