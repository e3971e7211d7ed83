//! The seam between the resource layer and the wire.
//!
//! Endpoints never talk to `reqwest` directly. They hand a method, a URL and
//! an optional JSON body to a [`Transport`] and get back a raw
//! [`HttpResponse`] to run through the envelope parser. [`HttpClient`] is the
//! production implementation; tests substitute an in-memory one.
//!
//! [`HttpClient`]: crate::clients::HttpClient
//!
//! # Example
//!
//! ```rust
//! use freshbooks_api::clients::{HttpMethod, HttpResponse, Transport, TransportError};
//! use serde_json::{json, Value};
//!
//! struct Canned;
//!
//! impl Transport for Canned {
//!     async fn execute(
//!         &self,
//!         _method: HttpMethod,
//!         _url: &str,
//!         _body: Option<&Value>,
//!     ) -> Result<HttpResponse, TransportError> {
//!         Ok(HttpResponse::from_parts(200, Some(json!({"response": {"result": {}}}))))
//!     }
//! }
//! ```

use serde_json::Value;

use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpMethod;
use crate::clients::http_response::HttpResponse;

/// Executes one HTTP exchange against the FreshBooks API.
///
/// `url` is either a path beginning with `/`, resolved against the
/// transport's API host, or an absolute URL.
///
/// Implementations return `Ok` for every response that was received and
/// decoded, whatever its status code. Only connection failures and
/// non-JSON bodies are reported as [`TransportError`].
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Sends a request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no response was received or its body is
    /// not valid JSON.
    async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Result<HttpResponse, TransportError>;
}
