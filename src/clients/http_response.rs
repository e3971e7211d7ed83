//! The raw response handed from a transport to the envelope parser.

use std::collections::HashMap;

use serde_json::Value;

/// An HTTP response from the FreshBooks API, before envelope parsing.
///
/// `body` is `None` when the server sent an empty body (for example a
/// `204 No Content` reply to a delete).
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The HTTP reason phrase (e.g. "Not Found").
    pub status_message: String,
    /// Response headers, lower-cased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed JSON body, if the response had one.
    pub body: Option<Value>,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the `Retry-After` header.
    #[must_use]
    pub fn new(
        code: u16,
        status_message: impl Into<String>,
        headers: HashMap<String, Vec<String>>,
        body: Option<Value>,
    ) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<f64>().ok());

        Self {
            code,
            status_message: status_message.into(),
            headers,
            body,
            retry_request_after,
        }
    }

    /// Creates a response with no headers. Handy for tests and stub transports.
    #[must_use]
    pub fn from_parts(code: u16, body: Option<Value>) -> Self {
        Self::new(code, reason_phrase(code), HashMap::new(), body)
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }
}

fn reason_phrase(code: u16) -> &'static str {
    reqwest::StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or_default()
}
