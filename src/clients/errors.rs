//! Transport-level error types for the FreshBooks API SDK.
//!
//! A [`TransportError`] means no usable HTTP exchange took place: the
//! connection failed, or the server answered with a body that is not JSON.
//! Non-2xx responses are *not* transport errors; they are handed to the
//! envelope parser which turns them into [`FreshBooksError`](crate::FreshBooksError)
//! values.

use thiserror::Error;

/// Error raised by a [`Transport`](crate::clients::Transport) implementation.
///
/// # Example
///
/// ```rust
/// use freshbooks_api::clients::TransportError;
///
/// let source = serde_json::from_str::<serde_json::Value>("stuff").unwrap_err();
/// let error = TransportError::MalformedBody {
///     code: 500,
///     status_message: "Internal Server Error".to_string(),
///     source,
/// };
/// assert_eq!(error.status_code(), 500);
/// ```
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the response could not be read.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server responded with a body that is not valid JSON.
    #[error("Response body with status {code} is not valid JSON: {source}")]
    MalformedBody {
        /// HTTP status code of the response.
        code: u16,
        /// HTTP reason phrase of the response.
        status_message: String,
        /// The JSON parse failure.
        source: serde_json::Error,
    },
}

impl TransportError {
    /// Returns the HTTP status code associated with this failure, or 0 when
    /// no response was received.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Network(e) => e.status().map_or(0, |s| s.as_u16()),
            Self::MalformedBody { code, .. } => *code,
        }
    }
}
