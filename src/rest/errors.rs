//! The normalized error model for FreshBooks API calls.
//!
//! Every failed call produces exactly one [`FreshBooksError`], whichever
//! dialect the endpoint speaks:
//!
//! - [`FreshBooksError::Api`]: the API reported a problem in its own error
//!   envelope
//! - [`FreshBooksError::UnexpectedResponse`]: an HTTP exchange took place but
//!   the body matched no expected envelope
//! - [`FreshBooksError::Transport`]: the transport itself failed
//!
//! # Example
//!
//! ```rust,ignore
//! use freshbooks_api::{ErrorKind, FreshBooksError};
//!
//! match client.clients().get("ABC123", 12345, None).await {
//!     Ok(client) => println!("{client:?}"),
//!     Err(e) if e.kind() == ErrorKind::ApiError => {
//!         println!("{} ({}): {:?}", e.message(), e.status_code(), e.validation_error());
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{HttpResponse, TransportError};

/// Message used for every failure that is not an API-reported error.
pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "Returned an unexpected response";

/// Message for a project-like 404 whose body could not be read.
pub const NOT_FOUND_MESSAGE: &str = "Requested resource could not be found.";

/// The category of a [`FreshBooksError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The API explicitly reported the failure.
    ApiError,
    /// The response did not conform to any expected envelope.
    UnexpectedResponse,
    /// The transport failed before a usable response was received.
    TransportError,
}

/// A failed FreshBooks API call.
#[derive(Debug, Error)]
pub enum FreshBooksError {
    /// The API reported an error in its error envelope.
    ///
    /// Accounting-like endpoints fill in `errno`, `field`, `object` and
    /// `value`; project-like endpoints only `errno`; auth endpoints none.
    #[error("{message}")]
    Api {
        /// Human-readable message from the API.
        message: String,
        /// HTTP status code.
        status_code: u16,
        /// HTTP reason phrase.
        status_message: String,
        /// FreshBooks error number, 0 when not supplied.
        errno: i64,
        /// The offending field, if reported.
        field: Option<String>,
        /// The object type the error relates to, if reported.
        object: Option<String>,
        /// The offending value, if reported.
        value: Option<String>,
    },

    /// The response body matched no expected envelope.
    #[error("Returned an unexpected response")]
    UnexpectedResponse {
        /// HTTP status code, 0 when unknown.
        status_code: u16,
        /// HTTP reason phrase.
        status_message: String,
        /// The decode failure, when the body could not be interpreted.
        source: Option<serde_json::Error>,
    },

    /// The transport failed.
    #[error("Returned an unexpected response")]
    Transport {
        /// HTTP status code if one was received, otherwise 0.
        status_code: u16,
        /// The underlying transport failure.
        source: TransportError,
    },
}

impl FreshBooksError {
    /// Creates an [`UnexpectedResponse`](Self::UnexpectedResponse) for `response`.
    #[must_use]
    pub fn unexpected(response: &HttpResponse) -> Self {
        Self::UnexpectedResponse {
            status_code: response.code,
            status_message: response.status_message.clone(),
            source: None,
        }
    }

    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Api { .. } => ErrorKind::ApiError,
            Self::UnexpectedResponse { .. } => ErrorKind::UnexpectedResponse,
            Self::Transport { .. } => ErrorKind::TransportError,
        }
    }

    /// Returns the HTTP status code, or 0 if none was received.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Api { status_code, .. }
            | Self::UnexpectedResponse { status_code, .. }
            | Self::Transport { status_code, .. } => *status_code,
        }
    }

    /// Returns the HTTP reason phrase, if known.
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        match self {
            Self::Api { status_message, .. } | Self::UnexpectedResponse { status_message, .. } => {
                Some(status_message.as_str()).filter(|s| !s.is_empty())
            }
            Self::Transport { source, .. } => match source {
                TransportError::MalformedBody { status_message, .. } => {
                    Some(status_message.as_str()).filter(|s| !s.is_empty())
                }
                TransportError::Network(_) => None,
            },
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Api { message, .. } => message,
            Self::UnexpectedResponse { .. } | Self::Transport { .. } => {
                UNEXPECTED_RESPONSE_MESSAGE
            }
        }
    }

    /// Returns the FreshBooks error number, or 0.
    #[must_use]
    pub const fn errno(&self) -> i64 {
        match self {
            Self::Api { errno, .. } => *errno,
            _ => 0,
        }
    }

    /// Returns the offending field, if reported.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Api { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Returns the object type, if reported.
    #[must_use]
    pub fn object(&self) -> Option<&str> {
        match self {
            Self::Api { object, .. } => object.as_deref(),
            _ => None,
        }
    }

    /// Returns the offending value, if reported.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Api { value, .. } => value.as_deref(),
            _ => None,
        }
    }

    /// Summarizes a field-level validation failure.
    ///
    /// Returns `None` unless both the field and the value were reported.
    ///
    /// # Example
    ///
    /// ```rust
    /// use freshbooks_api::FreshBooksError;
    ///
    /// let error = FreshBooksError::Api {
    ///     message: "Client not found.".to_string(),
    ///     status_code: 404,
    ///     status_message: "Not Found".to_string(),
    ///     errno: 1012,
    ///     field: Some("userid".to_string()),
    ///     object: Some("client".to_string()),
    ///     value: Some("12345".to_string()),
    /// };
    /// assert_eq!(
    ///     error.validation_error().as_deref(),
    ///     Some("ValidationError in client. userid='12345'.")
    /// );
    /// ```
    #[must_use]
    pub fn validation_error(&self) -> Option<String> {
        match (self.field(), self.value()) {
            (Some(field), Some(value)) => Some(format!(
                "ValidationError in {}. {field}='{value}'.",
                self.object().unwrap_or_default()
            )),
            _ => None,
        }
    }
}

/// A body that is not JSON becomes [`FreshBooksError::UnexpectedResponse`].
impl From<TransportError> for FreshBooksError {
    fn from(source: TransportError) -> Self {
        match source {
            TransportError::MalformedBody {
                code,
                status_message,
                source,
            } => Self::UnexpectedResponse {
                status_code: code,
                status_message,
                source: Some(source),
            },
            network @ TransportError::Network(_) => Self::Transport {
                status_code: network.status_code(),
                source: network,
            },
        }
    }
}
