//! Configuration error types for the FreshBooks API SDK.
//!
//! All configuration constructors return `Result<T, ConfigError>` so invalid
//! values are rejected when the configuration is built, not when the first
//! request is sent.
//!
//! # Example
//!
//! ```rust
//! use freshbooks_api::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client id cannot be empty.
    #[error("Client id cannot be empty. Please provide the client id of your FreshBooks application.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide the client secret of your FreshBooks application.")]
    EmptyClientSecret,

    /// Access token cannot be empty.
    #[error("Access token cannot be empty.")]
    EmptyAccessToken,

    /// A base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://api.freshbooks.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
