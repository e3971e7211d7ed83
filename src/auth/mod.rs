//! Auth-dialect endpoints and OAuth authorization URLs.
//!
//! - [`AuthEndpoint`]: calls under `/auth/api/v1`, such as the current user
//! - [`authorization_url`]: the URL a user visits to grant your application access
//!
//! Exchanging the resulting authorization code for tokens is left to the
//! application; pass the token to
//! [`FreshBooksConfigBuilder::access_token`](crate::FreshBooksConfigBuilder::access_token).
//!
//! # Example
//!
//! ```rust
//! use freshbooks_api::{ClientId, FreshBooksConfig, BaseUrl};
//! use freshbooks_api::auth::authorization_url;
//!
//! let config = FreshBooksConfig::builder()
//!     .client_id(ClientId::new("abc").unwrap())
//!     .redirect_uri("https://example.com/callback")
//!     .auth_url(BaseUrl::new("https://auth.freshbooks.com").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let url = authorization_url(&config, Some(&["user:profile:read"]));
//! assert_eq!(
//!     url,
//!     "https://auth.freshbooks.com/service/auth/oauth/authorize?client_id=abc\
//!      &response_type=code&redirect_uri=https%3A%2F%2Fexample.com%2Fcallback\
//!      &scope=user%3Aprofile%3Aread"
//! );
//! ```

use crate::clients::{HttpMethod, Transport};
use crate::config::FreshBooksConfig;
use crate::rest::{exchange, take_object, Dialect, FreshBooksError, Payload, UrlTemplate};

/// Path of the OAuth authorization page on the auth host.
pub const AUTHORIZE_PATH: &str = "/service/auth/oauth/authorize";

/// Endpoints under `/auth/api/v1`.
#[derive(Debug)]
pub struct AuthEndpoint<'a, T: Transport> {
    transport: &'a T,
}

impl<'a, T: Transport> AuthEndpoint<'a, T> {
    /// Creates an auth endpoint.
    #[must_use]
    pub const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Builds `/auth/api/v1/{endpoint}`.
    #[must_use]
    pub fn build_url(&self, endpoint: &str) -> String {
        UrlTemplate::Auth.base("", endpoint)
    }

    /// Fetches the identity of the user that owns the access token.
    ///
    /// # Errors
    ///
    /// Returns [`FreshBooksError`] if the request fails or the response has
    /// no `response` object.
    pub async fn current_user(&self) -> Result<Payload, FreshBooksError> {
        let url = self.build_url("users/me");
        let (response, payload) =
            exchange(self.transport, Dialect::Auth, HttpMethod::Get, &url, None).await?;
        take_object(&response, payload, "response")
    }
}

/// Builds the OAuth authorization URL for `config`.
///
/// Scopes are joined with spaces. A warning is logged when no redirect URI
/// is configured, since FreshBooks will reject the request.
#[must_use]
pub fn authorization_url(config: &FreshBooksConfig, scopes: Option<&[&str]>) -> String {
    let redirect_uri = config.redirect_uri().unwrap_or_default();
    if redirect_uri.is_empty() {
        tracing::warn!("Client redirect_uri has not been set.");
    }

    let mut params = vec![
        ("client_id", config.client_id().as_ref().to_string()),
        ("response_type", "code".to_string()),
        ("redirect_uri", redirect_uri.to_string()),
    ];
    if let Some(scopes) = scopes {
        params.push(("scope", scopes.join(" ")));
    }

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}{AUTHORIZE_PATH}?{query_string}", config.auth_url().as_ref())
}
