//! Configuration types for the FreshBooks API SDK.
//!
//! - [`FreshBooksConfig`]: all SDK settings, immutable once built
//! - [`FreshBooksConfigBuilder`]: builder for [`FreshBooksConfig`]
//! - [`ClientId`], [`ClientSecret`], [`AccessToken`], [`BaseUrl`]: validated newtypes
//!
//! # Example
//!
//! ```rust
//! use freshbooks_api::{FreshBooksConfig, ClientId, AccessToken};
//!
//! let config = FreshBooksConfig::builder()
//!     .client_id(ClientId::new("my-client-id").unwrap())
//!     .access_token(AccessToken::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_url().as_ref(), "https://api.freshbooks.com");
//! ```

mod newtypes;

pub use newtypes::{AccessToken, BaseUrl, ClientId, ClientSecret};

use std::time::Duration;

use crate::error::ConfigError;

/// Default API host.
pub const DEFAULT_API_URL: &str = "https://api.freshbooks.com";

/// Default OAuth host.
pub const DEFAULT_AUTH_URL: &str = "https://auth.freshbooks.com";

/// Environment variable overriding the API host.
pub const API_URL_ENV: &str = "FRESHBOOKS_API_URL";

/// Environment variable overriding the OAuth host.
pub const AUTH_URL_ENV: &str = "FRESHBOOKS_AUTH_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the FreshBooks API SDK.
///
/// `FreshBooksConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct FreshBooksConfig {
    client_id: ClientId,
    client_secret: Option<ClientSecret>,
    redirect_uri: Option<String>,
    access_token: Option<AccessToken>,
    refresh_token: Option<AccessToken>,
    api_url: BaseUrl,
    auth_url: BaseUrl,
    user_agent: Option<String>,
    connect_timeout: Duration,
    read_timeout: Duration,
    write_timeout: Duration,
    max_tries: u32,
}

impl FreshBooksConfig {
    /// Creates a new builder for constructing a `FreshBooksConfig`.
    #[must_use]
    pub fn builder() -> FreshBooksConfigBuilder {
        FreshBooksConfigBuilder::new()
    }

    /// Returns the OAuth client id.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the OAuth client secret, if configured.
    #[must_use]
    pub const fn client_secret(&self) -> Option<&ClientSecret> {
        self.client_secret.as_ref()
    }

    /// Returns the OAuth redirect URI, if configured.
    #[must_use]
    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    /// Returns the bearer token used to authorize requests, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the refresh token, if configured.
    #[must_use]
    pub const fn refresh_token(&self) -> Option<&AccessToken> {
        self.refresh_token.as_ref()
    }

    /// Returns the API host.
    #[must_use]
    pub const fn api_url(&self) -> &BaseUrl {
        &self.api_url
    }

    /// Returns the OAuth host.
    #[must_use]
    pub const fn auth_url(&self) -> &BaseUrl {
        &self.auth_url
    }

    /// Returns the custom user agent, if configured.
    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Returns the connect timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Returns the read timeout.
    #[must_use]
    pub const fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Returns the write timeout.
    #[must_use]
    pub const fn write_timeout(&self) -> Duration {
        self.write_timeout
    }

    /// Returns the number of attempts made for 429 and 500 responses.
    #[must_use]
    pub const fn max_tries(&self) -> u32 {
        self.max_tries
    }
}

// Verify FreshBooksConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FreshBooksConfig>();
};

/// Builder for constructing [`FreshBooksConfig`] instances.
///
/// `client_id` is the only required field.
///
/// # Defaults
///
/// - `api_url`: `FRESHBOOKS_API_URL` if set, otherwise `https://api.freshbooks.com`
/// - `auth_url`: `FRESHBOOKS_AUTH_URL` if set, otherwise `https://auth.freshbooks.com`
/// - `connect_timeout` and `read_timeout`: 20 seconds
/// - `write_timeout`: 60 seconds
/// - `max_tries`: 1 (no retries)
#[derive(Debug, Default)]
pub struct FreshBooksConfigBuilder {
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    redirect_uri: Option<String>,
    access_token: Option<AccessToken>,
    refresh_token: Option<AccessToken>,
    api_url: Option<BaseUrl>,
    auth_url: Option<BaseUrl>,
    user_agent: Option<String>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
    max_tries: Option<u32>,
}

impl FreshBooksConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the OAuth client id (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the OAuth client secret.
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the OAuth redirect URI.
    #[must_use]
    pub fn redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    /// Sets the bearer token used for API calls.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the refresh token.
    #[must_use]
    pub fn refresh_token(mut self, token: AccessToken) -> Self {
        self.refresh_token = Some(token);
        self
    }

    /// Sets the API host, bypassing the environment default.
    #[must_use]
    pub fn api_url(mut self, url: BaseUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Sets the OAuth host, bypassing the environment default.
    #[must_use]
    pub fn auth_url(mut self, url: BaseUrl) -> Self {
        self.auth_url = Some(url);
        self
    }

    /// Replaces the default `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the read timeout.
    #[must_use]
    pub const fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Sets the write timeout.
    #[must_use]
    pub const fn write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }

    /// Sets how many times a request is attempted on 429 and 500 responses.
    ///
    /// Values below 1 are treated as 1.
    #[must_use]
    pub const fn max_tries(mut self, tries: u32) -> Self {
        self.max_tries = Some(tries);
        self
    }

    /// Builds the [`FreshBooksConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `client_id` is not
    /// set, or [`ConfigError::InvalidBaseUrl`] if an environment override
    /// is not a valid URL.
    pub fn build(self) -> Result<FreshBooksConfig, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;

        let api_url = match self.api_url {
            Some(url) => url,
            None => env_url(API_URL_ENV, DEFAULT_API_URL)?,
        };
        let auth_url = match self.auth_url {
            Some(url) => url,
            None => env_url(AUTH_URL_ENV, DEFAULT_AUTH_URL)?,
        };

        Ok(FreshBooksConfig {
            client_id,
            client_secret: self.client_secret,
            redirect_uri: self.redirect_uri,
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            api_url,
            auth_url,
            user_agent: self.user_agent,
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_TIMEOUT),
            read_timeout: self.read_timeout.unwrap_or(DEFAULT_TIMEOUT),
            write_timeout: self.write_timeout.unwrap_or(DEFAULT_WRITE_TIMEOUT),
            max_tries: self.max_tries.unwrap_or(1).max(1),
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<BaseUrl, ConfigError> {
    std::env::var(var).map_or_else(|_| BaseUrl::new(default), BaseUrl::new)
}
