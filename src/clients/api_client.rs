//! The top-level FreshBooks client.

use crate::auth::{self, AuthEndpoint};
use crate::clients::errors::TransportError;
use crate::clients::http_client::HttpClient;
use crate::config::FreshBooksConfig;
use crate::rest::{
    resources, AccountingReports, FreshBooksError, Payload, ResourceEndpoint, SubResourceEndpoint,
};

/// Entry point for the FreshBooks API.
///
/// Owns the configuration and one [`HttpClient`]; every accessor hands out
/// a lightweight endpoint borrowing that client.
///
/// # Example
///
/// ```rust
/// use freshbooks_api::{ClientId, FreshBooksClient, FreshBooksConfig};
///
/// let config = FreshBooksConfig::builder()
///     .client_id(ClientId::new("my-client-id").unwrap())
///     .build()
///     .unwrap();
/// let client = FreshBooksClient::new(config).unwrap();
///
/// assert_eq!(
///     client.clients().build_single_url("ABC123", 12345, None),
///     "/accounting/account/ABC123/users/clients/12345"
/// );
/// ```
#[derive(Debug)]
pub struct FreshBooksClient {
    config: FreshBooksConfig,
    http: HttpClient,
}

// Verify FreshBooksClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FreshBooksClient>();
};

impl FreshBooksClient {
    /// Creates a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the HTTP client cannot be
    /// created.
    pub fn new(config: FreshBooksConfig) -> Result<Self, TransportError> {
        let http = HttpClient::new(&config)?;
        Ok(Self { config, http })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &FreshBooksConfig {
        &self.config
    }

    /// Returns the underlying HTTP transport.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http
    }

    /// Clients of an account.
    #[must_use]
    pub const fn clients(&self) -> ResourceEndpoint<'_, HttpClient> {
        ResourceEndpoint::new(&self.http, &resources::CLIENTS)
    }

    /// Invoices of an account.
    #[must_use]
    pub const fn invoices(&self) -> ResourceEndpoint<'_, HttpClient> {
        ResourceEndpoint::new(&self.http, &resources::INVOICES)
    }

    /// Expenses of an account.
    #[must_use]
    pub const fn expenses(&self) -> ResourceEndpoint<'_, HttpClient> {
        ResourceEndpoint::new(&self.http, &resources::EXPENSES)
    }

    /// Billable items of an account.
    #[must_use]
    pub const fn items(&self) -> ResourceEndpoint<'_, HttpClient> {
        ResourceEndpoint::new(&self.http, &resources::ITEMS)
    }

    /// Invoice payments of an account.
    #[must_use]
    pub const fn payments(&self) -> ResourceEndpoint<'_, HttpClient> {
        ResourceEndpoint::new(&self.http, &resources::PAYMENTS)
    }

    /// Taxes of an account.
    #[must_use]
    pub const fn taxes(&self) -> ResourceEndpoint<'_, HttpClient> {
        ResourceEndpoint::new(&self.http, &resources::TAXES)
    }

    /// Billable tasks of an account.
    #[must_use]
    pub const fn tasks(&self) -> ResourceEndpoint<'_, HttpClient> {
        ResourceEndpoint::new(&self.http, &resources::TASKS)
    }

    /// Other income entries of an account.
    #[must_use]
    pub const fn other_incomes(&self) -> ResourceEndpoint<'_, HttpClient> {
        ResourceEndpoint::new(&self.http, &resources::OTHER_INCOMES)
    }

    /// Projects of a business.
    #[must_use]
    pub const fn projects(&self) -> ResourceEndpoint<'_, HttpClient> {
        ResourceEndpoint::new(&self.http, &resources::PROJECTS)
    }

    /// Services of a business.
    #[must_use]
    pub const fn services(&self) -> ResourceEndpoint<'_, HttpClient> {
        ResourceEndpoint::new(&self.http, &resources::SERVICES)
    }

    /// Billable rates of the services of a business.
    #[must_use]
    pub const fn service_rates(&self) -> SubResourceEndpoint<'_, HttpClient> {
        SubResourceEndpoint::new(&self.http, &resources::SERVICE_RATES)
    }

    /// Time entries of a business.
    #[must_use]
    pub const fn time_entries(&self) -> ResourceEndpoint<'_, HttpClient> {
        ResourceEndpoint::new(&self.http, &resources::TIME_ENTRIES)
    }

    /// Accounting reports.
    #[must_use]
    pub const fn reports(&self) -> AccountingReports<'_, HttpClient> {
        AccountingReports::new(&self.http)
    }

    /// Auth-dialect endpoints.
    #[must_use]
    pub const fn auth(&self) -> AuthEndpoint<'_, HttpClient> {
        AuthEndpoint::new(&self.http)
    }

    /// Fetches the identity of the user that owns the access token.
    ///
    /// # Errors
    ///
    /// Returns [`FreshBooksError`] if the request fails.
    pub async fn current_user(&self) -> Result<Payload, FreshBooksError> {
        self.auth().current_user().await
    }

    /// Builds the OAuth authorization URL for this client's configuration.
    #[must_use]
    pub fn authorization_url(&self, scopes: Option<&[&str]>) -> String {
        auth::authorization_url(&self.config, scopes)
    }
}
