//! Endpoints for resources nested under a parent resource.
//!
//! A service rate belongs to one service: it is read and written at
//! `/comments/business/{business_id}/service/{service_id}/rate`, while all
//! rates of the business are listed at `.../service_rates`. Nested
//! resources cannot be deleted.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//!
//! let rates = client.service_rates();
//! let rate = rates.get(439_000, 12345).await?;
//!
//! let data = json!({"rate": "15.50"}).as_object().unwrap().clone();
//! let updated = rates.update(439_000, 12345, data).await?;
//! ```

use std::fmt;

use crate::clients::{HttpMethod, Transport};
use crate::query::{build_query_string, describe_builders, QueryBuilder};
use crate::rest::endpoint::{exchange, send_wrapped, take_list, take_object};
use crate::rest::{Dialect, FreshBooksError, ListResult, Payload, UrlTemplate};

/// Static description of a resource nested under a parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubResourceDescriptor {
    /// Human-readable name, used in logs.
    pub name: &'static str,
    /// URL template, which also fixes the dialect.
    pub template: UrlTemplate,
    /// Path segment of the parent resource.
    pub parent_path: &'static str,
    /// Path segment after the parent id for single-resource URLs.
    pub single_path: &'static str,
    /// Path segment for collection URLs.
    pub list_path: &'static str,
    /// Key wrapping a single resource in request and response bodies.
    pub single_key: &'static str,
    /// Key holding the items of a list response.
    pub list_key: &'static str,
}

impl SubResourceDescriptor {
    /// Returns the dialect of this resource.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.template.dialect()
    }
}

/// Get, list, create and update for one nested resource.
#[derive(Debug)]
pub struct SubResourceEndpoint<'a, T: Transport> {
    transport: &'a T,
    descriptor: &'static SubResourceDescriptor,
}

impl<T: Transport> Clone for SubResourceEndpoint<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Transport> Copy for SubResourceEndpoint<'_, T> {}

impl<'a, T: Transport> SubResourceEndpoint<'a, T> {
    /// Creates an endpoint for `descriptor`.
    #[must_use]
    pub const fn new(transport: &'a T, descriptor: &'static SubResourceDescriptor) -> Self {
        Self {
            transport,
            descriptor,
        }
    }

    /// Returns the descriptor of this endpoint.
    #[must_use]
    pub const fn descriptor(&self) -> &'static SubResourceDescriptor {
        self.descriptor
    }

    /// Builds `{prefix}/{parent_path}/{parent_id}/{single_path}`.
    #[must_use]
    pub fn build_single_url(&self, owner: impl fmt::Display, parent_id: i64) -> String {
        let base = self
            .descriptor
            .template
            .base(&owner.to_string(), self.descriptor.parent_path);
        format!("{base}/{parent_id}/{}", self.descriptor.single_path)
    }

    /// Builds `{prefix}/{list_path}[?query]`.
    #[must_use]
    pub fn build_collection_url(
        &self,
        owner: impl fmt::Display,
        builders: &[&dyn QueryBuilder],
    ) -> String {
        let base = self
            .descriptor
            .template
            .base(&owner.to_string(), self.descriptor.list_path);
        format!(
            "{base}{}",
            build_query_string(builders, self.descriptor.dialect())
        )
    }

    /// Fetches the resource belonging to `parent_id`.
    ///
    /// # Errors
    ///
    /// Returns [`FreshBooksError`] if the request fails or the response does
    /// not contain the resource.
    pub async fn get(
        &self,
        owner: impl fmt::Display,
        parent_id: i64,
    ) -> Result<Payload, FreshBooksError> {
        let url = self.build_single_url(owner, parent_id);
        let (response, payload) = exchange(
            self.transport,
            self.descriptor.dialect(),
            HttpMethod::Get,
            &url,
            None,
        )
        .await?;
        take_object(&response, payload, self.descriptor.single_key)
    }

    /// Lists the resources of every parent. The list is not paginated, so
    /// its [`Pages`](crate::rest::Pages) read as zero.
    ///
    /// # Errors
    ///
    /// Returns [`FreshBooksError`] if the request fails or the response does
    /// not contain the list.
    pub async fn list(
        &self,
        owner: impl fmt::Display,
        builders: &[&dyn QueryBuilder],
    ) -> Result<ListResult, FreshBooksError> {
        let url = self.build_collection_url(owner, builders);
        tracing::debug!(
            resource = self.descriptor.name,
            builders = %describe_builders(builders),
            "Listing FreshBooks resources"
        );
        let (response, payload) = exchange(
            self.transport,
            self.descriptor.dialect(),
            HttpMethod::Get,
            &url,
            None,
        )
        .await?;
        take_list(
            self.descriptor.dialect(),
            &response,
            payload,
            self.descriptor.list_key,
        )
    }

    /// Creates the resource of `parent_id` from `data`.
    ///
    /// # Errors
    ///
    /// Returns [`FreshBooksError`] if the request fails or the response does
    /// not contain the resource.
    pub async fn create(
        &self,
        owner: impl fmt::Display,
        parent_id: i64,
        data: Payload,
    ) -> Result<Payload, FreshBooksError> {
        self.send(HttpMethod::Post, owner, parent_id, data).await
    }

    /// Updates the resource of `parent_id` with `data`.
    ///
    /// # Errors
    ///
    /// Returns [`FreshBooksError`] if the request fails or the response does
    /// not contain the resource.
    pub async fn update(
        &self,
        owner: impl fmt::Display,
        parent_id: i64,
        data: Payload,
    ) -> Result<Payload, FreshBooksError> {
        self.send(HttpMethod::Put, owner, parent_id, data).await
    }

    async fn send(
        &self,
        method: HttpMethod,
        owner: impl fmt::Display,
        parent_id: i64,
        data: Payload,
    ) -> Result<Payload, FreshBooksError> {
        let url = self.build_single_url(owner, parent_id);
        send_wrapped(
            self.transport,
            self.descriptor.dialect(),
            method,
            &url,
            self.descriptor.single_key,
            data,
        )
        .await
    }
}
