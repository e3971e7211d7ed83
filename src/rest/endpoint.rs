//! Resource endpoints: URL building, request execution and unwrapping.
//!
//! One [`ResourceEndpoint`] type serves every resource. What differs between
//! clients, projects or time entries is captured by a const
//! [`ResourceDescriptor`]: its URL template, paths, payload keys, and how it
//! is created and deleted.
//!
//! # Example
//!
//! ```rust,ignore
//! use freshbooks_api::rest::{resources, ResourceEndpoint};
//! use freshbooks_api::query::{FilterQueryBuilder, PaginationQueryBuilder};
//!
//! let clients = ResourceEndpoint::new(&http_client, &resources::CLIENTS);
//!
//! let page = PaginationQueryBuilder::new(1, 25);
//! let filters = FilterQueryBuilder::new().add_like("email_like", "@example.com");
//! let list = clients.list("ABC123", &[&page, &filters]).await?;
//! println!("{} of {}", list.len(), list.pages.total);
//! ```

use std::fmt;

use serde_json::{json, Value};

use crate::clients::{HttpMethod, HttpResponse, Transport, TransportError};
use crate::query::{build_query_string, describe_builders, IncludesQueryBuilder, QueryBuilder};
use crate::rest::envelope::{self, Payload};
use crate::rest::{Dialect, FreshBooksError, ListResult, Pages, UrlTemplate, NOT_FOUND_MESSAGE};

/// Which path a create request is sent to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathTarget {
    /// The single-resource path (e.g. `.../project`).
    Single,
    /// The collection path (e.g. `.../users/clients`, `.../time_entries`).
    Collection,
}

/// How a resource is deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteStyle {
    /// `PUT {key: {vis_state: 1}}` to the single-resource URL.
    SoftDelete,
    /// `DELETE` to the single-resource URL. A `204 No Content` is success.
    HttpDelete,
}

/// Static description of one API resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Human-readable name, used in logs.
    pub name: &'static str,
    /// URL template, which also fixes the dialect.
    pub template: UrlTemplate,
    /// Path segment for single-resource URLs.
    pub single_path: &'static str,
    /// Path segment for collection URLs.
    pub list_path: &'static str,
    /// Key wrapping a single resource in request and response bodies.
    pub single_key: &'static str,
    /// Key holding the items of a list response.
    pub list_key: &'static str,
    /// Where create requests go.
    pub create_target: PathTarget,
    /// How delete is performed.
    pub delete_style: DeleteStyle,
}

impl ResourceDescriptor {
    /// Describes an accounting resource. Single and collection paths are the
    /// same, creates go to the collection, and deletes are soft.
    #[must_use]
    pub const fn accounting(
        name: &'static str,
        path: &'static str,
        single_key: &'static str,
        list_key: &'static str,
    ) -> Self {
        Self {
            name,
            template: UrlTemplate::Accounting,
            single_path: path,
            list_path: path,
            single_key,
            list_key,
            create_target: PathTarget::Collection,
            delete_style: DeleteStyle::SoftDelete,
        }
    }

    /// Describes a project-like resource. Deletes use HTTP `DELETE`.
    #[must_use]
    pub const fn project(
        name: &'static str,
        template: UrlTemplate,
        single_path: &'static str,
        list_path: &'static str,
        single_key: &'static str,
        list_key: &'static str,
        create_target: PathTarget,
    ) -> Self {
        Self {
            name,
            template,
            single_path,
            list_path,
            single_key,
            list_key,
            create_target,
            delete_style: DeleteStyle::HttpDelete,
        }
    }

    /// Returns a copy of this descriptor deleted with `delete_style`.
    #[must_use]
    pub const fn with_delete_style(self, delete_style: DeleteStyle) -> Self {
        Self {
            delete_style,
            ..self
        }
    }

    /// Returns the dialect of this resource.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.template.dialect()
    }
}

/// CRUD operations on one resource, executed through a [`Transport`].
///
/// Endpoints hold only a borrowed transport and a static descriptor, so
/// they are cheap to create per call and safe to share.
#[derive(Debug)]
pub struct ResourceEndpoint<'a, T: Transport> {
    transport: &'a T,
    descriptor: &'static ResourceDescriptor,
}

impl<T: Transport> Clone for ResourceEndpoint<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Transport> Copy for ResourceEndpoint<'_, T> {}

impl<'a, T: Transport> ResourceEndpoint<'a, T> {
    /// Creates an endpoint for `descriptor`.
    #[must_use]
    pub const fn new(transport: &'a T, descriptor: &'static ResourceDescriptor) -> Self {
        Self {
            transport,
            descriptor,
        }
    }

    /// Returns the descriptor of this endpoint.
    #[must_use]
    pub const fn descriptor(&self) -> &'static ResourceDescriptor {
        self.descriptor
    }

    /// Returns the dialect of this endpoint.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.descriptor.dialect()
    }

    /// Builds `{prefix}/{single_path}/{id}[?includes]`.
    #[must_use]
    pub fn build_single_url(
        &self,
        owner: impl fmt::Display,
        resource_id: i64,
        includes: Option<&IncludesQueryBuilder>,
    ) -> String {
        let base = self
            .descriptor
            .template
            .base(&owner.to_string(), self.descriptor.single_path);
        let query = includes.map_or_else(String::new, |includes| {
            build_query_string(&[includes], self.dialect())
        });
        format!("{base}/{resource_id}{query}")
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
        format!("{base}{}", build_query_string(builders, self.dialect()))
    }

    /// Builds the URL create requests are sent to.
    #[must_use]
    pub fn build_create_url(&self, owner: impl fmt::Display) -> String {
        let path = match self.descriptor.create_target {
            PathTarget::Single => self.descriptor.single_path,
            PathTarget::Collection => self.descriptor.list_path,
        };
        self.descriptor.template.base(&owner.to_string(), path)
    }

    /// Sends a request and unwraps the response envelope.
    ///
    /// # Errors
    ///
    /// Returns [`FreshBooksError`] on any failure; see [`envelope::parse`].
    pub async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Payload, FreshBooksError> {
        execute(self.transport, self.dialect(), method, url, body).await
    }

    /// Fetches a single resource.
    ///
    /// # Errors
    ///
    /// Returns [`FreshBooksError`] if the request fails or the response does
    /// not contain the resource.
    pub async fn get(
        &self,
        owner: impl fmt::Display,
        resource_id: i64,
        includes: Option<&IncludesQueryBuilder>,
    ) -> Result<Payload, FreshBooksError> {
        let url = self.build_single_url(owner, resource_id, includes);
        let (response, payload) =
            exchange(self.transport, self.dialect(), HttpMethod::Get, &url, None).await?;
        take_object(&response, payload, self.descriptor.single_key)
    }

    /// Fetches one page of resources.
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
        let (response, payload) =
            exchange(self.transport, self.dialect(), HttpMethod::Get, &url, None).await?;
        take_list(self.dialect(), &response, payload, self.descriptor.list_key)
    }

    /// Creates a resource from `data`, returning the created resource.
    ///
    /// `data` is sent wrapped in the resource's key.
    ///
    /// # Errors
    ///
    /// Returns [`FreshBooksError`] if the request fails or the response does
    /// not contain the resource.
    pub async fn create(
        &self,
        owner: impl fmt::Display,
        data: Payload,
    ) -> Result<Payload, FreshBooksError> {
        let url = self.build_create_url(owner);
        send_wrapped(
            self.transport,
            self.dialect(),
            HttpMethod::Post,
            &url,
            self.descriptor.single_key,
            data,
        )
        .await
    }

    /// Updates a resource with `data`, returning the updated resource.
    ///
    /// # Errors
    ///
    /// Returns [`FreshBooksError`] if the request fails or the response does
    /// not contain the resource.
    pub async fn update(
        &self,
        owner: impl fmt::Display,
        resource_id: i64,
        data: Payload,
    ) -> Result<Payload, FreshBooksError> {
        let url = self.build_single_url(owner, resource_id, None);
        send_wrapped(
            self.transport,
            self.dialect(),
            HttpMethod::Put,
            &url,
            self.descriptor.single_key,
            data,
        )
        .await
    }

    /// Deletes a resource.
    ///
    /// Most accounting resources are soft-deleted by setting `vis_state` to
    /// 1. Other incomes and project-like resources are removed with HTTP
    /// `DELETE`.
    ///
    /// # Errors
    ///
    /// Returns [`FreshBooksError`] if the request fails.
    pub async fn delete(
        &self,
        owner: impl fmt::Display,
        resource_id: i64,
    ) -> Result<(), FreshBooksError> {
        let url = self.build_single_url(owner, resource_id, None);
        match self.descriptor.delete_style {
            DeleteStyle::SoftDelete => {
                let body = wrap(self.descriptor.single_key, json!({ "vis_state": 1 }));
                self.execute(HttpMethod::Put, &url, Some(&body)).await?;
            }
            DeleteStyle::HttpDelete => {
                self.execute(HttpMethod::Delete, &url, None).await?;
            }
        }
        Ok(())
    }
}

/// Sends one request through `transport` and unwraps it for `dialect`.
///
/// A successful `DELETE` with no body (`204 No Content`), or an accounting
/// `DELETE` whose body carries a `response` envelope, yields an empty
/// payload.
///
/// # Errors
///
/// Returns [`FreshBooksError::Transport`] if the transport fails, otherwise
/// whatever [`envelope::parse`] reports.
pub async fn execute<T: Transport>(
    transport: &T,
    dialect: Dialect,
    method: HttpMethod,
    url: &str,
    body: Option<&Value>,
) -> Result<Payload, FreshBooksError> {
    exchange(transport, dialect, method, url, body)
        .await
        .map(|(_, payload)| payload)
}

pub(crate) async fn exchange<T: Transport>(
    transport: &T,
    dialect: Dialect,
    method: HttpMethod,
    url: &str,
    body: Option<&Value>,
) -> Result<(HttpResponse, Payload), FreshBooksError> {
    let response = match transport.execute(method, url, body).await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("Transport failure for {} {}: {}", method, url, e);
            return Err(match e {
                TransportError::MalformedBody {
                    code: 404,
                    status_message,
                    ..
                } if dialect == Dialect::ProjectLike => not_found(status_message),
                other => other.into(),
            });
        }
    };

    if dialect == Dialect::ProjectLike && response.code == 404 && response.body.is_none() {
        return Err(not_found(response.status_message));
    }

    if method == HttpMethod::Delete && is_empty_delete_success(dialect, &response) {
        return Ok((response, Payload::new()));
    }

    match envelope::parse(dialect, &response) {
        Ok(payload) => Ok((response, payload)),
        Err(e) => {
            tracing::debug!(
                status = e.status_code(),
                kind = ?e.kind(),
                "FreshBooks {} {} failed: {}",
                method,
                url,
                e
            );
            Err(e)
        }
    }
}

fn is_empty_delete_success(dialect: Dialect, response: &HttpResponse) -> bool {
    if !response.is_ok() {
        return false;
    }
    match &response.body {
        None => true,
        Some(body) => {
            dialect == Dialect::AccountingLike && body.get("response").is_some_and(|r| !r.is_null())
        }
    }
}

/// A project-like 404 whose body could not be read.
fn not_found(status_message: String) -> FreshBooksError {
    FreshBooksError::Api {
        message: NOT_FOUND_MESSAGE.to_string(),
        status_code: 404,
        status_message,
        errno: 0,
        field: None,
        object: None,
        value: None,
    }
}

/// Sends `data` wrapped in `key` and takes the object under `key` back out.
pub(crate) async fn send_wrapped<T: Transport>(
    transport: &T,
    dialect: Dialect,
    method: HttpMethod,
    url: &str,
    key: &str,
    data: Payload,
) -> Result<Payload, FreshBooksError> {
    let body = wrap(key, Value::Object(data));
    let (response, payload) = exchange(transport, dialect, method, url, Some(&body)).await?;
    take_object(&response, payload, key)
}

/// Splits a list payload into its items and paging information.
///
/// Accounting lists carry paging fields beside the items, project-like
/// lists in a `meta` object. Unpaginated lists read as [`Pages::default`].
pub(crate) fn take_list(
    dialect: Dialect,
    response: &HttpResponse,
    mut payload: Payload,
    list_key: &str,
) -> Result<ListResult, FreshBooksError> {
    let pages = match dialect {
        Dialect::AccountingLike => Pages::from_object(&payload),
        Dialect::ProjectLike | Dialect::Auth => payload
            .get("meta")
            .and_then(Value::as_object)
            .map(Pages::from_object)
            .unwrap_or_default(),
    };

    let items = match payload.remove(list_key) {
        Some(Value::Array(values)) => values
            .into_iter()
            .map(|value| match value {
                Value::Object(item) => Some(item),
                _ => None,
            })
            .collect::<Option<Vec<_>>>(),
        _ => None,
    };

    items
        .map(|items| ListResult { items, pages })
        .ok_or_else(|| unexpected(response))
}

fn wrap(key: &str, value: Value) -> Value {
    let mut body = Payload::new();
    body.insert(key.to_string(), value);
    Value::Object(body)
}

pub(crate) fn take_object(
    response: &HttpResponse,
    mut payload: Payload,
    key: &str,
) -> Result<Payload, FreshBooksError> {
    match payload.remove(key) {
        Some(Value::Object(object)) => Ok(object),
        _ => Err(unexpected(response)),
    }
}

fn unexpected(response: &HttpResponse) -> FreshBooksError {
    let error = FreshBooksError::unexpected(response);
    tracing::debug!(status = response.code, "Response missing expected payload");
    error
}
