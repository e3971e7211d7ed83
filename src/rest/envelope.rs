//! Envelope parsing for each dialect.
//!
//! [`parse`] is a pure function from a raw [`HttpResponse`] to either the
//! unwrapped payload or a [`FreshBooksError`]:
//!
//! ```text
//! body missing or not an object          => UnexpectedResponse
//! success status AND payload present     => Ok(payload)
//! success status AND payload absent      => UnexpectedResponse
//! failure status AND error detail found  => Api(first error)
//! failure status AND no error detail     => UnexpectedResponse
//! ```
//!
//! What counts as "payload" and "error detail" is dialect-specific:
//!
//! - **Accounting-like**: payload is `response.result`; errors are
//!   `response.errors[0]`, or the newer `{message, details: [ErrorInfo]}` shape
//! - **Auth**: payload is the whole body; errors are `{error, error_description}`
//! - **Project-like**: payload is the whole body; errors are `{errno, error}`
//!   where `error` is `{title}` or a plain string

use serde_json::{Map, Value};

use crate::clients::HttpResponse;
use crate::rest::{Dialect, FreshBooksError};

/// An opaque resource payload, as unwrapped from a response envelope.
pub type Payload = Map<String, Value>;

/// The `@type` of a structured detail in the newer accounting error shape.
pub const ERROR_INFO_TYPE: &str = "type.googleapis.com/google.rpc.ErrorInfo";

/// Unwraps `response` according to `dialect`.
///
/// # Errors
///
/// Returns [`FreshBooksError::Api`] when the API reported an error, and
/// [`FreshBooksError::UnexpectedResponse`] for every other non-success path,
/// including a success status without the expected payload.
///
/// # Example
///
/// ```rust
/// use freshbooks_api::clients::HttpResponse;
/// use freshbooks_api::rest::{envelope, Dialect};
/// use serde_json::json;
///
/// let response = HttpResponse::from_parts(
///     200,
///     Some(json!({"response": {"result": {"client": {"id": 12345}}}})),
/// );
/// let payload = envelope::parse(Dialect::AccountingLike, &response).unwrap();
/// assert_eq!(payload["client"]["id"], 12345);
/// ```
pub fn parse(dialect: Dialect, response: &HttpResponse) -> Result<Payload, FreshBooksError> {
    let Some(body) = response.body.as_ref().and_then(Value::as_object) else {
        return Err(FreshBooksError::unexpected(response));
    };

    match dialect {
        Dialect::AccountingLike => parse_accounting(response, body),
        Dialect::Auth => parse_auth(response, body),
        Dialect::ProjectLike => parse_project(response, body),
    }
}

fn parse_accounting(response: &HttpResponse, body: &Payload) -> Result<Payload, FreshBooksError> {
    let envelope = body.get("response").and_then(Value::as_object);

    if response.is_ok() {
        return envelope
            .and_then(|envelope| envelope.get("result"))
            .and_then(Value::as_object)
            .cloned()
            .ok_or_else(|| FreshBooksError::unexpected(response));
    }

    let first_error = envelope
        .and_then(|envelope| envelope.get("errors"))
        .and_then(Value::as_array)
        .and_then(|errors| errors.first());
    if let Some(error) = first_error {
        return Err(api_error(
            response,
            text(error.get("message")).unwrap_or_default(),
            number(error.get("errno")),
            error,
        ));
    }

    if let Some(message) = text(body.get("message")) {
        let info = body
            .get("details")
            .and_then(Value::as_array)
            .and_then(|details| details.first())
            .filter(|detail| text(detail.get("@type")).as_deref() == Some(ERROR_INFO_TYPE));
        let metadata = info.and_then(|detail| {
            detail
                .get("metadata")
                .filter(|metadata| metadata.is_object())
                .map(|metadata| (detail, metadata))
        });
        if let Some((detail, metadata)) = metadata {
            return Err(api_error(
                response,
                text(metadata.get("message")).unwrap_or(message),
                number(detail.get("reason")),
                metadata,
            ));
        }
        return Err(FreshBooksError::Api {
            message,
            status_code: response.code,
            status_message: response.status_message.clone(),
            errno: 0,
            field: None,
            object: None,
            value: None,
        });
    }

    Err(FreshBooksError::unexpected(response))
}

fn parse_auth(response: &HttpResponse, body: &Payload) -> Result<Payload, FreshBooksError> {
    if response.is_ok() {
        return Ok(body.clone());
    }

    match body.get("error").filter(|error| !error.is_null()) {
        Some(error) => Err(FreshBooksError::Api {
            message: text(body.get("error_description"))
                .or_else(|| text(Some(error)))
                .unwrap_or_default(),
            status_code: response.code,
            status_message: response.status_message.clone(),
            errno: 0,
            field: None,
            object: None,
            value: None,
        }),
        None => Err(FreshBooksError::unexpected(response)),
    }
}

fn parse_project(response: &HttpResponse, body: &Payload) -> Result<Payload, FreshBooksError> {
    if response.is_ok() {
        return Ok(body.clone());
    }

    let message = match body.get("error") {
        Some(Value::Object(error)) => text(error.get("title")),
        Some(Value::String(error)) => Some(error.clone()),
        _ => None,
    };

    match message {
        Some(message) => Err(FreshBooksError::Api {
            message,
            status_code: response.code,
            status_message: response.status_message.clone(),
            errno: number(body.get("errno")),
            field: None,
            object: None,
            value: None,
        }),
        None => Err(FreshBooksError::unexpected(response)),
    }
}

fn api_error(
    response: &HttpResponse,
    message: String,
    errno: i64,
    detail: &Value,
) -> FreshBooksError {
    FreshBooksError::Api {
        message,
        status_code: response.code,
        status_message: response.status_message.clone(),
        errno,
        field: text(detail.get("field")),
        object: text(detail.get("object")),
        value: text(detail.get("value")),
    }
}

/// Reads a scalar as text. Nulls, objects and arrays read as `None`.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Reads an error number given either as a number or a numeric string.
fn number(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    }
}
