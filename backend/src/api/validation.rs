//! Request validation for book endpoints
//!
//! Bodies are parsed from raw bytes so that malformed input gets the same
//! envelope as every other error instead of the framework's rejection text.

use crate::error::AppError;
use crate::store::{BookId, NewBook};
use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
};
use serde_json::{Map, Value};

/// Error returned when the body is not a JSON object
pub const NOT_JSON: &str = "Request must be JSON";

/// Error returned when a required field is absent or empty
pub const FIELDS_REQUIRED: &str = "All fields (title, author, year) are required";

const REQUIRED_FIELDS: [&str; 3] = ["title", "author", "year"];

/// Book id taken from the `{id}` path segment
///
/// Anything other than a plain non-negative integer is answered with a bare
/// 404, the same as a route that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookIdPath(pub BookId);

#[async_trait]
impl<S> FromRequestParts<S> for BookIdPath
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::NOT_FOUND)?;

        parse_book_id(&raw).map(Self).ok_or(StatusCode::NOT_FOUND)
    }
}

/// Parse an id segment, accepting only ASCII digits
pub fn parse_book_id(raw: &str) -> Option<BookId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Validate a create/update body
///
/// Checks run in a fixed order: the body must be a JSON object, then all
/// required fields must be present and non-empty, then each field must have
/// the right type. `year = 0` counts as present.
pub fn parse_book_payload(body: &[u8]) -> Result<NewBook, AppError> {
    let object = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => object,
        _ => return Err(AppError::Validation(NOT_JSON.to_string())),
    };

    if REQUIRED_FIELDS.iter().any(|field| is_missing(&object, field)) {
        return Err(AppError::Validation(FIELDS_REQUIRED.to_string()));
    }

    Ok(NewBook {
        title: string_field(&object, "title")?,
        author: string_field(&object, "author")?,
        year: integer_field(&object, "year")?,
    })
}

fn is_missing(object: &Map<String, Value>, field: &str) -> bool {
    match object.get(field) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn string_field(object: &Map<String, Value>, field: &str) -> Result<String, AppError> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(AppError::Validation(format!(
            "Field '{}' must be a string",
            field
        ))),
    }
}

fn integer_field(object: &Map<String, Value>, field: &str) -> Result<i64, AppError> {
    object.get(field).and_then(Value::as_i64).ok_or_else(|| {
        AppError::Validation(format!("Field '{}' must be an integer", field))
    })
}
