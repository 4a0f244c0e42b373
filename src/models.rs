//! Data models and DTOs (Data Transfer Objects)
//!
//! Records mirror the three tables one to one; payload types carry the
//! validation rules applied before anything reaches storage.

pub mod mission;
pub mod planet;
pub mod scientist;

// Re-export commonly used types
pub use mission::*;
pub use planet::*;
pub use scientist::*;

use serde::Serialize;
use serde_json::Value;

/// Error body for collection-level failures: `{"errors": [...]}`
#[derive(Debug, Serialize)]
pub struct ErrorsResponse {
    pub errors: Vec<String>,
}

impl ErrorsResponse {
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }
}

/// Error body for lookups by id: `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// A JSON value that doesn't count as "provided": absent, `null`, `false`,
/// zero, or an empty string, array or object
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}

/// First of `fields` that is blank in the raw request body.
///
/// Runs on the untyped body so an empty field is reported as such even when
/// another field has the wrong type.
pub fn first_blank_field(body: &Value, fields: &[&'static str]) -> Option<&'static str> {
    fields.iter().copied().find(|field| is_blank(body.get(field)))
}
