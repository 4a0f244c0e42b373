//! Scientist models and DTOs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// A persisted scientist. Serializes to `{id, name, field_of_study}`, which is
/// both the full record and the collection projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scientist {
    pub id: i32,
    pub name: String,
    pub field_of_study: String,
}

/// Incoming body for `POST /scientists` and `PATCH /scientists/{id}`.
///
/// Only `name` and `field_of_study` are read; any other key in the payload
/// (including `id`) is ignored.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ScientistPayload {
    #[validate(
        required(message = "Name cannot be empty"),
        length(min = 1, message = "Name cannot be empty")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Field of study cannot be empty"),
        length(min = 1, message = "Field of study cannot be empty")
    )]
    pub field_of_study: Option<String>,
}

/// Keys that must be present and non-empty on create and update
pub const SCIENTIST_REQUIRED: [&str; 2] = ["name", "field_of_study"];

/// Validated, writable scientist columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScientistFields {
    pub name: String,
    pub field_of_study: String,
}

impl ScientistPayload {
    /// Validates the payload and extracts the writable columns
    pub fn into_fields(self) -> Result<ScientistFields, ValidationErrors> {
        self.validate()?;
        Ok(ScientistFields {
            name: self.name.unwrap_or_default(),
            field_of_study: self.field_of_study.unwrap_or_default(),
        })
    }
}
