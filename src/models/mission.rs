//! Mission models and DTOs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// A persisted mission joining one scientist to one planet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: i32,
    pub name: String,
    pub scientist_id: i32,
    pub planet_id: i32,
}

/// Incoming body for `POST /missions`
#[derive(Debug, Default, Deserialize, Validate)]
pub struct MissionPayload {
    #[validate(
        required(message = "Name cannot be empty"),
        length(min = 1, message = "Name cannot be empty")
    )]
    pub name: Option<String>,

    #[validate(required(message = "Scientist id is required"))]
    pub scientist_id: Option<i32>,

    #[validate(required(message = "Planet id is required"))]
    pub planet_id: Option<i32>,
}

/// Keys checked for emptiness before the body is decoded
pub const MISSION_REQUIRED: [&str; 1] = ["name"];

/// Validated mission columns. The referenced rows are not checked here;
/// storage rejects dangling ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMission {
    pub name: String,
    pub scientist_id: i32,
    pub planet_id: i32,
}

impl MissionPayload {
    pub fn into_new(self) -> Result<NewMission, ValidationErrors> {
        self.validate()?;
        Ok(NewMission {
            name: self.name.unwrap_or_default(),
            scientist_id: self.scientist_id.unwrap_or_default(),
            planet_id: self.planet_id.unwrap_or_default(),
        })
    }
}
