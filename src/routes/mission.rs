//! Mission route handlers
//!
//! Missions can only be created over HTTP.

use crate::error::{rejected_write, validation_error, ApiResult};
use crate::models::{first_blank_field, Mission, MissionPayload, MISSION_REQUIRED};
use crate::routes::{decode, json_object};
use crate::state::SharedState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::info;

/// Create a mission.
///
/// The referenced scientist and planet are not looked up first; a dangling
/// id is refused by storage and reported like any other invalid payload.
pub async fn create_mission(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Mission>)> {
    let body = json_object(payload).map_err(validation_error)?;
    if let Some(field) = first_blank_field(&body, &MISSION_REQUIRED) {
        return Err(validation_error(format!("{} cannot be empty", field)));
    }
    let payload: MissionPayload = decode(body).map_err(validation_error)?;
    let new_mission = payload.into_new()?;

    let mission = state
        .repo
        .insert_mission(new_mission)
        .await
        .map_err(rejected_write)?;

    info!(
        "Mission created: {} (id: {}, scientist: {}, planet: {})",
        mission.name, mission.id, mission.scientist_id, mission.planet_id
    );
    Ok((StatusCode::CREATED, Json(mission)))
}
