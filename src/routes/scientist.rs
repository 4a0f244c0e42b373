//! Scientist route handlers
//!
//! Collection: list and create. Item: read, update and delete by id.

use crate::error::{
    not_found_error, rejected_write, unexpected_error, validation_error, ApiResult,
};
use crate::models::{first_blank_field, Scientist, ScientistPayload, SCIENTIST_REQUIRED};
use crate::routes::{decode, json_object};
use crate::state::SharedState;
use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{debug, info};

const ENTITY: &str = "Scientist";

/// Ids that don't parse as integers can't name a scientist
fn scientist_id(path: Result<Path<i32>, PathRejection>) -> ApiResult<i32> {
    path.map(|Path(id)| id).map_err(|_| not_found_error(ENTITY))
}

/// List all scientists
pub async fn list_scientists(State(state): State<SharedState>) -> ApiResult<Json<Vec<Scientist>>> {
    let scientists = state.repo.list_scientists().await?;
    debug!("Listed {} scientists", scientists.len());
    Ok(Json(scientists))
}

/// Create a scientist; every failure is reported as a validation error
pub async fn create_scientist(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Scientist>)> {
    let body = json_object(payload).map_err(validation_error)?;
    if let Some(field) = first_blank_field(&body, &SCIENTIST_REQUIRED) {
        return Err(validation_error(format!("{} cannot be empty", field)));
    }
    let payload: ScientistPayload = decode(body).map_err(validation_error)?;
    let fields = payload.into_fields()?;

    let scientist = state
        .repo
        .insert_scientist(fields)
        .await
        .map_err(rejected_write)?;

    info!("Scientist created: {} (id: {})", scientist.name, scientist.id);
    Ok((StatusCode::CREATED, Json(scientist)))
}

/// Get a scientist by id
pub async fn get_scientist(
    State(state): State<SharedState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<Scientist>> {
    let id = scientist_id(path)?;
    debug!("Getting scientist: {}", id);

    state
        .repo
        .find_scientist(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found_error(ENTITY))
}

/// Update a scientist.
///
/// Both `name` and `field_of_study` must be present and non-empty, and the
/// payload is checked before the lookup, so a bad payload on an unknown id
/// is still a 400. Emptiness is checked on the raw body first; only a body
/// that passes it and still fails to decode is an unexpected error.
pub async fn update_scientist(
    State(state): State<SharedState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Scientist>)> {
    let id = scientist_id(path)?;
    let body = json_object(payload).map_err(unexpected_error)?;
    if let Some(field) = first_blank_field(&body, &SCIENTIST_REQUIRED) {
        return Err(validation_error(format!("{} cannot be empty", field)));
    }
    let payload: ScientistPayload = decode(body).map_err(unexpected_error)?;
    let fields = payload.into_fields()?;
    debug!("Updating scientist: {}", id);

    let scientist = state
        .repo
        .update_scientist(id, fields)
        .await
        .map_err(unexpected_error)?
        .ok_or_else(|| not_found_error(ENTITY))?;

    info!("Scientist updated: {} (id: {})", scientist.name, scientist.id);
    Ok((StatusCode::ACCEPTED, Json(scientist)))
}

/// Delete a scientist and its missions
pub async fn delete_scientist(
    State(state): State<SharedState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = scientist_id(path)?;

    let missions = state
        .repo
        .delete_scientist(id)
        .await?
        .ok_or_else(|| not_found_error(ENTITY))?;

    info!("Scientist {} deleted ({} missions removed)", id, missions);
    Ok(StatusCode::NO_CONTENT)
}
