//! Planet route handlers
//!
//! Planets are read-only over HTTP.

use crate::error::ApiResult;
use crate::models::Planet;
use crate::state::SharedState;
use axum::{extract::State, Json};
use tracing::debug;

/// List all planets
pub async fn list_planets(State(state): State<SharedState>) -> ApiResult<Json<Vec<Planet>>> {
    let planets = state.repo.list_planets().await?;
    debug!("Listed {} planets", planets.len());
    Ok(Json(planets))
}
