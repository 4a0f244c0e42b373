//! Route definitions and router setup
//!
//! Configures all API routes and middleware.

mod mission;
mod planet;
mod scientist;

use crate::config::Settings;
use crate::state::SharedState;
use axum::{
    extract::rejection::JsonRejection,
    http::{header, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::Level;

/// Create the application router with all routes and middleware
pub fn create_router(state: SharedState, settings: &Settings) -> Router {
    let cors = build_cors_layer(settings);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let middleware = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(trace_layer)
        .layer(CompressionLayer::new())
        .layer(cors)
        .propagate_x_request_id();

    Router::new()
        .route("/", get(home))
        // Scientists
        .route(
            "/scientists",
            get(scientist::list_scientists).post(scientist::create_scientist),
        )
        .route(
            "/scientists/{id}",
            get(scientist::get_scientist)
                .patch(scientist::update_scientist)
                .delete(scientist::delete_scientist),
        )
        // Planets
        .route("/planets", get(planet::list_planets))
        // Missions
        .route("/missions", post(mission::create_mission))
        .layer(middleware)
        .with_state(state)
}

/// Build CORS layer from settings
fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<_> = settings
        .cors
        .allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}

/// Unwrap a request body that must be a JSON object
fn json_object(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, String> {
    let Json(value) = payload.map_err(|e| e.body_text())?;
    if !value.is_object() {
        return Err("request body must be a JSON object".to_string());
    }
    Ok(value)
}

/// Decode a JSON object into a typed payload.
///
/// Callers go through [`json_object`] first; serde would otherwise accept a
/// positional array for a struct payload.
fn decode<T: DeserializeOwned>(body: Value) -> Result<T, String> {
    serde_json::from_value(body).map_err(|e| e.to_string())
}

/// Root endpoint: 200 with an empty body
async fn home() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::create_router;
    use crate::config::Settings;
    use crate::db::{MemoryRepository, Repository, StoreError};
    use crate::models::{Mission, NewMission, NewPlanet, Planet, Scientist, ScientistFields};
    use crate::state::{AppState, SharedState};
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Router over a fresh in-memory store, plus the state for seeding
    pub fn test_app() -> (Router, SharedState) {
        let state = Arc::new(AppState::new(MemoryRepository::new()));
        let router = create_router(state.clone(), &Settings::default());
        (router, state)
    }

    /// Store whose every call fails, for checking how handlers report storage errors
    pub struct FailingRepository;

    fn unavailable<T>() -> Result<T, StoreError> {
        Err(StoreError::MissingReference("scientist"))
    }

    #[async_trait]
    impl Repository for FailingRepository {
        async fn list_scientists(&self) -> Result<Vec<Scientist>, StoreError> {
            unavailable()
        }

        async fn find_scientist(&self, _id: i32) -> Result<Option<Scientist>, StoreError> {
            unavailable()
        }

        async fn insert_scientist(&self, _fields: ScientistFields) -> Result<Scientist, StoreError> {
            unavailable()
        }

        async fn update_scientist(
            &self,
            _id: i32,
            _fields: ScientistFields,
        ) -> Result<Option<Scientist>, StoreError> {
            unavailable()
        }

        async fn delete_scientist(&self, _id: i32) -> Result<Option<u64>, StoreError> {
            unavailable()
        }

        async fn list_planets(&self) -> Result<Vec<Planet>, StoreError> {
            unavailable()
        }

        async fn insert_planet(&self, _planet: NewPlanet) -> Result<Planet, StoreError> {
            unavailable()
        }

        async fn insert_mission(&self, _mission: NewMission) -> Result<Mission, StoreError> {
            unavailable()
        }

        async fn find_missions_by_scientist(&self, _id: i32) -> Result<Vec<Mission>, StoreError> {
            unavailable()
        }

        async fn find_missions_by_planet(&self, _id: i32) -> Result<Vec<Mission>, StoreError> {
            unavailable()
        }
    }

    /// Router whose store rejects every call
    pub fn failing_app() -> Router {
        let state = Arc::new(AppState::new(FailingRepository));
        create_router(state, &Settings::default())
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty)
    pub async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = match body {
            Some(json) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => Request::builder().method(method).uri(uri).body(Body::empty()),
        }
        .unwrap_or_else(|err| panic!("failed to build request: {err}"));

        send_request(router, request).await
    }

    pub async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = match router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(err) => panic!("router request failed: {err}"),
        };
        let status = response.status();
        let bytes = match to_bytes(response.into_body(), 1024 * 1024).await {
            Ok(bytes) => bytes,
            Err(err) => panic!("failed to read response body: {err}"),
        };
        if bytes.is_empty() {
            return (status, Value::Null);
        }
        match serde_json::from_slice(&bytes) {
            Ok(value) => (status, value),
            Err(err) => panic!("response body is not JSON: {err}"),
        }
    }
}
