//! Application state management
//!
//! Contains shared state accessible across all handlers.

use crate::db::Repository;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Storage context; every handler goes through it, there is no global handle
    pub repo: Box<dyn Repository>,
}

impl AppState {
    pub fn new(repo: impl Repository + 'static) -> Self {
        Self {
            repo: Box::new(repo),
        }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
