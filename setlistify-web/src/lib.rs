//! setlistify-web library - setlist management service
//!
//! Songs, setlists and the ordered membership between them, persisted in
//! SQLite and exposed as form actions and JSON page loads for a
//! server-rendered frontend.

use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod forms;

pub use crate::db::Store;
pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Song/setlist store (owns the connection pool)
    pub store: Store,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Store) -> Self {
        Self {
            store,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::song_routes())
        .merge(api::setlist_routes())
        .merge(api::setlist_detail_routes())
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
