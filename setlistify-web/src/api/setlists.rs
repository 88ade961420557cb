//! Setlist index page: list, create, delete

use axum::{
    extract::State,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;
use setlistify_common::db::Setlist;
use tracing::info;

use super::ActionResponse;
use crate::{
    error::{ApiError, ApiResult},
    forms::{IdForm, SetlistForm},
    AppState,
};

/// GET /setlists response
#[derive(Debug, Serialize)]
pub struct SetlistsPage {
    pub setlists: Vec<Setlist>,
}

/// GET /setlists
///
/// Newest first.
pub async fn load_setlists(State(state): State<AppState>) -> ApiResult<Json<SetlistsPage>> {
    let setlists = state
        .store
        .list_setlists()
        .await
        .map_err(ApiError::storage("Failed to load setlists"))?;

    Ok(Json(SetlistsPage { setlists }))
}

/// POST /setlists/create
pub async fn create_setlist(
    State(state): State<AppState>,
    Form(form): Form<SetlistForm>,
) -> ApiResult<Json<ActionResponse>> {
    let name = form.validate()?;

    let setlist = state
        .store
        .create_setlist(&name)
        .await
        .map_err(ApiError::storage("Failed to create setlist"))?;

    info!(setlist_id = setlist.id, name = %setlist.name, "Setlist created");

    Ok(Json(ActionResponse::ok("Setlist created successfully").with_setlist(setlist)))
}

/// POST /setlists/delete
pub async fn delete_setlist(
    State(state): State<AppState>,
    Form(form): Form<IdForm>,
) -> ApiResult<Json<ActionResponse>> {
    let id = form.parse("setlist")?;

    let deleted = state
        .store
        .delete_setlist(id)
        .await
        .map_err(ApiError::storage("Failed to delete setlist"))?;

    if !deleted {
        return Err(ApiError::NotFound(format!("Setlist not found: {}", id)));
    }

    info!(setlist_id = id, "Setlist deleted");

    Ok(Json(ActionResponse::ok("Setlist deleted successfully")))
}

/// Build setlist index routes
pub fn setlist_routes() -> Router<AppState> {
    Router::new()
        .route("/setlists", get(load_setlists))
        .route("/setlists/create", post(create_setlist))
        .route("/setlists/delete", post(delete_setlist))
}
