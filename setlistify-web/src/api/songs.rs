//! Song library page: list, create, update, delete

use axum::{
    extract::State,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;
use setlistify_common::db::Song;
use tracing::info;

use super::ActionResponse;
use crate::{
    error::{ApiError, ApiResult},
    forms::{IdForm, SongForm},
    AppState,
};

/// GET /songs response
#[derive(Debug, Serialize)]
pub struct SongsPage {
    pub songs: Vec<Song>,
}

/// GET /songs
pub async fn load_songs(State(state): State<AppState>) -> ApiResult<Json<SongsPage>> {
    let songs = state
        .store
        .list_songs()
        .await
        .map_err(ApiError::storage("Failed to load songs"))?;

    Ok(Json(SongsPage { songs }))
}

/// POST /songs/create
pub async fn create_song(
    State(state): State<AppState>,
    Form(form): Form<SongForm>,
) -> ApiResult<Json<ActionResponse>> {
    let new_song = form.validate_new()?;

    let song = state
        .store
        .create_song(&new_song)
        .await
        .map_err(ApiError::storage("Failed to create song"))?;

    info!(song_id = song.id, title = %song.title, "Song created");

    Ok(Json(ActionResponse::ok("Song created successfully").with_song(song)))
}

/// POST /songs/update
pub async fn update_song(
    State(state): State<AppState>,
    Form(form): Form<SongForm>,
) -> ApiResult<Json<ActionResponse>> {
    let (id, changes) = form.validate_update()?;

    let song = state
        .store
        .update_song(id, &changes)
        .await
        .map_err(ApiError::storage("Failed to update song"))?;

    info!(song_id = song.id, "Song updated");

    Ok(Json(ActionResponse::ok("Song updated successfully").with_song(song)))
}

/// POST /songs/delete
///
/// Memberships referencing the song are removed by the cascade.
pub async fn delete_song(
    State(state): State<AppState>,
    Form(form): Form<IdForm>,
) -> ApiResult<Json<ActionResponse>> {
    let id = form.parse("song")?;

    let deleted = state
        .store
        .delete_song(id)
        .await
        .map_err(ApiError::storage("Failed to delete song"))?;

    if !deleted {
        return Err(ApiError::NotFound(format!("Song not found: {}", id)));
    }

    info!(song_id = id, "Song deleted");

    Ok(Json(ActionResponse::ok("Song deleted successfully")))
}

/// Build song routes
pub fn song_routes() -> Router<AppState> {
    Router::new()
        .route("/songs", get(load_songs))
        .route("/songs/create", post(create_song))
        .route("/songs/update", post(update_song))
        .route("/songs/delete", post(delete_song))
}
