//! Setlist detail page: ordered songs plus add, remove, reorder actions

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;
use setlistify_common::db::{Setlist, SetlistSong, Song};
use std::collections::HashSet;
use tracing::info;

use super::ActionResponse;
use crate::{
    error::{ApiError, ApiResult},
    forms::{parse_id, ReorderForm, SongIdForm},
    AppState,
};

/// GET /setlists/:id response
#[derive(Debug, Serialize)]
pub struct SetlistPage {
    pub setlist: Setlist,
    /// Members in position order
    pub setlist_songs: Vec<SetlistSong>,
    /// Library songs not yet in this setlist, by title
    pub available_songs: Vec<Song>,
    /// Sum of member durations in seconds; unknown durations count as zero
    pub total_duration: i64,
}

impl SetlistPage {
    pub fn assemble(setlist: Setlist, setlist_songs: Vec<SetlistSong>, library: Vec<Song>) -> Self {
        let member_ids: HashSet<i64> = setlist_songs.iter().map(|s| s.song.id).collect();

        let available_songs = library
            .into_iter()
            .filter(|song| !member_ids.contains(&song.id))
            .collect();

        let total_duration: i64 = setlist_songs
            .iter()
            .filter_map(|s| s.song.duration_seconds)
            .sum();

        Self {
            setlist,
            setlist_songs,
            available_songs,
            total_duration,
        }
    }
}

fn setlist_id(raw: &str) -> ApiResult<i64> {
    parse_id(raw).ok_or_else(|| ApiError::BadRequest(format!("Invalid setlist id: {}", raw)))
}

async fn require_setlist(state: &AppState, id: i64) -> ApiResult<Setlist> {
    state
        .store
        .get_setlist(id)
        .await
        .map_err(ApiError::storage("Failed to load setlist"))?
        .ok_or_else(|| ApiError::NotFound(format!("Setlist not found: {}", id)))
}

/// GET /setlists/:id
pub async fn load_setlist(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<SetlistPage>> {
    let id = setlist_id(&raw_id)?;
    let setlist = require_setlist(&state, id).await?;

    let setlist_songs = state
        .store
        .list_setlist_songs(id)
        .await
        .map_err(ApiError::storage("Failed to load setlist songs"))?;

    let library = state
        .store
        .list_songs()
        .await
        .map_err(ApiError::storage("Failed to load songs"))?;

    Ok(Json(SetlistPage::assemble(setlist, setlist_songs, library)))
}

/// POST /setlists/:id/add-song
///
/// The song is appended after the current last position.
pub async fn add_song(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<SongIdForm>,
) -> ApiResult<Json<ActionResponse>> {
    let id = setlist_id(&raw_id)?;
    let song_id = form.parse()?;
    require_setlist(&state, id).await?;

    let song = state
        .store
        .get_song(song_id)
        .await
        .map_err(ApiError::storage("Failed to load song"))?
        .ok_or_else(|| ApiError::NotFound(format!("Song not found: {}", song_id)))?;

    state
        .store
        .add_song_to_setlist(id, song_id)
        .await
        .map_err(ApiError::storage("Failed to add song to setlist"))?;

    Ok(Json(ActionResponse::ok("Song added to setlist").with_song(song)))
}

/// POST /setlists/:id/remove-song
///
/// Remaining positions keep their gap; display order is unaffected.
pub async fn remove_song(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<SongIdForm>,
) -> ApiResult<Json<ActionResponse>> {
    let id = setlist_id(&raw_id)?;
    let song_id = form.parse()?;
    require_setlist(&state, id).await?;

    let removed = state
        .store
        .remove_song_from_setlist(id, song_id)
        .await
        .map_err(ApiError::storage("Failed to remove song from setlist"))?;

    if !removed {
        return Err(ApiError::NotFound(format!("Song {} is not in setlist {}", song_id, id)));
    }

    Ok(Json(ActionResponse::ok("Song removed from setlist")))
}

/// POST /setlists/:id/reorder
pub async fn reorder(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<ReorderForm>,
) -> ApiResult<Json<ActionResponse>> {
    let id = setlist_id(&raw_id)?;
    let new_order = form.parse()?;
    require_setlist(&state, id).await?;

    state
        .store
        .reorder_setlist(id, &new_order)
        .await
        .map_err(ApiError::storage("Failed to reorder setlist"))?;

    info!(setlist_id = id, songs = new_order.len(), "Setlist reordered");

    Ok(Json(ActionResponse::ok("Setlist order updated")))
}

/// Build setlist detail routes
pub fn setlist_detail_routes() -> Router<AppState> {
    Router::new()
        .route("/setlists/:id", get(load_setlist))
        .route("/setlists/:id/add-song", post(add_song))
        .route("/setlists/:id/remove-song", post(remove_song))
        .route("/setlists/:id/reorder", post(reorder))
}
