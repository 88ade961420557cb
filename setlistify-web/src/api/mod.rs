//! HTTP API handlers for setlistify-web
//!
//! Page loads are `GET` routes returning JSON; form actions are `POST`
//! routes taking `application/x-www-form-urlencoded` bodies.

pub mod health;
pub mod setlist_detail;
pub mod setlists;
pub mod songs;

use serde::Serialize;
use setlistify_common::db::{Setlist, Song};

pub use health::health_routes;
pub use setlist_detail::setlist_detail_routes;
pub use setlists::setlist_routes;
pub use songs::song_routes;

/// Body returned by every successful form action
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song: Option<Song>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setlist: Option<Setlist>,
}

impl ActionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            song: None,
            setlist: None,
        }
    }

    pub fn with_song(mut self, song: Song) -> Self {
        self.song = Some(song);
        self
    }

    pub fn with_setlist(mut self, setlist: Setlist) -> Self {
        self.setlist = Some(setlist);
        self
    }
}
