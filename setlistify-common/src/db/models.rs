//! Database models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A song in the library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub key: Option<String>,
    pub tempo: Option<i64>,
    pub duration_seconds: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
}

/// Field values for creating or updating a song
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSong {
    pub title: String,
    pub key: Option<String>,
    pub tempo: Option<i64>,
    pub duration_seconds: Option<i64>,
}

/// A named, ordered collection of songs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Setlist {
    pub id: i64,
    pub name: String,
    pub created_at: Option<NaiveDateTime>,
}

/// A song as it appears in a setlist, with its slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SetlistSong {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub song: Song,
    pub position: i64,
}
