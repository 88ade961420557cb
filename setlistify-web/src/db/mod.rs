//! Database access layer for setlistify-web
//!
//! [`Store`] is the single handle to persisted state. It is constructed once
//! at startup (or per test, in memory) and handed to the request handlers
//! through [`crate::AppState`].

use setlistify_common::Result;
use sqlx::SqlitePool;
use std::path::Path;

mod positions;
mod setlists;
mod songs;

pub use setlistify_common::db::{NewSong, Setlist, SetlistSong, Song};

/// Song/setlist store
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Wrap an already-initialized pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database file and bring its schema up to date
    pub async fn open(db_path: &Path) -> Result<Self> {
        let pool = setlistify_common::db::init_database(db_path).await?;
        Ok(Self::new(pool))
    }

    /// Private in-memory store with the full schema
    pub async fn in_memory() -> Result<Self> {
        let pool = setlistify_common::db::init_in_memory().await?;
        Ok(Self::new(pool))
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
