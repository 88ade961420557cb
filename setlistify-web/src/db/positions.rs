//! Setlist membership and position management
//!
//! Every membership row carries a `position` that is unique within its
//! setlist (`UNIQUE(setlist_id, position)`). Positions start at 1 and are
//! assigned as `max + 1` on add. Removal leaves a gap; gaps are never closed.
//!
//! # Reordering
//!
//! Writing the target positions directly does not work: SQLite checks the
//! unique constraint after every statement and cannot defer it, so swapping
//! positions 1 and 2 fails on the first UPDATE. Reorder instead runs two
//! passes inside one transaction:
//!
//! 1. **Staging**: the row for list index `i` gets `-(i + 1)`. Negative values
//!    never collide with live positions or with each other.
//! 2. **Final**: the same row gets `i + 1`. Every addressed row was moved out
//!    of the positive range in pass 1, so these writes cannot collide with
//!    each other.
//!
//! Any failure drops the transaction uncommitted, which rolls back both
//! passes; readers never observe the negative staging values.

use super::{SetlistSong, Store};
use setlistify_common::Result;
use sqlx::SqliteConnection;
use tracing::debug;

/// Reorder pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Staging,
    Final,
}

impl Phase {
    /// Position written for the song at list `index`
    fn position_for(self, index: usize) -> i64 {
        let slot = index as i64 + 1;
        match self {
            Phase::Staging => -slot,
            Phase::Final => slot,
        }
    }
}

/// Write one pass of positions for `song_ids` in list order
///
/// Ids that are not in the setlist update zero rows and are skipped silently.
async fn assign_positions(
    conn: &mut SqliteConnection,
    setlist_id: i64,
    song_ids: &[i64],
    phase: Phase,
) -> Result<()> {
    for (index, song_id) in song_ids.iter().enumerate() {
        sqlx::query("UPDATE setlist_songs SET position = ? WHERE setlist_id = ? AND song_id = ?")
            .bind(phase.position_for(index))
            .bind(setlist_id)
            .bind(song_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

impl Store {
    /// Songs in a setlist with their positions, in position order
    pub async fn list_setlist_songs(&self, setlist_id: i64) -> Result<Vec<SetlistSong>> {
        let songs = sqlx::query_as::<_, SetlistSong>(
            r#"
            SELECT s.id, s.title, s.key, s.tempo, s.duration_seconds, s.created_at, ss.position
            FROM songs s
            JOIN setlist_songs ss ON s.id = ss.song_id
            WHERE ss.setlist_id = ?
            ORDER BY ss.position ASC
            "#,
        )
        .bind(setlist_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(songs)
    }

    /// Highest position in use, 0 for an empty setlist
    pub async fn max_position(&self, setlist_id: i64) -> Result<i64> {
        let max: i64 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(position), 0) FROM setlist_songs WHERE setlist_id = ?",
        )
        .bind(setlist_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(max)
    }

    /// Append a song at `max + 1`
    ///
    /// Reading the max and inserting happen in one statement, so two adds to
    /// the same setlist cannot compute the same slot.
    pub async fn add_song_to_setlist(&self, setlist_id: i64, song_id: i64) -> Result<bool> {
        let position: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO setlist_songs (setlist_id, song_id, position)
            SELECT ?, ?, COALESCE(MAX(position), 0) + 1
            FROM setlist_songs
            WHERE setlist_id = ?
            RETURNING position
            "#,
        )
        .bind(setlist_id)
        .bind(song_id)
        .bind(setlist_id)
        .fetch_one(&self.pool)
        .await?;

        debug!(setlist_id, song_id, position, "Added song to setlist");
        Ok(true)
    }

    /// Remove a song from a setlist, leaving a gap in the positions
    pub async fn remove_song_from_setlist(&self, setlist_id: i64, song_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM setlist_songs WHERE setlist_id = ? AND song_id = ?")
            .bind(setlist_id)
            .bind(song_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Rewrite positions so the song at `song_ids[i]` sits at `i + 1`
    ///
    /// The id list is not checked against the setlist's membership: unknown
    /// ids are no-ops. Rows left out of the list keep their position, and if
    /// one of those blocks a target slot the constraint error rolls the whole
    /// reorder back.
    pub async fn reorder_setlist(&self, setlist_id: i64, song_ids: &[i64]) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        assign_positions(&mut *tx, setlist_id, song_ids, Phase::Staging).await?;
        assign_positions(&mut *tx, setlist_id, song_ids, Phase::Final).await?;

        tx.commit().await?;

        debug!(setlist_id, songs = song_ids.len(), "Reordered setlist");
        Ok(true)
    }
}
