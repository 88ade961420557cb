//! Song persistence

use super::{NewSong, Song, Store};
use setlistify_common::{Error, Result};
use tracing::debug;

impl Store {
    /// All songs, ordered by title
    pub async fn list_songs(&self) -> Result<Vec<Song>> {
        let songs = sqlx::query_as::<_, Song>(
            r#"
            SELECT id, title, key, tempo, duration_seconds, created_at
            FROM songs
            ORDER BY title ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(songs)
    }

    /// Load song by id
    pub async fn get_song(&self, id: i64) -> Result<Option<Song>> {
        let song = sqlx::query_as::<_, Song>(
            r#"
            SELECT id, title, key, tempo, duration_seconds, created_at
            FROM songs
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(song)
    }

    /// Insert a song and return the stored row
    pub async fn create_song(&self, new_song: &NewSong) -> Result<Song> {
        let song = sqlx::query_as::<_, Song>(
            r#"
            INSERT INTO songs (title, key, tempo, duration_seconds)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, key, tempo, duration_seconds, created_at
            "#,
        )
        .bind(&new_song.title)
        .bind(&new_song.key)
        .bind(new_song.tempo)
        .bind(new_song.duration_seconds)
        .fetch_one(&self.pool)
        .await?;

        debug!(song_id = song.id, title = %song.title, "Created song");
        Ok(song)
    }

    /// Overwrite every editable field of a song
    ///
    /// Returns `Error::NotFound` when no song has this id.
    pub async fn update_song(&self, id: i64, new_song: &NewSong) -> Result<Song> {
        let song = sqlx::query_as::<_, Song>(
            r#"
            UPDATE songs
            SET title = ?, key = ?, tempo = ?, duration_seconds = ?
            WHERE id = ?
            RETURNING id, title, key, tempo, duration_seconds, created_at
            "#,
        )
        .bind(&new_song.title)
        .bind(&new_song.key)
        .bind(new_song.tempo)
        .bind(new_song.duration_seconds)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        song.ok_or_else(|| Error::NotFound("Song not found".to_string()))
    }

    /// Delete a song; its setlist memberships go with it (ON DELETE CASCADE)
    pub async fn delete_song(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
