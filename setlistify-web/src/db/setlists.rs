//! Setlist persistence

use super::{Setlist, Store};
use setlistify_common::Result;
use tracing::debug;

impl Store {
    /// All setlists, newest first
    pub async fn list_setlists(&self) -> Result<Vec<Setlist>> {
        // created_at has one-second resolution; id breaks ties in insertion order
        let setlists = sqlx::query_as::<_, Setlist>(
            "SELECT id, name, created_at FROM setlists ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(setlists)
    }

    /// Load setlist by id
    pub async fn get_setlist(&self, id: i64) -> Result<Option<Setlist>> {
        let setlist =
            sqlx::query_as::<_, Setlist>("SELECT id, name, created_at FROM setlists WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(setlist)
    }

    /// Insert a setlist and return the stored row
    pub async fn create_setlist(&self, name: &str) -> Result<Setlist> {
        let setlist = sqlx::query_as::<_, Setlist>(
            "INSERT INTO setlists (name) VALUES (?) RETURNING id, name, created_at",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        debug!(setlist_id = setlist.id, name = %setlist.name, "Created setlist");
        Ok(setlist)
    }

    /// Delete a setlist; its memberships go with it (ON DELETE CASCADE)
    pub async fn delete_setlist(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM setlists WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
