//! Category operations: list, add, rename, remove with link reassignment.

use anyhow::{bail, Result};
use sqlx::Row;

use super::db::{unix_timestamp, LinkDb};
use super::types::{Category, CategoryId};

impl LinkDb {
    /// List all categories, oldest first.
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name FROM categories ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| Category {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }

    /// The default category: the lowest id. One always exists after migrate.
    pub async fn default_category_id(&self) -> Result<CategoryId> {
        let id: Option<i64> = sqlx::query_scalar("SELECT id FROM categories ORDER BY id ASC LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        match id {
            Some(id) => Ok(id),
            None => bail!("no categories exist; database was not migrated"),
        }
    }

    pub async fn get_category(&self, id: CategoryId) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name FROM categories WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|row| Category {
            id: row.get("id"),
            name: row.get("name"),
        }))
    }

    pub async fn add_category(&self, name: &str) -> Result<CategoryId> {
        if name.trim().is_empty() {
            bail!("category name must not be empty");
        }
        let row = sqlx::query("INSERT INTO categories (name) VALUES (?1) RETURNING id")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("id"))
    }

    /// Rename a category. Returns false when the id doesn't exist.
    pub async fn rename_category(&self, id: CategoryId, name: &str) -> Result<bool> {
        if name.trim().is_empty() {
            bail!("category name must not be empty");
        }
        let result = sqlx::query("UPDATE categories SET name = ?1 WHERE id = ?2")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a category, reassigning its links to another surviving one.
    ///
    /// The last remaining category can never be deleted, so every link
    /// always has a category to land in.
    pub async fn remove_category(&self, id: CategoryId) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM categories")
            .fetch_one(&mut *tx)
            .await?;
        if count <= 1 {
            bail!("cannot delete the only category");
        }

        let replacement: Option<i64> =
            sqlx::query_scalar("SELECT id FROM categories WHERE id != ?1 ORDER BY id ASC LIMIT 1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(replacement) = replacement else {
            bail!("no surviving category to reassign links to");
        };

        let now = unix_timestamp();
        sqlx::query(
            "UPDATE links SET category_id = ?1, updated_at = ?2 WHERE category_id = ?3",
        )
        .bind(replacement)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(category = id, reassigned_to = replacement, "category removed");
        Ok(())
    }
}
