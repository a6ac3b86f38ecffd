//! Link operations: add, list, get, update, remove.

use anyhow::Result;
use sqlx::Row;

use super::db::{unix_timestamp, LinkDb};
use super::types::{IconKind, LinkIcon, LinkId, LinkRecord, NewLink};

fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> LinkRecord {
    let icon_kind: String = row.get("icon_kind");
    let icon_value: String = row.get("icon_value");
    LinkRecord {
        id: row.get("id"),
        title: row.get("title"),
        url: row.get("url"),
        icon: LinkIcon {
            kind: IconKind::from_str(&icon_kind),
            value: icon_value,
        },
        category_id: row.get("category_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl LinkDb {
    /// Insert a new link. A missing category falls back to the default
    /// (lowest-id) category, which always exists.
    pub async fn add_link(&self, link: &NewLink) -> Result<LinkId> {
        let category_id = match link.category_id {
            Some(id) => id,
            None => self.default_category_id().await?,
        };
        let now = unix_timestamp();

        let row = sqlx::query(
            r#"
            INSERT INTO links (title, url, icon_kind, icon_value, category_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            RETURNING id
            "#,
        )
        .bind(&link.title)
        .bind(&link.url)
        .bind(link.icon.kind.as_str())
        .bind(&link.icon.value)
        .bind(category_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("id"))
    }

    /// List all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<LinkRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, url, icon_kind, icon_value, category_id, created_at, updated_at
            FROM links
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    /// Fetch a single link row.
    pub async fn get_link(&self, id: LinkId) -> Result<Option<LinkRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, url, icon_kind, icon_value, category_id, created_at, updated_at
            FROM links
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(record_from_row))
    }

    /// Overwrite a link's fields. Returns false when the id doesn't exist.
    pub async fn update_link(
        &self,
        id: LinkId,
        title: &str,
        url: &str,
        icon: &LinkIcon,
        category_id: i64,
    ) -> Result<bool> {
        let now = unix_timestamp();
        let result = sqlx::query(
            r#"
            UPDATE links
            SET title = ?1, url = ?2, icon_kind = ?3, icon_value = ?4,
                category_id = ?5, updated_at = ?6
            WHERE id = ?7
            "#,
        )
        .bind(title)
        .bind(url)
        .bind(icon.kind.as_str())
        .bind(&icon.value)
        .bind(category_id)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a link. Returns false when the id doesn't exist.
    pub async fn remove_link(&self, id: LinkId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM links WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
