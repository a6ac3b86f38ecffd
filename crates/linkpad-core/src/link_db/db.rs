//! SQLite-backed link database: connection, migrations, timestamps.
//!
//! Link and category operations live in `links` and `categories`.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use super::types::DEFAULT_CATEGORY_NAME;

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the SQLite-backed link database.
///
/// The database file is stored under the XDG state directory:
/// `~/.local/state/linkpad/links.db`.
#[derive(Clone)]
pub struct LinkDb {
    pub(crate) pool: Pool<Sqlite>,
}

impl LinkDb {
    /// Open (or create) the default link database and run migrations.
    pub async fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("linkpad")?;
        let state_dir = xdg_dirs.get_state_home();
        let db_path = state_dir.join("links.db");

        tokio::fs::create_dir_all(&state_dir).await?;
        Self::open_uri(&(path_to_sqlite_uri(&db_path) + "?mode=rwc")).await
    }

    /// Open (or create) the database at a specific path. Creates parent dirs
    /// if needed. Intended for tests so the DB can live in a temp directory.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Self::open_uri(&(path_to_sqlite_uri(path) + "?mode=rwc")).await
    }

    async fn open_uri(uri: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect(uri)
            .await?;
        let db = LinkDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        // `icon_kind`/`icon_value` hold either an emoji or a stored icon
        // filename; `category_id` always points at an existing category.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS links (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                url TEXT NOT NULL,
                icon_kind TEXT NOT NULL DEFAULT 'emoji',
                icon_value TEXT NOT NULL DEFAULT '🔗',
                category_id INTEGER NOT NULL DEFAULT 1,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        self.seed_default_category().await?;
        Ok(())
    }

    /// Ensure at least one category exists (first run seeds the default).
    async fn seed_default_category(&self) -> Result<()> {
        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        if count == 0 {
            sqlx::query("INSERT INTO categories (name) VALUES (?1)")
                .bind(DEFAULT_CATEGORY_NAME)
                .execute(&self.pool)
                .await?;
            tracing::info!("seeded default category {:?}", DEFAULT_CATEGORY_NAME);
        }
        Ok(())
    }
}

/// Current time as Unix seconds (for DB timestamps).
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// Open an in-memory database for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<LinkDb> {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let db = LinkDb { pool };
    db.migrate().await?;
    Ok(db)
}
