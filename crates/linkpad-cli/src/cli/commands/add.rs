//! `linkpad add` – create a link record, deciding its icon.

use anyhow::Result;
use linkpad_core::config::LinkpadConfig;
use linkpad_core::link_db::{LinkDb, LinkIcon, NewLink};

use super::icon::{resolve_icon, IconArgs};

pub async fn run_add(
    db: &LinkDb,
    cfg: &LinkpadConfig,
    title: String,
    url: String,
    category: Option<i64>,
    icon_args: IconArgs,
) -> Result<()> {
    anyhow::ensure!(!title.trim().is_empty(), "title must not be empty");
    anyhow::ensure!(!url.trim().is_empty(), "url must not be empty");

    let icon = resolve_icon(cfg, &url, &icon_args, LinkIcon::default()).await?;

    let id = db
        .add_link(&NewLink {
            title: title.clone(),
            url,
            icon,
            category_id: category,
        })
        .await?;
    println!("Added link {id}: {title}");
    Ok(())
}
