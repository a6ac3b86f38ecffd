//! `linkpad edit` – update a link; omitted fields keep their values.

use anyhow::{bail, Result};
use linkpad_core::config::LinkpadConfig;
use linkpad_core::link_db::LinkDb;

use super::icon::{resolve_icon, IconArgs};

#[allow(clippy::too_many_arguments)]
pub async fn run_edit(
    db: &LinkDb,
    cfg: &LinkpadConfig,
    id: i64,
    title: Option<String>,
    url: Option<String>,
    category: Option<i64>,
    icon_args: IconArgs,
) -> Result<()> {
    let Some(current) = db.get_link(id).await? else {
        bail!("no link with id {id}");
    };

    let title = title.unwrap_or(current.title);
    let url = url.unwrap_or(current.url);
    let category_id = category.unwrap_or(current.category_id);

    // A failed fetch or upload keeps the link's existing icon, mirroring
    // the degrade-to-fallback contract of the pipeline.
    let icon = resolve_icon(cfg, &url, &icon_args, current.icon).await?;

    if !db.update_link(id, &title, &url, &icon, category_id).await? {
        bail!("no link with id {id}");
    }
    println!("Updated link {id}: {title}");
    Ok(())
}
