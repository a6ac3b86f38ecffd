//! `linkpad list` – show all links with category and icon.

use anyhow::Result;
use linkpad_core::link_db::{IconKind, LinkDb};
use std::collections::HashMap;

pub async fn run_list(db: &LinkDb) -> Result<()> {
    let links = db.list_links().await?;
    if links.is_empty() {
        println!("No links yet.");
        return Ok(());
    }

    let categories: HashMap<i64, String> = db
        .list_categories()
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    println!("{:<6} {:<8} {:<14} {:<24} {}", "ID", "ICON", "CATEGORY", "TITLE", "URL");
    for link in links {
        let icon = match link.icon.kind {
            IconKind::Emoji => link.icon.value.clone(),
            IconKind::Image => format!("[{}]", link.icon.value),
        };
        let category = categories
            .get(&link.category_id)
            .map(String::as_str)
            .unwrap_or("-");
        println!(
            "{:<6} {:<8} {:<14} {:<24} {}",
            link.id, icon, category, link.title, link.url
        );
    }
    Ok(())
}
