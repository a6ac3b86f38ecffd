//! `linkpad remove` – delete a link by ID.

use anyhow::{bail, Result};
use linkpad_core::link_db::LinkDb;

pub async fn run_remove(db: &LinkDb, id: i64) -> Result<()> {
    if !db.remove_link(id).await? {
        bail!("no link with id {id}");
    }
    println!("Removed link {id}");
    Ok(())
}
