//! `linkpad category` – manage categories.

use anyhow::{bail, Result};
use linkpad_core::link_db::LinkDb;

use crate::cli::CategoryCommand;

pub async fn run_category(db: &LinkDb, cmd: CategoryCommand) -> Result<()> {
    match cmd {
        CategoryCommand::Add { name } => {
            let id = db.add_category(&name).await?;
            println!("Added category {id}: {name}");
        }
        CategoryCommand::List => {
            let categories = db.list_categories().await?;
            println!("{:<6} {}", "ID", "NAME");
            for category in categories {
                println!("{:<6} {}", category.id, category.name);
            }
        }
        CategoryCommand::Rename { id, name } => {
            if !db.rename_category(id, &name).await? {
                bail!("no category with id {id}");
            }
            println!("Renamed category {id} to {name}");
        }
        CategoryCommand::Remove { id } => {
            db.remove_category(id).await?;
            println!("Removed category {id}; its links moved to the default category");
        }
    }
    Ok(())
}
