use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use linkpad_core::config;
use linkpad_core::link_db::LinkDb;
use std::path::PathBuf;

mod commands;

use commands::IconArgs;

/// Top-level CLI for the linkpad link dashboard.
#[derive(Debug, Parser)]
#[command(name = "linkpad")]
#[command(about = "linkpad: self-hosted link dashboard with automatic favicons", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Add a link. Without icon options the fallback emoji is used.
    Add {
        /// Display title for the link.
        title: String,

        /// Target URL (may be schemeless; http:// is assumed).
        url: String,

        /// Category to file the link under (default category if omitted).
        #[arg(long)]
        category: Option<i64>,

        /// Use this emoji as the icon.
        #[arg(long, conflicts_with_all = ["icon_file", "fetch_icon"])]
        emoji: Option<String>,

        /// Use a local image file as the icon (normalized before storing).
        #[arg(long, conflicts_with = "fetch_icon")]
        icon_file: Option<PathBuf>,

        /// Try to fetch the site's favicon as the icon.
        #[arg(long)]
        fetch_icon: bool,
    },

    /// Update a link's fields; omitted fields keep their current value.
    Edit {
        /// Link identifier.
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        category: Option<i64>,

        /// Replace the icon with this emoji.
        #[arg(long, conflicts_with_all = ["icon_file", "fetch_icon"])]
        emoji: Option<String>,

        /// Replace the icon with a local image file.
        #[arg(long, conflicts_with = "fetch_icon")]
        icon_file: Option<PathBuf>,

        /// Replace the icon with a freshly fetched favicon.
        #[arg(long)]
        fetch_icon: bool,
    },

    /// List links with their category and icon.
    List,

    /// Remove a link by its ID.
    Remove {
        /// Link identifier.
        id: i64,
    },

    /// Manage categories.
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Resolve and store a favicon without creating a link.
    FetchIcon {
        /// URL to probe (may be schemeless).
        url: String,

        /// Name prefix for the stored icon.
        #[arg(long, default_value = "fetched")]
        prefix: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    /// Create a category.
    Add { name: String },

    /// List categories.
    List,

    /// Rename a category.
    Rename { id: i64, name: String },

    /// Remove a category; its links move to the first surviving one.
    Remove { id: i64 },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Add {
                title,
                url,
                category,
                emoji,
                icon_file,
                fetch_icon,
            } => {
                let db = LinkDb::open_default().await?;
                commands::run_add(
                    &db,
                    &cfg,
                    title,
                    url,
                    category,
                    IconArgs { emoji, icon_file, fetch_icon },
                )
                .await
            }
            CliCommand::Edit {
                id,
                title,
                url,
                category,
                emoji,
                icon_file,
                fetch_icon,
            } => {
                let db = LinkDb::open_default().await?;
                commands::run_edit(
                    &db,
                    &cfg,
                    id,
                    title,
                    url,
                    category,
                    IconArgs { emoji, icon_file, fetch_icon },
                )
                .await
            }
            CliCommand::List => {
                let db = LinkDb::open_default().await?;
                commands::run_list(&db).await
            }
            CliCommand::Remove { id } => {
                let db = LinkDb::open_default().await?;
                commands::run_remove(&db, id).await
            }
            CliCommand::Category(cmd) => {
                let db = LinkDb::open_default().await?;
                commands::run_category(&db, cmd).await
            }
            CliCommand::FetchIcon { url, prefix } => {
                commands::run_fetch_icon(&cfg, url, prefix).await
            }
            CliCommand::Completions { shell } => {
                commands::run_completions(shell, &mut Cli::command());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_parses_icon_options() {
        let cli = Cli::try_parse_from([
            "linkpad", "add", "Home", "example.com", "--fetch-icon", "--category", "2",
        ])
        .unwrap();
        match cli.command {
            CliCommand::Add { title, url, category, fetch_icon, emoji, icon_file } => {
                assert_eq!(title, "Home");
                assert_eq!(url, "example.com");
                assert_eq!(category, Some(2));
                assert!(fetch_icon);
                assert!(emoji.is_none());
                assert!(icon_file.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn emoji_and_fetch_icon_conflict() {
        let parsed = Cli::try_parse_from([
            "linkpad", "add", "Home", "example.com", "--emoji", "🏠", "--fetch-icon",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn category_subcommands_parse() {
        let cli = Cli::try_parse_from(["linkpad", "category", "rename", "3", "Work"]).unwrap();
        match cli.command {
            CliCommand::Category(CategoryCommand::Rename { id, name }) => {
                assert_eq!(id, 3);
                assert_eq!(name, "Work");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn fetch_icon_default_prefix() {
        let cli = Cli::try_parse_from(["linkpad", "fetch-icon", "example.com"]).unwrap();
        match cli.command {
            CliCommand::FetchIcon { url, prefix } => {
                assert_eq!(url, "example.com");
                assert_eq!(prefix, "fetched");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
