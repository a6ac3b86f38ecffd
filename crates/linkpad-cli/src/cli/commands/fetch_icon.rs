//! `linkpad fetch-icon` – run the favicon pipeline without touching records.

use anyhow::Result;
use linkpad_core::config::LinkpadConfig;
use linkpad_core::favicon::FaviconFetcher;
use linkpad_core::normalize::Normalizer;
use linkpad_core::store::IconStore;

pub async fn run_fetch_icon(cfg: &LinkpadConfig, url: String, prefix: String) -> Result<()> {
    let fetcher = FaviconFetcher::new(cfg.fetch_options());
    let normalizer = Normalizer::new(IconStore::open_from_config(cfg)?, cfg.canonical_format()?);

    let outcome = tokio::task::spawn_blocking(move || {
        fetcher
            .resolve(&url)
            .map(|payload| (payload.source_url.clone(), normalizer.normalize(&payload.bytes, &prefix)))
    })
    .await?;

    match outcome {
        Some((source, Ok(icon))) => {
            println!("Stored {icon} (from {source})");
        }
        Some((source, Err(err))) => {
            println!("Found an icon at {source} but it was not a usable image: {err}");
        }
        None => {
            println!("No favicon found.");
        }
    }
    Ok(())
}
