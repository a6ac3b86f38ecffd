//! Shared icon decision logic for `add` and `edit`.
//!
//! Mirrors the pipeline contract: every resolver or normalizer failure
//! degrades to the provided fallback icon, never to an error.

use anyhow::Result;
use linkpad_core::config::LinkpadConfig;
use linkpad_core::favicon::FaviconFetcher;
use linkpad_core::link_db::LinkIcon;
use linkpad_core::normalize::Normalizer;
use linkpad_core::store::IconStore;
use linkpad_core::upload;
use std::path::PathBuf;

/// Icon-related flags shared by `add` and `edit`.
#[derive(Debug, Default)]
pub struct IconArgs {
    pub emoji: Option<String>,
    pub icon_file: Option<PathBuf>,
    pub fetch_icon: bool,
}

fn normalizer_from_config(cfg: &LinkpadConfig) -> Result<Normalizer> {
    Ok(Normalizer::new(
        IconStore::open_from_config(cfg)?,
        cfg.canonical_format()?,
    ))
}

/// Decides the icon for a link, degrading to `fallback` whenever the
/// requested source yields nothing usable.
pub(super) async fn resolve_icon(
    cfg: &LinkpadConfig,
    url: &str,
    args: &IconArgs,
    fallback: LinkIcon,
) -> Result<LinkIcon> {
    if let Some(emoji) = &args.emoji {
        return Ok(LinkIcon::emoji(emoji.clone()));
    }

    if let Some(path) = &args.icon_file {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !upload::extension_allowed(&filename, &cfg.allowed_extensions) {
            println!("Unsupported icon file extension; keeping the fallback icon.");
            return Ok(fallback);
        }

        let bytes = tokio::fs::read(path).await?;
        let normalizer = normalizer_from_config(cfg)?;
        let stored =
            tokio::task::spawn_blocking(move || normalizer.normalize(&bytes, "upload")).await?;
        return Ok(match stored {
            Ok(icon) => LinkIcon::image(icon),
            Err(err) => {
                tracing::warn!(%err, "could not normalize uploaded icon");
                println!("Could not use that image; keeping the fallback icon.");
                fallback
            }
        });
    }

    if args.fetch_icon {
        let fetcher = FaviconFetcher::new(cfg.fetch_options());
        let normalizer = normalizer_from_config(cfg)?;
        let target = url.to_string();
        let fetched = tokio::task::spawn_blocking(move || {
            fetcher
                .resolve(&target)
                .map(|payload| normalizer.normalize(&payload.bytes, "fetched"))
        })
        .await?;
        return Ok(match fetched {
            Some(Ok(icon)) => LinkIcon::image(icon),
            Some(Err(err)) => {
                tracing::warn!(%err, "favicon found but not usable");
                println!("Found a favicon but could not store it; keeping the fallback icon.");
                fallback
            }
            None => {
                println!("No favicon found for that URL; keeping the fallback icon.");
                fallback
            }
        });
    }

    Ok(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkpad_core::link_db::IconKind;

    fn test_config(dir: &std::path::Path) -> LinkpadConfig {
        LinkpadConfig {
            icon_dir: Some(dir.to_path_buf()),
            ..LinkpadConfig::default()
        }
    }

    #[tokio::test]
    async fn explicit_emoji_wins() {
        let dir = tempfile::tempdir().unwrap();
        let args = IconArgs {
            emoji: Some("🏠".to_string()),
            ..IconArgs::default()
        };
        let icon = resolve_icon(&test_config(dir.path()), "http://x", &args, LinkIcon::default())
            .await
            .unwrap();
        assert_eq!(icon, LinkIcon::emoji("🏠"));
    }

    #[tokio::test]
    async fn no_flags_keep_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = LinkIcon::image("existing.png");
        let icon = resolve_icon(
            &test_config(dir.path()),
            "http://x",
            &IconArgs::default(),
            fallback.clone(),
        )
        .await
        .unwrap();
        assert_eq!(icon, fallback);
    }

    #[tokio::test]
    async fn disallowed_extension_keeps_fallback_without_reading() {
        let dir = tempfile::tempdir().unwrap();
        let args = IconArgs {
            icon_file: Some(dir.path().join("does-not-exist.exe")),
            ..IconArgs::default()
        };
        let icon = resolve_icon(&test_config(dir.path()), "http://x", &args, LinkIcon::default())
            .await
            .unwrap();
        assert_eq!(icon.kind, IconKind::Emoji);
    }

    #[tokio::test]
    async fn valid_icon_file_is_normalized_and_stored() {
        let dir = tempfile::tempdir().unwrap();
        let icon_dir = dir.path().join("icons");

        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            5,
            5,
            image::Rgb([1u8, 2, 3]),
        ));
        let source = dir.path().join("icon.jpg");
        img.save_with_format(&source, image::ImageFormat::Jpeg).unwrap();

        let args = IconArgs {
            icon_file: Some(source),
            ..IconArgs::default()
        };
        let icon = resolve_icon(&test_config(&icon_dir), "http://x", &args, LinkIcon::default())
            .await
            .unwrap();
        assert_eq!(icon.kind, IconKind::Image);
        assert!(icon.value.ends_with("_upload.png"));
        assert!(icon_dir.join(&icon.value).exists());
    }

    #[tokio::test]
    async fn undecodable_icon_file_keeps_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("fake.png");
        std::fs::write(&source, b"not an image at all").unwrap();

        let args = IconArgs {
            icon_file: Some(source),
            ..IconArgs::default()
        };
        let fallback = LinkIcon::emoji("🔖");
        let icon = resolve_icon(&test_config(dir.path()), "http://x", &args, fallback.clone())
            .await
            .unwrap();
        assert_eq!(icon, fallback);
    }
}
