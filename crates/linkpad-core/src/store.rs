//! Append-only icon store on the local filesystem.
//!
//! Every save writes a brand-new file under a unique name via a temp
//! sibling and an atomic rename; existing icons are never touched.

use anyhow::{Context, Result};
use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::LinkpadConfig;

/// Opaque identifier of a stored canonical icon (its filename).
pub type StoredIcon = String;

/// Directory of normalized icons.
#[derive(Debug, Clone)]
pub struct IconStore {
    dir: PathBuf,
}

impl IconStore {
    /// Opens the store, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create icon dir: {}", dir.display()))?;
        Ok(IconStore { dir })
    }

    /// Default store under the XDG data dir (`~/.local/share/linkpad/icons`).
    pub fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("linkpad")?;
        Self::open(xdg_dirs.get_data_home().join("icons"))
    }

    /// Store from config: the `icon_dir` override when set, else the default.
    pub fn open_from_config(cfg: &LinkpadConfig) -> Result<Self> {
        match &cfg.icon_dir {
            Some(dir) => Self::open(dir.clone()),
            None => Self::open_default(),
        }
    }

    /// Persists canonical image bytes under a fresh unique name and returns it.
    ///
    /// The name is `{uuid}_{prefix}.{ext}`, so two saves of identical bytes
    /// yield two distinct identifiers. The bytes land in a `.part` sibling
    /// first and are renamed into place, so a crash never leaves a
    /// half-written icon under a final name.
    pub fn save_canonical_image(
        &self,
        bytes: &[u8],
        name_prefix: &str,
        format: ImageFormat,
    ) -> Result<StoredIcon> {
        let ext = format.extensions_str().first().copied().unwrap_or("img");
        let name = format!("{}_{}.{}", Uuid::new_v4(), name_prefix, ext);
        let final_path = self.dir.join(&name);
        let temp_path = self.dir.join(format!("{name}.part"));

        fs::write(&temp_path, bytes)
            .with_context(|| format!("failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &final_path)
            .with_context(|| format!("failed to finalize {}", final_path.display()))?;

        tracing::debug!(icon = %name, bytes = bytes.len(), "stored canonical icon");
        Ok(name)
    }

    /// Absolute path of a stored icon, for callers that read icons back.
    pub fn path_of(&self, icon: &str) -> PathBuf {
        self.dir.join(icon)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_writes_file_and_returns_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = IconStore::open(dir.path()).unwrap();

        let name = store
            .save_canonical_image(b"fake-png-bytes", "upload", ImageFormat::Png)
            .unwrap();
        assert!(name.ends_with("_upload.png"));
        assert_eq!(fs::read(store.path_of(&name)).unwrap(), b"fake-png-bytes");
    }

    #[test]
    fn identical_bytes_get_distinct_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = IconStore::open(dir.path()).unwrap();

        let a = store.save_canonical_image(b"same", "x", ImageFormat::Png).unwrap();
        let b = store.save_canonical_image(b"same", "x", ImageFormat::Png).unwrap();
        assert_ne!(a, b);
        assert!(store.path_of(&a).exists());
        assert!(store.path_of(&b).exists());
    }

    #[test]
    fn no_part_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = IconStore::open(dir.path()).unwrap();
        store.save_canonical_image(b"bytes", "p", ImageFormat::Png).unwrap();

        let leftover: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
            .collect();
        assert!(leftover.is_empty());
    }

    #[test]
    fn open_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/icons");
        let store = IconStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested.as_path());
    }

    #[test]
    fn jpeg_format_uses_jpg_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = IconStore::open(dir.path()).unwrap();
        let name = store
            .save_canonical_image(b"j", "fetched", ImageFormat::Jpeg)
            .unwrap();
        assert!(name.ends_with("_fetched.jpg"));
    }
}
