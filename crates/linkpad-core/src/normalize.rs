//! Icon normalization: decode untrusted bytes, re-encode canonically.
//!
//! Input bytes may claim to be any image format; only a successful decode
//! counts. Output is always the configured canonical raster format, and
//! nothing is written to the store when decoding fails.

use image::ImageFormat;
use std::io::Cursor;
use thiserror::Error;

use crate::store::{IconStore, StoredIcon};

/// Why a normalization attempt produced no stored icon.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Bytes did not decode as any supported image format.
    #[error("not a decodable image: {0}")]
    Decode(#[source] image::ImageError),
    /// Decoded fine but could not be re-encoded to the canonical format.
    #[error("canonical re-encode failed: {0}")]
    Encode(#[source] image::ImageError),
    /// The store could not persist the canonical bytes.
    #[error("icon store: {0}")]
    Store(#[source] anyhow::Error),
}

/// Maps a config-file format name to an encodable canonical format.
pub fn canonical_format_from_name(name: &str) -> Option<ImageFormat> {
    match name.to_ascii_lowercase().as_str() {
        "png" => Some(ImageFormat::Png),
        "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
        "webp" => Some(ImageFormat::WebP),
        "bmp" => Some(ImageFormat::Bmp),
        _ => None,
    }
}

/// Decodes `bytes` and re-encodes them to `format`. Pure: no I/O.
pub fn to_canonical(bytes: &[u8], format: ImageFormat) -> Result<Vec<u8>, NormalizeError> {
    let decoded = image::load_from_memory(bytes).map_err(NormalizeError::Decode)?;
    let mut out = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut out), format)
        .map_err(NormalizeError::Encode)?;
    Ok(out)
}

/// The normalizer: canonical re-encoding in front of an append-only store.
pub struct Normalizer {
    store: IconStore,
    format: ImageFormat,
}

impl Normalizer {
    pub fn new(store: IconStore, format: ImageFormat) -> Self {
        Normalizer { store, format }
    }

    /// Normalizes untrusted image bytes and persists the result.
    ///
    /// Every success yields a fresh identifier (no content dedup, nothing
    /// overwritten). On failure no artifact exists under any name.
    pub fn normalize(&self, bytes: &[u8], name_prefix: &str) -> Result<StoredIcon, NormalizeError> {
        let canonical = to_canonical(bytes, self.format)?;
        self.store
            .save_canonical_image(&canonical, name_prefix, self.format)
            .map_err(NormalizeError::Store)
    }

    pub fn store(&self) -> &IconStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    /// A small solid-color image encoded as `format`, for feeding the
    /// normalizer something real.
    fn sample_image_bytes(format: ImageFormat, w: u32, h: u32) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            w,
            h,
            image::Rgb([200u8, 40, 40]),
        ));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), format).unwrap();
        out
    }

    #[test]
    fn jpeg_input_becomes_canonical_png() {
        let jpeg = sample_image_bytes(ImageFormat::Jpeg, 12, 7);
        let png = to_canonical(&jpeg, ImageFormat::Png).unwrap();

        assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.dimensions(), (12, 7));
    }

    #[test]
    fn png_input_reencoded_not_passed_through() {
        let png = sample_image_bytes(ImageFormat::Png, 4, 4);
        let out = to_canonical(&png, ImageFormat::Png).unwrap();
        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn garbage_and_empty_input_fail_decode() {
        assert!(matches!(
            to_canonical(b"definitely not an image", ImageFormat::Png),
            Err(NormalizeError::Decode(_))
        ));
        assert!(matches!(
            to_canonical(b"", ImageFormat::Png),
            Err(NormalizeError::Decode(_))
        ));
    }

    #[test]
    fn svg_input_fails_decode() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="4" height="4"/></svg>"#;
        assert!(matches!(
            to_canonical(svg, ImageFormat::Png),
            Err(NormalizeError::Decode(_))
        ));
    }

    #[test]
    fn format_names_resolve() {
        assert_eq!(canonical_format_from_name("png"), Some(ImageFormat::Png));
        assert_eq!(canonical_format_from_name("PNG"), Some(ImageFormat::Png));
        assert_eq!(canonical_format_from_name("jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(canonical_format_from_name("svg"), None);
        assert_eq!(canonical_format_from_name(""), None);
    }

    #[test]
    fn normalize_persists_and_yields_fresh_identifiers() {
        let dir = tempfile::tempdir().unwrap();
        let store = IconStore::open(dir.path()).unwrap();
        let normalizer = Normalizer::new(store, ImageFormat::Png);

        let jpeg = sample_image_bytes(ImageFormat::Jpeg, 9, 9);
        let a = normalizer.normalize(&jpeg, "fetched").unwrap();
        let b = normalizer.normalize(&jpeg, "fetched").unwrap();

        assert_ne!(a, b);
        for name in [&a, &b] {
            assert!(name.ends_with("_fetched.png"));
            let stored = std::fs::read(normalizer.store().path_of(name)).unwrap();
            assert_eq!(image::guess_format(&stored).unwrap(), ImageFormat::Png);
            let decoded = image::load_from_memory(&stored).unwrap();
            assert_eq!(decoded.dimensions(), (9, 9));
        }
    }

    #[test]
    fn failed_normalize_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = IconStore::open(dir.path()).unwrap();
        let normalizer = Normalizer::new(store, ImageFormat::Png);

        assert!(normalizer.normalize(b"not an image", "upload").is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
