//! Pre-filtering for user-uploaded icon files.

/// Case-insensitive extension allow-list check for an uploaded filename.
///
/// A cheap early rejection only: decode validation in the normalizer is
/// what actually decides whether the bytes are an image.
pub fn extension_allowed(filename: &str, allowed: &[String]) -> bool {
    let Some((stem, ext)) = filename.rsplit_once('.') else {
        return false;
    };
    if stem.is_empty() || ext.is_empty() {
        return false;
    }
    allowed.iter().any(|a| a.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        ["png", "jpg", "jpeg", "webp", "ico", "svg"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn common_extensions_accepted() {
        assert!(extension_allowed("logo.png", &allowed()));
        assert!(extension_allowed("photo.JPEG", &allowed()));
        assert!(extension_allowed("fav.Ico", &allowed()));
    }

    #[test]
    fn unknown_extensions_rejected() {
        assert!(!extension_allowed("archive.zip", &allowed()));
        assert!(!extension_allowed("script.png.exe", &allowed()));
    }

    #[test]
    fn extensionless_and_degenerate_names_rejected() {
        assert!(!extension_allowed("README", &allowed()));
        assert!(!extension_allowed("trailing.", &allowed()));
        assert!(!extension_allowed(".png", &allowed()));
        assert!(!extension_allowed("", &allowed()));
    }

    #[test]
    fn only_last_extension_counts() {
        assert!(extension_allowed("backup.zip.png", &allowed()));
    }
}
