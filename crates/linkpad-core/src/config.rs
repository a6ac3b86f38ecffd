use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::favicon::FetchOptions;
use crate::normalize::canonical_format_from_name;

/// Browser identification sent on every outbound request. Some servers
/// refuse unidentified clients, so a realistic value matters.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Extensions accepted for user-uploaded icon files (pre-filter only;
/// decode validation is what actually accepts or rejects the bytes).
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "ico", "svg"];

fn default_allowed_extensions() -> Vec<String> {
    DEFAULT_ALLOWED_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_canonical_format() -> String {
    "png".to_string()
}

/// Global configuration loaded from `~/.config/linkpad/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkpadConfig {
    /// Hard timeout in seconds for each outbound HTTP request.
    pub request_timeout_secs: u64,
    /// User-Agent header sent on every request.
    pub user_agent: String,
    /// Filename extensions accepted for uploaded icons.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    /// Output encoding for normalized icons.
    #[serde(default = "default_canonical_format")]
    pub canonical_format: String,
    /// Optional icon directory override (default: `~/.local/share/linkpad/icons`).
    #[serde(default)]
    pub icon_dir: Option<PathBuf>,
}

impl Default for LinkpadConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            allowed_extensions: default_allowed_extensions(),
            canonical_format: default_canonical_format(),
            icon_dir: None,
        }
    }
}

impl LinkpadConfig {
    /// Per-request options handed to the favicon fetcher.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.request_timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }

    /// The configured canonical output format. Fails on names the image
    /// stack cannot encode, so a bad config file is caught at startup.
    pub fn canonical_format(&self) -> Result<image::ImageFormat> {
        canonical_format_from_name(&self.canonical_format).ok_or_else(|| {
            anyhow::anyhow!("unsupported canonical_format in config: {:?}", self.canonical_format)
        })
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("linkpad")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LinkpadConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = LinkpadConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: LinkpadConfig = toml::from_str(&data)?;
    cfg.canonical_format()?;
    Ok(cfg)
}
