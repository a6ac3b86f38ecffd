//! Favicon resolution: a bounded, ordered cascade of network probes.
//!
//! Given an arbitrary, possibly malformed user-supplied URL, tries in
//! order: the page itself, the site root, then `/favicon.ico`. First hit
//! wins, stages run strictly in sequence, and every network or parse
//! failure is absorbed into the stage that hit it. The worst possible
//! outcome is "no icon", never an error.

mod discover;
mod error;
mod http;

pub use discover::{find_icon_link, IconLinkHint, REL_PRIORITY};
pub use error::{classify, FailureKind, FetchError};
pub use http::{CurlTransport, HttpResponse, Transport};

use std::time::Duration;
use url::Url;

use crate::config::DEFAULT_USER_AGENT;

/// Options for outbound requests, passed in at construction (no globals).
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Hard per-request timeout (connect and total).
    pub timeout: Duration,
    /// Browser identification sent on every request.
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions {
            timeout: Duration::from_secs(5),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Raw icon bytes plus the URL they were downloaded from (diagnostics only).
#[derive(Debug, Clone)]
pub struct IconPayload {
    pub bytes: Vec<u8>,
    pub source_url: String,
}

/// Result of one cascade stage, kept explicit so the cause of an empty
/// stage stays inspectable for logging and tests.
#[derive(Debug)]
pub enum StageOutcome {
    /// Stage produced icon bytes; the cascade stops here.
    Found(IconPayload),
    /// Stage ran cleanly but had nothing to offer (no usable hint).
    Empty,
    /// Stage failed on the network or HTTP level; treated like `Empty`.
    Failed(FetchError),
}

/// Favicon resolver over some transport. Holds no mutable state, so one
/// instance can serve independent resolutions from multiple threads.
pub struct FaviconFetcher<T: Transport> {
    transport: T,
}

impl FaviconFetcher<CurlTransport> {
    pub fn new(options: FetchOptions) -> Self {
        FaviconFetcher {
            transport: CurlTransport::new(options.timeout, options.user_agent),
        }
    }
}

impl<T: Transport> FaviconFetcher<T> {
    /// Build a fetcher over a custom transport (tests inject fakes here).
    pub fn with_transport(transport: T) -> Self {
        FaviconFetcher { transport }
    }

    /// Resolves a favicon for `candidate`, however malformed.
    ///
    /// Returns `None` when the URL has no usable host (no network access
    /// is attempted then) or when all three stages come up empty.
    pub fn resolve(&self, candidate: &str) -> Option<IconPayload> {
        let url = match normalize_candidate_url(candidate) {
            Some(u) => u,
            None => {
                tracing::debug!(candidate, "unusable URL, skipping resolution");
                return None;
            }
        };
        let root = site_root(&url);

        if let Some(payload) = accept("page", self.probe_page(url.as_str())) {
            return Some(payload);
        }

        // Probe the site root only when the original URL wasn't already it.
        if root.trim_end_matches('/') != url.as_str().trim_end_matches('/') {
            if let Some(payload) = accept("root", self.probe_page(&root)) {
                return Some(payload);
            }
        }

        let favicon_url = format!("{root}/favicon.ico");
        accept("favicon.ico", self.try_download(&favicon_url))
    }

    /// GETs `page_url` and, on a 200, extracts the best icon link and tries
    /// to download it. A page without a usable hint is `Empty`.
    fn probe_page(&self, page_url: &str) -> StageOutcome {
        let response = match self.transport.get(page_url) {
            Ok(r) => r,
            Err(e) => return StageOutcome::Failed(e),
        };
        if response.status != 200 {
            return StageOutcome::Failed(FetchError::Status(response.status));
        }

        let Ok(base) = Url::parse(&response.final_url) else {
            return StageOutcome::Empty;
        };
        let html = String::from_utf8_lossy(&response.body);
        let Some(hint) = find_icon_link(&html, &base) else {
            return StageOutcome::Empty;
        };
        tracing::debug!(rel = hint.rel, url = %hint.url, "icon link hint");

        self.try_download(hint.url.as_str())
    }

    /// Downloads a candidate icon. Only a 200 with a non-empty body counts,
    /// whatever the declared content type.
    fn try_download(&self, icon_url: &str) -> StageOutcome {
        match self.transport.get(icon_url) {
            Ok(r) if r.status != 200 => StageOutcome::Failed(FetchError::Status(r.status)),
            Ok(r) if r.body.is_empty() => StageOutcome::Failed(FetchError::EmptyBody),
            Ok(r) => StageOutcome::Found(IconPayload {
                bytes: r.body,
                source_url: r.final_url,
            }),
            Err(e) => StageOutcome::Failed(e),
        }
    }
}

/// Folds a stage outcome into the cascade: log, then succeed or advance.
fn accept(stage: &'static str, outcome: StageOutcome) -> Option<IconPayload> {
    match outcome {
        StageOutcome::Found(payload) => {
            tracing::debug!(stage, source = %payload.source_url, bytes = payload.bytes.len(), "icon found");
            Some(payload)
        }
        StageOutcome::Empty => {
            tracing::debug!(stage, "no icon hint");
            None
        }
        StageOutcome::Failed(err) => {
            tracing::debug!(stage, kind = ?classify(&err), %err, "stage failed");
            None
        }
    }
}

/// Normalizes a raw candidate: prepends `http://` when schemeless, parses,
/// and requires a non-empty host. `None` means no network call may be made.
pub fn normalize_candidate_url(candidate: &str) -> Option<Url> {
    let with_scheme = if candidate.starts_with("http://") || candidate.starts_with("https://") {
        candidate.to_string()
    } else {
        format!("http://{candidate}")
    };
    let url = Url::parse(&with_scheme).ok()?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Some(url),
        _ => None,
    }
}

/// `scheme://host[:port]`, path and query dropped.
fn site_root(url: &Url) -> String {
    let mut root = format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());
    if let Some(port) = url.port() {
        root.push_str(&format!(":{port}"));
    }
    root
}
