//! Blocking HTTP GET over libcurl.

use super::error::FetchError;
use std::time::Duration;

/// A fetched response: status, post-redirect URL, and the raw body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    /// Effective URL after redirects; relative links resolve against this.
    pub final_url: String,
    pub body: Vec<u8>,
}

/// Minimal outbound GET capability used by the resolver.
///
/// A trait so the cascade can be driven in tests without sockets.
pub trait Transport {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// libcurl-backed transport: one Easy handle per request, redirects
/// followed, connect and total timeouts both bounded by `timeout`.
///
/// Runs in the current thread; call from `spawn_blocking` in async code.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    timeout: Duration,
    user_agent: String,
}

impl CurlTransport {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Self {
        CurlTransport {
            timeout,
            user_agent: user_agent.into(),
        }
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.user_agent)?;
        easy.connect_timeout(self.timeout)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        let final_url = easy
            .effective_url()?
            .map(str::to_string)
            .unwrap_or_else(|| url.to_string());

        Ok(HttpResponse {
            status,
            final_url,
            body,
        })
    }
}
