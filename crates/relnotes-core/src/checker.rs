//! Reachability checks for candidate links.
//!
//! Links derived heuristically may point at tags that were never published, or
//! published under a different spelling. A [`LinkChecker`] answers a single
//! question: does this exact URL exist right now? It never fetches bodies and
//! never follows redirects; a redirect response already proves the URL exists.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::{Error, Result};

/// Default timeout for a single probe request.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Decides whether a URL exists.
#[async_trait]
pub trait LinkChecker: Send + Sync {
    /// Probe `url`. Any failure, including transport errors, is `false`.
    async fn check(&self, url: &Url) -> bool;
}

/// Parse a candidate link, requiring an absolute http(s) URL with a host.
pub fn parse_link(link: &str) -> Result<Url> {
    let url = Url::parse(link).map_err(|e| Error::InvalidUrl(format!("'{link}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!(
            "'{link}': unsupported scheme '{}'",
            url.scheme()
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(Error::InvalidUrl(format!("'{link}': missing host")));
    }

    Ok(url)
}

/// Checks links with an HTTP `HEAD` request.
///
/// A 2xx or 3xx status means the link exists. Redirects are not followed, and
/// every request is bounded by the client timeout.
#[derive(Debug, Clone)]
pub struct HttpChecker {
    client: Client,
}

impl HttpChecker {
    /// Create a checker with [`DEFAULT_PROBE_TIMEOUT`].
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_PROBE_TIMEOUT)
    }

    /// Create a checker with a custom per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("relnotes/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl LinkChecker for HttpChecker {
    async fn check(&self, url: &Url) -> bool {
        match self.client.head(url.clone()).send().await {
            Ok(response) => {
                let status = response.status();
                let exists = status.is_success() || status.is_redirection();
                debug!(%url, %status, exists, "Probed link");
                exists
            },
            Err(err) => {
                debug!(%url, error = %err, timeout = err.is_timeout(), "Link probe failed");
                false
            },
        }
    }
}
