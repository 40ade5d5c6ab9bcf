//! Page acquisition from URLs, files, and stdin.
//!
//! These sit outside the extraction engine: they are the only operations in
//! the crate that perform I/O. URL fetching needs the `fetch` feature.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use url::Url;

use crate::{DistillError, Result};

/// HTTP client settings for fetching pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: format!("Mozilla/5.0 (compatible; Distill/{})", env!("CARGO_PKG_VERSION")) }
    }
}

/// Fetches a page over HTTP(S) and returns its body.
///
/// Redirects are followed. A request that runs past `config.timeout` is
/// reported as [`DistillError::Timeout`].
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| DistillError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(DistillError::InvalidUrl(format!("unsupported scheme: {}", parsed.scheme())));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(DistillError::HttpError)?;

    let response = client
        .get(parsed)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| if e.is_timeout() { DistillError::Timeout { timeout: config.timeout } } else { DistillError::HttpError(e) })?
        .error_for_status()?;

    Ok(response.text().await?)
}

/// Reads a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        return Err(DistillError::FileNotFound(path_buf));
    }
    fs::read_to_string(&path_buf).map_err(DistillError::from)
}

/// Reads everything from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
