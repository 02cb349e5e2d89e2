//! GitHub release index client for relkit.
//!
//! Two upstream endpoints matter here:
//!
//! - the releases-listing API, queried once per tool to resolve the
//!   `latest` sentinel to a concrete tag, and
//! - the per-release asset download endpoint, which is pure URL
//!   composition over `(org, repo, tag, asset)`.
//!
//! Both base URLs are injectable so tests can point the client at a
//! stub server.

use relkit_core::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Default GitHub API host.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
/// Default GitHub release-asset download host.
pub const DEFAULT_DOWNLOAD_BASE: &str = "https://github.com";

/// GitHub release metadata from the API.
///
/// Only the tag is needed; the asset URL is derived from the tool's
/// naming convention rather than the release's asset list.
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// Client for the GitHub releases API and asset downloads.
pub struct ReleaseClient {
    http: Client,
    api_base: String,
    download_base: String,
}

impl Default for ReleaseClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseClient {
    /// Create a client against the real GitHub hosts.
    ///
    /// # Panics
    ///
    /// `reqwest::Client::builder().build()` only fails when the TLS
    /// backend cannot initialize, which is a fundamental environment
    /// issue; relkit cannot do anything useful in that state.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            http: Client::builder()
                .user_agent(concat!("relkit/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("Failed to create HTTP client - TLS backend initialization failed"),
            api_base: DEFAULT_API_BASE.to_string(),
            download_base: DEFAULT_DOWNLOAD_BASE.to_string(),
        }
    }

    /// Override both base URLs, e.g. to target a stub server in tests.
    #[must_use]
    pub fn with_base_urls(
        mut self,
        api_base: impl Into<String>,
        download_base: impl Into<String>,
    ) -> Self {
        self.api_base = api_base.into();
        self.download_base = download_base.into();
        self
    }

    /// Resolve the tag of the most recently published release.
    ///
    /// A network failure, a non-success status, or a response without
    /// a usable tag all surface as [`Error::UpstreamUnavailable`]. No
    /// retries are attempted.
    pub async fn latest_tag(&self, org: &str, repo: &str) -> Result<String> {
        let url = format!("{}/repos/{}/{}/releases/latest", self.api_base, org, repo);
        debug!(%url, "Fetching latest GitHub release");

        let slug = format!("{org}/{repo}");
        let response = self
            .authorized(self.http.get(&url))
            .send()
            .await
            .map_err(|e| Error::upstream_unavailable(slug.as_str(), e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::upstream_unavailable(
                slug.as_str(),
                format!("HTTP {}", response.status()),
            ));
        }

        let release: Release = response
            .json()
            .await
            .map_err(|e| Error::upstream_unavailable(slug.as_str(), format!("bad response: {e}")))?;

        debug!(tag = %release.tag_name, "Resolved latest release");
        Ok(release.tag_name)
    }

    /// Compose the download URL for a release asset.
    ///
    /// Pure string composition; a malformed tag or asset name is only
    /// detected when the download is attempted.
    #[must_use]
    pub fn download_url(&self, org: &str, repo: &str, tag: &str, asset: &str) -> String {
        format!(
            "{}/{}/{}/releases/download/{}/{}",
            self.download_base, org, repo, tag, asset
        )
    }

    /// Download a release asset into memory.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        debug!(%url, "Downloading release asset");

        let response = self
            .authorized(self.http.get(url))
            .send()
            .await
            .map_err(|e| Error::download_failed(url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::download_failed(
                url,
                format!("HTTP {}", response.status()),
            ));
        }

        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| Error::download_failed(url, e.to_string()))
    }

    /// Attach a bearer token when one is available in the environment.
    ///
    /// Anonymous requests against the GitHub API are heavily
    /// rate-limited on shared CI runners.
    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            request.header("Authorization", format!("Bearer {token}"))
        } else if let Ok(token) = std::env::var("GH_TOKEN") {
            request.header("Authorization", format!("Bearer {token}"))
        } else {
            request
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_url_composition() {
        let client = ReleaseClient::new();
        assert_eq!(
            client.download_url(
                "flashbots",
                "suave-geth",
                "v0.2.4",
                "suave-geth_v0.2.4_linux_amd64.zip"
            ),
            "https://github.com/flashbots/suave-geth/releases/download/v0.2.4/suave-geth_v0.2.4_linux_amd64.zip"
        );
    }

    #[test]
    fn test_download_url_keeps_pinned_tag_verbatim() {
        let client = ReleaseClient::new();
        let url = client.download_url("paradigmxyz", "reth", "v1.0.0-rc.1", "reth.tar.gz");
        assert!(url.contains("/releases/download/v1.0.0-rc.1/"));
    }
}
