use std::path::Path;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::core::error::{LauncherError, LauncherResult};

use super::model::GitHubRelease;

const GITHUB_API_BASE: &str = "https://api.github.com";

/// Network seam for the release index and asset downloads.
#[async_trait]
pub trait ReleaseClient: Send + Sync {
    async fn latest_release(&self, owner: &str, repo: &str) -> LauncherResult<GitHubRelease>;

    /// Stream `url` into `dest`, returning the number of bytes written.
    /// A non-success status is `DownloadFailed`.
    async fn download(&self, url: &str, dest: &Path) -> LauncherResult<u64>;
}

pub struct GitHubClient {
    client: Client,
    api_base: String,
}

impl GitHubClient {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            api_base: GITHUB_API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn latest_release_url(&self, owner: &str, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_base.trim_end_matches('/'),
            owner,
            repo
        )
    }
}

#[async_trait]
impl ReleaseClient for GitHubClient {
    async fn latest_release(&self, owner: &str, repo: &str) -> LauncherResult<GitHubRelease> {
        let url = self.latest_release_url(owner, repo);
        info!("Fetching latest release of {}/{}", owner, repo);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LauncherError::DownloadFailed {
                url,
                status: status.as_u16(),
            });
        }

        let release: GitHubRelease = response.json().await?;
        debug!(
            "Latest release {} with {} assets",
            release.tag_name,
            release.assets.len()
        );
        Ok(release)
    }

    async fn download(&self, url: &str, dest: &Path) -> LauncherResult<u64> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LauncherError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut written = 0_u64;
        // Scoped so the handle is closed before the caller renames or unpacks.
        {
            let mut file = tokio::fs::File::create(dest)
                .await
                .map_err(|source| LauncherError::Io {
                    path: dest.to_path_buf(),
                    source,
                })?;

            let mut stream = response.bytes_stream();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                file.write_all(&chunk)
                    .await
                    .map_err(|source| LauncherError::Io {
                        path: dest.to_path_buf(),
                        source,
                    })?;
                written = written.saturating_add(chunk.len() as u64);
            }

            file.flush().await.map_err(|source| LauncherError::Io {
                path: dest.to_path_buf(),
                source,
            })?;
        }

        debug!("Downloaded {} bytes: {} -> {:?}", written, url, dest);
        Ok(written)
    }
}
