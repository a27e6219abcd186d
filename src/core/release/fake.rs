// In-memory `ReleaseClient` for tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::core::error::{LauncherError, LauncherResult};

use super::client::ReleaseClient;
use super::model::{GitHubAsset, GitHubRelease};

pub struct FakeReleaseClient {
    pub release: GitHubRelease,
    /// Served for every download; `Err(status)` simulates an HTTP failure.
    pub body: Result<Vec<u8>, u16>,
    downloads: AtomicUsize,
}

impl FakeReleaseClient {
    pub fn serving(tag: &str, asset_name: &str, body: Vec<u8>) -> Self {
        Self {
            release: GitHubRelease {
                tag_name: tag.to_string(),
                assets: vec![GitHubAsset {
                    name: asset_name.to_string(),
                    browser_download_url: format!("https://example.com/{}", asset_name),
                    digest: None,
                }],
            },
            body: Ok(body),
            downloads: AtomicUsize::new(0),
        }
    }

    pub fn failing(tag: &str, asset_name: &str, status: u16) -> Self {
        let mut client = Self::serving(tag, asset_name, Vec::new());
        client.body = Err(status);
        client
    }

    pub fn downloads(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReleaseClient for FakeReleaseClient {
    async fn latest_release(&self, _owner: &str, _repo: &str) -> LauncherResult<GitHubRelease> {
        Ok(self.release.clone())
    }

    async fn download(&self, url: &str, dest: &Path) -> LauncherResult<u64> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        match &self.body {
            Ok(bytes) => {
                tokio::fs::write(dest, bytes).await?;
                Ok(bytes.len() as u64)
            }
            Err(status) => Err(LauncherError::DownloadFailed {
                url: url.to_string(),
                status: *status,
            }),
        }
    }
}

/// Zip archive bytes with the given entries.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use std::io::Write;

    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, bytes) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
