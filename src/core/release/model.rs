use serde::Deserialize;

use crate::core::error::{LauncherError, LauncherResult};

/// `GET /repos/{owner}/{repo}/releases/latest` response, trimmed to what the
/// launcher reads.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<GitHubAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubAsset {
    pub name: String,
    pub browser_download_url: String,
    /// `sha256:<hex>` on releases published after GitHub began hashing assets.
    #[serde(default)]
    pub digest: Option<String>,
}

/// The latest release reduced to the one asset that will be installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub tag: String,
    pub asset_url: String,
    pub asset_name: String,
    pub sha256: Option<String>,
}

/// How the payload asset is picked from a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSelector {
    /// First asset in the list.
    First,
    /// First asset named `<tag>...<suffix>`, e.g. `v1.2.0_NeosPlus.zip`.
    TagAffixed { suffix: String },
}

impl AssetSelector {
    pub fn select<'a>(&self, release: &'a GitHubRelease) -> Option<&'a GitHubAsset> {
        match self {
            AssetSelector::First => release.assets.first(),
            AssetSelector::TagAffixed { suffix } => release.assets.iter().find(|asset| {
                asset.name.starts_with(&release.tag_name) && asset.name.ends_with(suffix.as_str())
            }),
        }
    }
}

impl ReleaseInfo {
    pub fn from_release(release: &GitHubRelease, selector: &AssetSelector) -> LauncherResult<Self> {
        let asset = selector
            .select(release)
            .ok_or_else(|| LauncherError::NoSuitableAsset {
                tag: release.tag_name.clone(),
            })?;

        Ok(Self {
            tag: release.tag_name.clone(),
            asset_url: asset.browser_download_url.clone(),
            asset_name: asset.name.clone(),
            sha256: asset.digest.as_deref().and_then(parse_sha256_digest),
        })
    }
}

fn parse_sha256_digest(digest: &str) -> Option<String> {
    let hex = digest.strip_prefix("sha256:")?;
    if hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(hex.to_ascii_lowercase())
    } else {
        None
    }
}
