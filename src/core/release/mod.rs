pub mod client;
#[cfg(test)]
pub mod fake;
pub mod model;

pub use client::{GitHubClient, ReleaseClient};
pub use model::{AssetSelector, GitHubAsset, GitHubRelease, ReleaseInfo};

use tracing::info;

use crate::core::error::LauncherResult;

/// Query the latest release of `owner/repo` and pick its payload asset.
pub async fn fetch_latest<C>(
    client: &C,
    owner: &str,
    repo: &str,
    selector: &AssetSelector,
) -> LauncherResult<ReleaseInfo>
where
    C: ReleaseClient + ?Sized,
{
    let release = client.latest_release(owner, repo).await?;
    let info = ReleaseInfo::from_release(&release, selector)?;
    info!("Latest release {} uses asset {}", info.tag, info.asset_name);
    Ok(info)
}
