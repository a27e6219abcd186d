// ─── Installer ───
// Brings the mod directory up to the given release. The version marker is
// written last, only after the payload is in place.

use std::path::Path;

use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::release::{ReleaseClient, ReleaseInfo};
use crate::core::status::{Status, StatusReporter};
use crate::core::target::InstallTarget;

use super::extract;
use super::marker::{VersionMarker, MARKER_FILE};
use super::profile::{InstallProfile, PayloadKind};

const HASH_CHUNK: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    UpToDate {
        tag: String,
    },
    Installed {
        tag: String,
        previous: Option<String>,
    },
}

pub struct Installer<'a, C: ReleaseClient + ?Sized> {
    client: &'a C,
    profile: &'a InstallProfile,
    status: StatusReporter,
}

impl<'a, C: ReleaseClient + ?Sized> Installer<'a, C> {
    pub fn new(client: &'a C, profile: &'a InstallProfile) -> Self {
        Self {
            client,
            profile,
            status: StatusReporter::silent(),
        }
    }

    pub fn with_status(mut self, status: StatusReporter) -> Self {
        self.status = status;
        self
    }

    pub async fn ensure_installed(
        &self,
        target: &InstallTarget,
        release: &ReleaseInfo,
    ) -> LauncherResult<InstallOutcome> {
        let mod_dir = target.mod_dir(&self.profile.mod_subdir);
        tokio::fs::create_dir_all(&mod_dir)
            .await
            .map_err(|source| LauncherError::Io {
                path: mod_dir.clone(),
                source,
            })?;

        let marker = VersionMarker::in_dir(&mod_dir);
        let current = marker.read().await?;
        let payload = mod_dir.join(&self.profile.payload_file);

        if is_current(&current, &payload, release) {
            info!("NeosPlus {} is already installed", current);
            self.status.report(Status::UpToDate {
                tag: current.clone(),
            });
            return Ok(InstallOutcome::UpToDate { tag: current });
        }

        info!(
            "Installing {} over {:?} in {:?}",
            release.tag,
            if current.is_empty() { "nothing" } else { current.as_str() },
            mod_dir
        );
        self.status.report(Status::Downloading {
            asset: release.asset_name.clone(),
        });

        let temp_path = mod_dir.join(format!(
            ".{}.{}.part",
            release.asset_name,
            Uuid::new_v4().simple()
        ));
        let placed = self
            .download_and_place(release, &temp_path, &mod_dir, &payload)
            .await;
        remove_temp(&temp_path).await;
        placed?;

        marker.write(&release.tag).await?;
        info!("NeosPlus {} installed", release.tag);
        self.status.report(Status::Installed {
            tag: release.tag.clone(),
        });

        Ok(InstallOutcome::Installed {
            tag: release.tag.clone(),
            previous: (!current.is_empty()).then_some(current),
        })
    }

    /// Whether `release` is already installed in `target`, without touching
    /// the filesystem beyond reads.
    pub async fn is_up_to_date(
        &self,
        target: &InstallTarget,
        release: &ReleaseInfo,
    ) -> LauncherResult<bool> {
        let mod_dir = target.mod_dir(&self.profile.mod_subdir);
        let current = VersionMarker::in_dir(&mod_dir).read().await?;
        Ok(is_current(
            &current,
            &mod_dir.join(&self.profile.payload_file),
            release,
        ))
    }

    async fn download_and_place(
        &self,
        release: &ReleaseInfo,
        temp_path: &Path,
        mod_dir: &Path,
        payload: &Path,
    ) -> LauncherResult<()> {
        let bytes = self.client.download(&release.asset_url, temp_path).await?;
        debug!("Fetched {} ({} bytes)", release.asset_name, bytes);

        if let Some(expected) = &release.sha256 {
            verify_sha256(temp_path, expected).await?;
        }

        match self.profile.payload_kind {
            PayloadKind::Archive => {
                self.status.report(Status::Unpacking);
                let files = extract::unpack_archive(temp_path, mod_dir, &[MARKER_FILE]).await?;
                debug!("Unpacked {} files into {:?}", files, mod_dir);
                if !payload.is_file() {
                    return Err(LauncherError::UnpackFailed(format!(
                        "{} does not contain {}",
                        release.asset_name, self.profile.payload_file
                    )));
                }
            }
            PayloadKind::SingleFile => {
                tokio::fs::rename(temp_path, payload)
                    .await
                    .map_err(|source| LauncherError::Io {
                        path: payload.to_path_buf(),
                        source,
                    })?;
            }
        }

        Ok(())
    }
}

fn is_current(installed_tag: &str, payload: &Path, release: &ReleaseInfo) -> bool {
    installed_tag == release.tag && payload.is_file()
}

async fn verify_sha256(path: &Path, expected: &str) -> LauncherResult<()> {
    let io_err = |source: std::io::Error| LauncherError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = tokio::fs::File::open(path).await.map_err(io_err)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0_u8; HASH_CHUNK];
    loop {
        let read = file.read(&mut buf).await.map_err(io_err)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }

    let actual = hex::encode(hasher.finalize());
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(LauncherError::DigestMismatch {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}

async fn remove_temp(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("Removed {:?}", path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove {:?}: {}", path, e),
    }
}
