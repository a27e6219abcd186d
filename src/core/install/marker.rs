use std::path::{Path, PathBuf};

use crate::core::error::{LauncherError, LauncherResult};

pub const MARKER_FILE: &str = "version.txt";

/// The installed release tag, stored as plain text in `<modDir>/version.txt`.
#[derive(Debug, Clone)]
pub struct VersionMarker {
    path: PathBuf,
}

impl VersionMarker {
    pub fn in_dir(mod_dir: &Path) -> Self {
        Self {
            path: mod_dir.join(MARKER_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Installed tag; an absent marker reads as the empty string.
    pub async fn read(&self) -> LauncherResult<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(raw.trim_end().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(source) => Err(LauncherError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    pub async fn write(&self, tag: &str) -> LauncherResult<()> {
        tokio::fs::write(&self.path, tag)
            .await
            .map_err(|source| LauncherError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_marker_reads_empty_and_write_is_exact() {
        let dir = std::env::temp_dir().join(format!("neosplus-marker-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let marker = VersionMarker::in_dir(&dir);

        assert_eq!(marker.read().await.unwrap(), "");

        marker.write("v1.2.0").await.unwrap();
        assert_eq!(tokio::fs::read(marker.path()).await.unwrap(), b"v1.2.0");
        assert_eq!(marker.read().await.unwrap(), "v1.2.0");

        tokio::fs::write(marker.path(), "v1.2.0\r\n").await.unwrap();
        assert_eq!(marker.read().await.unwrap(), "v1.2.0");

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
