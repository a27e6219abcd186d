use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::error::{LauncherError, LauncherResult};

/// User preferences persisted as JSON.
///
/// Older launchers wrote the field names in PascalCase; both spellings are
/// accepted on read, camelCase is written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default, alias = "LauncherArguments")]
    pub launcher_arguments: Option<String>,
    #[serde(default, alias = "CustomInstallDir")]
    pub custom_install_dir: Option<String>,
}

impl Config {
    /// Read the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> LauncherResult<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(LauncherError::ConfigRead {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };

        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(&raw).map_err(|e| LauncherError::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Like [`Config::load`], but an unreadable config falls back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> LauncherResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| LauncherError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| LauncherError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Configured install directory override, ignoring blank values.
    pub fn install_dir_override(&self) -> Option<PathBuf> {
        self.custom_install_dir
            .as_deref()
            .map(str::trim)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
    }

    pub fn launcher_arguments(&self) -> &str {
        self.launcher_arguments.as_deref().map(str::trim).unwrap_or("")
    }
}
