use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the launcher backend.
/// Every stage returns `Result<T, LauncherError>`; any error ends the
/// current operation and is shown to the user as its display string.
#[derive(Debug, Error)]
pub enum LauncherError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Install target ──────────────────────────────────
    #[error("No Neos installation directory found")]
    NoTargetFound,

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    #[error("No suitable NeosPlus release asset found for {tag}")]
    NoSuitableAsset { tag: String },

    // ── Integrity ───────────────────────────────────────
    #[error("SHA-256 mismatch for {path:?}: expected {expected}, got {actual}")]
    DigestMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    // ── Archive ─────────────────────────────────────────
    #[error("Failed to unpack NeosPlus: {0}")]
    UnpackFailed(String),

    // ── Launch ──────────────────────────────────────────
    #[error("Failed to launch {executable:?}: {source}")]
    Launch {
        executable: PathBuf,
        source: std::io::Error,
    },

    #[error("{0} is running; close it before updating NeosPlus")]
    HostRunning(String),

    // ── Config ──────────────────────────────────────────
    #[error("Cannot read config {path:?}: {reason}")]
    ConfigRead { path: PathBuf, reason: String },

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type LauncherResult<T> = Result<T, LauncherError>;

impl From<std::io::Error> for LauncherError {
    fn from(source: std::io::Error) -> Self {
        LauncherError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

impl From<zip::result::ZipError> for LauncherError {
    fn from(value: zip::result::ZipError) -> Self {
        LauncherError::UnpackFailed(value.to_string())
    }
}

// A presentation layer forwards errors verbatim as their message.
impl serde::Serialize for LauncherError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_display_string() {
        let err = LauncherError::DownloadFailed {
            url: "https://example.com/a.zip".into(),
            status: 404,
        };
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Download failed for https://example.com/a.zip: HTTP 404\"");
    }

    #[test]
    fn zip_errors_become_unpack_failures() {
        let err: LauncherError = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, LauncherError::UnpackFailed(_)));
    }
}
