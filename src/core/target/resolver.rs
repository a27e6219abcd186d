// ─── Install-path resolver ───
// Picks the Neos install directory from an override and a candidate list.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::error::{LauncherError, LauncherResult};

/// A directory believed to contain the host application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    pub root_path: PathBuf,
}

impl InstallTarget {
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
        }
    }

    /// `<root>/<subdir>`, e.g. `Libraries/NeosPlus`.
    pub fn mod_dir(&self, subdir: &str) -> PathBuf {
        subdir
            .split(['/', '\\'])
            .filter(|part| !part.is_empty())
            .fold(self.root_path.clone(), |dir, part| dir.join(part))
    }
}

/// Result of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Unique(InstallTarget),
    /// More than one candidate exists; the caller must choose.
    Ambiguous(Vec<InstallTarget>),
}

impl Resolution {
    /// The first configured entry, used when the caller does not choose.
    pub fn default_choice(&self) -> &InstallTarget {
        match self {
            Resolution::Unique(target) => target,
            Resolution::Ambiguous(targets) => &targets[0],
        }
    }
}

/// Resolve the install directory.
///
/// An existing `override_dir` wins outright. Otherwise the candidates that
/// exist on disk are kept in order; none is `NoTargetFound`.
pub fn resolve(candidates: &[PathBuf], override_dir: Option<&Path>) -> LauncherResult<Resolution> {
    if let Some(dir) = override_dir {
        if dir.is_dir() {
            info!("Using configured install directory {:?}", dir);
            return Ok(Resolution::Unique(InstallTarget::new(dir)));
        }
        warn!("Configured install directory {:?} does not exist, searching defaults", dir);
    }

    let mut found: Vec<InstallTarget> = Vec::new();
    for candidate in candidates {
        if !candidate.is_dir() {
            continue;
        }
        let target = InstallTarget::new(candidate.clone());
        if !found.contains(&target) {
            found.push(target);
        }
    }

    debug!("Found {} of {} candidate directories", found.len(), candidates.len());

    match found.len() {
        0 => Err(LauncherError::NoTargetFound),
        1 => Ok(Resolution::Unique(found.swap_remove(0))),
        _ => Ok(Resolution::Ambiguous(found)),
    }
}

/// Check a directory entered by the user.
pub fn validate_manual_dir(raw: &str) -> LauncherResult<InstallTarget> {
    let trimmed = raw.trim().trim_matches('"');
    if trimmed.is_empty() {
        return Err(LauncherError::NoTargetFound);
    }

    let path = PathBuf::from(trimmed);
    if !path.is_dir() {
        return Err(LauncherError::NoTargetFound);
    }

    Ok(InstallTarget::new(path))
}
