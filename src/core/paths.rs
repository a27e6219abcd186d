use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::core::error::{LauncherError, LauncherResult};

const APP_DIR_NAME: &str = "NeosPlusLauncher";
const CONFIG_RELATIVE_PATH: &str = "Assets/Config.json";

#[derive(Debug, Clone)]
pub struct RuntimePaths {
    logs_dir: PathBuf,
    exe_dir: PathBuf,
}

impl RuntimePaths {
    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    /// Default location of the user config: `Assets/Config.json` beside the
    /// launcher executable.
    pub fn config_path(&self) -> PathBuf {
        self.exe_dir.join(CONFIG_RELATIVE_PATH)
    }
}

static RUNTIME_PATHS: OnceLock<RuntimePaths> = OnceLock::new();

pub fn runtime_paths() -> LauncherResult<&'static RuntimePaths> {
    if let Some(paths) = RUNTIME_PATHS.get() {
        return Ok(paths);
    }

    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME);
    let logs_dir = data_dir.join("logs");

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let paths = RuntimePaths {
        logs_dir: create_dir(&logs_dir)?,
        exe_dir,
    };

    let _ = RUNTIME_PATHS.set(paths);
    RUNTIME_PATHS
        .get()
        .ok_or_else(|| LauncherError::Other("runtime paths unavailable".into()))
}

fn create_dir(path: &Path) -> LauncherResult<PathBuf> {
    std::fs::create_dir_all(path).map_err(|source| LauncherError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}
