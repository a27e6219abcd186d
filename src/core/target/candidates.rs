use std::path::PathBuf;

const STEAM_APP_SUBPATH: &str = "steamapps/common/NeosVR";

/// Well-known Neos install locations, most common first.
pub fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![
        PathBuf::from(r"C:\Program Files (x86)\Steam\steamapps\common\NeosVR"),
        PathBuf::from(r"C:\Neos\app"),
    ];

    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".steam/steam").join(STEAM_APP_SUBPATH));
        candidates.push(home.join(".local/share/Steam").join(STEAM_APP_SUBPATH));
    }

    candidates.push(PathBuf::from("/mnt/LocalDisk/SteamLibrary").join(STEAM_APP_SUBPATH));
    candidates
}
