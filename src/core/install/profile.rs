use crate::core::release::AssetSelector;

/// What the downloaded asset is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// The asset is the payload itself and replaces it in one rename.
    SingleFile,
    /// The asset is a zip unpacked over the mod directory.
    Archive,
}

/// Everything that differs between mods installed by the launcher.
#[derive(Debug, Clone)]
pub struct InstallProfile {
    pub owner: String,
    pub repo: String,
    /// Mod directory relative to the install root.
    pub mod_subdir: String,
    /// Payload file name inside the mod directory.
    pub payload_file: String,
    pub payload_kind: PayloadKind,
    pub asset_selector: AssetSelector,
    pub host_executable: String,
    /// Host flag followed by the payload path.
    pub load_flag: String,
}

impl InstallProfile {
    pub fn neos_plus() -> Self {
        Self {
            owner: "Xlinka".into(),
            repo: "NeosPlus".into(),
            mod_subdir: "Libraries/NeosPlus".into(),
            payload_file: "NeosPlus.dll".into(),
            payload_kind: PayloadKind::Archive,
            asset_selector: AssetSelector::TagAffixed {
                suffix: ".zip".into(),
            },
            host_executable: "Neos.exe".into(),
            load_flag: "-LoadAssembly".into(),
        }
    }
}
