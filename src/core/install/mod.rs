pub mod extract;
pub mod installer;
pub mod marker;
pub mod profile;

pub use installer::{InstallOutcome, Installer};
pub use marker::VersionMarker;
pub use profile::{InstallProfile, PayloadKind};
