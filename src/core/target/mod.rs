pub mod candidates;
pub mod resolver;

pub use candidates::default_candidates;
pub use resolver::{resolve, validate_manual_dir, InstallTarget, Resolution};
