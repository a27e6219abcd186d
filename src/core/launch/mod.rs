pub mod process;
pub mod task;

pub use process::is_host_running;
pub use task::{build_arguments, launch, LaunchedProcess};
