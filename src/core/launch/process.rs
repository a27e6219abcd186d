use std::path::Path;

use sysinfo::{ProcessRefreshKind, RefreshKind, System};

/// Whether a process named like `executable` (case-insensitive, extension
/// optional) is running.
pub fn is_host_running(executable: &str) -> bool {
    let wanted = process_stem(executable);
    if wanted.is_empty() {
        return false;
    }

    let system =
        System::new_with_specifics(RefreshKind::new().with_processes(ProcessRefreshKind::new()));
    system
        .processes()
        .values()
        .any(|process| process_stem(&process.name().to_string_lossy()) == wanted)
}

fn process_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_ignore_case_and_extension() {
        assert_eq!(process_stem("Neos.exe"), "neos");
        assert_eq!(process_stem("neos"), "neos");
        assert_eq!(process_stem(""), "");
    }

    #[test]
    fn unknown_process_is_not_running() {
        assert!(!is_host_running("neosplus-definitely-not-running-4f1c.exe"));
        assert!(!is_host_running(""));
    }
}
