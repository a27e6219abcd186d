// ─── Launch Task ───
// Starts Neos as a detached child with the payload loaded.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[cfg(target_os = "windows")]
use std::os::windows::process::CommandExt;

use tracing::{debug, info};

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::install::InstallProfile;
use crate::core::target::InstallTarget;

/// A spawned host process. The launcher does not wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchedProcess {
    pub pid: u32,
    pub executable: PathBuf,
}

/// Start `<root>/<host exe> <load flag> "<payload>" [extra_args]` with the
/// install root as working directory.
pub fn launch(
    target: &InstallTarget,
    mod_dir: &Path,
    profile: &InstallProfile,
    extra_args: &str,
) -> LauncherResult<LaunchedProcess> {
    let executable = target.root_path.join(&profile.host_executable);
    if !executable.is_file() {
        return Err(LauncherError::Launch {
            executable,
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "host executable not found"),
        });
    }

    let payload = mod_dir.join(&profile.payload_file);
    let mut cmd = host_command(&executable, &profile.load_flag, &payload, extra_args);
    cmd.current_dir(&target.root_path);

    info!("Launching {:?}", executable);
    debug!("Command: {}", format_command_for_logs(&cmd, extra_args));

    let child = cmd.spawn().map_err(|source| LauncherError::Launch {
        executable: executable.clone(),
        source,
    })?;

    Ok(LaunchedProcess {
        pid: child.id(),
        executable,
    })
}

/// The argument list as the host sees it. Extra arguments are whitespace
/// separated; no quoting rules are applied.
pub fn build_arguments(load_flag: &str, payload: &Path, extra_args: &str) -> Vec<String> {
    let mut args = vec![load_flag.to_string(), safe_path_str(payload)];
    args.extend(extra_args.split_whitespace().map(str::to_string));
    args
}

/// The host command with its arguments, detached stdio and platform spawn
/// flags. Windows receives the extra arguments raw, for the host's own
/// command-line parser.
fn host_command(executable: &Path, load_flag: &str, payload: &Path, extra_args: &str) -> Command {
    let mut cmd = Command::new(executable);

    #[cfg(target_os = "windows")]
    {
        cmd.args(build_arguments(load_flag, payload, ""));
        let extra = extra_args.trim();
        if !extra.is_empty() {
            cmd.raw_arg(extra);
        }
    }
    #[cfg(not(target_os = "windows"))]
    cmd.args(build_arguments(load_flag, payload, extra_args));

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::null());
    configure_platform_spawn(&mut cmd);
    cmd
}

#[cfg(target_os = "windows")]
fn configure_platform_spawn(cmd: &mut Command) {
    const DETACHED_PROCESS: u32 = 0x00000008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x00000200;
    cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(target_os = "windows"))]
fn configure_platform_spawn(_cmd: &mut Command) {}

/// Absolute path as a plain string, without the `\\?\` prefix Windows
/// canonicalization adds.
pub fn safe_path_str(path: &Path) -> String {
    let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    });
    let text = resolved.to_string_lossy().to_string();

    #[cfg(target_os = "windows")]
    {
        if let Some(stripped) = text.strip_prefix(r"\\?\") {
            return stripped.to_string();
        }
    }

    text
}

fn format_command_for_logs(cmd: &Command, extra_args: &str) -> String {
    let program = cmd.get_program().to_string_lossy().to_string();
    let mut line = format!("\"{}\"", program);
    for arg in cmd.get_args() {
        let arg = arg.to_string_lossy();
        if arg.contains(' ') {
            line.push_str(&format!(" \"{}\"", arg));
        } else {
            line.push(' ');
            line.push_str(&arg);
        }
    }
    if cfg!(target_os = "windows") && !extra_args.trim().is_empty() {
        line.push_str(&format!(" (raw: {})", extra_args.trim()));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_start_with_load_flag_and_absolute_payload() {
        let payload = std::env::temp_dir().join("Libraries").join("NeosPlus.dll");
        let args = build_arguments("-LoadAssembly", &payload, "");

        assert_eq!(args.len(), 2);
        assert_eq!(args[0], "-LoadAssembly");
        assert!(Path::new(&args[1]).is_absolute());
        assert!(args[1].ends_with("NeosPlus.dll"));
    }

    #[test]
    fn relative_payload_is_made_absolute() {
        let args = build_arguments("-LoadAssembly", Path::new("Libraries/NeosPlus.dll"), "");
        assert!(Path::new(&args[1]).is_absolute());
    }

    #[test]
    fn extra_arguments_follow_verbatim() {
        let payload = std::env::temp_dir().join("NeosPlus.dll");
        let args = build_arguments("-LoadAssembly", &payload, "  -Screen   -DontAutoOpenCloudHome ");
        assert_eq!(&args[2..], ["-Screen", "-DontAutoOpenCloudHome"]);
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn host_command_passes_payload_then_extra_arguments() {
        let payload = std::env::temp_dir().join("Libraries").join("NeosPlus.dll");
        let cmd = host_command(
            Path::new("/games/neos/Neos.exe"),
            "-LoadAssembly",
            &payload,
            " -Screen  -Invisible ",
        );

        let args: Vec<String> = cmd
            .get_args()
            .map(|arg| arg.to_string_lossy().to_string())
            .collect();
        assert_eq!(
            args,
            [
                "-LoadAssembly".to_string(),
                safe_path_str(&payload),
                "-Screen".to_string(),
                "-Invisible".to_string(),
            ]
        );
        assert_eq!(cmd.get_program(), "/games/neos/Neos.exe");
    }

    #[test]
    fn host_command_without_extra_arguments_ends_at_payload() {
        let payload = std::env::temp_dir().join("NeosPlus.dll");
        let cmd = host_command(Path::new("Neos.exe"), "-LoadAssembly", &payload, "   ");
        assert_eq!(cmd.get_args().count(), 2);
    }

    #[test]
    fn missing_host_executable_is_launch_error() {
        let root = std::env::temp_dir().join(format!("neosplus-launch-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&root).unwrap();
        let target = InstallTarget::new(&root);
        let profile = InstallProfile::neos_plus();

        let result = launch(&target, &root.join("Libraries"), &profile, "");
        assert!(matches!(result, Err(LauncherError::Launch { .. })));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[cfg(unix)]
    #[test]
    fn spawns_host_in_install_root() {
        let root = std::env::temp_dir().join(format!("neosplus-launch-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&root).unwrap();
        let exe = root.join("Neos.exe");
        std::os::unix::fs::symlink("/bin/sh", &exe).unwrap();

        let target = InstallTarget::new(&root);
        let profile = InstallProfile::neos_plus();
        let launched = launch(&target, &root.join("Libraries"), &profile, "-Screen").unwrap();

        assert_eq!(launched.executable, exe);
        assert!(launched.pid > 0);

        let _ = std::fs::remove_dir_all(&root);
    }
}
