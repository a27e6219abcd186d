// ─── Update & launch flow ───
// Resolve → fetch latest → install → launch, one stage after another.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::core::config::Config;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::install::{InstallOutcome, InstallProfile, Installer, VersionMarker};
use crate::core::launch::{self, LaunchedProcess};
use crate::core::release::{self, ReleaseClient, ReleaseInfo};
use crate::core::status::{Status, StatusReporter};
use crate::core::target::{self, InstallTarget, Resolution};

/// User interaction the flow needs when the install directory is unclear.
pub trait Prompt {
    /// Pick one of several install directories; `None` keeps the first.
    fn choose_target(&self, targets: &[InstallTarget]) -> Option<usize>;

    /// Ask for a directory when none was found; `None` cancels.
    fn ask_directory(&self) -> Option<String>;
}

#[derive(Debug, Clone, Default)]
pub struct FlowOptions {
    /// Takes precedence over the configured directory and is not persisted.
    pub install_dir: Option<PathBuf>,
    /// Replaces the saved launcher arguments for this and later runs.
    pub launch_args: Option<String>,
    pub launch: bool,
}

#[derive(Debug, Clone)]
pub struct FlowReport {
    pub target: InstallTarget,
    pub outcome: InstallOutcome,
    pub launched: Option<LaunchedProcess>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCheck {
    pub installed: Option<String>,
    pub latest: String,
}

pub struct Flow<'a, C: ReleaseClient + ?Sized, P: Prompt> {
    pub client: &'a C,
    pub prompt: &'a P,
    pub profile: &'a InstallProfile,
    pub candidates: Vec<PathBuf>,
    pub config_path: PathBuf,
    pub status: StatusReporter,
    /// Refuse to replace the payload while the host holds it open.
    pub guard_running_host: bool,
}

impl<'a, C: ReleaseClient + ?Sized, P: Prompt> Flow<'a, C, P> {
    pub async fn run(&self, options: &FlowOptions) -> LauncherResult<FlowReport> {
        self.status.report(Status::CheckingForUpdates);

        let mut config = Config::load_or_default(&self.config_path);
        let target = self.resolve_target(&mut config, options)?;
        let release = self.fetch_release().await?;

        let installer = Installer::new(self.client, self.profile).with_status(self.status.clone());
        if self.guard_running_host
            && !installer.is_up_to_date(&target, &release).await?
            && launch::is_host_running(&self.profile.host_executable)
        {
            return Err(LauncherError::HostRunning(self.profile.host_executable.clone()));
        }
        let outcome = installer.ensure_installed(&target, &release).await?;

        let launched = if options.launch {
            Some(self.launch(&target, &mut config, options)?)
        } else {
            None
        };

        self.status.report(Status::Done);
        Ok(FlowReport {
            target,
            outcome,
            launched,
        })
    }

    /// Installed tag versus latest tag, without installing anything.
    pub async fn check(&self, options: &FlowOptions) -> LauncherResult<VersionCheck> {
        self.status.report(Status::CheckingForUpdates);

        let mut config = Config::load_or_default(&self.config_path);
        let target = self.resolve_target(&mut config, options)?;
        let release = self.fetch_release().await?;
        let installed = VersionMarker::in_dir(&target.mod_dir(&self.profile.mod_subdir))
            .read()
            .await?;

        self.status.report(Status::Done);
        Ok(VersionCheck {
            installed: (!installed.is_empty()).then_some(installed),
            latest: release.tag,
        })
    }

    async fn fetch_release(&self) -> LauncherResult<ReleaseInfo> {
        release::fetch_latest(
            self.client,
            &self.profile.owner,
            &self.profile.repo,
            &self.profile.asset_selector,
        )
        .await
    }

    fn resolve_target(
        &self,
        config: &mut Config,
        options: &FlowOptions,
    ) -> LauncherResult<InstallTarget> {
        if let Some(dir) = &options.install_dir {
            if !dir.is_dir() {
                warn!("Requested install directory {:?} does not exist", dir);
                return Err(LauncherError::NoTargetFound);
            }
        }

        let override_dir = options
            .install_dir
            .clone()
            .or_else(|| config.install_dir_override());

        match target::resolve(&self.candidates, override_dir.as_deref()) {
            Ok(Resolution::Unique(target)) => Ok(target),
            Ok(resolution) => {
                let chosen = match &resolution {
                    Resolution::Ambiguous(targets) => self
                        .prompt
                        .choose_target(targets)
                        .and_then(|i| targets.get(i)),
                    Resolution::Unique(target) => Some(target),
                };
                Ok(chosen.unwrap_or_else(|| resolution.default_choice()).clone())
            }
            Err(LauncherError::NoTargetFound) => {
                let raw = self
                    .prompt
                    .ask_directory()
                    .ok_or(LauncherError::NoTargetFound)?;
                let target = target::validate_manual_dir(&raw)?;

                config.custom_install_dir = Some(target.root_path.to_string_lossy().to_string());
                if let Err(e) = config.save(&self.config_path) {
                    warn!("Could not remember install directory: {}", e);
                }
                Ok(target)
            }
            Err(e) => Err(e),
        }
    }

    fn launch(
        &self,
        target: &InstallTarget,
        config: &mut Config,
        options: &FlowOptions,
    ) -> LauncherResult<LaunchedProcess> {
        self.status.report(Status::Launching);

        let extra_args = options
            .launch_args
            .as_deref()
            .map(str::trim)
            .unwrap_or_else(|| config.launcher_arguments())
            .to_string();
        let mod_dir = target.mod_dir(&self.profile.mod_subdir);
        let launched = launch::launch(target, &mod_dir, self.profile, &extra_args)?;
        info!("Neos started with pid {}", launched.pid);

        let saved = (!extra_args.is_empty()).then(|| extra_args.clone());
        if config.launcher_arguments != saved {
            config.launcher_arguments = saved;
            if let Err(e) = config.save(&self.config_path) {
                warn!("Could not save launcher arguments: {}", e);
            }
        }

        Ok(launched)
    }
}
