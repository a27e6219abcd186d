// ─── Terminal front-end ───
// Parses the command line, renders status transitions and asks the user
// when the install directory is unclear.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::error;

use crate::core::error::LauncherResult;
use crate::core::flow::{Flow, FlowOptions, Prompt};
use crate::core::http::build_http_client;
use crate::core::install::{InstallOutcome, InstallProfile};
use crate::core::paths::runtime_paths;
use crate::core::release::GitHubClient;
use crate::core::status::{Status, StatusReporter};
use crate::core::target::{default_candidates, InstallTarget};

#[derive(Debug, Parser)]
#[command(name = "neosplus-launcher", version, about = "Install NeosPlus and start Neos with it")]
pub struct Cli {
    /// Neos install directory; skips detection for this run and must exist.
    #[arg(long, value_name = "DIR")]
    pub install_dir: Option<PathBuf>,

    /// Extra arguments handed to Neos; remembered for later runs.
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub launch_args: Option<String>,

    /// Config file instead of Assets/Config.json beside the launcher.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Update NeosPlus without starting Neos.
    #[arg(long)]
    pub no_launch: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare the installed NeosPlus with the latest release.
    Check,
}

/// Reads answers from stdin.
struct StdinPrompt;

impl StdinPrompt {
    fn read_line(question: &str) -> Option<String> {
        print!("{}", question);
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl Prompt for StdinPrompt {
    fn choose_target(&self, targets: &[InstallTarget]) -> Option<usize> {
        println!("Several Neos installations were found:");
        for (i, target) in targets.iter().enumerate() {
            println!("  [{}] {}", i + 1, target.root_path.display());
        }
        let answer = Self::read_line("Select one [1]: ")?;
        answer.parse::<usize>().ok().and_then(|n| n.checked_sub(1))
    }

    fn ask_directory(&self) -> Option<String> {
        println!("No Neos directory found.");
        Self::read_line("Enter the Neos install directory: ").filter(|dir| !dir.is_empty())
    }
}

pub async fn execute(cli: Cli) -> ExitCode {
    let (status, rx) = StatusReporter::channel();
    let renderer = tokio::spawn(render_statuses(rx));

    let result = run_command(&cli, status.clone()).await;
    if let Err(e) = &result {
        error!("{}", e);
        status.report(Status::Failed(e.to_string()));
    }

    drop(status);
    let _ = renderer.await;

    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run_command(cli: &Cli, status: StatusReporter) -> LauncherResult<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => runtime_paths()?.config_path(),
    };

    let http = build_http_client()?;
    let client = GitHubClient::new(http);
    let profile = InstallProfile::neos_plus();
    let prompt = StdinPrompt;

    let flow = Flow {
        client: &client,
        prompt: &prompt,
        profile: &profile,
        candidates: default_candidates(),
        config_path,
        status,
        guard_running_host: true,
    };

    let options = FlowOptions {
        install_dir: cli.install_dir.clone(),
        launch_args: cli.launch_args.clone(),
        launch: !cli.no_launch,
    };

    match cli.command {
        Some(Command::Check) => {
            let check = flow.check(&options).await?;
            let installed = check.installed.as_deref().unwrap_or("not installed");
            println!("Installed: {}", installed);
            println!("Latest:    {}", check.latest);
            if check.installed.as_deref() != Some(check.latest.as_str()) {
                println!("An update is available.");
            }
        }
        None => {
            let report = flow.run(&options).await?;
            if let InstallOutcome::Installed {
                tag,
                previous: Some(previous),
            } = &report.outcome
            {
                println!("Updated NeosPlus {} -> {}", previous, tag);
            }
            if let Some(launched) = &report.launched {
                println!("Neos is running (pid {}).", launched.pid);
            }
        }
    }

    Ok(())
}

async fn render_statuses(mut rx: UnboundedReceiver<Status>) {
    while let Some(status) = rx.recv().await {
        match &status {
            Status::Failed(_) => eprintln!("{}", status),
            _ => println!("{}", status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn launch_args_accept_leading_hyphens() {
        let cli = Cli::try_parse_from([
            "neosplus-launcher",
            "--install-dir",
            "D:/Neos",
            "--launch-args",
            "-Screen -Invisible",
        ])
        .unwrap();

        assert_eq!(cli.install_dir, Some(PathBuf::from("D:/Neos")));
        assert_eq!(cli.launch_args.as_deref(), Some("-Screen -Invisible"));
        assert!(!cli.no_launch);
        assert!(cli.command.is_none());
    }

    #[test]
    fn check_subcommand_parses() {
        let cli = Cli::try_parse_from(["neosplus-launcher", "--no-launch", "check"]).unwrap();
        assert!(cli.no_launch);
        assert!(matches!(cli.command, Some(Command::Check)));
    }
}
