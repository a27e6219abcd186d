mod commands;
pub mod core;

use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::commands::Cli;
use crate::core::paths::runtime_paths;

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    tracing::info!("NeosPlusLauncher starting...");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(commands::execute(cli))
}

/// Human-readable output on stderr, plus an append-only plain-text log per
/// day under the launcher data directory.
fn init_logging() {
    let console = fmt::layer().with_writer(std::io::stderr).with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    );

    let log_file = runtime_paths().ok().and_then(|paths| {
        let name = format!("launcher-{}.log", chrono::Local::now().format("%Y-%m-%d"));
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(paths.logs_dir().join(name))
            .ok()
    });

    let file = log_file.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .with_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,neosplus_launcher_lib=debug")),
            )
    });

    tracing_subscriber::registry().with(console).with(file).init();
}
