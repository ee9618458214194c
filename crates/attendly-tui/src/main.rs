//! `attendly` — terminal client for the HR directory service.
//!
//! Three screens navigable via number keys: Dashboard (1), Employees (2),
//! and Attendance (3). Employee records can be created and deleted;
//! attendance is marked per employee per day and browsed with date and
//! employee filters.
//!
//! Logs are written to a file (default `/tmp/attendly.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app
//! launch.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use attendly_core::ServiceConfig;

use crate::app::App;

/// Terminal client for the Attendly HR directory service.
#[derive(Parser, Debug)]
#[command(name = "attendly", version, about)]
struct Cli {
    /// Directory service base URL
    #[arg(
        short = 'u',
        long,
        env = "ATTENDLY_URL",
        default_value = "http://localhost:8888"
    )]
    url: url::Url,

    /// Log file path
    #[arg(long, default_value = "/tmp/attendly.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application so logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "attendly={log_level},attendly_core={log_level},attendly_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("attendly.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    info!(url = %cli.url, "starting attendly");

    let config = ServiceConfig::new(cli.url.clone());
    let client = config
        .build_client()
        .wrap_err("failed to build the directory service client")?;

    let mut app = App::new(Arc::new(client));
    app.run().await?;

    Ok(())
}
