//! WinGrab CLI — drive a capture/record session from the terminal.
//!
//! Usage:
//!   wingrab windows              List capturable windows
//!   wingrab capture [OPTIONS]    Capture periodic stills of a window
//!   wingrab record [OPTIONS]     Record a window to video
//!   wingrab path                 Show where artifacts are written
//!
//! The CLI runs the session controller against the bundled in-process host
//! (see `host.rs`); swapping in an IPC gateway to a real capture host does
//! not change any command.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use wingrab_common::config::AppConfig;
use wingrab_controller::SessionController;
use wingrab_host_protocol::CommandGateway;

mod commands;
mod host;

#[derive(Parser)]
#[command(
    name = "wingrab",
    about = "Window capture and recording sessions",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List capturable windows
    Windows,

    /// Capture periodic stills of a window
    Capture {
        /// Window id to capture (defaults to the first enumerated window)
        #[arg(short, long)]
        window: Option<String>,

        /// Capture interval in milliseconds
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Stop after this many stills (Ctrl+C stops earlier)
        #[arg(short, long, default_value = "3")]
        shots: u32,
    },

    /// Record a window to video
    Record {
        /// Window id to record (defaults to the first enumerated window)
        #[arg(short, long)]
        window: Option<String>,

        /// Recording duration in seconds (Ctrl+C stops earlier)
        #[arg(short, long, default_value = "5")]
        duration_secs: u64,
    },

    /// Show the directory the host writes artifacts into
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load();
    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    wingrab_common::logging::init_logging(&wingrab_common::config::LoggingConfig {
        level: log_level,
        ..config.logging.clone()
    });

    let host = Arc::new(host::SimulatedHost::new(config.captures_dir.clone()));
    let events = host.subscribe();
    let mut controller = SessionController::new(host.clone() as Arc<dyn CommandGateway>);
    controller.select_interval_ms(config.capture.interval_ms);

    match cli.command {
        Commands::Windows => commands::windows::run(&mut controller).await,
        Commands::Capture {
            window,
            interval_ms,
            shots,
        } => {
            let interval_ms = interval_ms.unwrap_or(config.capture.interval_ms);
            commands::capture::run(&mut controller, events, window, interval_ms, shots).await
        }
        Commands::Record {
            window,
            duration_secs,
        } => commands::record::run(&mut controller, events, window, duration_secs).await,
        Commands::Path => commands::path::run(&controller).await,
    }
}
