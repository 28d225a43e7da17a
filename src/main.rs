//! Sysboard - live system metrics dashboard for your terminal
//!
//! Polls a metrics backend over HTTP and renders CPU, memory, disk, network
//! and process statistics across four switchable sections.

mod api;
mod config;
mod core;
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::api::HttpMetricsClient;
use crate::core::app::App;
use crate::core::state::Section;
use crate::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "sysboard")]
#[command(version)]
#[command(about = "Live system metrics dashboard for your terminal", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Metrics API base URL, e.g. http://localhost:8000/dashboard/api
    #[arg(short, long, env = "SYSBOARD_URL", value_name = "URL")]
    url: Option<String>,

    /// Section to open with (overview, performance, processes, system)
    #[arg(short, long, value_name = "NAME")]
    section: Option<String>,

    /// Color theme (tokyo-night, catppuccin, nord)
    #[arg(short, long, value_name = "NAME")]
    theme: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one metrics snapshot and print a summary
    Snapshot,

    /// Print the current process list
    Processes,

    /// Print the backend health report
    Health,

    /// Print raw network statistics
    Network,

    /// Write the default configuration file
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

fn setup_logging(verbosity: u8) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // The TUI owns stdout, so logs always go to a file
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sysboard")
        .join("logs");

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "sysboard.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive for the duration of the program
    let _logging_guard = setup_logging(cli.verbose)?;

    if let Some(Commands::Init { force }) = cli.command {
        let path = match cli.config {
            Some(path) => path,
            None => config::Config::default_path()
                .context("Could not determine the configuration directory")?,
        };
        return config::init_config(&path, force);
    }

    let config_path = cli.config.or_else(|| {
        let default_config = config::Config::default_path()?;
        if default_config.exists() {
            Some(default_config)
        } else {
            None
        }
    });

    let config = if let Some(path) = config_path {
        config::Config::load(&path)?
    } else {
        config::Config::default()
    };

    let base_url = cli.url.unwrap_or_else(|| config.api.base_url.clone());
    let client = HttpMetricsClient::new(&base_url)?;
    tracing::info!(base_url = client.base_url(), "using metrics backend");

    match cli.command {
        Some(Commands::Snapshot) => api::report::print_snapshot(&client).await?,
        Some(Commands::Processes) => api::report::print_processes(&client).await?,
        Some(Commands::Health) => api::report::print_health(&client).await?,
        Some(Commands::Network) => api::report::print_network(&client).await?,
        Some(Commands::Init { .. }) => {}
        None => {
            let section = Section::parse(
                cli.section
                    .as_deref()
                    .unwrap_or(&config.display.default_section),
            );
            let theme = Theme::from_name(cli.theme.as_deref().unwrap_or(&config.display.theme));
            tracing::debug!(section = section.id(), theme = %theme.name, "launching dashboard");

            let mut app = App::new(client, config.polling.intervals(), section, theme)?;
            app.run().await?;
        }
    }

    Ok(())
}
