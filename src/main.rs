//! Binary entry point for guardia.
//!
//! This binary provides the CLI interface for the consent and compliance
//! workspace.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use guardia::cli::{self, ViewFormat};
use guardia::config::GuardiaConfig;
use guardia::observability;
use guardia::{DomainStore, Tab, Workspace};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Guardia - consent and compliance workspace.
#[derive(Parser)]
#[command(name = "guardia")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Render a workspace tab.
    View {
        /// Tab to render: dashboard, records, policies, dsrs, audit, reports.
        #[arg(default_value = "dashboard", value_parser = parse_tab)]
        tab: Tab,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = ViewFormat::Table)]
        format: ViewFormat,
    },

    /// Run a privacy impact assessment for a described data practice.
    Assess {
        /// Description of the data practice.
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Configuration management.
    Config {
        /// Show current configuration.
        #[arg(long)]
        show: bool,
    },
}

fn parse_tab(s: &str) -> Result<Tab, String> {
    Tab::parse(s).ok_or_else(|| {
        let names: Vec<&str> = Tab::all().iter().map(Tab::label).collect();
        format!("unknown tab {s:?} (expected one of: {})", names.join(", "))
    })
}

/// Main entry point.
fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match GuardiaConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_settings(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize observability: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli.command, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(
    command: Commands,
    config: &GuardiaConfig,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match command {
        Commands::View { tab, format } => cmd_view(tab, format),
        Commands::Assess { description } => cmd_assess(config, &description.join(" ")),
        Commands::Config { show } => cmd_config(config, show),
    }
}

/// View command.
fn cmd_view(tab: Tab, format: ViewFormat) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let store = DomainStore::new();
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    cli::cmd_view(&mut handle, &store, tab, format)?;
    Ok(ExitCode::SUCCESS)
}

/// Assess command.
///
/// Gateway failures are reported inline and do not change the exit code.
fn cmd_assess(
    config: &GuardiaConfig,
    description: &str,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let gateway = cli::build_gateway(&config.llm);
    let mut workspace = Workspace::new(Arc::new(DomainStore::new()));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(cli::cmd_assess(&mut workspace, &gateway, description));

    match report {
        Some(report) => {
            println!("{report}");
            Ok(ExitCode::SUCCESS)
        },
        None => {
            eprintln!("Nothing to assess: the description is blank.");
            Ok(ExitCode::FAILURE)
        },
    }
}

/// Config command.
fn cmd_config(config: &GuardiaConfig, show: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if show {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        cli::cmd_config_show(&mut handle, config)?;
    } else {
        println!("Use --show to display configuration");
    }
    Ok(ExitCode::SUCCESS)
}
