//! `fuzzpid` – command-line front end for the fuzzy gain scheduler.
//!
//! ```text
//! fuzzpid run --error 4.2 --delta-error -1.0 [--config controller.toml] [--trace]
//! fuzzpid default-config > controller.toml
//! ```
//!
//! `run` prints the crisp correction on stdout, or the full JSON inference
//! trace with `--trace`.  Logs go to stderr; set `RUST_LOG` to change the
//! filter and `FUZZPID_LOG_FORMAT=json` for newline-delimited JSON.

mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fuzzpid_engine::{ControllerConfig, FuzzyController};
use tracing::info;

#[derive(Parser)]
#[command(version, about = "Fuzzy PID-gain scheduler", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one inference pass.
    Run {
        /// Current error.
        #[arg(long, allow_hyphen_values = true)]
        error: f64,
        /// Current rate of change of the error.
        #[arg(long, allow_hyphen_values = true)]
        delta_error: f64,
        /// Controller configuration file (TOML).
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the JSON inference trace instead of the crisp output.
        #[arg(long)]
        trace: bool,
    },
    /// Print the built-in default configuration as TOML.
    DefaultConfig,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging();

    match args.command {
        Command::Run {
            error,
            delta_error,
            config,
            trace,
        } => run(error, delta_error, config, trace),
        Command::DefaultConfig => {
            print!("{}", ControllerConfig::default().to_toml_string()?);
            Ok(())
        }
    }
}

fn run(error: f64, delta_error: f64, config: Option<PathBuf>, trace: bool) -> anyhow::Result<()> {
    let (cfg, source) = config::load(config.as_deref())?;
    info!(source = %source, "loaded controller configuration");

    let mut controller = FuzzyController::new(&cfg)
        .with_context(|| format!("invalid controller configuration in {source}"))?;
    controller.set_inputs(error, delta_error);

    if trace {
        let trace = controller
            .run_traced()
            .context("fuzzy inference failed")?;
        println!("{}", serde_json::to_string_pretty(&trace)?);
    } else {
        let output = controller.run().context("fuzzy inference failed")?;
        println!("{output}");
    }
    Ok(())
}

/// Initialise `tracing-subscriber` on stderr using `RUST_LOG` (default
/// `"info"`).  `FUZZPID_LOG_FORMAT=json` selects JSON lines.
fn init_logging() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if std::env::var("FUZZPID_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}
