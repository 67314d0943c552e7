//! Command-line entry point for the Alarm replay harness.
//!
//! Usage:
//!   alarm-replay scenarios/smoke_v3.yaml
//!   alarm-replay scenarios/smoke_v3.yaml --format json
//!   alarm-replay scenarios/smoke_v3.yaml --log-level debug

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use zwave_alarm_replay::{run_scenario, ReplayResult, Scenario};

/// Output format for the replay report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Replay Alarm command class traffic against an in-memory node
#[derive(Parser)]
#[command(name = "alarm-replay")]
#[command(about = "Replay Alarm command class traffic against an in-memory node")]
struct Cli {
    /// Scenario file (YAML)
    scenario: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Log filter, e.g. "debug" or "zwave_alarm=trace". Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> ReplayResult<()> {
    let scenario = Scenario::load(&cli.scenario)?;
    let report = run_scenario(&scenario)?;

    match cli.format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
