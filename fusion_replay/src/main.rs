// fusion_replay/src/main.rs

use anyhow::{Context, Result};
use clap::Parser;
use fusion_replay::cli::{Cli, Command};
use fusion_replay::config::ReplayConfig;
use fusion_replay::replay::{parser::parse_log, runner::run_replay, writer};
use fusion_replay::simulation;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v. Logs go to stderr so stdout stays clean for estimates.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match &cli.command {
        Command::Run {
            input,
            output,
            config,
        } => run(input, output.as_deref(), config.as_deref()),
        Command::Simulate { output, config } => simulate(output, config.as_deref()),
        Command::PrintConfig { config } => {
            let config = ReplayConfig::load(config.as_deref())?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn run(input: &Path, output: Option<&Path>, config: Option<&Path>) -> Result<()> {
    let config = ReplayConfig::load(config).context("failed to load configuration")?;

    let file = File::open(input)
        .with_context(|| format!("failed to open measurement log {}", input.display()))?;
    let records = parse_log(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", input.display()))?;
    info!("Loaded {} records from {}", records.len(), input.display());

    let out: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    let mut estimates = writer::EstimateWriter::new(out);
    let summary = run_replay(&records, &config.filter, &mut estimates)?;

    match summary.rmse {
        Some(rmse) => info!(
            "RMSE px={:.4} py={:.4} vx={:.4} vy={:.4}",
            rmse[0], rmse[1], rmse[2], rmse[3]
        ),
        None => info!("No ground truth in the log, RMSE not computed"),
    }
    Ok(())
}

fn simulate(output: &Path, config: Option<&Path>) -> Result<()> {
    let config = ReplayConfig::load(config).context("failed to load configuration")?;
    let records = simulation::generate(&config.simulation)?;

    let file = File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    writer::write_log(BufWriter::new(file), &records)?;
    info!("Wrote {} records to {}", records.len(), output.display());
    Ok(())
}
