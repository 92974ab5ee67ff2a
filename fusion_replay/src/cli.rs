use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fusion replay: drives the lidar/radar fusion filter from measurement logs
/// or synthetic scenarios.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Raise the log level (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Replay a measurement log through the filter and write the estimates.
    Run {
        /// Measurement log (`L px py ts [gt]` / `R rho phi rho_dot ts [gt]` lines).
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the estimates. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML configuration layered over the defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate a synthetic measurement log with ground truth.
    Simulate {
        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML.
    PrintConfig {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Default `tracing` directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
