//! CLI interface for momentum-rotator
//!
//! Provides subcommands for:
//! - `run`: Start the paper rotation loop
//! - `status`: Show the last persisted position
//! - `config`: Show the effective configuration

mod run;

pub use run::RunArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "momentum-rotator")]
#[command(about = "Adaptive capital rotation engine with paper execution")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "rotator.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the paper rotation loop
    Run(RunArgs),
    /// Show the last persisted position
    Status,
    /// Show the effective configuration
    Config,
}
