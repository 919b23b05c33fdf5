//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{BuildCommand, ScanCommand, StagesCommand, ValidateCommand};
use std::ffi::OsString;

/// Composes and runs CSS build pipelines
#[derive(Debug, Parser, Clone)]
#[command(name = "stylepipe")]
#[command(version = "0.1.0")]
#[command(about = "Composable CSS build pipelines", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run a pipeline over a style sheet
    Build(BuildCommand),

    /// Validate a pipeline configuration
    Validate(ValidateCommand),

    /// List the available stage kinds
    Stages(StagesCommand),

    /// Show which classes the content globs reference
    Scan(ScanCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
