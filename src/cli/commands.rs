//! CLI command definitions

use clap::Args;
use std::path::PathBuf;

/// Run a pipeline over a style sheet
#[derive(Debug, Args, Clone)]
pub struct BuildCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub config: PathBuf,

    /// Style sheet to transform (stdin if omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Where to write the result (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Resolve content globs against this directory instead of the
    /// config file's
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Show a progress bar instead of per-stage lines
    #[arg(long)]
    pub progress: bool,
}

/// Validate a pipeline configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub config: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// List registered stage kinds
#[derive(Debug, Args, Clone)]
pub struct StagesCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Scan the content globs of a pipeline
#[derive(Debug, Args, Clone)]
pub struct ScanCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub config: PathBuf,

    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
