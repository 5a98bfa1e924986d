
use anyhow::bail;
use clap::{Parser, Subcommand};
use std::path::Path;

use crate::cli::aggregate::AggregateSettings;
use crate::cli::verify::VerifySettings;

#[derive(Parser)]
#[clap(author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// Exomark, quality-control tooling for exome variant calling.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Aggregates per-case comparison outputs into a benchmarking metrics report
    Aggregate(Box<AggregateSettings>),
    /// Verifies that a truth set is contained in a VCF's passing variants
    Verify(Box<VerifySettings>)
}

pub fn get_cli() -> Cli {
    Cli::parse()
}

/// Checks if a file exists and will otherwise error
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
pub fn check_required_filename(filename: &Path, label: &str) -> anyhow::Result<()> {
    if !filename.exists() {
        bail!("{} does not exist: \"{}\"", label, filename.display());
    }

    // file exists
    Ok(())
}

/// Checks if a directory exists and will otherwise error
/// # Arguments
/// * `dirname` - the directory path to check for
/// * `label` - the label to use for error messages
pub fn check_required_dirname(dirname: &Path, label: &str) -> anyhow::Result<()> {
    if !dirname.is_dir() {
        bail!("{} is not a directory: \"{}\"", label, dirname.display());
    }

    Ok(())
}
