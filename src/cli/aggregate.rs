
use anyhow::bail;
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::check_required_dirname;

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about)]
pub struct AggregateSettings {
    /// Input directory containing the number-of-bases table and the case sub-directories
    #[clap(short = 'i')]
    #[clap(long = "input-dir")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(default_value = ".")]
    pub input_dir: PathBuf,

    /// Output directory for the benchmarking metrics report
    #[clap(short = 'o')]
    #[clap(long = "output-dir")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(default_value = ".")]
    pub output_dir: PathBuf,

    /// Optional output debug folder
    #[clap(long = "output-debug")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    pub debug_folder: Option<PathBuf>,

    /// Case directory name prefixes to scan for; repeat the flag for multiple prefixes
    #[clap(long = "case-prefix")]
    #[clap(value_name = "PREFIX")]
    #[clap(help_heading = Some("Case discovery"))]
    #[clap(default_values_t = [String::from("NA"), String::from("HuRef")])]
    pub case_prefixes: Vec<String>,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8
}

pub fn check_aggregate_settings(settings: AggregateSettings) -> anyhow::Result<AggregateSettings> {
    info!("Exomark version: {:?}", env!("CARGO_PKG_VERSION"));
    info!("Sub-command: aggregate");
    info!("Inputs:");

    check_required_dirname(&settings.input_dir, "Input directory")?;
    info!("\tInput directory: {:?}", &settings.input_dir);

    if settings.case_prefixes.is_empty() {
        bail!("At least one --case-prefix is required");
    }
    if let Some(prefix) = settings.case_prefixes.iter().find(|p| p.is_empty()) {
        bail!("Empty --case-prefix is not allowed: {prefix:?}");
    }
    info!("\tCase prefixes: {:?}", &settings.case_prefixes);

    info!("Outputs:");
    info!("\tOutput directory: {:?}", &settings.output_dir);
    if let Some(debug_folder) = settings.debug_folder.as_ref() {
        info!("\tDebug folder: {debug_folder:?}");
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_prefix_rejected() {
        let settings = AggregateSettings {
            input_dir: PathBuf::from("test_data/example_metrics"),
            case_prefixes: vec!["NA".to_string(), String::new()],
            ..Default::default()
        };
        assert!(check_aggregate_settings(settings).is_err());
    }

    #[test]
    fn test_missing_input_dir_rejected() {
        let settings = AggregateSettings {
            input_dir: PathBuf::from("test_data/does_not_exist"),
            case_prefixes: vec!["NA".to_string()],
            ..Default::default()
        };
        assert!(check_aggregate_settings(settings).is_err());
    }
}
