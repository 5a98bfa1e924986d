
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::check_required_filename;

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about)]
pub struct VerifySettings {
    /// Truth variant table: tab-separated chromosome, position, REF, ALT, FILTER
    #[clap(required = true)]
    #[clap(short = 't')]
    #[clap(long = "truth")]
    #[clap(value_name = "FILE")]
    #[clap(help_heading = Some("Input/Output"))]
    pub truth_filename: PathBuf,

    /// Variant call file (VCF) whose passing variants must contain the truth set
    #[clap(required = true)]
    #[clap(short = 'q')]
    #[clap(long = "vcf")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub vcf_filename: PathBuf,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8
}

pub fn check_verify_settings(settings: VerifySettings) -> anyhow::Result<VerifySettings> {
    info!("Exomark version: {:?}", env!("CARGO_PKG_VERSION"));
    info!("Sub-command: verify");
    info!("Inputs:");

    check_required_filename(&settings.truth_filename, "Truth table")?;
    check_required_filename(&settings.vcf_filename, "VCF")?;

    info!("\tTruth table: {:?}", &settings.truth_filename);
    info!("\tVCF: {:?}", &settings.vcf_filename);

    Ok(settings)
}
