
use anyhow::ensure;
use clap::Args;
use log::info;
use std::path::PathBuf;

use crate::cli::core::{check_output_filename, check_required_filename, AFTER_HELP, FULL_VERSION};
use crate::combiner::{CombineConfig, CombineConfigBuilder, ZeroTotalPolicy, DEFAULT_FRACTION_DECIMALS};

#[derive(Args, Clone)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct CombineSettings {
    /// Input Bracken abundance table (TSV), may be gzip compressed
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_filenames: Vec<PathBuf>,

    /// Output combined table (TSV, or CSV if the name ends in .csv)
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_filename: PathBuf,

    /// Number of decimals kept in the recomputed fraction_total_reads
    #[clap(long = "decimals")]
    #[clap(value_name = "INT")]
    #[clap(help_heading = Some("Fraction parameters"))]
    #[clap(default_value_t = DEFAULT_FRACTION_DECIMALS)]
    pub fraction_decimals: u32,

    /// Behavior when the total of new_est_reads is zero
    #[clap(long = "zero-total")]
    #[clap(value_name = "POLICY")]
    #[clap(help_heading = Some("Fraction parameters"))]
    #[clap(default_value = "error")]
    pub zero_total: ZeroTotalPolicy,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl CombineSettings {
    /// Converts the fraction options into the library config
    pub fn combine_config(&self) -> anyhow::Result<CombineConfig> {
        let config = CombineConfigBuilder::default()
            .fraction_decimals(self.fraction_decimals)
            .zero_total(self.zero_total)
            .build()?;
        Ok(config)
    }
}

pub fn check_combine_settings(settings: CombineSettings) -> anyhow::Result<CombineSettings> {
    info!("taxtab version: {:?}", &*FULL_VERSION);
    info!("Sub-command: combine");
    info!("Inputs:");

    for (i, filename) in settings.input_filenames.iter().enumerate() {
        check_required_filename(filename, format!("Input table #{i}").as_str())?;
        info!("\tInput table #{i}: {filename:?}");
    }

    info!("Outputs:");
    check_output_filename(&settings.output_filename, "Output table")?;
    info!("\tCombined table: {:?}", &settings.output_filename);

    info!("Fraction parameters:");
    ensure!(settings.fraction_decimals <= 15, "--decimals must be <=15");
    info!("\tDecimals: {}", settings.fraction_decimals);
    info!("\tZero total: {}", settings.zero_total);

    Ok(settings)
}
