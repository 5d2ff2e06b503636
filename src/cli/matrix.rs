
use anyhow::ensure;
use clap::Args;
use itertools::Itertools;
use log::info;
use std::path::PathBuf;

use crate::cli::core::{check_output_filename, check_required_filename, AFTER_HELP, FULL_VERSION};

#[derive(Args, Clone)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct MatrixSettings {
    /// Input Bracken abundance table (TSV), may be gzip compressed; provided in column order
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_filenames: Vec<PathBuf>,

    /// Sample name for the corresponding input table
    #[clap(required = true)]
    #[clap(short = 's')]
    #[clap(long = "sample")]
    #[clap(value_name = "SAMPLE")]
    #[clap(help_heading = Some("Input/Output"))]
    pub sample_names: Vec<String>,

    /// Output count matrix (TSV, or CSV if the name ends in .csv)
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_filename: PathBuf,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

pub fn check_matrix_settings(settings: MatrixSettings) -> anyhow::Result<MatrixSettings> {
    info!("taxtab version: {:?}", &*FULL_VERSION);
    info!("Sub-command: matrix");

    // every table needs exactly one sample name
    ensure!(
        settings.input_filenames.len() == settings.sample_names.len(),
        "received {} input tables but {} sample names",
        settings.input_filenames.len(), settings.sample_names.len()
    );
    let duplicates = settings.sample_names.iter().duplicates().collect_vec();
    ensure!(duplicates.is_empty(), "sample names must be unique, repeated: {}", duplicates.iter().join(", "));

    info!("Inputs:");
    for (i, (filename, sample)) in settings.input_filenames.iter().zip(settings.sample_names.iter()).enumerate() {
        check_required_filename(filename, format!("Input table #{i}").as_str())?;
        info!("\tInput table #{i}: {filename:?}");
        info!("\t\tSample name: {sample:?}");
    }

    info!("Outputs:");
    check_output_filename(&settings.output_filename, "Output matrix")?;
    info!("\tCount matrix: {:?}", &settings.output_filename);

    Ok(settings)
}
