
use anyhow::bail;
use clap::{Parser, Subcommand};
use chrono::Datelike;
use lazy_static::lazy_static;
use std::path::Path;

use crate::cli::combine::CombineSettings;
use crate::cli::matrix::MatrixSettings;
use crate::cli::tag_fasta::TagFastaSettings;

lazy_static! {
    /// Stores the full version string we plan to use, which is generated in build.rs
    /// # Examples
    /// * `0.1.0-6bb9635-dirty` - while on a dirty branch
    /// * `0.1.0-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));

    /// Shared after help string
    pub static ref AFTER_HELP: String = format!("Copyright (C) 2023-{}     taxtab contributors
This program comes with ABSOLUTELY NO WARRANTY; it is intended for
research use only.", chrono::Utc::now().year());
}

#[derive(Parser)]
#[clap(author,
    version = &**FULL_VERSION,
    about,
    after_help = &**AFTER_HELP)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// taxtab, tools for reshaping Kraken2/Bracken abundance tables.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Sums Bracken abundance tables across samples and recomputes fractions
    Combine(Box<CombineSettings>),
    /// Builds a taxonomy_id by sample count matrix from Bracken abundance tables
    Matrix(Box<MatrixSettings>),
    /// Rewrites EuPathDB FASTA headers into Kraken2 taxid form
    TagFasta(Box<TagFastaSettings>)
}

pub fn get_cli() -> Cli {
    Cli::parse()
}

/// Checks if a file exists and will otherwise exit
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

/// Checks that the folder an output file will land in exists
/// # Arguments
/// * `filename` - the output file path
/// * `label` - the label to use for error messages
pub fn check_output_filename(filename: &Path, label: &str) -> anyhow::Result<()> {
    match filename.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            bail!("{} folder does not exist: \"{}\"", label, parent.display());
        },
        _ => Ok(())
    }
}
