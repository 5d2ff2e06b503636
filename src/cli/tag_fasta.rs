
use clap::Args;
use log::info;
use std::path::PathBuf;

use crate::cli::core::{check_output_filename, check_required_filename, AFTER_HELP, FULL_VERSION};

#[derive(Args, Clone)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct TagFastaSettings {
    /// EuPathDB protein FASTA file, headers must carry an organism= field
    #[clap(required = true)]
    #[clap(short = 'f')]
    #[clap(long = "fasta")]
    #[clap(value_name = "FASTA")]
    #[clap(help_heading = Some("Input/Output"))]
    pub fasta_filename: PathBuf,

    /// Organism metadata table with "Organism" and "Species NCBI taxon ID" columns
    #[clap(required = true)]
    #[clap(short = 'm')]
    #[clap(long = "metadata")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub metadata_filename: PathBuf,

    /// Output FASTA with Kraken2 taxid headers
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-fasta")]
    #[clap(value_name = "FASTA")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_fasta_filename: PathBuf,

    /// Output seqid-to-taxid map
    #[clap(required = true)]
    #[clap(long = "output-idmap")]
    #[clap(value_name = "MAP")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_idmap_filename: PathBuf,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

pub fn check_tag_fasta_settings(settings: TagFastaSettings) -> anyhow::Result<TagFastaSettings> {
    info!("taxtab version: {:?}", &*FULL_VERSION);
    info!("Sub-command: tag-fasta");
    info!("Inputs:");

    check_required_filename(&settings.fasta_filename, "Input FASTA")?;
    info!("\tFASTA: {:?}", &settings.fasta_filename);
    check_required_filename(&settings.metadata_filename, "Organism metadata")?;
    info!("\tOrganism metadata: {:?}", &settings.metadata_filename);

    info!("Outputs:");
    anyhow::ensure!(
        settings.output_fasta_filename != settings.output_idmap_filename,
        "--output-fasta and --output-idmap must be different files"
    );
    check_output_filename(&settings.output_fasta_filename, "Output FASTA")?;
    info!("\tFASTA: {:?}", &settings.output_fasta_filename);
    check_output_filename(&settings.output_idmap_filename, "Output idmap")?;
    info!("\tID map: {:?}", &settings.output_idmap_filename);

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let fasta = temp_dir.path().join("proteins.fasta");
        let metadata = temp_dir.path().join("meta.tsv");
        std::fs::write(&fasta, "").unwrap();
        std::fs::write(&metadata, "").unwrap();

        let good = TagFastaSettings {
            fasta_filename: fasta,
            metadata_filename: metadata,
            output_fasta_filename: temp_dir.path().join("tagged.fasta"),
            output_idmap_filename: temp_dir.path().join("prelim_map.txt"),
            verbosity: 0
        };
        assert!(check_tag_fasta_settings(good.clone()).is_ok());

        let mut same_outputs = good.clone();
        same_outputs.output_idmap_filename = same_outputs.output_fasta_filename.clone();
        assert!(check_tag_fasta_settings(same_outputs).is_err());

        let mut missing = good;
        missing.metadata_filename = temp_dir.path().join("nope.tsv");
        assert!(check_tag_fasta_settings(missing).is_err());
    }
}
