
use log::{LevelFilter, error, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::time::Instant;

use taxtab::cli::combine::{CombineSettings, check_combine_settings};
use taxtab::cli::core::{Commands, get_cli};
use taxtab::cli::matrix::{MatrixSettings, check_matrix_settings};
use taxtab::cli::tag_fasta::{TagFastaSettings, check_tag_fasta_settings};
use taxtab::combiner::combine_tables;
use taxtab::data_types::table_error::TableError;
use taxtab::fasta_tagger::{tag_fasta, TagSummary};
use taxtab::matrix_builder::build_count_matrix;
use taxtab::parsing::abundance_table::load_abundance_tables;
use taxtab::parsing::organism_metadata::OrganismMetadata;
use taxtab::parsing::sample_counts::load_all_sample_counts;
use taxtab::writers::combined_table::CombinedTableWriter;
use taxtab::writers::count_matrix::CountMatrixWriter;
use taxtab::writers::kraken_idmap::KrakenIdMapWriter;

/// Sets up logging before we check the other settings
fn init_logging(verbosity: u8) {
    let filter_level: LevelFilter = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();
}

/// Malformed tables and integrity failures are data errors, everything else is I/O
fn load_exit_code(e: &anyhow::Error) -> i32 {
    if e.downcast_ref::<TableError>().is_some() {
        exitcode::DATAERR
    } else {
        exitcode::IOERR
    }
}

fn run_combine(settings: CombineSettings) {
    let start_time = Instant::now();
    init_logging(settings.verbosity);

    let settings = match check_combine_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };
    let combine_config = match settings.combine_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Error while building combine configuration: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    // everything is loaded before we combine
    info!("Loading {} abundance tables...", settings.input_filenames.len());
    let tables = match load_abundance_tables(&settings.input_filenames) {
        Ok(t) => t,
        Err(e) => {
            error!("Error while loading abundance tables: {e:#}");
            std::process::exit(load_exit_code(&e));
        }
    };

    info!("Combining tables...");
    let combined = match combine_tables(&tables, combine_config) {
        Ok(c) => c,
        Err(e) => {
            error!("Error while combining tables: {e}");
            std::process::exit(exitcode::DATAERR);
        }
    };
    info!("Combined table has {} taxa, fraction sum = {:.5}", combined.len(), combined.fraction_sum());

    // output is only created once the result is complete
    info!("Saving combined table to {:?}...", settings.output_filename);
    let write_result = CombinedTableWriter::new(&settings.output_filename)
        .and_then(|mut writer| writer.write_table(&combined));
    if let Err(e) = write_result {
        error!("Error while saving combined table: {e:#}");
        std::process::exit(exitcode::IOERR);
    }

    info!("Combine completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn run_matrix(settings: MatrixSettings) {
    let start_time = Instant::now();
    init_logging(settings.verbosity);

    let settings = match check_matrix_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    info!("Loading {} count tables...", settings.input_filenames.len());
    let samples = match load_all_sample_counts(&settings.input_filenames) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while loading count tables: {e:#}");
            std::process::exit(load_exit_code(&e));
        }
    };

    info!("Building count matrix...");
    let matrix = match build_count_matrix(&samples, &settings.sample_names) {
        Ok(m) => m,
        Err(e) => {
            error!("Error while building count matrix: {e}");
            let code = match e {
                TableError::LengthMismatch { .. } => exitcode::CONFIG,
                _ => exitcode::DATAERR
            };
            std::process::exit(code);
        }
    };
    info!("Count matrix has {} taxa across {} samples", matrix.num_rows(), matrix.sample_names().len());

    info!("Saving count matrix to {:?}...", settings.output_filename);
    let write_result = CountMatrixWriter::new(&settings.output_filename)
        .and_then(|mut writer| writer.write_matrix(&matrix));
    if let Err(e) = write_result {
        error!("Error while saving count matrix: {e:#}");
        std::process::exit(exitcode::IOERR);
    }

    info!("Matrix completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

/// Opens all tag-fasta files and streams the records through the tagger
fn tag_fasta_files(settings: &TagFastaSettings, metadata: &OrganismMetadata) -> anyhow::Result<TagSummary> {
    let fasta_in = BufReader::new(File::open(&settings.fasta_filename)?);
    let mut fasta_out = BufWriter::new(File::create(&settings.output_fasta_filename)?);
    let mut idmap_out = KrakenIdMapWriter::new(&settings.output_idmap_filename)?;

    let summary = tag_fasta(fasta_in, metadata, &mut fasta_out, &mut idmap_out)?;
    fasta_out.flush()?;
    idmap_out.flush()?;
    Ok(summary)
}

fn run_tag_fasta(settings: TagFastaSettings) {
    let start_time = Instant::now();
    init_logging(settings.verbosity);

    let settings = match check_tag_fasta_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    info!("Loading organism metadata...");
    let metadata = match OrganismMetadata::from_tsv(&settings.metadata_filename) {
        Ok(m) => m,
        Err(e) => {
            error!("Error while loading organism metadata: {e:#}");
            std::process::exit(load_exit_code(&e));
        }
    };
    info!("Loaded metadata for {} organisms", metadata.len());

    info!("Tagging FASTA records...");
    let summary = match tag_fasta_files(&settings, &metadata) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while tagging FASTA: {e:#}");
            // do not leave partial outputs behind
            for filename in [&settings.output_fasta_filename, &settings.output_idmap_filename] {
                let _ = std::fs::remove_file(filename);
            }
            std::process::exit(exitcode::DATAERR);
        }
    };
    info!("Records tagged: {}", summary.records_kept);
    info!("Records skipped: {}", summary.records_skipped);
    info!("Organisms without metadata: {}", summary.unknown_organisms.len());

    info!("Tag-fasta completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Combine(settings) => {
            run_combine(*settings);
        },
        Commands::Matrix(settings) => {
            run_matrix(*settings);
        },
        Commands::TagFasta(settings) => {
            run_tag_fasta(*settings);
        }
    }

    info!("Process finished successfully.");
}
