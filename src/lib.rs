
/// Command line interface functionality
pub mod cli;
/// Contains the core logic for combining abundance tables across samples
pub mod combiner;
/// Contains various shared data types
pub mod data_types;
/// Rewrites EuPathDB FASTA headers into Kraken2 taxid form
pub mod fasta_tagger;
/// Contains the core logic for building a sample-by-taxon count matrix
pub mod matrix_builder;
/// Tooling for parsing input files into meaningful structs / data
pub mod parsing;
/// Various utility functions that tend to be very generic
pub mod util;
/// All output writers
pub mod writers;
