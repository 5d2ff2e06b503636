/*!
# Parsing module
Contains the logic for parsing input files into meaningful structs / data.
*/
/// Loads Bracken abundance tables for combining
pub mod abundance_table;
/// Loads the organism metadata table used to tag EuPathDB FASTA files
pub mod organism_metadata;
/// Loads the (taxonomy_id, new_est_reads) projection of Bracken tables for matrix building
pub mod sample_counts;
/// Shared helpers for tab-delimited inputs
pub mod tsv;
