/*!
# CLI module
Command line interface functionality that is specific to taxtab.
*/

/// The main CLI module that contains the top-level CLI parser and help text
pub mod core;
/// The combine CLI subcommand
pub mod combine;
/// The matrix CLI subcommand
pub mod matrix;
/// The tag-fasta CLI subcommand
pub mod tag_fasta;
