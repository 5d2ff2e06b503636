/*!
# Writers module
Contains the logic for writing the output files for the combine, matrix, and tag-fasta commands.
*/
/// Writes the combined abundance table
pub mod combined_table;
/// Writes the sample-by-taxon count matrix
pub mod count_matrix;
/// Writes the Kraken2 seqid-to-taxid map
pub mod kraken_idmap;

use std::path::Path;

/// Picks the output delimiter from the file extension: "," for .csv, otherwise tab
pub fn delimiter_for(filename: &Path) -> u8 {
    let is_csv: bool = filename.extension().unwrap_or_default() == "csv";
    if is_csv { b',' } else { b'\t' }
}
