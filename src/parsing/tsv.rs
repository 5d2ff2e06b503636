
use anyhow::Context;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::data_types::table_error::TableError;

/// Wrapper function that handles both gzip compressed and uncompressed tab-delimited files.
/// The first row is always treated as the header.
/// # Arguments
/// * `filename` - path to the .tsv(.gz) file to open
pub fn open_tsv_file(filename: &Path) -> anyhow::Result<csv::Reader<Box<dyn Read>>> {
    let file = File::open(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;

    let raw_reader: Box<dyn Read> = if filename.extension().unwrap_or_default() == "gz" {
        Box::new(flate2::read::MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(tsv_reader_from(raw_reader))
}

/// Builds our standard TSV reader from any byte source
pub fn tsv_reader_from<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(reader)
}

/// Finds a column by exact header name
/// # Arguments
/// * `headers` - the header row
/// * `column` - the header label to look for
/// * `label` - identifies the file in the error
/// # Errors
/// * if no header matches `column`
pub fn column_index(headers: &csv::StringRecord, column: &str, label: &str) -> Result<usize, TableError> {
    headers.iter()
        .position(|h| h == column)
        .ok_or_else(|| TableError::MissingColumn {
            label: label.to_string(),
            column: column.to_string()
        })
}

/// Returns the 1-based line number of a record, or 0 if unknown
pub fn record_line(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}
