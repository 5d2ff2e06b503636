
use anyhow::Context;
use indicatif::ProgressIterator;
use log::debug;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::data_types::abundance::{
    AbundanceRecord, AbundanceTable, TaxonKey, ValueColumn,
    EST_READS_COLUMN, FRACTION_COLUMN, NAME_COLUMN, TAXONOMY_ID_COLUMN, TAXONOMY_LVL_COLUMN
};
use crate::data_types::table_error::TableError;
use crate::parsing::tsv::{column_index, open_tsv_file, record_line};
use crate::util::progress_bar::get_progress_style;

/// Loads a single Bracken abundance table from a .tsv(.gz) file.
/// # Arguments
/// * `filename` - path to the table
/// # Errors
/// * if the file cannot be opened or read
/// * if any required column is missing, or any value is not numeric
pub fn load_abundance_table(filename: &Path) -> anyhow::Result<AbundanceTable> {
    debug!("Loading abundance table {filename:?}...");
    let csv_reader = open_tsv_file(filename)?;
    let label = filename.display().to_string();
    read_abundance_table(csv_reader, &label)
        .with_context(|| format!("Error while loading {filename:?}:"))
}

/// Loads every table in the order provided, with a progress bar
pub fn load_abundance_tables(filenames: &[PathBuf]) -> anyhow::Result<Vec<AbundanceTable>> {
    filenames.iter()
        .progress_with_style(get_progress_style())
        .map(|f| load_abundance_table(f))
        .collect()
}

/// Parses an abundance table from an open TSV reader.
/// The key columns and `new_est_reads` must be present, as must `fraction_total_reads`, which is dropped.
/// Every other column is treated as a numeric value column.
/// # Arguments
/// * `csv_reader` - reader with headers enabled
/// * `label` - identifies the source in errors
pub fn read_abundance_table<R: Read>(mut csv_reader: csv::Reader<R>, label: &str) -> anyhow::Result<AbundanceTable> {
    let headers = csv_reader.headers()?.clone();
    let name_index = column_index(&headers, NAME_COLUMN, label)?;
    let taxid_index = column_index(&headers, TAXONOMY_ID_COLUMN, label)?;
    let lvl_index = column_index(&headers, TAXONOMY_LVL_COLUMN, label)?;
    column_index(&headers, EST_READS_COLUMN, label)?;
    let fraction_index = column_index(&headers, FRACTION_COLUMN, label)?;

    let key_indices = [name_index, taxid_index, lvl_index, fraction_index];
    let value_indices: Vec<usize> = (0..headers.len())
        .filter(|i| !key_indices.contains(i))
        .collect();
    let mut value_columns: Vec<ValueColumn> = value_indices.iter()
        .map(|&i| ValueColumn::new(headers[i].to_string(), true))
        .collect();

    let mut records = vec![];
    for result in csv_reader.records() {
        let row = result.with_context(|| format!("Error while reading {label}"))?;
        let line = record_line(&row);

        let taxid_text = &row[taxid_index];
        let taxonomy_id: u64 = taxid_text.trim().parse()
            .map_err(|_| TableError::MalformedValue {
                label: label.to_string(),
                line,
                column: TAXONOMY_ID_COLUMN.to_string(),
                value: taxid_text.to_string()
            })?;
        let key = TaxonKey::new(
            row[name_index].to_string(),
            taxonomy_id,
            row[lvl_index].to_string()
        );

        let mut values = Vec::with_capacity(value_indices.len());
        for (column, &i) in value_columns.iter_mut().zip(value_indices.iter()) {
            let (value, integral) = parse_count(&row[i])
                .ok_or_else(|| TableError::MalformedValue {
                    label: label.to_string(),
                    line,
                    column: column.name().to_string(),
                    value: row[i].to_string()
                })?;
            if !integral {
                column.mark_float();
            }
            values.push(value);
        }
        records.push(AbundanceRecord::new(key, values));
    }

    debug!("Loaded {} records from {label}", records.len());
    AbundanceTable::new(label.to_string(), value_columns, records)
}

/// Parses a numeric cell, returning the value and whether it was written as an integer.
/// Returns None for empty or non-finite values.
fn parse_count(text: &str) -> Option<(f64, bool)> {
    let text = text.trim();
    if let Ok(v) = text.parse::<i64>() {
        return Some((v as f64, true));
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Some((v, false)),
        _ => None
    }
}
