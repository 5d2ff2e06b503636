
use anyhow::Context;
use indicatif::ProgressIterator;
use log::debug;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::data_types::abundance::{EST_READS_COLUMN, TAXONOMY_ID_COLUMN};
use crate::data_types::sample_counts::SampleCounts;
use crate::data_types::table_error::TableError;
use crate::parsing::tsv::{column_index, open_tsv_file, record_line};
use crate::util::progress_bar::get_progress_style;

/// Loads the (taxonomy_id, new_est_reads) pairs from a .tsv(.gz) Bracken table.
/// Other columns are ignored.
/// # Errors
/// * if the file cannot be opened or read
/// * if either column is missing, or a value is not a non-negative number
pub fn load_sample_counts(filename: &Path) -> anyhow::Result<SampleCounts> {
    debug!("Loading sample counts {filename:?}...");
    let csv_reader = open_tsv_file(filename)?;
    let label = filename.display().to_string();
    read_sample_counts(csv_reader, &label)
        .with_context(|| format!("Error while loading {filename:?}:"))
}

/// Loads every table in the order provided, with a progress bar
pub fn load_all_sample_counts(filenames: &[PathBuf]) -> anyhow::Result<Vec<SampleCounts>> {
    filenames.iter()
        .progress_with_style(get_progress_style())
        .map(|f| load_sample_counts(f))
        .collect()
}

/// Parses the count projection from an open TSV reader.
/// Fractional counts are truncated toward zero.
pub fn read_sample_counts<R: Read>(mut csv_reader: csv::Reader<R>, label: &str) -> anyhow::Result<SampleCounts> {
    let headers = csv_reader.headers()?.clone();
    let taxid_index = column_index(&headers, TAXONOMY_ID_COLUMN, label)?;
    let count_index = column_index(&headers, EST_READS_COLUMN, label)?;

    let mut counts = vec![];
    for result in csv_reader.records() {
        let row = result.with_context(|| format!("Error while reading {label}"))?;
        let malformed = |column: &str, value: &str| TableError::MalformedValue {
            label: label.to_string(),
            line: record_line(&row),
            column: column.to_string(),
            value: value.to_string()
        };

        let taxonomy_id: u64 = row[taxid_index].trim().parse()
            .map_err(|_| malformed(TAXONOMY_ID_COLUMN, &row[taxid_index]))?;
        let count = parse_count(&row[count_index])
            .ok_or_else(|| malformed(EST_READS_COLUMN, &row[count_index]))?;
        counts.push((taxonomy_id, count));
    }

    debug!("Loaded {} counts from {label}", counts.len());
    Ok(SampleCounts::new(label.to_string(), counts))
}

/// Parses a non-negative count, truncating any fractional part
fn parse_count(text: &str) -> Option<u64> {
    let text = text.trim();
    if let Ok(v) = text.parse::<u64>() {
        return Some(v);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v.trunc() as u64),
        _ => None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::tsv::tsv_reader_from;

    fn read_str(text: &str) -> anyhow::Result<SampleCounts> {
        read_sample_counts(tsv_reader_from(text.as_bytes()), "mock")
    }

    #[test]
    fn test_projection() {
        let text = "name\ttaxonomy_id\ttaxonomy_lvl\tkraken_assigned_reads\tadded_reads\tnew_est_reads\tfraction_total_reads\n\
            Escherichia coli\t562\tS\t90\t10\t100\t0.8\n\
            Bacillus subtilis\t1423\tS\t20\t5\t25\t0.2\n";
        let counts = read_str(text).unwrap();
        assert_eq!(counts.label(), "mock");
        assert_eq!(counts.counts(), &[(562, 100), (1423, 25)]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let text = "taxonomy_id\tnew_est_reads\n1\t3\n1\t4\n";
        let counts = read_str(text).unwrap();
        assert_eq!(counts.counts(), &[(1, 3), (1, 4)]);
    }

    #[test]
    fn test_missing_column() {
        let text = "taxonomy_id\tkraken_assigned_reads\n1\t3\n";
        let err = read_str(text).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TableError>(),
            Some(&TableError::MissingColumn { label: "mock".to_string(), column: EST_READS_COLUMN.to_string() })
        );
    }

    #[test]
    fn test_negative_count() {
        let text = "taxonomy_id\tnew_est_reads\n1\t-3\n";
        let err = read_str(text).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::MalformedValue { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("10"), Some(10));
        assert_eq!(parse_count("10.9"), Some(10));
        assert_eq!(parse_count(" 7 "), Some(7));
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("inf"), None);
        assert_eq!(parse_count(""), None);
    }
}
