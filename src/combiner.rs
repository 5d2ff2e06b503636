/*!
# Combiner
Contains the logic for combining Bracken abundance tables from multiple samples into a single table.
Rows are grouped by (name, taxonomy_id, taxonomy_lvl) and every numeric column is summed.
The per-sample `fraction_total_reads` is meaningless after summing, so it is recomputed from `new_est_reads`.

## Example usage
```rust
use taxtab::combiner::{combine_tables, CombineConfig};
use taxtab::parsing::abundance_table::read_abundance_table;
use taxtab::parsing::tsv::tsv_reader_from;

let sample1 = "name\ttaxonomy_id\ttaxonomy_lvl\tnew_est_reads\tfraction_total_reads\n\
    Escherichia coli\t562\tS\t30\t1.0\n";
let sample2 = "name\ttaxonomy_id\ttaxonomy_lvl\tnew_est_reads\tfraction_total_reads\n\
    Escherichia coli\t562\tS\t30\t0.75\n\
    Bacillus subtilis\t1423\tS\t20\t0.25\n";
let tables = vec![
    read_abundance_table(tsv_reader_from(sample1.as_bytes()), "sample1").unwrap(),
    read_abundance_table(tsv_reader_from(sample2.as_bytes()), "sample2").unwrap(),
];

let combined = combine_tables(&tables, CombineConfig::default()).unwrap();
assert_eq!(combined.len(), 2);
assert_eq!(combined.rows()[0].key().name(), "Bacillus subtilis");
assert_eq!(combined.rows()[0].fraction(), 0.25);
assert_eq!(combined.rows()[1].values(), &[60.0]);
assert_eq!(combined.rows()[1].fraction(), 0.75);
```
*/
use derive_builder::Builder;
use indexmap::IndexMap;
use log::debug;
use std::collections::BTreeMap;
use strum_macros::EnumString;

use crate::data_types::abundance::{AbundanceTable, TaxonKey, ValueColumn, EST_READS_COLUMN};
use crate::data_types::combined_table::{CombinedRow, CombinedTable};
use crate::data_types::table_error::TableError;
use crate::util::number_format::round_to_decimals;

/// Default number of decimals kept in the recomputed fraction column
pub const DEFAULT_FRACTION_DECIMALS: u32 = 5;

/// What to do when the summed `new_est_reads` is zero and fractions cannot be computed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum_macros::Display, EnumString, clap::ValueEnum)]
pub enum ZeroTotalPolicy {
    /// Fail the invocation
    #[default]
    #[strum(ascii_case_insensitive, serialize = "error")]
    #[clap(name = "error")]
    Error,
    /// Write NaN for every fraction
    #[strum(ascii_case_insensitive, serialize = "nan")]
    #[clap(name = "nan")]
    Nan,
}

/// Controls how the fraction column is recomputed
#[derive(Builder, Clone, Copy, Debug)]
#[builder(default)]
pub struct CombineConfig {
    /// Number of decimals to round fractions to
    fraction_decimals: u32,
    /// Behavior when all estimated reads are zero
    zero_total: ZeroTotalPolicy,
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            fraction_decimals: DEFAULT_FRACTION_DECIMALS,
            zero_total: ZeroTotalPolicy::default()
        }
    }
}

impl CombineConfig {
    pub fn fraction_decimals(&self) -> u32 {
        self.fraction_decimals
    }

    pub fn zero_total(&self) -> ZeroTotalPolicy {
        self.zero_total
    }
}

/// Entry point for combining tables.
/// Empty tables are skipped entirely and do not contribute columns.
/// # Arguments
/// * `tables` - the per-sample tables, in input order
/// * `config` - controls fraction recomputation
/// # Errors
/// * if the total of `new_est_reads` is zero and `config` asks for an error
pub fn combine_tables(tables: &[AbundanceTable], config: CombineConfig) -> Result<CombinedTable, TableError> {
    let non_empty: Vec<&AbundanceTable> = tables.iter()
        .filter(|t| {
            if t.is_empty() {
                debug!("Skipping empty table {}", t.label());
            }
            !t.is_empty()
        })
        .collect();

    let (value_columns, column_maps) = union_value_columns(&non_empty);

    // sum everything by key; BTreeMap gives us sorted output for free
    let mut sums: BTreeMap<TaxonKey, Vec<f64>> = Default::default();
    for (table, column_map) in non_empty.iter().zip(column_maps.iter()) {
        for record in table.records() {
            let entry = sums.entry(record.key().clone())
                .or_insert_with(|| vec![0.0; value_columns.len()]);
            for (&target, &value) in column_map.iter().zip(record.values().iter()) {
                entry[target] += value;
            }
        }
    }
    debug!("Combined {} tables into {} distinct taxa", non_empty.len(), sums.len());

    let est_reads: Vec<f64> = match value_columns.iter().position(|c| c.name() == EST_READS_COLUMN) {
        Some(index) => sums.values().map(|v| v[index]).collect(),
        // only happens when every table was empty
        None => vec![]
    };
    let fractions = recompute_fractions(&est_reads, config)?;

    let rows: Vec<CombinedRow> = sums.into_iter()
        .zip(fractions)
        .map(|((key, values), fraction)| CombinedRow::new(key, values, fraction))
        .collect();
    Ok(CombinedTable::new(value_columns, rows))
}

/// Divides each value by the column total and rounds the result.
/// # Arguments
/// * `est_reads` - the summed `new_est_reads` column
/// * `config` - decimals and zero-total behavior
/// # Errors
/// * if the total is zero (including an empty column) and `config` asks for an error
pub fn recompute_fractions(est_reads: &[f64], config: CombineConfig) -> Result<Vec<f64>, TableError> {
    let total: f64 = est_reads.iter().sum();
    if total == 0.0 {
        return match config.zero_total() {
            ZeroTotalPolicy::Error => Err(TableError::ZeroTotal { column: EST_READS_COLUMN.to_string() }),
            ZeroTotalPolicy::Nan => Ok(vec![f64::NAN; est_reads.len()])
        };
    }

    Ok(est_reads.iter()
        .map(|&v| round_to_decimals(v / total, config.fraction_decimals()))
        .collect())
}

/// Builds the ordered union of value columns across tables.
/// A column stays integral only if it is integral in every table and present in all of them.
/// Also returns, for each table, where each of its value columns lands in the union.
fn union_value_columns(tables: &[&AbundanceTable]) -> (Vec<ValueColumn>, Vec<Vec<usize>>) {
    let mut union: IndexMap<String, ValueColumn> = Default::default();
    let mut column_maps = Vec::with_capacity(tables.len());
    for table in tables.iter() {
        let mut column_map = Vec::with_capacity(table.value_columns().len());
        for column in table.value_columns() {
            let entry = union.entry(column.name().to_string());
            column_map.push(entry.index());
            let union_column = entry.or_insert_with(|| column.clone());
            if !column.is_integral() {
                union_column.mark_float();
            }
        }
        column_maps.push(column_map);
    }

    // missing cells are filled with zero, but the column no longer reads as a pure integer one
    for (name, column) in union.iter_mut() {
        let everywhere = tables.iter().all(|t| t.value_columns().iter().any(|c| c.name() == name));
        if !everywhere {
            column.mark_float();
        }
    }
    (union.into_values().collect(), column_maps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;
    use crate::parsing::abundance_table::read_abundance_table;
    use crate::parsing::tsv::tsv_reader_from;

    const HEADER: &str = "name\ttaxonomy_id\ttaxonomy_lvl\tkraken_assigned_reads\tadded_reads\tnew_est_reads\tfraction_total_reads\n";

    fn table(label: &str, rows: &[(&str, u64, &str, u64, u64, u64)]) -> AbundanceTable {
        let mut text = HEADER.to_string();
        for (name, taxid, lvl, assigned, added, est) in rows.iter() {
            text.push_str(&format!("{name}\t{taxid}\t{lvl}\t{assigned}\t{added}\t{est}\t0.1\n"));
        }
        read_abundance_table(tsv_reader_from(text.as_bytes()), label).unwrap()
    }

    #[test]
    fn test_distinct_key_count() {
        let tables = vec![
            table("s1", &[("E. coli", 562, "S", 5, 5, 10), ("B. subtilis", 1423, "S", 1, 1, 2)]),
            table("s2", &[("E. coli", 562, "S", 3, 0, 3), ("E. coli", 562, "S1", 1, 0, 1)]),
            table("s3", &[("Homo sapiens", 9606, "S", 0, 4, 4)]),
        ];
        let combined = combine_tables(&tables, CombineConfig::default()).unwrap();
        assert_eq!(combined.len(), 4);

        // sorted by name, then taxid, then level
        let keys: Vec<(&str, u64, &str)> = combined.rows().iter()
            .map(|r| (r.key().name(), r.key().taxonomy_id(), r.key().taxonomy_lvl()))
            .collect();
        assert_eq!(keys, vec![
            ("B. subtilis", 1423, "S"),
            ("E. coli", 562, "S"),
            ("E. coli", 562, "S1"),
            ("Homo sapiens", 9606, "S"),
        ]);
        assert_eq!(combined.rows()[1].values(), &[8.0, 5.0, 13.0]);
        assert!(combined.value_columns().iter().all(|c| c.is_integral()));
    }

    #[test]
    fn test_fraction_sums_to_one() {
        let tables = vec![
            table("s1", &[("a", 1, "S", 0, 0, 1), ("b", 2, "S", 0, 0, 1)]),
            table("s2", &[("c", 3, "S", 0, 0, 1)]),
        ];
        let combined = combine_tables(&tables, CombineConfig::default()).unwrap();
        for row in combined.rows() {
            assert_approx_eq!(row.fraction(), 0.33333);
        }
        assert!((combined.fraction_sum() - 1.0).abs() <= 1e-4);
    }

    #[test]
    fn test_single_table_unchanged() {
        let rows = [("b", 2, "G", 7, 3, 10), ("a", 1, "S", 40, 50, 90)];
        let tables = vec![table("s1", &rows)];
        let combined = combine_tables(&tables, CombineConfig::default()).unwrap();
        assert_eq!(combined.len(), 2);
        assert_eq!(combined.rows()[0].values(), &[40.0, 50.0, 90.0]);
        assert_eq!(combined.rows()[1].values(), &[7.0, 3.0, 10.0]);
        assert_eq!(combined.column(EST_READS_COLUMN).unwrap(), vec![90.0, 10.0]);
        assert_approx_eq!(combined.rows()[0].fraction(), 0.9);
        assert_approx_eq!(combined.rows()[1].fraction(), 0.1);
    }

    #[test]
    fn test_empty_tables_skipped() {
        let empty = read_abundance_table(
            tsv_reader_from("name\ttaxonomy_id\ttaxonomy_lvl\textra_column\tnew_est_reads\tfraction_total_reads\n".as_bytes()),
            "empty"
        ).unwrap();
        let tables = vec![empty, table("s1", &[("a", 1, "S", 1, 1, 4)])];
        let combined = combine_tables(&tables, CombineConfig::default()).unwrap();
        assert_eq!(combined.len(), 1);

        // the empty table does not add its columns or demote integers
        let names: Vec<&str> = combined.value_columns().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["kraken_assigned_reads", "added_reads", "new_est_reads"]);
        assert!(combined.value_columns().iter().all(|c| c.is_integral()));
        assert_eq!(combined.rows()[0].fraction(), 1.0);
    }

    #[test]
    fn test_mismatched_columns() {
        let other = read_abundance_table(
            tsv_reader_from("name\ttaxonomy_id\ttaxonomy_lvl\tnew_est_reads\tfraction_total_reads\na\t1\tS\t6\t1.0\n".as_bytes()),
            "other"
        ).unwrap();
        let tables = vec![table("s1", &[("a", 1, "S", 1, 1, 4)]), other];
        let combined = combine_tables(&tables, CombineConfig::default()).unwrap();
        assert_eq!(combined.rows()[0].values(), &[1.0, 1.0, 10.0]);
        let integral: Vec<bool> = combined.value_columns().iter().map(|c| c.is_integral()).collect();
        assert_eq!(integral, vec![false, false, true]);
    }

    #[test]
    fn test_zero_total() {
        let tables = vec![table("s1", &[("a", 1, "S", 0, 0, 0)])];
        assert_eq!(
            combine_tables(&tables, CombineConfig::default()).unwrap_err(),
            TableError::ZeroTotal { column: EST_READS_COLUMN.to_string() }
        );

        let config = CombineConfigBuilder::default()
            .zero_total(ZeroTotalPolicy::Nan)
            .build().unwrap();
        let combined = combine_tables(&tables, config).unwrap();
        assert!(combined.rows()[0].fraction().is_nan());
    }

    #[test]
    fn test_all_empty() {
        let empty = read_abundance_table(tsv_reader_from(HEADER.as_bytes()), "empty").unwrap();
        let tables = vec![empty.clone(), empty];
        assert!(matches!(
            combine_tables(&tables, CombineConfig::default()),
            Err(TableError::ZeroTotal { .. })
        ));

        let config = CombineConfigBuilder::default()
            .zero_total(ZeroTotalPolicy::Nan)
            .build().unwrap();
        let combined = combine_tables(&tables, config).unwrap();
        assert!(combined.is_empty());
        assert!(combined.value_columns().is_empty());
    }

    #[test]
    fn test_decimals() {
        let config = CombineConfigBuilder::default()
            .fraction_decimals(2)
            .build().unwrap();
        let fractions = recompute_fractions(&[1.0, 2.0], config).unwrap();
        assert_approx_eq!(fractions[0], 0.33);
        assert_approx_eq!(fractions[1], 0.67);
    }

    #[test]
    fn test_policy_strings() {
        use std::str::FromStr;
        assert_eq!(ZeroTotalPolicy::from_str("NaN").unwrap(), ZeroTotalPolicy::Nan);
        assert_eq!(ZeroTotalPolicy::Error.to_string(), "error");
    }
}
