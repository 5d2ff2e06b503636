
use crate::data_types::abundance::{TaxonKey, ValueColumn};

/// One row of the combined table: summed values plus the recomputed fraction
#[derive(Clone, Debug, PartialEq)]
pub struct CombinedRow {
    key: TaxonKey,
    /// Parallel to the table's value columns
    values: Vec<f64>,
    /// Fraction of the total `new_est_reads`, rounded
    fraction: f64,
}

impl CombinedRow {
    pub fn new(key: TaxonKey, values: Vec<f64>, fraction: f64) -> Self {
        Self { key, values, fraction }
    }

    pub fn key(&self) -> &TaxonKey {
        &self.key
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }
}

/// Abundance records unioned across samples and grouped by composite key.
/// Rows are sorted by key.
#[derive(Clone, Debug, Default)]
pub struct CombinedTable {
    value_columns: Vec<ValueColumn>,
    rows: Vec<CombinedRow>,
}

impl CombinedTable {
    pub fn new(value_columns: Vec<ValueColumn>, rows: Vec<CombinedRow>) -> Self {
        Self { value_columns, rows }
    }

    pub fn value_columns(&self) -> &[ValueColumn] {
        &self.value_columns
    }

    pub fn rows(&self) -> &[CombinedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the summed values for a column by name, in row order
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.value_columns.iter().position(|c| c.name() == name)?;
        Some(self.rows.iter().map(|r| r.values[index]).collect())
    }

    /// Sum of the fraction column; close to 1.0 for non-degenerate inputs
    pub fn fraction_sum(&self) -> f64 {
        self.rows.iter().map(|r| r.fraction).sum()
    }
}
