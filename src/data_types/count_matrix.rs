
use indexmap::IndexMap;
use rustc_hash::FxHashSet as HashSet;

use crate::data_types::table_error::TableError;

/// Sample-by-taxon table of read counts.
/// Every (taxonomy_id, sample) cell is defined; cells never assigned are 0.
/// Columns follow sample order, rows follow the first time each taxonomy_id was seen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CountMatrix {
    sample_names: Vec<String>,
    /// taxonomy_id -> one count per sample
    rows: IndexMap<u64, Vec<u64>>,
}

impl CountMatrix {
    /// Creates an empty matrix with fixed columns
    /// # Errors
    /// * if a sample name appears more than once
    pub fn new(sample_names: Vec<String>) -> Result<Self, TableError> {
        let mut seen: HashSet<&str> = Default::default();
        for sample in sample_names.iter() {
            if !seen.insert(sample.as_str()) {
                return Err(TableError::DuplicateSample { sample: sample.clone() });
            }
        }

        Ok(Self {
            sample_names,
            rows: Default::default()
        })
    }

    /// Sets a single cell, creating the zero-filled row if needed
    /// # Panics
    /// * if `sample_index` is out of bounds
    pub fn set_count(&mut self, taxonomy_id: u64, sample_index: usize, count: u64) {
        assert!(sample_index < self.sample_names.len());
        let num_samples = self.sample_names.len();
        let row = self.rows.entry(taxonomy_id)
            .or_insert_with(|| vec![0; num_samples]);
        row[sample_index] = count;
    }

    pub fn sample_names(&self) -> &[String] {
        &self.sample_names
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn taxonomy_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.rows.keys().copied()
    }

    /// Returns the counts for a taxon, one per sample
    pub fn row(&self, taxonomy_id: u64) -> Option<&[u64]> {
        self.rows.get(&taxonomy_id).map(|r| r.as_slice())
    }

    /// Iterates rows in matrix order
    pub fn rows(&self) -> impl Iterator<Item = (u64, &[u64])> + '_ {
        self.rows.iter().map(|(&t, r)| (t, r.as_slice()))
    }

    /// Looks up a single cell; None only if the taxon or sample is not part of the matrix
    pub fn get(&self, taxonomy_id: u64, sample: &str) -> Option<u64> {
        let sample_index = self.sample_names.iter().position(|s| s == sample)?;
        self.rows.get(&taxonomy_id).map(|r| r[sample_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_fill() {
        let mut matrix = CountMatrix::new(vec!["a".to_string(), "b".to_string()]).unwrap();
        matrix.set_count(7, 1, 12);
        assert_eq!(matrix.row(7).unwrap(), &[0, 12]);
        assert_eq!(matrix.get(7, "a"), Some(0));
        assert_eq!(matrix.get(7, "b"), Some(12));
        assert_eq!(matrix.get(8, "a"), None);
        assert_eq!(matrix.get(7, "c"), None);
    }

    #[test]
    fn test_row_order() {
        let mut matrix = CountMatrix::new(vec!["a".to_string()]).unwrap();
        matrix.set_count(30, 0, 1);
        matrix.set_count(2, 0, 1);
        matrix.set_count(15, 0, 1);
        matrix.set_count(2, 0, 4);
        assert_eq!(matrix.taxonomy_ids().collect::<Vec<u64>>(), vec![30, 2, 15]);
        assert_eq!(matrix.row(2).unwrap(), &[4]);
    }

    #[test]
    fn test_duplicate_sample() {
        let result = CountMatrix::new(vec!["a".to_string(), "b".to_string(), "a".to_string()]);
        assert_eq!(result.unwrap_err(), TableError::DuplicateSample { sample: "a".to_string() });
    }
}
