/*!
# Matrix Builder
Joins per-sample (taxonomy_id, new_est_reads) projections into a single sample-by-taxon count matrix.
Each sample becomes one column named after it; taxa missing from a sample are zero.

## Example usage
```rust
use taxtab::data_types::sample_counts::SampleCounts;
use taxtab::matrix_builder::build_count_matrix;

let samples = vec![
    SampleCounts::new("sample1.tsv".to_string(), vec![(1, 10)]),
    SampleCounts::new("sample2.tsv".to_string(), vec![(1, 5), (2, 3)]),
];
let names = vec!["sample1".to_string(), "sample2".to_string()];
let matrix = build_count_matrix(&samples, &names).unwrap();
assert_eq!(matrix.row(1).unwrap(), &[10, 5]);
assert_eq!(matrix.row(2).unwrap(), &[0, 3]);
```
*/
use log::debug;
use rustc_hash::FxHashSet as HashSet;

use crate::data_types::count_matrix::CountMatrix;
use crate::data_types::sample_counts::SampleCounts;
use crate::data_types::table_error::TableError;

/// Entry point for building the count matrix
/// # Arguments
/// * `samples` - one count projection per sample, in column order
/// * `sample_names` - column names, parallel to `samples`
/// # Errors
/// * if `samples` and `sample_names` have different lengths
/// * if a sample name is repeated
/// * if a taxonomy_id appears more than once within one sample
pub fn build_count_matrix(samples: &[SampleCounts], sample_names: &[String]) -> Result<CountMatrix, TableError> {
    if samples.len() != sample_names.len() {
        return Err(TableError::LengthMismatch {
            tables: samples.len(),
            samples: sample_names.len()
        });
    }

    let mut matrix = CountMatrix::new(sample_names.to_vec())?;
    for (sample_index, (counts, sample_name)) in samples.iter().zip(sample_names.iter()).enumerate() {
        let mut seen: HashSet<u64> = Default::default();
        for &(taxonomy_id, count) in counts.counts() {
            if !seen.insert(taxonomy_id) {
                return Err(TableError::DuplicateTaxonomyId {
                    sample: sample_name.clone(),
                    taxonomy_id
                });
            }
            matrix.set_count(taxonomy_id, sample_index, count);
        }
        debug!("Joined {} taxa from {} as {sample_name:?}", seen.len(), counts.label());
    }

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_example_matrix() {
        let samples = vec![
            SampleCounts::new("s1".to_string(), vec![(1, 10)]),
            SampleCounts::new("s2".to_string(), vec![(1, 5), (2, 3)]),
        ];
        let matrix = build_count_matrix(&samples, &names(&["sample1", "sample2"])).unwrap();
        assert_eq!(matrix.num_rows(), 2);
        assert_eq!(matrix.row(1).unwrap(), &[10, 5]);
        assert_eq!(matrix.row(2).unwrap(), &[0, 3]);
    }

    #[test]
    fn test_disjoint_taxa() {
        let samples = vec![
            SampleCounts::new("s1".to_string(), vec![(100, 1), (200, 2)]),
            SampleCounts::new("s2".to_string(), vec![(300, 3)]),
            SampleCounts::new("s3".to_string(), vec![(400, 4)]),
        ];
        let matrix = build_count_matrix(&samples, &names(&["a", "b", "c"])).unwrap();
        assert_eq!(matrix.num_rows(), 4);
        let rows: Vec<(u64, Vec<u64>)> = matrix.rows().map(|(t, r)| (t, r.to_vec())).collect();
        assert_eq!(rows, vec![
            (100, vec![1, 0, 0]),
            (200, vec![2, 0, 0]),
            (300, vec![0, 3, 0]),
            (400, vec![0, 0, 4]),
        ]);
    }

    #[test]
    fn test_sample_order() {
        let samples = vec![
            SampleCounts::new("s1".to_string(), vec![(1, 1)]),
            SampleCounts::new("s2".to_string(), vec![(1, 2)]),
        ];
        let matrix = build_count_matrix(&samples, &names(&["zeta", "alpha"])).unwrap();
        assert_eq!(matrix.sample_names(), &names(&["zeta", "alpha"]));
        assert_eq!(matrix.get(1, "zeta"), Some(1));
        assert_eq!(matrix.get(1, "alpha"), Some(2));
    }

    #[test]
    fn test_empty_sample() {
        let samples = vec![
            SampleCounts::new("s1".to_string(), vec![]),
            SampleCounts::new("s2".to_string(), vec![(9, 2)]),
        ];
        let matrix = build_count_matrix(&samples, &names(&["a", "b"])).unwrap();
        assert_eq!(matrix.row(9).unwrap(), &[0, 2]);
    }

    #[test]
    fn test_length_mismatch() {
        let samples = vec![SampleCounts::new("s1".to_string(), vec![(1, 1)])];
        assert_eq!(
            build_count_matrix(&samples, &names(&["a", "b"])).unwrap_err(),
            TableError::LengthMismatch { tables: 1, samples: 2 }
        );
    }

    #[test]
    fn test_duplicate_taxid() {
        let samples = vec![
            SampleCounts::new("s1".to_string(), vec![(1, 1)]),
            SampleCounts::new("s2".to_string(), vec![(1, 1), (2, 2), (1, 3)]),
        ];
        assert_eq!(
            build_count_matrix(&samples, &names(&["a", "b"])).unwrap_err(),
            TableError::DuplicateTaxonomyId { sample: "b".to_string(), taxonomy_id: 1 }
        );
    }

    #[test]
    fn test_duplicate_sample() {
        let samples = vec![
            SampleCounts::new("s1".to_string(), vec![(1, 1)]),
            SampleCounts::new("s2".to_string(), vec![(1, 1)]),
        ];
        assert_eq!(
            build_count_matrix(&samples, &names(&["a", "a"])).unwrap_err(),
            TableError::DuplicateSample { sample: "a".to_string() }
        );
    }
}
