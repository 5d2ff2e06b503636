
/// Abundance records, their composite key, and the column names Bracken uses
pub mod abundance;
/// The result of combining abundance tables across samples
pub mod combined_table;
/// Sample-by-taxon count matrix
pub mod count_matrix;
/// Per-sample (taxonomy_id, count) projections used to build a count matrix
pub mod sample_counts;
/// Errors raised while loading or reshaping tables
pub mod table_error;
