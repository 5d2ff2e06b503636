
/// Failures that can occur while loading or reshaping abundance tables.
/// All of these are terminal for an invocation.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TableError {
    #[error("{label}: missing required column \"{column}\"")]
    MissingColumn { label: String, column: String },
    #[error("{label}, line {line}: invalid value {value:?} in column \"{column}\"")]
    MalformedValue { label: String, line: u64, column: String, value: String },
    #[error("received {tables} count tables but {samples} sample names")]
    LengthMismatch { tables: usize, samples: usize },
    #[error("taxonomy_id {taxonomy_id} occurs more than once in sample \"{sample}\"")]
    DuplicateTaxonomyId { sample: String, taxonomy_id: u64 },
    #[error("sample name \"{sample}\" was provided more than once")]
    DuplicateSample { sample: String },
    #[error("sum of \"{column}\" is zero, fractions are undefined")]
    ZeroTotal { column: String },
}
