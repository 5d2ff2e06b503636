
/// The (taxonomy_id, new_est_reads) projection of one sample's abundance table.
/// Counts have already been truncated to integers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SampleCounts {
    /// Label used in error and log messages, typically the file path
    label: String,
    /// Pairs of (taxonomy_id, count) in file order; duplicates are kept so the builder can reject them
    counts: Vec<(u64, u64)>,
}

impl SampleCounts {
    pub fn new(label: String, counts: Vec<(u64, u64)>) -> Self {
        Self { label, counts }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn counts(&self) -> &[(u64, u64)] {
        &self.counts
    }
}
