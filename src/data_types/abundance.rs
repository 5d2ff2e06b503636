
/// Column holding the species/taxon name
pub const NAME_COLUMN: &str = "name";
/// Column holding the NCBI taxonomy identifier
pub const TAXONOMY_ID_COLUMN: &str = "taxonomy_id";
/// Column holding the rank code (S, G, S1, ...)
pub const TAXONOMY_LVL_COLUMN: &str = "taxonomy_lvl";
/// Column holding the Bracken re-estimated read count
pub const EST_READS_COLUMN: &str = "new_est_reads";
/// Column holding the per-sample fraction of reads; recomputed after combining
pub const FRACTION_COLUMN: &str = "fraction_total_reads";

/// The (name, taxonomy_id, taxonomy_lvl) tuple that identifies a taxon entry.
/// Ordering is by name, then taxonomy_id, then taxonomy_lvl.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TaxonKey {
    name: String,
    taxonomy_id: u64,
    taxonomy_lvl: String,
}

impl TaxonKey {
    pub fn new(name: String, taxonomy_id: u64, taxonomy_lvl: String) -> Self {
        Self {
            name, taxonomy_id, taxonomy_lvl
        }
    }

    // getters
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn taxonomy_id(&self) -> u64 {
        self.taxonomy_id
    }

    pub fn taxonomy_lvl(&self) -> &str {
        &self.taxonomy_lvl
    }
}

/// Describes one numeric value column of an abundance table
#[derive(Clone, Debug, PartialEq)]
pub struct ValueColumn {
    /// Header label
    name: String,
    /// True if every value seen in this column was an integer
    integral: bool,
}

impl ValueColumn {
    pub fn new(name: String, integral: bool) -> Self {
        Self { name, integral }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_integral(&self) -> bool {
        self.integral
    }

    /// Downgrades the column to float-valued; there is no way back
    pub fn mark_float(&mut self) {
        self.integral = false;
    }
}

/// A single row of an abundance table.
/// `values` is parallel to the owning table's value columns.
#[derive(Clone, Debug, PartialEq)]
pub struct AbundanceRecord {
    key: TaxonKey,
    values: Vec<f64>,
}

impl AbundanceRecord {
    pub fn new(key: TaxonKey, values: Vec<f64>) -> Self {
        Self { key, values }
    }

    pub fn key(&self) -> &TaxonKey {
        &self.key
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// An abundance table loaded from a single sample's Bracken output.
/// The per-sample fraction column is never stored here.
#[derive(Clone, Debug)]
pub struct AbundanceTable {
    /// Label used in error and log messages, typically the file path
    label: String,
    /// Numeric columns in file order, excluding the key and fraction columns
    value_columns: Vec<ValueColumn>,
    /// All rows in file order
    records: Vec<AbundanceRecord>,
}

impl AbundanceTable {
    /// General constructor
    /// # Arguments
    /// * `label` - identifies the table in messages
    /// * `value_columns` - numeric columns; must contain `new_est_reads`
    /// * `records` - rows, each with one value per entry in `value_columns`
    /// # Errors
    /// * if `new_est_reads` is not one of the value columns
    /// * if a record has the wrong number of values
    pub fn new(label: String, value_columns: Vec<ValueColumn>, records: Vec<AbundanceRecord>) -> anyhow::Result<Self> {
        anyhow::ensure!(
            value_columns.iter().any(|c| c.name() == EST_READS_COLUMN),
            "{label}: value columns must include {EST_READS_COLUMN}"
        );
        anyhow::ensure!(
            records.iter().all(|r| r.values().len() == value_columns.len()),
            "{label}: every record must have {} values", value_columns.len()
        );
        Ok(Self {
            label, value_columns, records
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value_columns(&self) -> &[ValueColumn] {
        &self.value_columns
    }

    pub fn records(&self) -> &[AbundanceRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ordering() {
        let a = TaxonKey::new("Bacillus".to_string(), 9, "S".to_string());
        let b = TaxonKey::new("Escherichia".to_string(), 1, "S".to_string());
        let c = TaxonKey::new("Escherichia".to_string(), 1, "S1".to_string());
        let d = TaxonKey::new("Escherichia".to_string(), 2, "G".to_string());
        let mut keys = vec![d.clone(), c.clone(), b.clone(), a.clone()];
        keys.sort();
        assert_eq!(keys, vec![a, b, c, d]);
    }

    #[test]
    fn test_table_requires_est_reads() {
        let columns = vec![ValueColumn::new("kraken_assigned_reads".to_string(), true)];
        assert!(AbundanceTable::new("t".to_string(), columns, vec![]).is_err());
    }

    #[test]
    fn test_table_record_width() {
        let columns = vec![ValueColumn::new(EST_READS_COLUMN.to_string(), true)];
        let key = TaxonKey::new("x".to_string(), 1, "S".to_string());
        let bad = vec![AbundanceRecord::new(key.clone(), vec![1.0, 2.0])];
        assert!(AbundanceTable::new("t".to_string(), columns.clone(), bad).is_err());

        let good = vec![AbundanceRecord::new(key, vec![1.0])];
        let table = AbundanceTable::new("t".to_string(), columns, good).unwrap();
        assert!(!table.is_empty());
        assert_eq!(table.records().len(), 1);
    }
}
