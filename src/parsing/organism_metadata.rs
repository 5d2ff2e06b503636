
use anyhow::Context;
use indexmap::IndexMap;
use log::{debug, warn};
use std::io::Read;
use std::path::Path;

use crate::data_types::table_error::TableError;
use crate::parsing::tsv::{column_index, open_tsv_file, record_line};

/// Column holding the organism name in EuPathDB metadata tables
pub const ORGANISM_COLUMN: &str = "Organism";
/// Column holding the species-level NCBI taxon id
pub const SPECIES_TAXID_COLUMN: &str = "Species NCBI taxon ID";

/// Lookup from organism name to species NCBI taxon id
#[derive(Clone, Debug, Default)]
pub struct OrganismMetadata {
    taxids: IndexMap<String, u64>
}

impl OrganismMetadata {
    /// Loads the metadata table from a .tsv(.gz) file.
    /// Only the `Organism` and `Species NCBI taxon ID` columns are used.
    pub fn from_tsv(filename: &Path) -> anyhow::Result<Self> {
        let csv_reader = open_tsv_file(filename)?;
        let label = filename.display().to_string();
        Self::from_reader(csv_reader, &label)
            .with_context(|| format!("Error while loading {filename:?}:"))
    }

    /// Parses the metadata from an open TSV reader.
    /// If an organism is listed more than once, the first entry wins.
    pub fn from_reader<R: Read>(mut csv_reader: csv::Reader<R>, label: &str) -> anyhow::Result<Self> {
        let headers = csv_reader.headers()?.clone();
        let organism_index = column_index(&headers, ORGANISM_COLUMN, label)?;
        let taxid_index = column_index(&headers, SPECIES_TAXID_COLUMN, label)?;

        let mut taxids: IndexMap<String, u64> = Default::default();
        for result in csv_reader.records() {
            let row = result.with_context(|| format!("Error while reading {label}"))?;
            let organism = row[organism_index].trim();
            let taxid_text = row[taxid_index].trim();
            let taxid: u64 = taxid_text.parse()
                .map_err(|_| TableError::MalformedValue {
                    label: label.to_string(),
                    line: record_line(&row),
                    column: SPECIES_TAXID_COLUMN.to_string(),
                    value: taxid_text.to_string()
                })?;

            if taxids.contains_key(organism) {
                warn!("Organism {organism:?} is listed more than once in {label}, keeping the first entry");
                continue;
            }
            taxids.insert(organism.to_string(), taxid);
        }

        debug!("Loaded {} organisms from {label}", taxids.len());
        Ok(Self { taxids })
    }

    /// Returns the species taxon id for an organism
    pub fn taxid(&self, organism: &str) -> Option<u64> {
        self.taxids.get(organism).copied()
    }

    pub fn len(&self) -> usize {
        self.taxids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taxids.is_empty()
    }
}
