
use itertools::Itertools;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::data_types::abundance::{FRACTION_COLUMN, NAME_COLUMN, TAXONOMY_ID_COLUMN, TAXONOMY_LVL_COLUMN};
use crate::data_types::combined_table::CombinedTable;
use crate::util::number_format::{format_cell, format_float};
use crate::writers::delimiter_for;

/// Writes a combined table with the key columns first, then the summed values, then the fraction
pub struct CombinedTableWriter<W: Write> {
    /// Handle on the writer
    csv_writer: csv::Writer<W>,
}

impl CombinedTableWriter<File> {
    /// Creates the output file
    /// # Arguments
    /// * `filename` - path to the filename that will get opened, must be .csv/.tsv
    pub fn new(filename: &Path) -> csv::Result<Self> {
        let csv_writer = csv::WriterBuilder::new()
            .delimiter(delimiter_for(filename))
            .from_path(filename)?;
        Ok(Self { csv_writer })
    }
}

impl<W: Write> CombinedTableWriter<W> {
    /// Wraps an existing writer
    pub fn from_writer(writer: W, delimiter: u8) -> Self {
        let csv_writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);
        Self { csv_writer }
    }

    /// Writes the header and every row, then flushes
    pub fn write_table(&mut self, table: &CombinedTable) -> csv::Result<()> {
        let header = [NAME_COLUMN, TAXONOMY_ID_COLUMN, TAXONOMY_LVL_COLUMN].into_iter()
            .chain(table.value_columns().iter().map(|c| c.name()))
            .chain(std::iter::once(FRACTION_COLUMN))
            .collect_vec();
        self.csv_writer.write_record(&header)?;

        for row in table.rows() {
            let key = row.key();
            let record = [key.name().to_string(), key.taxonomy_id().to_string(), key.taxonomy_lvl().to_string()].into_iter()
                .chain(
                    table.value_columns().iter()
                        .zip(row.values().iter())
                        .map(|(column, &value)| format_cell(value, column.is_integral()))
                )
                .chain(std::iter::once(format_float(row.fraction())))
                .collect_vec();
            self.csv_writer.write_record(&record)?;
        }

        self.csv_writer.flush()?;
        Ok(())
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> anyhow::Result<W> {
        self.csv_writer.into_inner()
            .map_err(|e| e.into_error().into())
    }
}
