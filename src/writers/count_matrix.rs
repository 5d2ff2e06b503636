
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::data_types::abundance::TAXONOMY_ID_COLUMN;
use crate::data_types::count_matrix::CountMatrix;
use crate::writers::delimiter_for;

/// Writes a count matrix: taxonomy_id first, then one integer column per sample
pub struct CountMatrixWriter<W: Write> {
    /// Handle on the writer
    csv_writer: csv::Writer<W>,
}

impl CountMatrixWriter<File> {
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

impl<W: Write> CountMatrixWriter<W> {
    /// Wraps an existing writer
    pub fn from_writer(writer: W, delimiter: u8) -> Self {
        let csv_writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);
        Self { csv_writer }
    }

    /// Writes the header and every row, then flushes
    pub fn write_matrix(&mut self, matrix: &CountMatrix) -> csv::Result<()> {
        let mut header = vec![TAXONOMY_ID_COLUMN.to_string()];
        header.extend(matrix.sample_names().iter().cloned());
        self.csv_writer.write_record(&header)?;

        for (taxonomy_id, counts) in matrix.rows() {
            let mut record = Vec::with_capacity(counts.len() + 1);
            record.push(taxonomy_id.to_string());
            record.extend(counts.iter().map(|c| c.to_string()));
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
