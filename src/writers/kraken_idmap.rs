
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Record type label Kraken2 expects in the first column of a seqid2taxid map
const RECORD_TYPE: &str = "TAXID";

/// One line of the map; there is no header
#[derive(Serialize)]
struct IdMapRow<'a> {
    record_type: &'static str,
    sequence_id: &'a str,
    taxid: u64,
}

/// Writes a headerless, tab-delimited seqid-to-taxid map
pub struct KrakenIdMapWriter<W: Write> {
    /// Handle on the writer
    csv_writer: csv::Writer<W>,
}

impl KrakenIdMapWriter<File> {
    /// Creates the output file
    pub fn new(filename: &Path) -> csv::Result<Self> {
        let csv_writer = Self::builder().from_path(filename)?;
        Ok(Self { csv_writer })
    }
}

impl<W: Write> KrakenIdMapWriter<W> {
    fn builder() -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        builder.delimiter(b'\t')
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never);
        builder
    }

    /// Wraps an existing writer
    pub fn from_writer(writer: W) -> Self {
        let csv_writer = Self::builder().from_writer(writer);
        Self { csv_writer }
    }

    /// Adds a single entry
    /// # Arguments
    /// * `sequence_id` - the full tagged id, e.g. `kraken:taxid|5833|PF3D7_01`
    /// * `taxid` - the taxon id
    pub fn write_entry(&mut self, sequence_id: &str, taxid: u64) -> csv::Result<()> {
        self.csv_writer.serialize(IdMapRow {
            record_type: RECORD_TYPE,
            sequence_id,
            taxid
        })
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.csv_writer.flush()
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> anyhow::Result<W> {
        self.csv_writer.into_inner()
            .map_err(|e| e.into_error().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idmap_lines() {
        let mut writer = KrakenIdMapWriter::from_writer(vec![]);
        writer.write_entry("kraken:taxid|5833|PF3D7_01", 5833).unwrap();
        writer.write_entry("kraken:taxid|5811|TGME49_01", 5811).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(text, "TAXID\tkraken:taxid|5833|PF3D7_01\t5833\nTAXID\tkraken:taxid|5811|TGME49_01\t5811\n");
    }
}
