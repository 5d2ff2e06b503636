/*!
# FASTA Tagger
Rewrites EuPathDB protein FASTA headers into the `kraken:taxid|<taxid>|<seqid>` form that Kraken2 library building expects.
The organism is pulled from the `organism=` field of each header and looked up in an organism metadata table.
Records from organisms that are not in the table are dropped entirely.
*/
use anyhow::{bail, Context};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use rustc_hash::FxHashSet as HashSet;
use std::io::{BufRead, Write};

use crate::parsing::organism_metadata::OrganismMetadata;
use crate::writers::kraken_idmap::KrakenIdMapWriter;

lazy_static! {
    /// Captures the organism from a `| organism=Name_here |` header field
    static ref ORGANISM_REGEX: Regex = Regex::new(r"(?i)\s*\|\s*organism=(.+?)\s*\|\s*").unwrap();
    /// Separator between header fields
    static ref FIELD_SEPARATOR_REGEX: Regex = Regex::new(r"\s*\|\s*").unwrap();
}

/// Counts from a tagging run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSummary {
    /// Records whose header was rewritten
    pub records_kept: u64,
    /// Records dropped because their organism has no metadata
    pub records_skipped: u64,
    /// Each organism without metadata, in the order first seen
    pub unknown_organisms: Vec<String>,
}

/// Builds the Kraken2 sequence identifier for a tagged record
pub fn kraken_sequence_id(taxid: u64, seqid: &str) -> String {
    format!("kraken:taxid|{taxid}|{seqid}")
}

/// Splits a EuPathDB header line into (organism, seqid).
/// Underscores in the organism are converted to spaces.
/// # Errors
/// * if the header has no `organism=` field
pub fn parse_header(header: &str) -> anyhow::Result<(String, String)> {
    let organism = match ORGANISM_REGEX.captures(header) {
        Some(captures) => captures[1].trim().replace('_', " "),
        None => bail!("No organism= field found in header: {header:?}")
    };

    let first_field = FIELD_SEPARATOR_REGEX.split(header)
        .next()
        .unwrap_or_default();
    let seqid = first_field.trim_start_matches('>').to_string();
    Ok((organism, seqid))
}

/// Tags every record of a FASTA stream.
/// Lines are trimmed and blank lines are dropped.
/// # Arguments
/// * `fasta_in` - the EuPathDB FASTA
/// * `metadata` - organism to taxid lookup
/// * `fasta_out` - receives the tagged FASTA
/// * `idmap_out` - receives one seqid-to-taxid entry per kept record
/// # Errors
/// * if reading or writing fails
/// * if a header has no organism, or sequence data appears before the first header
pub fn tag_fasta<R: BufRead, F: Write, M: Write>(
    fasta_in: R, metadata: &OrganismMetadata,
    fasta_out: &mut F, idmap_out: &mut KrakenIdMapWriter<M>
) -> anyhow::Result<TagSummary> {
    let mut summary = TagSummary::default();
    let mut unknown: HashSet<String> = Default::default();

    // None until we see the first header
    let mut keep_record: Option<bool> = None;
    for (line_index, line) in fasta_in.lines().enumerate() {
        let line = line.with_context(|| format!("Error while reading FASTA line {}", line_index + 1))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('>') {
            let (organism, seqid) = parse_header(line)
                .with_context(|| format!("Error while parsing FASTA line {}", line_index + 1))?;
            match metadata.taxid(&organism) {
                Some(taxid) => {
                    let sequence_id = kraken_sequence_id(taxid, &seqid);
                    idmap_out.write_entry(&sequence_id, taxid)?;
                    writeln!(fasta_out, ">{sequence_id}")?;
                    summary.records_kept += 1;
                    keep_record = Some(true);
                },
                None => {
                    if unknown.insert(organism.clone()) {
                        warn!("{organism} metadata not found, skipping");
                        summary.unknown_organisms.push(organism);
                    }
                    summary.records_skipped += 1;
                    keep_record = Some(false);
                }
            }
        } else {
            match keep_record {
                Some(true) => writeln!(fasta_out, "{line}")?,
                Some(false) => {},
                None => bail!("Sequence data found before the first FASTA header on line {}", line_index + 1)
            }
        }
    }

    debug!("Tagged {} records, skipped {}", summary.records_kept, summary.records_skipped);
    Ok(summary)
}
