use crate::cli::Bounds;
use crate::error::ToolError;
use anyhow::Context;
use indexmap::IndexMap;
use needletail::{parser::FastqReader, FastxReader};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};

/// Offset of the PHRED+33 quality encoding.
const PHRED_OFFSET: u32 = 33;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct FastqRecord {
    pub seq: String,
    pub qual: String,
}

/// Reads keyed by their identifier, in file order.
pub type Reads = IndexMap<String, FastqRecord>;

impl FastqRecord {
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// Percentage of `G` and `C` bases, to 2 decimal places with ties going to the even
    /// digit (3.125 becomes 3.12). Only upper case bases count.
    pub fn gc_content(&self) -> f64 {
        if self.seq.is_empty() {
            return 0.0;
        }
        let gc = self.seq.bytes().filter(|b| matches!(b, b'G' | b'C')).count();
        let percent = gc as f64 / self.len() as f64 * 100.0;
        (percent * 100.0).round_ties_even() / 100.0
    }

    /// Mean PHRED+33 quality score.
    pub fn phred_quality_avg(&self) -> f64 {
        if self.qual.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .qual
            .bytes()
            .map(|q| q as f64 - PHRED_OFFSET as f64)
            .sum();
        total / self.qual.len() as f64
    }

    fn check(&self, id: &str) -> Result<(), ToolError> {
        if self.seq.len() != self.qual.len() {
            return Err(ToolError::QualityLengthMismatch {
                id: id.to_string(),
                seq_len: self.seq.len(),
                qual_len: self.qual.len(),
            });
        }
        Ok(())
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FilterOpts {
    pub gc_bounds: Bounds,
    pub length_bounds: Bounds,
    pub quality_threshold: f64,
}

impl Default for FilterOpts {
    fn default() -> Self {
        FilterOpts {
            gc_bounds: Bounds {
                min: 0.0,
                max: 100.0,
            },
            length_bounds: Bounds {
                min: 0.0,
                max: 2f64.powi(32),
            },
            quality_threshold: 0.0,
        }
    }
}

/// Whether a read is kept. All bounds are exclusive, and the mean quality must be strictly
/// greater than the threshold.
pub fn filter(read: &FastqRecord, opts: &FilterOpts) -> bool {
    opts.gc_bounds.contains(read.gc_content())
        && opts.length_bounds.contains(read.len() as f64)
        && read.phred_quality_avg() > opts.quality_threshold
}

/// Keeps the reads which pass `filter`, preserving their order.
///
/// # Errors
///
/// Returns `ToolError::QualityLengthMismatch` for a read whose quality string is not the same
/// length as its sequence.
pub fn filter_reads(reads: Reads, opts: &FilterOpts) -> Result<Reads, ToolError> {
    let total = reads.len();
    let mut kept = Reads::with_capacity(total);

    for (id, read) in reads {
        read.check(&id)?;
        if filter(&read, opts) {
            kept.insert(id, read);
        }
    }

    info!("Kept {} of {} reads", kept.len(), total);
    Ok(kept)
}

/// Parses every record of a FASTQ stream. A repeated identifier replaces the earlier read.
pub fn parse_reads<R: Read + Send>(reader: R) -> anyhow::Result<Reads> {
    let mut fastq_reader = FastqReader::new(reader);
    let mut reads = Reads::new();

    while let Some(rec) = fastq_reader.next() {
        let rec = rec.context("Invalid FASTQ record")?;

        let id = String::from_utf8(rec.id().to_vec())?;
        let seq = String::from_utf8(rec.seq().to_vec())?;
        let qual = String::from_utf8(rec.qual().unwrap_or(&[]).to_vec())?;

        if reads.insert(id.clone(), FastqRecord { seq, qual }).is_some() {
            warn!("Read `{id}` appears more than once, keeping the last one");
        }
    }

    Ok(reads)
}

pub fn read_fastq(path: &str) -> anyhow::Result<Reads> {
    let file = File::open(path).with_context(|| format!("Unable to open file {path}"))?;
    let reads = parse_reads(file).with_context(|| format!("Unable to parse {path}"))?;
    info!("Read {} reads from {path}", reads.len());
    Ok(reads)
}

/// Writes reads as 4-line FASTQ records.
pub fn write_reads(writer: &mut impl Write, reads: &Reads) -> std::io::Result<()> {
    for (id, read) in reads {
        writeln!(writer, "@{}\n{}\n+\n{}", id, read.seq, read.qual)?;
    }
    Ok(())
}
