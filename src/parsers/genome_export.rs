// ==============================================================================
// genome_export.rs - Consumer Raw Data Export Parser
// ==============================================================================
// Description: Parser for 23andMe / AncestryDNA style raw genotype exports
// Author: Matt Barham
// Created: 2026-10-15
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Format: Tab- or comma-delimited text with '#' header comments, optionally
// gzip-compressed.
// Example:
//   # rsid    chromosome    position    genotype
//   rs429358    19    45411941    CT
//   rs7412    19    45412079    CC
//   rs11591147    1    55505647    --
// Column 1 is the variant identifier, column 4 is the genotype call.
// ==============================================================================

use csv::{ByteRecord, ReaderBuilder, Trim};
use flate2::read::GzDecoder;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::GenotypeMap;

/// Gzip magic number (first two bytes)
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Genotypes written by exports for a failed call (23andMe, AncestryDNA)
const NO_CALLS: [&str; 2] = ["--", "00"];

/// Errors that can occur while reading an export
#[derive(Error, Debug)]
pub enum GenomeParseError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Line counters reported alongside the parsed genotypes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Non-comment, non-blank lines
    pub data_lines: usize,
    /// Data lines with fewer than four columns or invalid UTF-8 (skipped)
    pub malformed_lines: usize,
    /// Tracked variants with a usable call
    pub retained: usize,
    /// Tracked variants reported as "--", "00" or empty
    pub no_calls: usize,
    /// Tracked variants seen more than once (last occurrence kept)
    pub duplicates: usize,
}

/// Genotype map plus parse statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExport {
    pub genotypes: GenotypeMap,
    pub stats: ParseStats,
}

/// Parser that keeps only calls for a fixed set of tracked variant ids
#[derive(Debug, Clone)]
pub struct GenomeExportParser {
    tracked: HashSet<String>,
}

impl GenomeExportParser {
    /// Create a parser retaining only `tracked` identifiers
    pub fn new<I, S>(tracked: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tracked: tracked.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_tracked(&self, id: &str) -> bool {
        self.tracked.contains(id)
    }

    /// Parse an export file, transparently decompressing gzip input
    ///
    /// # Arguments
    /// * `path` - Path to the raw data file (e.g., genome_*.txt or *.txt.gz)
    ///
    /// # Returns
    /// * `Ok(ParsedExport)` - Genotypes for tracked variants (possibly empty)
    /// * `Err(GenomeParseError)` - The file could not be read
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<ParsedExport, GenomeParseError> {
        let path = path.as_ref();
        info!("Parsing genotype export: {:?}", path);

        let mut magic = [0u8; 2];
        let compressed = {
            let mut magic_file = File::open(path)?;
            let n = magic_file.read(&mut magic)?;
            n == 2 && magic == GZIP_MAGIC
        };

        let file = File::open(path)?;
        let parsed = if compressed {
            debug!("Detected gzip-compressed export");
            self.parse_reader(BufReader::new(GzDecoder::new(file)))?
        } else {
            self.parse_reader(BufReader::new(file))?
        };

        info!(
            "Export parsed: {} data lines, {} tracked calls, {} no-calls, {} malformed lines skipped",
            parsed.stats.data_lines,
            parsed.stats.retained,
            parsed.stats.no_calls,
            parsed.stats.malformed_lines
        );
        if parsed.genotypes.is_empty() {
            warn!("Export contains no calls for tracked variants; results will be baseline only");
        }

        Ok(parsed)
    }

    /// Parse export lines from any buffered reader
    ///
    /// The delimiter is tab when the first data line contains a tab, comma
    /// otherwise. Lines starting with '#' and blank lines are skipped. Lines
    /// with fewer than four columns or invalid UTF-8 are skipped and counted,
    /// never aborting the parse.
    pub fn parse_reader<R: BufRead>(&self, mut reader: R) -> Result<ParsedExport, GenomeParseError> {
        // Buffer the header up to the first data line to pick the delimiter
        let mut head = Vec::new();
        let mut delimiter = b',';
        loop {
            let start = head.len();
            if reader.read_until(b'\n', &mut head)? == 0 {
                break;
            }
            let line = &head[start..];
            match line.iter().find(|b| !b.is_ascii_whitespace()) {
                None | Some(&b'#') => continue,
                Some(_) => {}
            }
            if line.contains(&b'\t') {
                delimiter = b'\t';
            }
            break;
        }

        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .delimiter(delimiter)
            .trim(Trim::All)
            .from_reader(Cursor::new(head).chain(reader));

        let mut genotypes = GenotypeMap::new();
        let mut stats = ParseStats::default();
        let mut record = ByteRecord::new();

        while csv_reader.read_byte_record(&mut record)? {
            // Whitespace-only lines come through as a single empty field
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            stats.data_lines += 1;
            let line_number = record.position().map(|p| p.line()).unwrap_or(0);

            let Some((id, genotype)) = split_record(&record) else {
                debug!("Skipping malformed line {}", line_number);
                stats.malformed_lines += 1;
                continue;
            };

            if !self.tracked.contains(id) {
                continue;
            }

            let genotype = genotype.to_ascii_uppercase();
            if genotype.is_empty() || NO_CALLS.contains(&genotype.as_str()) {
                stats.no_calls += 1;
                // A later no-call must not leave an earlier call in place
                if genotypes.remove(id).is_some() {
                    stats.duplicates += 1;
                    stats.retained -= 1;
                }
                continue;
            }

            if genotypes.insert(id.to_string(), genotype).is_some() {
                debug!("Duplicate call for {} at line {}; keeping the later one", id, line_number);
                stats.duplicates += 1;
            } else {
                stats.retained += 1;
            }
        }

        Ok(ParsedExport { genotypes, stats })
    }
}

/// Extract (variant id, genotype) from one delimited record
///
/// Column 1 is the id and column 4 the genotype. AncestryDNA writes the two
/// alleles in columns 4 and 5; they are joined.
fn split_record(record: &ByteRecord) -> Option<(&str, String)> {
    let fields = record
        .iter()
        .map(|f| std::str::from_utf8(f).ok())
        .collect::<Option<Vec<&str>>>()?;

    if fields.len() < 4 || fields[0].is_empty() {
        return None;
    }

    let id = fields[0];
    let genotype = match fields.get(4) {
        Some(second) if fields[3].len() == 1 && second.len() == 1 => {
            format!("{}{}", fields[3], second)
        }
        _ => fields[3].to_string(),
    };

    Some((id, genotype))
}
