// ==============================================================================
// parsers/mod.rs - File parser modules
// ==============================================================================
// Description: Parsers for consumer genotype export formats
// Author: Matt Barham
// Created: 2026-10-15
// Modified: 2026-10-15
// Version: 1.0.0
// ==============================================================================

pub mod genome_export;

pub use genome_export::{GenomeExportParser, GenomeParseError, ParseStats, ParsedExport};
