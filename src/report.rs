// ==============================================================================
// report.rs - Analysis Report Output
// ==============================================================================
// Description: Assemble analysis results with run metadata and render them as
//              JSON or plain text
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{self, Write as _};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

use crate::aggregator::CategoryProfile;
use crate::diet::{DietExplanation, DietKey, DietRanking, LabPrediction};
use crate::parsers::ParseStats;
use crate::phenotype::PhenotypeResult;
use crate::pipeline::Analysis;
use crate::units::{Analyte, ClinicalBand, DisplayUnit};

/// Supported report formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Full structured report (best for web APIs and JavaScript)
    Json,
}

impl ReportFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }

    /// Get MIME type for HTTP downloads
    pub fn mime_type(&self) -> &'static str {
        match self {
            ReportFormat::Text => "text/plain",
            ReportFormat::Json => "application/json",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format '{}' (expected text or json)", other)),
        }
    }
}

/// Run metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub report_id: String,
    pub generated_at: String,
    pub tool_version: String,
    pub input_file: Option<String>,
    pub input_sha256: Option<String>,
    pub variants_tracked: usize,
    pub variants_called: usize,
    pub malformed_lines: usize,
    pub display_unit: DisplayUnit,
}

impl ReportMetadata {
    pub fn new(variants_tracked: usize, variants_called: usize, display_unit: DisplayUnit) -> Self {
        Self {
            report_id: uuid::Uuid::new_v4().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: None,
            input_sha256: None,
            variants_tracked,
            variants_called,
            malformed_lines: 0,
            display_unit,
        }
    }

    /// Record the export the genotypes came from
    pub fn with_input(mut self, path: &Path, stats: &ParseStats) -> Result<Self> {
        self.input_file = path.file_name().map(|n| n.to_string_lossy().to_string());
        self.input_sha256 = Some(compute_sha256(path)?);
        self.malformed_lines = stats.malformed_lines;
        Ok(self)
    }
}

/// Predicted value for one analyte, in the display unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayValue {
    pub value: f64,
    pub unit: DisplayUnit,
    pub band: ClinicalBand,
}

/// One ranked diet as presented
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDietOutput {
    pub rank: usize,
    pub diet: DietKey,
    pub label: String,
    pub score: f64,
    pub ldl: DisplayValue,
    pub hdl: DisplayValue,
    pub tg: DisplayValue,
}

/// Complete analysis report
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub categories: CategoryProfile,
    pub phenotype: PhenotypeResult,
    pub ranking: Vec<RankedDietOutput>,
    pub active_diet: DietKey,
    pub explanations: Vec<DietExplanation>,
}

impl AnalysisReport {
    pub fn new(metadata: ReportMetadata, analysis: Analysis) -> Self {
        let ranking = ranking_output(&analysis.ranking, metadata.display_unit);
        Self {
            metadata,
            categories: analysis.categories,
            phenotype: analysis.phenotype,
            ranking,
            active_diet: analysis.active_diet,
            explanations: analysis.explanations,
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => {
                serde_json::to_string_pretty(self).context("Failed to serialize JSON report")
            }
            ReportFormat::Text => self.render_text().context("Failed to render text report"),
        }
    }

    /// Write the rendered report to `path`
    pub fn write_to(&self, path: &Path, format: ReportFormat) -> Result<()> {
        info!("Generating {:?} report: {:?}", format, path);

        let rendered = self.render(format)?;
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create report file {:?}", path))?;
        file.write_all(rendered.as_bytes())
            .context("Failed to write report")?;

        info!(
            "Report complete: {} diets ranked, {} secondary flags",
            self.ranking.len(),
            self.phenotype.secondary_flags.len()
        );
        Ok(())
    }

    fn render_text(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();
        let unit = self.metadata.display_unit;

        writeln!(out, "LIPID PROFILE REPORT")?;
        writeln!(out, "Report ID: {}", self.metadata.report_id)?;
        writeln!(out, "Generated: {}", self.metadata.generated_at)?;
        if let Some(input) = &self.metadata.input_file {
            writeln!(out, "Input: {}", input)?;
        }
        writeln!(
            out,
            "Variants called: {} of {} tracked",
            self.metadata.variants_called, self.metadata.variants_tracked
        )?;
        writeln!(out, "Not a clinical diagnostic. Discuss results with a clinician.")?;

        writeln!(out, "\n== Categories ==")?;
        for (category, score) in self.categories.iter() {
            writeln!(
                out,
                "{:<46} {:<20} risk {:>3} / protective {:>3}",
                category.as_str(),
                score.label.as_str(),
                score.risk_score_sum,
                score.protective_score_sum
            )?;
            for hit in &score.hits {
                writeln!(out, "    {} [{}]", hit.description(), hit.weight)?;
            }
        }

        let phenotype = &self.phenotype;
        writeln!(out, "\n== Phenotype ==")?;
        writeln!(
            out,
            "Monogenic screen: {}",
            if phenotype.monogenic.positive { "POSITIVE" } else { "negative" }
        )?;
        writeln!(out, "    {}", phenotype.monogenic.justification)?;
        writeln!(out, "Polygenic class: {}", phenotype.polygenic.class)?;
        writeln!(out, "    {}", phenotype.polygenic.justification)?;
        writeln!(
            out,
            "Hyper-absorber: {}",
            if phenotype.hyper_absorber.positive { "yes" } else { "no" }
        )?;
        writeln!(out, "    {}", phenotype.hyper_absorber.justification)?;
        for flag in &phenotype.secondary_flags {
            writeln!(
                out,
                "Flag [{}]: {} - {}",
                flag.color.as_str(),
                flag.label,
                flag.description
            )?;
        }

        writeln!(out, "\n== Diet ranking ({}) ==", unit)?;
        for entry in &self.ranking {
            writeln!(
                out,
                "{}. {:<36} score {:.3}  LDL {} ({})  HDL {} ({})  TG {} ({})",
                entry.rank,
                entry.label,
                entry.score,
                format_value(&entry.ldl),
                entry.ldl.band,
                format_value(&entry.hdl),
                entry.hdl.band,
                format_value(&entry.tg),
                entry.tg.band
            )?;
        }

        if let Some(explanation) = self.explanations.iter().find(|e| e.diet == self.active_diet) {
            writeln!(out, "\n== {} ==", self.active_diet)?;
            write_list(&mut out, "Benefits", &explanation.benefits)?;
            write_list(&mut out, "Cautions", &explanation.cautions)?;
            write_list(&mut out, "Tips", &explanation.tips)?;
        }

        Ok(out)
    }
}

fn write_list(out: &mut String, heading: &str, items: &[String]) -> fmt::Result {
    writeln!(out, "{}:", heading)?;
    if items.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for item in items {
        writeln!(out, "  - {}", item)?;
    }
    Ok(())
}

fn format_value(value: &DisplayValue) -> String {
    match value.unit {
        DisplayUnit::MgDl => format!("{:.0}", value.value),
        DisplayUnit::MmolL => format!("{:.2}", value.value),
    }
}

fn display_value(prediction: &LabPrediction, analyte: Analyte, unit: DisplayUnit) -> DisplayValue {
    let mg_dl = prediction.get(analyte);
    DisplayValue {
        value: unit.from_mg_dl(analyte, mg_dl),
        unit,
        band: ClinicalBand::classify(analyte, mg_dl),
    }
}

fn ranking_output(ranking: &DietRanking, unit: DisplayUnit) -> Vec<RankedDietOutput> {
    ranking
        .iter()
        .enumerate()
        .map(|(i, entry)| RankedDietOutput {
            rank: i + 1,
            diet: entry.diet,
            label: entry.label.to_string(),
            score: entry.score,
            ldl: display_value(&entry.prediction, Analyte::Ldl, unit),
            hdl: display_value(&entry.prediction, Analyte::Hdl, unit),
            tg: display_value(&entry.prediction, Analyte::Tg, unit),
        })
        .collect()
}

/// SHA-256 of a file, hex encoded
pub fn compute_sha256(path: &Path) -> Result<String> {
    let mut file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GenotypeMap;
    use crate::pipeline::LipidProfiler;
    use tempfile::NamedTempFile;

    fn report(unit: DisplayUnit) -> AnalysisReport {
        let profiler = LipidProfiler::builtin();
        let mut map = GenotypeMap::new();
        map.insert("rs429358".to_string(), "CT".to_string());
        map.insert("rs964184".to_string(), "CG".to_string());

        let analysis = profiler.analyze(&map, DietKey::Mediterranean);
        let metadata = ReportMetadata::new(profiler.tracked_ids().len(), map.len(), unit);
        AnalysisReport::new(metadata, analysis)
    }

    #[test]
    fn test_report_format_extension() {
        assert_eq!(ReportFormat::Json.extension(), "json");
        assert_eq!(ReportFormat::Text.extension(), "txt");
        assert_eq!(ReportFormat::Json.mime_type(), "application/json");
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("xml".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_ranking_output_is_numbered_in_order() {
        let report = report(DisplayUnit::MgDl);
        let ranks: Vec<usize> = report.ranking.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        for pair in report.ranking.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_display_unit_conversion_keeps_mg_dl_bands() {
        let mg = report(DisplayUnit::MgDl);
        let mmol = report(DisplayUnit::MmolL);

        for (a, b) in mg.ranking.iter().zip(mmol.ranking.iter()) {
            assert_eq!(a.diet, b.diet);
            assert_eq!(a.ldl.band, b.ldl.band);
            assert!((b.ldl.value * 38.67 - a.ldl.value).abs() < 1e-9);
            assert!((b.tg.value * 88.57 - a.tg.value).abs() < 1e-9);
        }
    }

    #[test]
    fn test_json_report_contains_sections() {
        let rendered = report(DisplayUnit::MgDl).render(ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["categories"]["ldl_clearance"]["label"], "Overall Risk");
        assert_eq!(value["phenotype"]["polygenic"]["class"], "Combined");
        assert_eq!(value["active_diet"], "mediterranean");
        assert_eq!(value["ranking"].as_array().unwrap().len(), 5);
        assert_eq!(value["metadata"]["display_unit"], "mg/dL");
    }

    #[test]
    fn test_text_report_contains_sections() {
        let rendered = report(DisplayUnit::MmolL).render(ReportFormat::Text).unwrap();

        assert!(rendered.contains("== Categories =="));
        assert!(rendered.contains("Polygenic class: Combined"));
        assert!(rendered.contains("Hyper-absorber: yes"));
        assert!(rendered.contains("== Diet ranking (mmol/L) =="));
        assert!(rendered.contains("== mediterranean =="));
        assert!(rendered.contains("Not a clinical diagnostic"));
    }

    #[test]
    fn test_write_report_and_hash_input() {
        let input = NamedTempFile::new().unwrap();
        std::fs::write(input.path(), b"rs429358\t19\t45411941\tCT\n").unwrap();

        let metadata = ReportMetadata::new(10, 1, DisplayUnit::MgDl)
            .with_input(input.path(), &ParseStats::default())
            .unwrap();
        assert_eq!(metadata.input_sha256.as_ref().unwrap().len(), 64);

        let analysis = LipidProfiler::builtin().analyze(&GenotypeMap::new(), DietKey::Ketogenic);
        let report = AnalysisReport::new(metadata, analysis);

        let output = NamedTempFile::new().unwrap();
        report.write_to(output.path(), ReportFormat::Json).unwrap();
        let written = std::fs::read_to_string(output.path()).unwrap();
        assert!(written.contains("\"input_sha256\""));
    }

    #[test]
    fn test_sha256_known_value() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"abc").unwrap();
        assert_eq!(
            compute_sha256(file.path()).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
