// ==============================================================================
// main.rs - Lipid Profiler Entry Point
// ==============================================================================
// Description: Command-line entry point: parse a raw genotype export, score it
//              and write a diet ranking report
// Author: Matt Barham
// Created: 2026-10-14
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lipid_profiler::report::{AnalysisReport, ReportFormat, ReportMetadata};
use lipid_profiler::{DietKey, DisplayUnit, LipidProfiler, ScoringConfig, VariantRegistry};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Raw genotype export (23andMe / AncestryDNA, optionally gzipped)
    #[arg(short, long)]
    genome: PathBuf,

    /// Diet to explain in detail (ketogenic, carnivore, moderate-low-carb, high-carb, mediterranean)
    #[arg(short, long, default_value = "ketogenic")]
    diet: DietKey,

    /// Display unit for predicted labs (mg-dl or mmol-l)
    #[arg(short, long, default_value = "mg-dl")]
    unit: DisplayUnit,

    /// Report format (text or json)
    #[arg(short, long, default_value = "text")]
    format: ReportFormat,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file overriding fitness weights, thresholds and lab floors
    #[arg(long, env = "LIPID_SCORING_CONFIG")]
    scoring_config: Option<PathBuf>,

    /// JSON file replacing the built-in variant registry
    #[arg(long, env = "LIPID_REGISTRY")]
    registry: Option<PathBuf>,

    /// Emit structured JSON logs
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lipid_profiler=info".into());

    // Logs go to stderr so a stdout report stays clean
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    info!("Lipid Profiler starting...");

    let scoring = match &args.scoring_config {
        Some(path) => ScoringConfig::from_json_file(path)
            .with_context(|| format!("Failed to load scoring config {:?}", path))?,
        None => ScoringConfig::default(),
    };

    let registry = match &args.registry {
        Some(path) => VariantRegistry::from_json_file(path)
            .with_context(|| format!("Failed to load variant registry {:?}", path))?,
        None => VariantRegistry::builtin(),
    };

    let profiler =
        LipidProfiler::new(registry, scoring).context("Invalid scoring configuration")?;
    let tracked = profiler.tracked_ids().len();

    let parsed = profiler
        .parser()
        .parse(&args.genome)
        .with_context(|| format!("Failed to read genotype export {:?}", args.genome))?;

    if parsed.stats.malformed_lines > 0 {
        warn!("{} malformed lines skipped", parsed.stats.malformed_lines);
    }

    let analysis = profiler.analyze(&parsed.genotypes, args.diet);

    let metadata = ReportMetadata::new(tracked, parsed.genotypes.len(), args.unit)
        .with_input(&args.genome, &parsed.stats)?;
    let report = AnalysisReport::new(metadata, analysis);

    match &args.output {
        Some(path) => report.write_to(path, args.format)?,
        None => println!("{}", report.render(args.format)?),
    }

    info!("Lipid Profiler finished");
    Ok(())
}
