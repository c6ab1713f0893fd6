// ==============================================================================
// lib.rs - Lipid Profiler Library
// ==============================================================================
// Description: Library interface for genotype-driven lipid risk scoring,
//              phenotype classification and diet lab prediction
// Author: Matt Barham
// Created: 2026-10-14
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

pub mod aggregator;
pub mod config;
pub mod diet;
pub mod interpreter;
pub mod models;
pub mod parsers;
pub mod phenotype;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod units;

pub use aggregator::{Aggregator, CategoryLabel, CategoryProfile, CategoryScore, RiskFlags};
pub use config::{ConfigError, LabFloors, ScoringConfig};
pub use diet::{DietEngine, DietExplanation, DietKey, DietRanking, LabPrediction, RiskContext};
pub use interpreter::{InterpretedVariant, Interpreter};
pub use models::{ColorTag, GenotypeMap, VariantStatus};
pub use phenotype::{PhenotypeClassifier, PhenotypeResult, PolygenicClass, SecondaryFlag};
pub use pipeline::{Analysis, LipidProfiler};
pub use registry::{Category, VariantDefinition, VariantRegistry};
pub use report::{AnalysisReport, ReportFormat, ReportMetadata};
pub use units::{Analyte, ClinicalBand, DisplayUnit};
