// ==============================================================================
// pipeline.rs - Lipid Profiling Pipeline
// ==============================================================================
// Description: Wires registry, aggregator, classifier and diet engine into a
//              single analysis over one genotype map
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Data flow: Registry -> Interpreter -> Aggregator -> {Classifier, Diet Engine}
// The diet engine reads the classifier's hyper-absorber flag; nothing flows
// back. Every call recomputes from the map; nothing is cached.
// ==============================================================================

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::aggregator::{Aggregator, CategoryProfile};
use crate::config::{ConfigError, ScoringConfig};
use crate::diet::{DietEngine, DietExplanation, DietKey, DietRanking, LabPrediction, RiskContext};
use crate::models::GenotypeMap;
use crate::parsers::GenomeExportParser;
use crate::phenotype::{PhenotypeClassifier, PhenotypeResult};
use crate::registry::VariantRegistry;

/// Everything derived from one genotype map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub categories: CategoryProfile,
    pub phenotype: PhenotypeResult,
    pub ranking: DietRanking,
    pub active_diet: DietKey,
    /// One explanation per diet, in `DietKey::ALL` order
    pub explanations: Vec<DietExplanation>,
}

impl Analysis {
    pub fn explanation(&self, diet: DietKey) -> Option<&DietExplanation> {
        self.explanations.iter().find(|e| e.diet == diet)
    }

    pub fn active_explanation(&self) -> Option<&DietExplanation> {
        self.explanation(self.active_diet)
    }
}

/// Owns the immutable tables; all analysis methods take `&self`
#[derive(Debug, Clone)]
pub struct LipidProfiler {
    registry: VariantRegistry,
    classifier: PhenotypeClassifier,
    engine: DietEngine,
}

impl Default for LipidProfiler {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LipidProfiler {
    /// Profiler over `registry`; `scoring` is validated first
    pub fn new(registry: VariantRegistry, scoring: ScoringConfig) -> Result<Self, ConfigError> {
        Self::with_classifier(registry, PhenotypeClassifier::builtin(), scoring)
    }

    pub fn with_classifier(
        registry: VariantRegistry,
        classifier: PhenotypeClassifier,
        scoring: ScoringConfig,
    ) -> Result<Self, ConfigError> {
        let engine = DietEngine::new(scoring)?;
        Ok(Self::from_parts(registry, classifier, engine))
    }

    pub fn builtin() -> Self {
        Self::from_parts(
            VariantRegistry::builtin(),
            PhenotypeClassifier::builtin(),
            DietEngine::default(),
        )
    }

    fn from_parts(
        registry: VariantRegistry,
        classifier: PhenotypeClassifier,
        engine: DietEngine,
    ) -> Self {
        debug!(
            "Profiler initialised: {} variants, {} monogenic markers",
            registry.len(),
            classifier.markers().len()
        );
        Self {
            registry,
            classifier,
            engine,
        }
    }

    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    pub fn classifier(&self) -> &PhenotypeClassifier {
        &self.classifier
    }

    pub fn engine(&self) -> &DietEngine {
        &self.engine
    }

    /// Registry ids plus the ids the classifier reads from raw calls
    pub fn tracked_ids(&self) -> BTreeSet<String> {
        self.registry
            .iter()
            .map(|v| v.id.as_str())
            .chain(self.classifier.tracked_ids())
            .map(str::to_string)
            .collect()
    }

    /// Export parser retaining exactly the tracked ids
    pub fn parser(&self) -> GenomeExportParser {
        GenomeExportParser::new(self.tracked_ids())
    }

    pub fn categories(&self, genotypes: &GenotypeMap) -> CategoryProfile {
        Aggregator::new(&self.registry).profile(genotypes)
    }

    pub fn phenotype(&self, genotypes: &GenotypeMap) -> PhenotypeResult {
        let profile = self.categories(genotypes);
        self.classifier.classify(genotypes, &profile)
    }

    pub fn risk_context(&self, genotypes: &GenotypeMap) -> RiskContext {
        let profile = self.categories(genotypes);
        let phenotype = self.classifier.classify(genotypes, &profile);
        RiskContext::from_results(&profile, &phenotype)
    }

    pub fn predict_labs(&self, diet: DietKey, genotypes: &GenotypeMap) -> LabPrediction {
        self.engine.predict_labs(diet, &self.risk_context(genotypes))
    }

    pub fn rank(&self, genotypes: &GenotypeMap) -> DietRanking {
        self.engine.rank(&self.risk_context(genotypes))
    }

    /// Full analysis with `active_diet` as the diet being explained first
    pub fn analyze(&self, genotypes: &GenotypeMap, active_diet: DietKey) -> Analysis {
        let categories = self.categories(genotypes);
        let phenotype = self.classifier.classify(genotypes, &categories);
        let context = RiskContext::from_results(&categories, &phenotype);

        let ranking = self.engine.rank(&context);
        let explanations = DietKey::ALL
            .into_iter()
            .map(|diet| self.engine.explain(diet, &context))
            .collect();

        info!(
            "Analysis complete: {} calls, polygenic class {}, monogenic screen {}, best diet {}",
            genotypes.len(),
            phenotype.polygenic_class(),
            if phenotype.monogenic_screen_positive() { "positive" } else { "negative" },
            ranking.best().map(|b| b.diet.as_str()).unwrap_or("none")
        );

        Analysis {
            categories,
            phenotype,
            ranking,
            active_diet,
            explanations,
        }
    }
}
