// ==============================================================================
// aggregator.rs - Category Aggregator
// ==============================================================================
// Description: Sums interpreted calls into the four biological categories
// Author: Matt Barham
// Created: 2026-10-12
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::interpreter::Interpreter;
use crate::models::{GenotypeMap, VariantStatus};
use crate::registry::{Category, VariantRegistry};

/// Overall direction of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryLabel {
    #[serde(rename = "Overall Risk")]
    OverallRisk,
    #[serde(rename = "Overall Protective")]
    OverallProtective,
    #[serde(rename = "Overall Neutral")]
    OverallNeutral,
}

impl CategoryLabel {
    /// Three-way comparison; equal sums (including 0 vs 0) are Neutral
    pub fn from_sums(risk_score_sum: u32, protective_score_sum: u32) -> Self {
        match risk_score_sum.cmp(&protective_score_sum) {
            std::cmp::Ordering::Greater => CategoryLabel::OverallRisk,
            std::cmp::Ordering::Less => CategoryLabel::OverallProtective,
            std::cmp::Ordering::Equal => CategoryLabel::OverallNeutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryLabel::OverallRisk => "Overall Risk",
            CategoryLabel::OverallProtective => "Overall Protective",
            CategoryLabel::OverallNeutral => "Overall Neutral",
        }
    }

    pub fn is_risk(&self) -> bool {
        matches!(self, CategoryLabel::OverallRisk)
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One Risk or Protective call that contributed to a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryHit {
    pub variant_id: String,
    pub gene: String,
    pub genotype: String,
    pub status: VariantStatus,
    pub weight: u32,
}

impl CategoryHit {
    /// Audit string, e.g. "rs429358 (APOE) CT: Risk"
    pub fn description(&self) -> String {
        format!(
            "{} ({}) {}: {}",
            self.variant_id,
            self.gene,
            self.genotype,
            self.status.as_str()
        )
    }
}

/// Aggregated score for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub label: CategoryLabel,
    pub risk_score_sum: u32,
    pub protective_score_sum: u32,
    /// Member variants with a genotype call, contributing or not
    #[serde(default)]
    pub called: usize,
    /// Contributing calls in input order
    pub hits: Vec<CategoryHit>,
}

impl CategoryScore {
    pub fn empty() -> Self {
        Self {
            label: CategoryLabel::OverallNeutral,
            risk_score_sum: 0,
            protective_score_sum: 0,
            called: 0,
            hits: Vec::new(),
        }
    }

    pub fn hit_descriptions(&self) -> Vec<String> {
        self.hits.iter().map(CategoryHit::description).collect()
    }

    /// Up to `limit` hits ordered by weight, heaviest first (stable on ties)
    pub fn top_hits(&self, limit: usize) -> Vec<&CategoryHit> {
        let mut ranked: Vec<&CategoryHit> = self.hits.iter().collect();
        ranked.sort_by(|a, b| b.weight.cmp(&a.weight));
        ranked.truncate(limit);
        ranked
    }
}

/// Per-category risk booleans consumed by the classifier and diet engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFlags {
    pub ldl_clearance: bool,
    pub triglyceride: bool,
    pub insulin_sensitivity: bool,
    pub hepatic_lipogenesis: bool,
}

impl RiskFlags {
    pub fn is_set(&self, category: Category) -> bool {
        match category {
            Category::LdlClearance => self.ldl_clearance,
            Category::Triglyceride => self.triglyceride,
            Category::InsulinSensitivity => self.insulin_sensitivity,
            Category::HepaticLipogenesis => self.hepatic_lipogenesis,
        }
    }

    pub fn any(&self) -> bool {
        Category::ALL.iter().any(|&c| self.is_set(c))
    }
}

/// Scores for all four categories over one genotype map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProfile {
    pub ldl_clearance: CategoryScore,
    pub triglyceride: CategoryScore,
    pub insulin_sensitivity: CategoryScore,
    pub hepatic_lipogenesis: CategoryScore,
}

impl CategoryProfile {
    pub fn get(&self, category: Category) -> &CategoryScore {
        match category {
            Category::LdlClearance => &self.ldl_clearance,
            Category::Triglyceride => &self.triglyceride,
            Category::InsulinSensitivity => &self.insulin_sensitivity,
            Category::HepaticLipogenesis => &self.hepatic_lipogenesis,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryScore)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Registry variants with a call, across all categories
    pub fn called_variants(&self) -> usize {
        self.iter().map(|(_, score)| score.called).sum()
    }

    pub fn risk_flags(&self) -> RiskFlags {
        RiskFlags {
            ldl_clearance: self.ldl_clearance.label.is_risk(),
            triglyceride: self.triglyceride.label.is_risk(),
            insulin_sensitivity: self.insulin_sensitivity.label.is_risk(),
            hepatic_lipogenesis: self.hepatic_lipogenesis.label.is_risk(),
        }
    }
}

/// Runs the interpreter over category membership lists
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    interpreter: Interpreter<'a>,
}

impl<'a> Aggregator<'a> {
    pub fn new(registry: &'a VariantRegistry) -> Self {
        Self {
            interpreter: Interpreter::new(registry),
        }
    }

    /// Aggregate the given variant ids over a genotype map
    ///
    /// Neutral calls add nothing and are not recorded as hits. Ids absent
    /// from the registry interpret as Neutral and are therefore ignored.
    pub fn aggregate<I, S>(&self, variant_ids: I, genotypes: &GenotypeMap) -> CategoryScore
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut risk_score_sum = 0u32;
        let mut protective_score_sum = 0u32;
        let mut called = 0usize;
        let mut hits = Vec::new();

        for id in variant_ids {
            let id = id.as_ref();
            let genotype = genotypes.get(id).map(String::as_str);
            if genotype.is_some_and(|g| !g.is_empty()) {
                called += 1;
            }
            let interpreted = self.interpreter.interpret(id, genotype);

            match interpreted.status {
                VariantStatus::Risk => risk_score_sum += interpreted.weight,
                VariantStatus::Protective => protective_score_sum += interpreted.weight,
                VariantStatus::Neutral => continue,
            }

            let gene = self
                .interpreter
                .registry()
                .get(id)
                .map(|v| v.gene.clone())
                .unwrap_or_default();

            hits.push(CategoryHit {
                variant_id: id.to_string(),
                gene,
                genotype: genotype.unwrap_or_default().to_string(),
                status: interpreted.status,
                weight: interpreted.weight,
            });
        }

        CategoryScore {
            label: CategoryLabel::from_sums(risk_score_sum, protective_score_sum),
            risk_score_sum,
            protective_score_sum,
            called,
            hits,
        }
    }

    /// Aggregate every category over the same genotype map
    pub fn profile(&self, genotypes: &GenotypeMap) -> CategoryProfile {
        let registry = self.interpreter.registry();
        let score = |category| self.aggregate(registry.category_members(category), genotypes);

        CategoryProfile {
            ldl_clearance: score(Category::LdlClearance),
            triglyceride: score(Category::Triglyceride),
            insulin_sensitivity: score(Category::InsulinSensitivity),
            hepatic_lipogenesis: score(Category::HepaticLipogenesis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genotypes(calls: &[(&str, &str)]) -> GenotypeMap {
        calls
            .iter()
            .map(|(id, gt)| (id.to_string(), gt.to_string()))
            .collect()
    }

    #[test]
    fn test_label_from_sums() {
        assert_eq!(CategoryLabel::from_sums(10, 5), CategoryLabel::OverallRisk);
        assert_eq!(CategoryLabel::from_sums(5, 10), CategoryLabel::OverallProtective);
        assert_eq!(CategoryLabel::from_sums(0, 0), CategoryLabel::OverallNeutral);
    }

    #[test]
    fn test_equal_sums_are_always_neutral() {
        for value in [0u32, 1, 6, 20, 25, 100, u32::MAX] {
            assert_eq!(
                CategoryLabel::from_sums(value, value),
                CategoryLabel::OverallNeutral
            );
        }
    }

    #[test]
    fn test_label_serializes_with_display_text() {
        let json = serde_json::to_string(&CategoryLabel::OverallRisk).unwrap();
        assert_eq!(json, "\"Overall Risk\"");
    }

    #[test]
    fn test_aggregate_sums_and_hits() {
        let registry = VariantRegistry::builtin();
        let aggregator = Aggregator::new(&registry);
        let map = genotypes(&[
            ("rs429358", "CT"),   // APOE risk, 20
            ("rs11591147", "GT"), // PCSK9 protective, 25
            ("rs693", "GG"),      // no listed allele
        ]);

        let score = aggregator.aggregate(["rs429358", "rs11591147", "rs693"], &map);

        assert_eq!(score.risk_score_sum, 20);
        assert_eq!(score.protective_score_sum, 25);
        assert_eq!(score.label, CategoryLabel::OverallProtective);
        assert_eq!(score.hits.len(), 2);
        // Neutral calls count as called but not as hits
        assert_eq!(score.called, 3);
        assert_eq!(score.hit_descriptions()[0], "rs429358 (APOE) CT: Risk");
        assert_eq!(score.hit_descriptions()[1], "rs11591147 (PCSK9) GT: Protective");
    }

    #[test]
    fn test_aggregate_ignores_unknown_and_missing() {
        let registry = VariantRegistry::builtin();
        let aggregator = Aggregator::new(&registry);
        let map = genotypes(&[("rs_not_in_registry", "AA")]);

        let score = aggregator.aggregate(["rs_not_in_registry", "rs429358"], &map);
        assert_eq!(score, CategoryScore::empty());
    }

    #[test]
    fn test_aggregate_sums_are_order_independent() {
        let registry = VariantRegistry::builtin();
        let aggregator = Aggregator::new(&registry);
        let map = genotypes(&[
            ("rs429358", "CT"),
            ("rs7412", "CT"),
            ("rs693", "AG"),
            ("rs12740374", "GT"),
        ]);
        let ids = ["rs429358", "rs7412", "rs693", "rs12740374"];
        let mut reversed = ids;
        reversed.reverse();

        let forward = aggregator.aggregate(ids, &map);
        let backward = aggregator.aggregate(reversed, &map);

        assert_eq!(forward.risk_score_sum, backward.risk_score_sum);
        assert_eq!(forward.protective_score_sum, backward.protective_score_sum);
        assert_eq!(forward.label, backward.label);

        // Hit order follows input order
        assert_eq!(forward.hits.first().unwrap().variant_id, "rs429358");
        assert_eq!(backward.hits.first().unwrap().variant_id, "rs12740374");
    }

    #[test]
    fn test_top_hits_ordered_by_weight() {
        let registry = VariantRegistry::builtin();
        let aggregator = Aggregator::new(&registry);
        let map = genotypes(&[
            ("rs693", "AA"),      // 8
            ("rs429358", "CC"),   // 20
            ("rs4299376", "GG"),  // 8
        ]);

        let score = aggregator.aggregate(["rs693", "rs429358", "rs4299376"], &map);
        let top: Vec<&str> = score.top_hits(2).iter().map(|h| h.variant_id.as_str()).collect();
        assert_eq!(top, vec!["rs429358", "rs693"]);
    }

    #[test]
    fn test_empty_map_profile_is_neutral() {
        let registry = VariantRegistry::builtin();
        let aggregator = Aggregator::new(&registry);

        let profile = aggregator.profile(&GenotypeMap::new());
        for (_, score) in profile.iter() {
            assert_eq!(score.label, CategoryLabel::OverallNeutral);
            assert!(score.hits.is_empty());
        }
        assert!(!profile.risk_flags().any());
    }

    #[test]
    fn test_profile_routes_variants_to_categories() {
        let registry = VariantRegistry::builtin();
        let aggregator = Aggregator::new(&registry);
        let map = genotypes(&[("rs964184", "CG"), ("rs738409", "GG")]);

        let profile = aggregator.profile(&map);
        assert!(profile.triglyceride.label.is_risk());
        assert!(profile.hepatic_lipogenesis.label.is_risk());
        assert!(!profile.ldl_clearance.label.is_risk());

        let flags = profile.risk_flags();
        assert!(flags.triglyceride && flags.hepatic_lipogenesis);
        assert!(!flags.ldl_clearance && !flags.insulin_sensitivity);
    }
}
