// ==============================================================================
// phenotype.rs - Phenotype Classifier
// ==============================================================================
// Description: Monogenic screen, polygenic class, hyper-absorber and secondary
//              pattern flags derived from genotype calls and category scores
// Author: Matt Barham
// Created: 2026-10-13
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// The polygenic class is exclusive (exactly one value). Secondary flags are
// additive: any number may fire for the same profile.
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aggregator::{CategoryProfile, CategoryScore, RiskFlags};
use crate::models::{ColorTag, GenotypeMap};
use crate::registry::Category;

/// Maximum hits listed per category in a polygenic justification
pub const MAX_JUSTIFICATION_HITS: usize = 6;

/// Caveat attached to every negative monogenic screen
pub const SCREEN_NEGATIVE_CAVEAT: &str = "Consumer genotyping arrays test only a small \
fraction of known pathogenic LDLR, APOB, PCSK9 and LPL variants; a negative screen does \
not rule out familial hypercholesterolemia or other monogenic dyslipidemias.";

/// A highly penetrant pathogenic marker checked by the monogenic screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonogenicMarker {
    pub variant_id: String,
    pub gene: String,
    /// Protein-level label (e.g., "R3527Q")
    pub variant_label: String,
    pub pathogenic_allele: String,
    pub note: String,
}

/// (variant id, gene, protein label, pathogenic allele, note)
const BUILTIN_MARKERS: [(&str, &str, &str, &str, &str); 4] = [
    (
        "rs5742904",
        "APOB",
        "R3527Q",
        "A",
        "Familial defective apoB-100; impaired LDL receptor binding",
    ),
    (
        "rs137852912",
        "PCSK9",
        "D374Y",
        "T",
        "PCSK9 gain of function; severe autosomal dominant hypercholesterolemia",
    ),
    (
        "rs137929307",
        "LDLR",
        "G592E",
        "A",
        "LDLR class 2 transport-defective allele; familial hypercholesterolemia",
    ),
    (
        "rs118204057",
        "LPL",
        "P207L",
        "A",
        "LPL loss of function; familial chylomicronemia when homozygous",
    ),
];

impl MonogenicMarker {
    fn builtin() -> Vec<Self> {
        BUILTIN_MARKERS
            .iter()
            .map(|&(variant_id, gene, variant_label, allele, note)| Self {
                variant_id: variant_id.to_string(),
                gene: gene.to_string(),
                variant_label: variant_label.to_string(),
                pathogenic_allele: allele.to_string(),
                note: note.to_string(),
            })
            .collect()
    }
}

/// A marker found carrying its pathogenic allele
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonogenicFinding {
    pub marker: MonogenicMarker,
    pub genotype: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonogenicScreen {
    pub positive: bool,
    pub markers_checked: usize,
    pub findings: Vec<MonogenicFinding>,
    pub justification: String,
}

/// Exclusive polygenic class from the LDL-clearance and triglyceride labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolygenicClass {
    #[serde(rename = "None")]
    None,
    #[serde(rename = "LDL-dominant")]
    LdlDominant,
    #[serde(rename = "TG-dominant")]
    TgDominant,
    #[serde(rename = "Combined")]
    Combined,
}

impl PolygenicClass {
    pub fn from_risk(ldl_risk: bool, tg_risk: bool) -> Self {
        match (ldl_risk, tg_risk) {
            (true, true) => PolygenicClass::Combined,
            (true, false) => PolygenicClass::LdlDominant,
            (false, true) => PolygenicClass::TgDominant,
            (false, false) => PolygenicClass::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PolygenicClass::None => "None",
            PolygenicClass::LdlDominant => "LDL-dominant",
            PolygenicClass::TgDominant => "TG-dominant",
            PolygenicClass::Combined => "Combined",
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            PolygenicClass::None => {
                "Neither the LDL-clearance nor the triglyceride category is Overall Risk."
            }
            PolygenicClass::LdlDominant => {
                "The LDL-clearance category is Overall Risk; the triglyceride category is not."
            }
            PolygenicClass::TgDominant => {
                "The triglyceride category is Overall Risk; the LDL-clearance category is not."
            }
            PolygenicClass::Combined => {
                "Both the LDL-clearance and triglyceride categories are Overall Risk."
            }
        }
    }
}

impl fmt::Display for PolygenicClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygenicResult {
    pub class: PolygenicClass,
    pub justification: String,
}

/// "Call for `variant_id` contains `allele`"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlleleProbe {
    pub variant_id: String,
    pub gene: String,
    pub allele: String,
}

impl AlleleProbe {
    pub fn new(variant_id: &str, gene: &str, allele: &str) -> Self {
        Self {
            variant_id: variant_id.to_string(),
            gene: gene.to_string(),
            allele: allele.to_string(),
        }
    }

    pub fn matches(&self, genotypes: &GenotypeMap) -> bool {
        genotypes
            .get(&self.variant_id)
            .is_some_and(|call| call.contains(self.allele.as_str()))
    }

    fn describe(&self, genotypes: &GenotypeMap) -> String {
        match genotypes.get(&self.variant_id) {
            Some(call) if call.contains(self.allele.as_str()) => format!(
                "{} ({}) {} carries {}",
                self.variant_id, self.gene, call, self.allele
            ),
            Some(call) => format!(
                "{} ({}) {} lacks {}",
                self.variant_id, self.gene, call, self.allele
            ),
            None => format!("{} ({}) not called", self.variant_id, self.gene),
        }
    }
}

/// Hyper-absorber rule: any driver allele present and the blocker allele absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HyperAbsorptionRule {
    pub drivers: Vec<AlleleProbe>,
    pub blocker: AlleleProbe,
}

impl HyperAbsorptionRule {
    fn builtin() -> Self {
        Self {
            drivers: vec![
                AlleleProbe::new("rs429358", "APOE", "C"),
                AlleleProbe::new("rs2072183", "NPC1L1", "C"),
            ],
            blocker: AlleleProbe::new("rs11591147", "PCSK9", "T"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HyperAbsorption {
    pub positive: bool,
    pub justification: String,
}

/// Severity of a secondary flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Caution,
    Warning,
}

impl Severity {
    pub fn color(&self) -> ColorTag {
        match self {
            Severity::Info => ColorTag::Green,
            Severity::Caution => ColorTag::Amber,
            Severity::Warning => ColorTag::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryFlagKind {
    IsolatedLdlClearance,
    CarbohydrateSensitiveDyslipidemia,
    AbsorptionAmplifiedLdl,
    HepaticFatSusceptibility,
    LowPolygenicBurden,
}

/// An additive, non-exclusive pattern flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryFlag {
    pub kind: SecondaryFlagKind,
    pub label: String,
    pub description: String,
    pub severity: Severity,
    pub color: ColorTag,
}

/// Inputs the secondary flag rules are evaluated against
#[derive(Debug, Clone, Copy)]
struct FlagContext {
    risk: RiskFlags,
    hyper_absorber: bool,
    monogenic_positive: bool,
    called_variants: usize,
}

struct FlagRule {
    kind: SecondaryFlagKind,
    label: &'static str,
    description: &'static str,
    severity: Severity,
    applies: fn(&FlagContext) -> bool,
}

const FLAG_RULES: &[FlagRule] = &[
    FlagRule {
        kind: SecondaryFlagKind::IsolatedLdlClearance,
        label: "Isolated LDL-clearance pattern",
        description: "LDL-clearance risk without triglyceride or insulin risk and without \
                      hyper-absorption; LDL is expected to track saturated-fat intake most \
                      closely.",
        severity: Severity::Caution,
        applies: |c| {
            c.risk.ldl_clearance
                && !c.risk.triglyceride
                && !c.risk.insulin_sensitivity
                && !c.hyper_absorber
        },
    },
    FlagRule {
        kind: SecondaryFlagKind::CarbohydrateSensitiveDyslipidemia,
        label: "Carbohydrate-sensitive dyslipidemia",
        description: "Triglyceride risk together with insulin-sensitivity risk; refined \
                      carbohydrate and fructose are likely to raise triglycerides.",
        severity: Severity::Warning,
        applies: |c| c.risk.triglyceride && c.risk.insulin_sensitivity,
    },
    FlagRule {
        kind: SecondaryFlagKind::AbsorptionAmplifiedLdl,
        label: "Absorption-amplified LDL",
        description: "LDL-clearance risk combined with hyper-absorption markers; dietary \
                      cholesterol is likely to raise LDL more than average.",
        severity: Severity::Warning,
        applies: |c| c.risk.ldl_clearance && c.hyper_absorber,
    },
    FlagRule {
        kind: SecondaryFlagKind::HepaticFatSusceptibility,
        label: "Hepatic fat susceptibility",
        description: "Hepatic lipogenesis risk together with insulin-sensitivity risk; \
                      liver fat accumulation is more likely under caloric and sugar excess.",
        severity: Severity::Caution,
        applies: |c| c.risk.hepatic_lipogenesis && c.risk.insulin_sensitivity,
    },
    FlagRule {
        kind: SecondaryFlagKind::LowPolygenicBurden,
        label: "Low polygenic burden",
        description: "Scored variants were called, no category is Overall Risk and the \
                      monogenic screen is negative.",
        severity: Severity::Info,
        applies: |c| c.called_variants > 0 && !c.risk.any() && !c.monogenic_positive,
    },
];

/// Complete phenotype classification for one genotype map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhenotypeResult {
    pub monogenic: MonogenicScreen,
    pub polygenic: PolygenicResult,
    pub hyper_absorber: HyperAbsorption,
    pub secondary_flags: Vec<SecondaryFlag>,
}

impl PhenotypeResult {
    pub fn monogenic_screen_positive(&self) -> bool {
        self.monogenic.positive
    }

    pub fn is_hyper_absorber(&self) -> bool {
        self.hyper_absorber.positive
    }

    pub fn polygenic_class(&self) -> PolygenicClass {
        self.polygenic.class
    }

    pub fn has_flag(&self, kind: SecondaryFlagKind) -> bool {
        self.secondary_flags.iter().any(|f| f.kind == kind)
    }
}

/// Classifier configured with a marker list and hyper-absorption rule
#[derive(Debug, Clone, PartialEq)]
pub struct PhenotypeClassifier {
    markers: Vec<MonogenicMarker>,
    hyper_rule: HyperAbsorptionRule,
}

impl Default for PhenotypeClassifier {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PhenotypeClassifier {
    pub fn new(markers: Vec<MonogenicMarker>, hyper_rule: HyperAbsorptionRule) -> Self {
        Self { markers, hyper_rule }
    }

    pub fn builtin() -> Self {
        Self::new(MonogenicMarker::builtin(), HyperAbsorptionRule::builtin())
    }

    pub fn markers(&self) -> &[MonogenicMarker] {
        &self.markers
    }

    /// Variant ids read directly from raw calls (markers and rule probes)
    pub fn tracked_ids(&self) -> impl Iterator<Item = &str> {
        self.markers
            .iter()
            .map(|m| m.variant_id.as_str())
            .chain(self.hyper_rule.drivers.iter().map(|p| p.variant_id.as_str()))
            .chain(std::iter::once(self.hyper_rule.blocker.variant_id.as_str()))
    }

    pub fn classify(&self, genotypes: &GenotypeMap, profile: &CategoryProfile) -> PhenotypeResult {
        let monogenic = self.screen_monogenic(genotypes);
        let polygenic = classify_polygenic(profile);
        let hyper_absorber = self.hyper_absorber(genotypes);
        let secondary_flags = secondary_flags(
            profile.risk_flags(),
            hyper_absorber.positive,
            monogenic.positive,
            profile.called_variants(),
        );

        PhenotypeResult {
            monogenic,
            polygenic,
            hyper_absorber,
            secondary_flags,
        }
    }

    /// Positive iff any marker's call contains its pathogenic allele
    pub fn screen_monogenic(&self, genotypes: &GenotypeMap) -> MonogenicScreen {
        let findings: Vec<MonogenicFinding> = self
            .markers
            .iter()
            .filter_map(|marker| {
                genotypes
                    .get(&marker.variant_id)
                    .filter(|call| call.contains(marker.pathogenic_allele.as_str()))
                    .map(|call| MonogenicFinding {
                        marker: marker.clone(),
                        genotype: call.clone(),
                    })
            })
            .collect();

        let positive = !findings.is_empty();
        let justification = if positive {
            let detail: Vec<String> = findings
                .iter()
                .map(|f| {
                    format!(
                        "{} {} ({}) genotype {} carries pathogenic allele {}: {}",
                        f.marker.gene,
                        f.marker.variant_label,
                        f.marker.variant_id,
                        f.genotype,
                        f.marker.pathogenic_allele,
                        f.marker.note
                    )
                })
                .collect();
            format!(
                "Screen positive. {}. Confirm with clinical-grade sequencing.",
                detail.join("; ")
            )
        } else {
            format!(
                "Screen negative for {} markers checked. {}",
                self.markers.len(),
                SCREEN_NEGATIVE_CAVEAT
            )
        };

        MonogenicScreen {
            positive,
            markers_checked: self.markers.len(),
            findings,
            justification,
        }
    }

    /// Three-variant rule evaluated on raw calls, not on category sums
    pub fn hyper_absorber(&self, genotypes: &GenotypeMap) -> HyperAbsorption {
        let rule = &self.hyper_rule;
        let driver_present = rule.drivers.iter().any(|p| p.matches(genotypes));
        let blocked = rule.blocker.matches(genotypes);
        let positive = driver_present && !blocked;

        let drivers: Vec<String> = rule.drivers.iter().map(|p| p.describe(genotypes)).collect();
        let verdict = match (driver_present, blocked) {
            (true, false) => "absorption driver present and not offset",
            (true, true) => "absorption driver offset by protective allele",
            (false, _) => "no absorption driver allele present",
        };
        let justification = format!(
            "{}: {}; {}.",
            verdict,
            drivers.join("; "),
            rule.blocker.describe(genotypes)
        );

        HyperAbsorption {
            positive,
            justification,
        }
    }
}

/// Exclusive class from the LDL-clearance and triglyceride labels
pub fn classify_polygenic(profile: &CategoryProfile) -> PolygenicResult {
    let ldl = &profile.ldl_clearance;
    let tg = &profile.triglyceride;
    let class = PolygenicClass::from_risk(ldl.label.is_risk(), tg.label.is_risk());

    let justification = format!(
        "{} {} {}",
        class.summary(),
        describe_category(Category::LdlClearance, ldl),
        describe_category(Category::Triglyceride, tg)
    );

    PolygenicResult {
        class,
        justification,
    }
}

fn describe_category(category: Category, score: &CategoryScore) -> String {
    let top = score.top_hits(MAX_JUSTIFICATION_HITS);
    let hits = if top.is_empty() {
        "no contributing variants".to_string()
    } else {
        let listed: Vec<String> = top
            .iter()
            .map(|h| format!("{} [{}]", h.description(), h.weight))
            .collect();
        let more = score.hits.len().saturating_sub(top.len());
        if more > 0 {
            format!("top hits: {} (+{} more)", listed.join("; "), more)
        } else {
            format!("top hits: {}", listed.join("; "))
        }
    };

    format!(
        "{}: {} (risk {} vs protective {}), {}.",
        category, score.label, score.risk_score_sum, score.protective_score_sum, hits
    )
}

/// Evaluate every secondary flag rule; zero or more may fire
pub fn secondary_flags(
    risk: RiskFlags,
    hyper_absorber: bool,
    monogenic_positive: bool,
    called_variants: usize,
) -> Vec<SecondaryFlag> {
    let context = FlagContext {
        risk,
        hyper_absorber,
        monogenic_positive,
        called_variants,
    };

    FLAG_RULES
        .iter()
        .filter(|rule| (rule.applies)(&context))
        .map(|rule| SecondaryFlag {
            kind: rule.kind,
            label: rule.label.to_string(),
            description: rule.description.to_string(),
            severity: rule.severity,
            color: rule.severity.color(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::Aggregator;
    use crate::registry::{VariantDefinition, VariantRegistry};

    fn genotypes(calls: &[(&str, &str)]) -> GenotypeMap {
        calls
            .iter()
            .map(|(id, gt)| (id.to_string(), gt.to_string()))
            .collect()
    }

    fn classify(calls: &[(&str, &str)]) -> PhenotypeResult {
        let registry = VariantRegistry::builtin();
        let map = genotypes(calls);
        let profile = Aggregator::new(&registry).profile(&map);
        PhenotypeClassifier::builtin().classify(&map, &profile)
    }

    #[test]
    fn test_polygenic_class_truth_table() {
        assert_eq!(PolygenicClass::from_risk(true, true), PolygenicClass::Combined);
        assert_eq!(PolygenicClass::from_risk(true, false), PolygenicClass::LdlDominant);
        assert_eq!(PolygenicClass::from_risk(false, true), PolygenicClass::TgDominant);
        assert_eq!(PolygenicClass::from_risk(false, false), PolygenicClass::None);
    }

    #[test]
    fn test_polygenic_class_serde() {
        let json = serde_json::to_string(&PolygenicClass::LdlDominant).unwrap();
        assert_eq!(json, "\"LDL-dominant\"");
        let json = serde_json::to_string(&PolygenicClass::None).unwrap();
        assert_eq!(json, "\"None\"");
    }

    #[test]
    fn test_empty_map_is_all_negative() {
        let result = classify(&[]);

        assert!(!result.monogenic_screen_positive());
        assert!(!result.is_hyper_absorber());
        assert_eq!(result.polygenic_class(), PolygenicClass::None);
        assert!(result.monogenic.justification.contains(SCREEN_NEGATIVE_CAVEAT));
        assert_eq!(result.monogenic.markers_checked, 4);
        assert!(result.secondary_flags.is_empty());
    }

    #[test]
    fn test_monogenic_positive_names_marker() {
        let result = classify(&[("rs5742904", "GA")]);

        assert!(result.monogenic_screen_positive());
        assert_eq!(result.monogenic.findings.len(), 1);
        assert!(result.monogenic.justification.contains("rs5742904"));
        assert!(result.monogenic.justification.contains("R3527Q"));
        assert!(!result.monogenic.justification.contains(SCREEN_NEGATIVE_CAVEAT));
    }

    #[test]
    fn test_monogenic_normal_call_is_negative() {
        let result = classify(&[("rs5742904", "GG"), ("rs137852912", "AA")]);
        assert!(!result.monogenic_screen_positive());
    }

    #[test]
    fn test_combined_class_justification_lists_sums() {
        let result = classify(&[("rs429358", "CC"), ("rs964184", "GG")]);

        assert_eq!(result.polygenic_class(), PolygenicClass::Combined);
        let text = &result.polygenic.justification;
        assert!(text.contains("risk 20 vs protective 0"));
        assert!(text.contains("rs429358 (APOE) CC: Risk [20]"));
        assert!(text.contains("rs964184 (APOA5/ZPR1) GG: Risk [20]"));
    }

    #[test]
    fn test_justification_hit_list_is_capped() {
        let variants: Vec<VariantDefinition> = (1..=MAX_JUSTIFICATION_HITS + 2)
            .map(|n| VariantDefinition {
                id: format!("rs{}", n),
                gene: "LDLR".to_string(),
                category: Category::LdlClearance,
                risk_alleles: vec!["A".to_string()],
                protective_alleles: Vec::new(),
                evidence: 3,
                effect: 3,
                note: String::new(),
            })
            .collect();
        let registry = VariantRegistry::new(variants).unwrap();
        let map: GenotypeMap = registry
            .iter()
            .map(|v| (v.id.clone(), "AA".to_string()))
            .collect();

        let profile = Aggregator::new(&registry).profile(&map);
        let result = classify_polygenic(&profile);

        assert_eq!(result.class, PolygenicClass::LdlDominant);
        assert_eq!(result.justification.matches(": Risk [").count(), MAX_JUSTIFICATION_HITS);
        assert!(result.justification.contains("(+2 more)"));
        assert!(result.justification.contains("risk 72 vs protective 0"));
    }

    #[test]
    fn test_hyper_absorber_rule() {
        // APOE driver, PCSK9 blocker absent
        assert!(classify(&[("rs429358", "CT")]).is_hyper_absorber());
        // NPC1L1 driver
        assert!(classify(&[("rs2072183", "GC")]).is_hyper_absorber());
        // Driver offset by PCSK9 R46L
        assert!(!classify(&[("rs429358", "CT"), ("rs11591147", "GT")]).is_hyper_absorber());
        // No driver
        assert!(!classify(&[("rs429358", "TT"), ("rs2072183", "GG")]).is_hyper_absorber());
    }

    #[test]
    fn test_hyper_absorber_ignores_category_sums() {
        // LDL category dominated by protective weight, yet the raw-call rule fires
        let result = classify(&[
            ("rs429358", "CT"),
            ("rs7412", "TT"),
            ("rs6511720", "TT"),
        ]);
        assert_eq!(result.polygenic_class(), PolygenicClass::None);
        assert!(result.is_hyper_absorber());
    }

    #[test]
    fn test_secondary_flags_are_additive() {
        let risk = RiskFlags {
            ldl_clearance: true,
            triglyceride: true,
            insulin_sensitivity: true,
            hepatic_lipogenesis: true,
        };
        let flags = secondary_flags(risk, true, false, 10);
        let kinds: Vec<SecondaryFlagKind> = flags.iter().map(|f| f.kind).collect();

        assert_eq!(
            kinds,
            vec![
                SecondaryFlagKind::CarbohydrateSensitiveDyslipidemia,
                SecondaryFlagKind::AbsorptionAmplifiedLdl,
                SecondaryFlagKind::HepaticFatSusceptibility,
            ]
        );
        assert!(flags.iter().all(|f| f.color == f.severity.color()));
    }

    #[test]
    fn test_isolated_ldl_pattern() {
        let risk = RiskFlags {
            ldl_clearance: true,
            ..RiskFlags::default()
        };
        let flags = secondary_flags(risk, false, false, 10);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].kind, SecondaryFlagKind::IsolatedLdlClearance);
        assert_eq!(flags[0].color, ColorTag::Amber);

        // Hyper-absorption suppresses the isolated pattern
        let flags = secondary_flags(risk, true, false, 10);
        assert!(flags.iter().all(|f| f.kind != SecondaryFlagKind::IsolatedLdlClearance));
    }

    #[test]
    fn test_low_burden_requires_negative_screen() {
        let none = RiskFlags::default();
        let flags = secondary_flags(none, false, false, 10);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].kind, SecondaryFlagKind::LowPolygenicBurden);

        assert!(secondary_flags(none, false, true, 10).is_empty());
    }

    #[test]
    fn test_low_burden_requires_called_variants() {
        let none = RiskFlags::default();
        assert!(secondary_flags(none, false, false, 0).is_empty());

        // Neutral calls are still evidence
        let result = classify(&[("rs429358", "TT"), ("rs964184", "CC")]);
        assert!(result.has_flag(SecondaryFlagKind::LowPolygenicBurden));
    }

    #[test]
    fn test_tracked_ids_cover_markers_and_probes() {
        let classifier = PhenotypeClassifier::builtin();
        let ids: Vec<&str> = classifier.tracked_ids().collect();
        for id in ["rs5742904", "rs137852912", "rs429358", "rs2072183", "rs11591147"] {
            assert!(ids.contains(&id), "missing {}", id);
        }
    }
}
