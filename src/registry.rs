// ==============================================================================
// registry.rs - Variant Registry
// ==============================================================================
// Description: Curated table of lipid/metabolic variants and their categories
// Author: Matt Barham
// Created: 2026-10-12
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Alleles are reported on the plus strand, as consumer exports (23andMe,
// AncestryDNA) write them. Weights are evidence (1-5) x effect size (1-5).
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

use crate::config::ConfigError;

/// The four fixed biological groupings used for aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// LDL-receptor pathway and LDL particle clearance
    LdlClearance,
    /// Triglyceride / VLDL metabolism
    Triglyceride,
    /// Insulin sensitivity and carbohydrate tolerance
    InsulinSensitivity,
    /// Hepatic de novo lipogenesis and liver fat
    HepaticLipogenesis,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::LdlClearance,
        Category::Triglyceride,
        Category::InsulinSensitivity,
        Category::HepaticLipogenesis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::LdlClearance => "LDL-receptor / clearance",
            Category::Triglyceride => "Triglyceride / VLDL",
            Category::InsulinSensitivity => "Insulin sensitivity / carbohydrate tolerance",
            Category::HepaticLipogenesis => "Hepatic lipogenesis",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A known variant with its risk/protective alleles and strength weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantDefinition {
    /// Variant identifier (e.g., "rs429358")
    pub id: String,
    /// Gene symbol (e.g., "APOE")
    pub gene: String,
    /// Category this variant contributes to
    pub category: Category,
    #[serde(default)]
    pub risk_alleles: Vec<String>,
    #[serde(default)]
    pub protective_alleles: Vec<String>,
    /// Evidence strength (1-5)
    pub evidence: u8,
    /// Effect size (1-5)
    pub effect: u8,
    #[serde(default)]
    pub note: String,
}

impl VariantDefinition {
    /// Weight contributed when this variant is Risk or Protective
    pub fn weight(&self) -> u32 {
        u32::from(self.evidence) * u32::from(self.effect)
    }
}

/// Immutable lookup table of known variants
///
/// Built once (either [`VariantRegistry::builtin`] or a JSON override) and
/// passed by reference into the interpreter, aggregator and parser.
#[derive(Debug, Clone)]
pub struct VariantRegistry {
    variants: Vec<VariantDefinition>,
    index: HashMap<String, usize>,
}

impl VariantRegistry {
    /// Build a registry from definitions, rejecting malformed entries
    pub fn new(variants: Vec<VariantDefinition>) -> Result<Self, ConfigError> {
        let mut index = HashMap::with_capacity(variants.len());

        for (pos, variant) in variants.iter().enumerate() {
            if variant.id.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "variant at position {} has an empty id",
                    pos
                )));
            }
            for (name, value) in [("evidence", variant.evidence), ("effect", variant.effect)] {
                if !(1..=5).contains(&value) {
                    return Err(ConfigError::Invalid(format!(
                        "{}: {} must be between 1 and 5 (got {})",
                        variant.id, name, value
                    )));
                }
            }
            if variant.risk_alleles.is_empty() && variant.protective_alleles.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "{}: at least one risk or protective allele is required",
                    variant.id
                )));
            }
            if variant
                .risk_alleles
                .iter()
                .chain(variant.protective_alleles.iter())
                .any(|allele| allele.is_empty())
            {
                return Err(ConfigError::Invalid(format!(
                    "{}: alleles must not be empty strings",
                    variant.id
                )));
            }
            if index.insert(variant.id.clone(), pos).is_some() {
                return Err(ConfigError::Invalid(format!(
                    "duplicate variant id {}",
                    variant.id
                )));
            }
        }

        Ok(Self { variants, index })
    }

    /// Load a replacement knowledge table from a JSON array of definitions
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path_str.clone(),
            source,
        })?;

        let variants: Vec<VariantDefinition> = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| ConfigError::Json {
                path: path_str.clone(),
                source,
            })?;

        let registry = Self::new(variants)?;
        info!("Loaded {} variant definitions from {}", registry.len(), path_str);

        Ok(registry)
    }

    /// The curated default table
    pub fn builtin() -> Self {
        let variants = builtin_variants();
        let index = variants
            .iter()
            .enumerate()
            .map(|(pos, v)| (v.id.clone(), pos))
            .collect();
        Self { variants, index }
    }

    pub fn get(&self, id: &str) -> Option<&VariantDefinition> {
        self.index.get(id).map(|&pos| &self.variants[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// All definitions in table order
    pub fn iter(&self) -> impl Iterator<Item = &VariantDefinition> {
        self.variants.iter()
    }

    /// Variant ids belonging to `category`, in table order
    pub fn category_members(&self, category: Category) -> Vec<&str> {
        self.variants
            .iter()
            .filter(|v| v.category == category)
            .map(|v| v.id.as_str())
            .collect()
    }
}

/// Static form of a built-in definition
struct BuiltinVariant {
    id: &'static str,
    gene: &'static str,
    category: Category,
    risk: &'static [&'static str],
    protective: &'static [&'static str],
    evidence: u8,
    effect: u8,
    note: &'static str,
}

impl BuiltinVariant {
    fn to_definition(&self) -> VariantDefinition {
        VariantDefinition {
            id: self.id.to_string(),
            gene: self.gene.to_string(),
            category: self.category,
            risk_alleles: self.risk.iter().map(|a| a.to_string()).collect(),
            protective_alleles: self.protective.iter().map(|a| a.to_string()).collect(),
            evidence: self.evidence,
            effect: self.effect,
            note: self.note.to_string(),
        }
    }
}

const BUILTIN_VARIANTS: &[BuiltinVariant] = &[
    // LDL-receptor / clearance
    BuiltinVariant {
        id: "rs429358",
        gene: "APOE",
        category: Category::LdlClearance,
        risk: &["C"],
        protective: &[],
        evidence: 5,
        effect: 4,
        note: "APOE e4 allele; raises LDL and dietary cholesterol absorption",
    },
    BuiltinVariant {
        id: "rs7412",
        gene: "APOE",
        category: Category::LdlClearance,
        risk: &[],
        protective: &["T"],
        evidence: 5,
        effect: 4,
        note: "APOE e2 allele; lower LDL through faster remnant clearance",
    },
    BuiltinVariant {
        id: "rs11591147",
        gene: "PCSK9",
        category: Category::LdlClearance,
        risk: &[],
        protective: &["T"],
        evidence: 5,
        effect: 5,
        note: "PCSK9 R46L loss of function; more LDL receptors, lower LDL",
    },
    BuiltinVariant {
        id: "rs12740374",
        gene: "CELSR2/SORT1",
        category: Category::LdlClearance,
        risk: &["G"],
        protective: &["T"],
        evidence: 5,
        effect: 3,
        note: "Hepatic SORT1 expression; T allele lowers LDL",
    },
    BuiltinVariant {
        id: "rs693",
        gene: "APOB",
        category: Category::LdlClearance,
        risk: &["A"],
        protective: &[],
        evidence: 4,
        effect: 2,
        note: "APOB XbaI site; associated with higher LDL",
    },
    BuiltinVariant {
        id: "rs6511720",
        gene: "LDLR",
        category: Category::LdlClearance,
        risk: &[],
        protective: &["T"],
        evidence: 5,
        effect: 3,
        note: "LDLR intronic enhancer; T allele lowers LDL",
    },
    BuiltinVariant {
        id: "rs4299376",
        gene: "ABCG5/8",
        category: Category::LdlClearance,
        risk: &["G"],
        protective: &[],
        evidence: 4,
        effect: 2,
        note: "Sterol efflux transporter; G allele raises LDL",
    },
    BuiltinVariant {
        id: "rs3846662",
        gene: "HMGCR",
        category: Category::LdlClearance,
        risk: &["A"],
        protective: &[],
        evidence: 4,
        effect: 2,
        note: "HMG-CoA reductase splicing; A allele raises LDL",
    },
    BuiltinVariant {
        id: "rs2072183",
        gene: "NPC1L1",
        category: Category::LdlClearance,
        risk: &["C"],
        protective: &[],
        evidence: 3,
        effect: 2,
        note: "Intestinal cholesterol transporter; C allele raises absorption",
    },
    // Triglyceride / VLDL
    BuiltinVariant {
        id: "rs964184",
        gene: "APOA5/ZPR1",
        category: Category::Triglyceride,
        risk: &["G"],
        protective: &[],
        evidence: 5,
        effect: 4,
        note: "APOA5 cluster; G allele strongly raises triglycerides",
    },
    BuiltinVariant {
        id: "rs662799",
        gene: "APOA5",
        category: Category::Triglyceride,
        risk: &["G"],
        protective: &[],
        evidence: 5,
        effect: 4,
        note: "APOA5 -1131T>C promoter variant; raises triglycerides",
    },
    BuiltinVariant {
        id: "rs328",
        gene: "LPL",
        category: Category::Triglyceride,
        risk: &[],
        protective: &["G"],
        evidence: 5,
        effect: 3,
        note: "LPL S447X gain of function; lower triglycerides, higher HDL",
    },
    BuiltinVariant {
        id: "rs1260326",
        gene: "GCKR",
        category: Category::Triglyceride,
        risk: &["T"],
        protective: &[],
        evidence: 5,
        effect: 2,
        note: "GCKR P446L; raises hepatic triglyceride output",
    },
    BuiltinVariant {
        id: "rs12678919",
        gene: "LPL",
        category: Category::Triglyceride,
        risk: &[],
        protective: &["G"],
        evidence: 4,
        effect: 2,
        note: "LPL upstream variant; G allele lowers triglycerides",
    },
    BuiltinVariant {
        id: "rs2954029",
        gene: "TRIB1",
        category: Category::Triglyceride,
        risk: &["A"],
        protective: &["T"],
        evidence: 4,
        effect: 2,
        note: "TRIB1 locus; A allele raises triglycerides",
    },
    // Insulin sensitivity / carbohydrate tolerance
    BuiltinVariant {
        id: "rs7903146",
        gene: "TCF7L2",
        category: Category::InsulinSensitivity,
        risk: &["T"],
        protective: &[],
        evidence: 5,
        effect: 3,
        note: "Strongest common type 2 diabetes locus; impaired insulin secretion",
    },
    BuiltinVariant {
        id: "rs1801282",
        gene: "PPARG",
        category: Category::InsulinSensitivity,
        risk: &[],
        protective: &["G"],
        evidence: 4,
        effect: 2,
        note: "PPARG Pro12Ala; Ala (G) improves insulin sensitivity",
    },
    BuiltinVariant {
        id: "rs5219",
        gene: "KCNJ11",
        category: Category::InsulinSensitivity,
        risk: &["T"],
        protective: &[],
        evidence: 4,
        effect: 2,
        note: "KCNJ11 E23K; reduced insulin release",
    },
    BuiltinVariant {
        id: "rs13266634",
        gene: "SLC30A8",
        category: Category::InsulinSensitivity,
        risk: &["C"],
        protective: &["T"],
        evidence: 4,
        effect: 2,
        note: "Zinc transporter in beta cells; T allele protective",
    },
    BuiltinVariant {
        id: "rs9939609",
        gene: "FTO",
        category: Category::InsulinSensitivity,
        risk: &["A"],
        protective: &[],
        evidence: 5,
        effect: 2,
        note: "FTO obesity locus; A allele raises adiposity",
    },
    BuiltinVariant {
        id: "rs4402960",
        gene: "IGF2BP2",
        category: Category::InsulinSensitivity,
        risk: &["T"],
        protective: &[],
        evidence: 4,
        effect: 1,
        note: "IGF2BP2; modest type 2 diabetes risk",
    },
    // Hepatic lipogenesis
    BuiltinVariant {
        id: "rs738409",
        gene: "PNPLA3",
        category: Category::HepaticLipogenesis,
        risk: &["G"],
        protective: &[],
        evidence: 5,
        effect: 4,
        note: "PNPLA3 I148M; increases liver fat accumulation",
    },
    BuiltinVariant {
        id: "rs58542926",
        gene: "TM6SF2",
        category: Category::HepaticLipogenesis,
        risk: &["T"],
        protective: &[],
        evidence: 5,
        effect: 3,
        note: "TM6SF2 E167K; impaired VLDL secretion, hepatic fat retention",
    },
    BuiltinVariant {
        id: "rs641738",
        gene: "MBOAT7",
        category: Category::HepaticLipogenesis,
        risk: &["T"],
        protective: &[],
        evidence: 4,
        effect: 2,
        note: "MBOAT7 locus; T allele associated with liver fat",
    },
    BuiltinVariant {
        id: "rs6834314",
        gene: "HSD17B13",
        category: Category::HepaticLipogenesis,
        risk: &[],
        protective: &["G"],
        evidence: 4,
        effect: 2,
        note: "HSD17B13 loss of function proxy; protects against liver injury",
    },
    BuiltinVariant {
        id: "rs780094",
        gene: "GCKR",
        category: Category::HepaticLipogenesis,
        risk: &["T"],
        protective: &[],
        evidence: 4,
        effect: 2,
        note: "GCKR intronic; raises de novo lipogenesis substrate flux",
    },
];

fn builtin_variants() -> Vec<VariantDefinition> {
    BUILTIN_VARIANTS.iter().map(BuiltinVariant::to_definition).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn variant(
        category: Category,
        risk: &'static [&'static str],
        evidence: u8,
        effect: u8,
    ) -> VariantDefinition {
        BuiltinVariant {
            id: "rs1",
            gene: "GENE",
            category,
            risk,
            protective: &[],
            evidence,
            effect,
            note: "",
        }
        .to_definition()
    }

    #[test]
    fn test_builtin_passes_validation() {
        let builtin = VariantRegistry::builtin();
        let validated = VariantRegistry::new(builtin.iter().cloned().collect());
        assert!(validated.is_ok());
        assert_eq!(validated.unwrap().len(), builtin.len());
    }

    #[test]
    fn test_every_category_has_members() {
        let registry = VariantRegistry::builtin();
        for category in Category::ALL {
            assert!(
                !registry.category_members(category).is_empty(),
                "Category {} has no variants",
                category
            );
        }
    }

    #[test]
    fn test_lookup_and_weight() {
        let registry = VariantRegistry::builtin();
        let apoe = registry.get("rs429358").unwrap();
        assert_eq!(apoe.gene, "APOE");
        assert_eq!(apoe.weight(), 20);
        assert!(registry.contains("rs11591147"));
        assert!(registry.get("rs0000000").is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let variants = vec![
            variant(Category::LdlClearance, &["A"], 1, 1),
            variant(Category::Triglyceride, &["G"], 1, 1),
        ];
        assert!(matches!(
            VariantRegistry::new(variants),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_weights() {
        let variants = vec![variant(Category::LdlClearance, &["A"], 6, 1)];
        assert!(VariantRegistry::new(variants).is_err());

        let variants = vec![variant(Category::LdlClearance, &["A"], 3, 0)];
        assert!(VariantRegistry::new(variants).is_err());
    }

    #[test]
    fn test_rejects_variant_without_alleles() {
        let variants = vec![variant(Category::LdlClearance, &[], 3, 3)];
        assert!(VariantRegistry::new(variants).is_err());
    }

    #[test]
    fn test_json_round_trip_of_table() {
        let json = r#"[
            {"id": "rs9", "gene": "TEST", "category": "triglyceride",
             "risk_alleles": ["G"], "evidence": 2, "effect": 3}
        ]"#;
        let variants: Vec<VariantDefinition> = serde_json::from_str(json).unwrap();
        let registry = VariantRegistry::new(variants).unwrap();

        let variant = registry.get("rs9").unwrap();
        assert_eq!(variant.category, Category::Triglyceride);
        assert!(variant.protective_alleles.is_empty());
        assert_eq!(variant.weight(), 6);
        assert_eq!(registry.category_members(Category::Triglyceride), vec!["rs9"]);
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"[{"id": "rs9", "gene": "TEST", "category": "ldl_clearance",
                 "protective_alleles": ["T"], "evidence": 4, "effect": 4}]"#,
        )
        .unwrap();
        file.flush().unwrap();

        let registry = VariantRegistry::from_json_file(file.path()).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("rs9").unwrap().weight(), 16);

        let missing = VariantRegistry::from_json_file("/nonexistent/registry.json");
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
