// ==============================================================================
// interpreter.rs - Genotype Interpreter
// ==============================================================================
// Description: Classifies a single genotype call against the variant registry
// Author: Matt Barham
// Created: 2026-10-12
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Algorithm:
//   - unknown variant or no call      -> Neutral, weight 0
//   - any risk allele in genotype     -> Risk, weight = evidence x effect
//   - else any protective allele      -> Protective, same weight
//   - else                            -> Neutral, weight 0
//   Risk is tested first, so "CT" with risk C and protective T is Risk.
// ==============================================================================

use serde::{Deserialize, Serialize};

use crate::models::{ColorTag, VariantStatus};
use crate::registry::{VariantDefinition, VariantRegistry};

/// Result of interpreting one variant call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretedVariant {
    pub status: VariantStatus,
    /// evidence x effect for Risk/Protective, 0 for Neutral (range 0-25)
    pub weight: u32,
    pub color: ColorTag,
    pub tooltip: String,
}

impl InterpretedVariant {
    fn neutral(tooltip: String) -> Self {
        Self {
            status: VariantStatus::Neutral,
            weight: 0,
            color: VariantStatus::Neutral.color(),
            tooltip,
        }
    }

    fn matched(
        status: VariantStatus,
        variant: &VariantDefinition,
        genotype: &str,
        allele: &str,
    ) -> Self {
        let weight = variant.weight();
        let direction = match status {
            VariantStatus::Risk => "risk",
            _ => "protective",
        };
        let mut tooltip = format!(
            "{} ({}) {}: {} allele {} present (evidence {} x effect {} = {})",
            variant.id,
            variant.gene,
            genotype,
            direction,
            allele,
            variant.evidence,
            variant.effect,
            weight
        );
        if !variant.note.is_empty() {
            tooltip.push_str(". ");
            tooltip.push_str(&variant.note);
        }

        Self {
            status,
            weight,
            color: status.color(),
            tooltip,
        }
    }
}

/// Interprets calls against an injected registry
#[derive(Debug, Clone, Copy)]
pub struct Interpreter<'a> {
    registry: &'a VariantRegistry,
}

impl<'a> Interpreter<'a> {
    pub fn new(registry: &'a VariantRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a VariantRegistry {
        self.registry
    }

    /// Interpret one call
    ///
    /// # Arguments
    /// * `variant_id` - Variant identifier (e.g., "rs429358")
    /// * `genotype` - Observed allele string, `None` for no call
    ///
    /// # Examples
    /// ```
    /// use lipid_profiler::interpreter::Interpreter;
    /// use lipid_profiler::models::VariantStatus;
    /// use lipid_profiler::registry::VariantRegistry;
    ///
    /// let registry = VariantRegistry::builtin();
    /// let interpreter = Interpreter::new(&registry);
    ///
    /// let call = interpreter.interpret("rs429358", Some("CT"));
    /// assert_eq!(call.status, VariantStatus::Risk);
    /// assert_eq!(call.weight, 20);
    ///
    /// let unknown = interpreter.interpret("rs0", Some("CT"));
    /// assert_eq!(unknown.status, VariantStatus::Neutral);
    /// ```
    pub fn interpret(&self, variant_id: &str, genotype: Option<&str>) -> InterpretedVariant {
        let Some(variant) = self.registry.get(variant_id) else {
            return InterpretedVariant::neutral(format!("{}: no effect known", variant_id));
        };

        let genotype = match genotype {
            Some(g) if !g.is_empty() => g,
            _ => {
                return InterpretedVariant::neutral(format!(
                    "{} ({}): no call, no effect known",
                    variant.id, variant.gene
                ))
            }
        };

        if let Some(allele) = find_allele(&variant.risk_alleles, genotype) {
            return InterpretedVariant::matched(VariantStatus::Risk, variant, genotype, allele);
        }

        if let Some(allele) = find_allele(&variant.protective_alleles, genotype) {
            return InterpretedVariant::matched(VariantStatus::Protective, variant, genotype, allele);
        }

        InterpretedVariant::neutral(format!(
            "{} ({}) {}: no listed risk or protective allele",
            variant.id, variant.gene, genotype
        ))
    }
}

/// First listed allele that occurs as a substring of the genotype
fn find_allele<'v>(alleles: &'v [String], genotype: &str) -> Option<&'v str> {
    alleles
        .iter()
        .map(String::as_str)
        .find(|allele| genotype.contains(allele))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Category;

    fn registry() -> VariantRegistry {
        VariantRegistry::builtin()
    }

    #[test]
    fn test_unknown_variant_is_neutral() {
        let registry = registry();
        let interpreter = Interpreter::new(&registry);

        for genotype in ["AA", "CT", "GG", "--", ""] {
            let result = interpreter.interpret("rs999999999", Some(genotype));
            assert_eq!(result.status, VariantStatus::Neutral);
            assert_eq!(result.weight, 0);
            assert!(result.tooltip.contains("no effect known"));
        }
    }

    #[test]
    fn test_no_call_is_neutral() {
        let registry = registry();
        let interpreter = Interpreter::new(&registry);

        let absent = interpreter.interpret("rs429358", None);
        assert_eq!(absent.status, VariantStatus::Neutral);
        assert_eq!(absent.weight, 0);
        assert!(absent.tooltip.contains("no effect known"));

        let empty = interpreter.interpret("rs429358", Some(""));
        assert_eq!(empty.status, VariantStatus::Neutral);

        let dashes = interpreter.interpret("rs429358", Some("--"));
        assert_eq!(dashes.status, VariantStatus::Neutral);
        assert_eq!(dashes.weight, 0);
    }

    #[test]
    fn test_risk_allele() {
        let registry = registry();
        let interpreter = Interpreter::new(&registry);

        // APOE e4: risk C, evidence 5 x effect 4
        let result = interpreter.interpret("rs429358", Some("CC"));
        assert_eq!(result.status, VariantStatus::Risk);
        assert_eq!(result.weight, 20);
        assert_eq!(result.color, ColorTag::Red);
        assert!(result.tooltip.contains("risk allele C"));
    }

    #[test]
    fn test_protective_allele() {
        let registry = registry();
        let interpreter = Interpreter::new(&registry);

        // PCSK9 R46L: protective T, evidence 5 x effect 5
        let result = interpreter.interpret("rs11591147", Some("GT"));
        assert_eq!(result.status, VariantStatus::Protective);
        assert_eq!(result.weight, 25);
        assert_eq!(result.color, ColorTag::Green);
    }

    #[test]
    fn test_no_listed_allele_is_neutral() {
        let registry = registry();
        let interpreter = Interpreter::new(&registry);

        let result = interpreter.interpret("rs429358", Some("TT"));
        assert_eq!(result.status, VariantStatus::Neutral);
        assert_eq!(result.weight, 0);
        assert_eq!(result.color, ColorTag::Gray);
    }

    #[test]
    fn test_risk_takes_precedence_over_protective() {
        let registry = registry();
        let interpreter = Interpreter::new(&registry);

        // Every builtin variant with both lists: a het call of risk + protective is Risk
        for variant in registry
            .iter()
            .filter(|v| !v.risk_alleles.is_empty() && !v.protective_alleles.is_empty())
        {
            let genotype = format!("{}{}", variant.risk_alleles[0], variant.protective_alleles[0]);
            let result = interpreter.interpret(&variant.id, Some(&genotype));
            assert_eq!(result.status, VariantStatus::Risk, "{} {}", variant.id, genotype);

            let reversed = format!("{}{}", variant.protective_alleles[0], variant.risk_alleles[0]);
            let result = interpreter.interpret(&variant.id, Some(&reversed));
            assert_eq!(result.status, VariantStatus::Risk, "{} {}", variant.id, reversed);
        }
    }

    #[test]
    fn test_weight_range() {
        let registry = registry();
        let interpreter = Interpreter::new(&registry);

        for variant in registry.iter() {
            for genotype in ["AA", "CC", "GG", "TT", "AG", "CT"] {
                let result = interpreter.interpret(&variant.id, Some(genotype));
                assert!(result.weight <= 25);
                if result.status == VariantStatus::Neutral {
                    assert_eq!(result.weight, 0);
                } else {
                    assert_eq!(result.weight, variant.weight());
                }
            }
        }
    }

    #[test]
    fn test_multi_character_alleles() {
        let registry = VariantRegistry::new(vec![VariantDefinition {
            id: "i5000001".to_string(),
            gene: "TEST".to_string(),
            category: Category::LdlClearance,
            risk_alleles: vec!["DI".to_string()],
            protective_alleles: vec!["II".to_string()],
            evidence: 2,
            effect: 2,
            note: String::new(),
        }])
        .unwrap();
        let interpreter = Interpreter::new(&registry);

        assert_eq!(interpreter.interpret("i5000001", Some("DI")).status, VariantStatus::Risk);
        assert_eq!(interpreter.interpret("i5000001", Some("II")).status, VariantStatus::Protective);
        assert_eq!(interpreter.interpret("i5000001", Some("DD")).status, VariantStatus::Neutral);
    }
}
