// ==============================================================================
// models.rs - Shared Data Models
// ==============================================================================
// Description: Genotype map and display tags shared across the risk pipeline
// Author: Matt Barham
// Created: 2026-10-12
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Genotype calls keyed by variant identifier (e.g., "rs429358" -> "CT")
///
/// Produced by the export parser; absent keys are "no call". A `BTreeMap`
/// keeps iteration and serialized output deterministic.
pub type GenotypeMap = BTreeMap<String, String>;

/// Direction of a single interpreted variant call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantStatus {
    /// A listed risk allele was observed
    Risk,
    /// A listed protective allele was observed (and no risk allele)
    Protective,
    /// Unknown variant, no call, or no listed allele observed
    Neutral,
}

impl VariantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantStatus::Risk => "Risk",
            VariantStatus::Protective => "Protective",
            VariantStatus::Neutral => "Neutral",
        }
    }

    /// Qualitative color used by presentation layers
    pub fn color(&self) -> ColorTag {
        match self {
            VariantStatus::Risk => ColorTag::Red,
            VariantStatus::Protective => ColorTag::Green,
            VariantStatus::Neutral => ColorTag::Gray,
        }
    }
}

/// Qualitative color tag attached to results for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Red,
    Amber,
    Green,
    Gray,
}

impl ColorTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::Red => "red",
            ColorTag::Amber => "amber",
            ColorTag::Green => "green",
            ColorTag::Gray => "gray",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        assert_eq!(VariantStatus::Risk.color(), ColorTag::Red);
        assert_eq!(VariantStatus::Protective.color(), ColorTag::Green);
        assert_eq!(VariantStatus::Neutral.color(), ColorTag::Gray);
    }

    #[test]
    fn test_color_tag_serde() {
        let json = serde_json::to_string(&ColorTag::Amber).unwrap();
        assert_eq!(json, "\"amber\"");
        assert_eq!(ColorTag::Amber.as_str(), "amber");
    }
}
