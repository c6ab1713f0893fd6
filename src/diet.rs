// ==============================================================================
// diet.rs - Diet Prediction & Ranking Engine
// ==============================================================================
// Description: Predicts per-diet LDL/HDL/TG from category risk, scores and
//              ranks the diet presets, and explains each prediction
// Author: Matt Barham
// Created: 2026-10-14
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Algorithm:
//   prediction = baseline(diet)
//              + sum(delta for every (diet, trigger, analyte) entry whose
//                    trigger fires)
//   then each analyte is clamped to its physiological floor.
//   Baselines are typical responses at BMI 25 with moderate activity.
//   All values are mg/dL.
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::aggregator::{CategoryProfile, RiskFlags};
use crate::config::{ConfigError, LabFloors, ScoringConfig};
use crate::phenotype::PhenotypeResult;
use crate::registry::Category;
use crate::units::Analyte;

/// Body-mass index the baselines are defined at
pub const REFERENCE_BMI: f64 = 25.0;
/// Activity level the baselines are defined at
pub const REFERENCE_ACTIVITY: &str = "moderate";

/// Diet presets, in declaration (and tie-break) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietKey {
    Ketogenic,
    Carnivore,
    ModerateLowCarb,
    HighCarb,
    Mediterranean,
}

/// Raised when a diet key string names no preset
#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown diet key '{0}' (expected one of: ketogenic, carnivore, moderate-low-carb, high-carb, mediterranean)")]
pub struct UnknownDietKey(pub String);

impl DietKey {
    pub const ALL: [DietKey; 5] = [
        DietKey::Ketogenic,
        DietKey::Carnivore,
        DietKey::ModerateLowCarb,
        DietKey::HighCarb,
        DietKey::Mediterranean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietKey::Ketogenic => "ketogenic",
            DietKey::Carnivore => "carnivore",
            DietKey::ModerateLowCarb => "moderate-low-carb",
            DietKey::HighCarb => "high-carb",
            DietKey::Mediterranean => "mediterranean",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for DietKey {
    type Err = UnknownDietKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "ketogenic" | "keto" => Ok(DietKey::Ketogenic),
            "carnivore" | "zero-carb" | "all-animal" => Ok(DietKey::Carnivore),
            "moderate-low-carb" | "low-carb" => Ok(DietKey::ModerateLowCarb),
            "high-carb" => Ok(DietKey::HighCarb),
            "mediterranean" | "med" => Ok(DietKey::Mediterranean),
            _ => Err(UnknownDietKey(s.to_string())),
        }
    }
}

impl fmt::Display for DietKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicted lab values in mg/dL
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabPrediction {
    pub ldl: f64,
    pub hdl: f64,
    pub tg: f64,
}

impl LabPrediction {
    pub const fn new(ldl: f64, hdl: f64, tg: f64) -> Self {
        Self { ldl, hdl, tg }
    }

    pub fn get(&self, analyte: Analyte) -> f64 {
        match analyte {
            Analyte::Ldl => self.ldl,
            Analyte::Hdl => self.hdl,
            Analyte::Tg => self.tg,
        }
    }

    fn adjusted(self, analyte: Analyte, delta: f64) -> Self {
        let mut next = self;
        match analyte {
            Analyte::Ldl => next.ldl += delta,
            Analyte::Hdl => next.hdl += delta,
            Analyte::Tg => next.tg += delta,
        }
        next
    }

    /// Raise any value below its floor to the floor
    pub fn clamped(self, floors: &LabFloors) -> Self {
        Self {
            ldl: self.ldl.max(floors.ldl),
            hdl: self.hdl.max(floors.hdl),
            tg: self.tg.max(floors.tg),
        }
    }
}

/// Static description of a diet preset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DietProfile {
    pub key: DietKey,
    pub label: &'static str,
    pub macros: &'static str,
    /// Typical response at [`REFERENCE_BMI`] and [`REFERENCE_ACTIVITY`]
    pub baseline: LabPrediction,
}

fn builtin_profiles() -> Vec<DietProfile> {
    vec![
        DietProfile {
            key: DietKey::Ketogenic,
            label: "Ketogenic (very low carb)",
            macros: "~5% carbohydrate / 70-75% fat / 20-25% protein",
            baseline: LabPrediction::new(145.0, 62.0, 80.0),
        },
        DietProfile {
            key: DietKey::Carnivore,
            label: "Carnivore (all-animal, zero carb)",
            macros: "~0% carbohydrate / 60-70% fat / 30-40% protein",
            baseline: LabPrediction::new(165.0, 65.0, 75.0),
        },
        DietProfile {
            key: DietKey::ModerateLowCarb,
            label: "Moderate low carb",
            macros: "~25% carbohydrate / 45% fat / 30% protein",
            baseline: LabPrediction::new(120.0, 56.0, 100.0),
        },
        DietProfile {
            key: DietKey::HighCarb,
            label: "High carb, low fat",
            macros: "~60% carbohydrate / 20% fat / 20% protein",
            baseline: LabPrediction::new(105.0, 48.0, 150.0),
        },
        DietProfile {
            key: DietKey::Mediterranean,
            label: "Mediterranean pattern",
            macros: "~45% carbohydrate / 35-40% fat (mostly monounsaturated) / 20% protein",
            baseline: LabPrediction::new(110.0, 55.0, 115.0),
        },
    ]
}

/// Condition that activates an adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    CategoryRisk(Category),
    HyperAbsorber,
}

impl Trigger {
    pub fn label(&self) -> String {
        match self {
            Trigger::CategoryRisk(category) => format!("{} risk", category),
            Trigger::HyperAbsorber => "Hyper-absorber".to_string(),
        }
    }
}

/// One sparse-table entry: fixed additive delta on one analyte
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub diet: DietKey,
    pub trigger: Trigger,
    pub analyte: Analyte,
    /// mg/dL, added when the trigger fires
    pub delta: f64,
    pub rationale: &'static str,
}

impl Adjustment {
    /// Whether the delta moves the analyte in the healthier direction
    pub fn is_favorable(&self) -> bool {
        if self.analyte.lower_is_better() {
            self.delta < 0.0
        } else {
            self.delta > 0.0
        }
    }
}

fn builtin_adjustments() -> Vec<Adjustment> {
    use Analyte::*;
    use Category::*;
    use DietKey::*;

    let ldl_risk = Trigger::CategoryRisk(LdlClearance);
    let tg_risk = Trigger::CategoryRisk(Triglyceride);
    let insulin_risk = Trigger::CategoryRisk(InsulinSensitivity);
    let lipogenesis_risk = Trigger::CategoryRisk(HepaticLipogenesis);
    let hyper = Trigger::HyperAbsorber;

    let adj = |diet, trigger, analyte, delta, rationale| Adjustment {
        diet,
        trigger,
        analyte,
        delta,
        rationale,
    };

    vec![
        // Ketogenic
        adj(Ketogenic, ldl_risk, Ldl, 30.0,
            "High saturated-fat intake meets reduced LDL-receptor clearance"),
        adj(Ketogenic, tg_risk, Tg, -20.0,
            "Carbohydrate restriction suppresses VLDL triglyceride output"),
        adj(Ketogenic, insulin_risk, Tg, -15.0,
            "Very low glycemic load offsets impaired insulin sensitivity"),
        adj(Ketogenic, insulin_risk, Hdl, 4.0,
            "Lower insulin exposure favors HDL production"),
        adj(Ketogenic, lipogenesis_risk, Tg, -10.0,
            "Minimal sugar intake starves hepatic de novo lipogenesis"),
        adj(Ketogenic, hyper, Ldl, 25.0,
            "High dietary cholesterol intake with elevated intestinal absorption"),
        // Carnivore
        adj(Carnivore, ldl_risk, Ldl, 40.0,
            "Animal-fat-only intake maximizes saturated fat against limited clearance"),
        adj(Carnivore, tg_risk, Tg, -15.0,
            "Absent carbohydrate lowers VLDL triglyceride output"),
        adj(Carnivore, insulin_risk, Tg, -10.0,
            "Near-zero glycemic load offsets impaired insulin sensitivity"),
        adj(Carnivore, lipogenesis_risk, Tg, -5.0,
            "No dietary sugar reaches hepatic lipogenesis"),
        adj(Carnivore, hyper, Ldl, 35.0,
            "Very high dietary cholesterol intake with elevated intestinal absorption"),
        // Moderate low carb
        adj(ModerateLowCarb, ldl_risk, Ldl, 12.0,
            "Increased fat share modestly raises LDL under limited clearance"),
        adj(ModerateLowCarb, tg_risk, Tg, -10.0,
            "Reduced carbohydrate lowers triglyceride synthesis"),
        adj(ModerateLowCarb, insulin_risk, Tg, -8.0,
            "Lower glycemic load eases insulin demand"),
        adj(ModerateLowCarb, lipogenesis_risk, Tg, -5.0,
            "Less sugar reaches hepatic lipogenesis"),
        adj(ModerateLowCarb, hyper, Ldl, 10.0,
            "Moderate dietary cholesterol intake with elevated absorption"),
        // High carb
        adj(HighCarb, ldl_risk, Ldl, -8.0,
            "Low saturated-fat intake spares limited LDL-receptor capacity"),
        adj(HighCarb, tg_risk, Tg, 45.0,
            "Carbohydrate load drives VLDL triglyceride overproduction"),
        adj(HighCarb, insulin_risk, Tg, 30.0,
            "High glycemic load amplifies hyperinsulinemia and triglyceride synthesis"),
        adj(HighCarb, insulin_risk, Hdl, -5.0,
            "Insulin resistance under high carbohydrate intake lowers HDL"),
        adj(HighCarb, lipogenesis_risk, Tg, 35.0,
            "Carbohydrate surplus is converted to fat in the liver"),
        // Mediterranean
        adj(Mediterranean, ldl_risk, Ldl, -15.0,
            "Unsaturated fats and soluble fiber up-regulate LDL-receptor activity"),
        adj(Mediterranean, tg_risk, Tg, 10.0,
            "Moderate carbohydrate intake still raises triglycerides somewhat"),
        adj(Mediterranean, insulin_risk, Tg, 5.0,
            "Whole-grain carbohydrate has a small triglyceride cost with insulin resistance"),
        adj(Mediterranean, lipogenesis_risk, Tg, -5.0,
            "Olive oil and omega-3 intake reduce liver fat"),
    ]
}

/// Practical advice keyed by trigger; an empty diet list applies to every diet
struct Tip {
    diets: &'static [DietKey],
    trigger: Trigger,
    text: &'static str,
}

const HIGH_FAT_DIETS: &[DietKey] = &[DietKey::Ketogenic, DietKey::Carnivore, DietKey::ModerateLowCarb];
const HIGHER_CARB_DIETS: &[DietKey] = &[DietKey::HighCarb, DietKey::Mediterranean];

const TIPS: &[Tip] = &[
    Tip {
        diets: HIGH_FAT_DIETS,
        trigger: Trigger::CategoryRisk(Category::LdlClearance),
        text: "Favor monounsaturated fats (olive oil, avocado, nuts) over butter, cream and fatty red meat.",
    },
    Tip {
        diets: &[],
        trigger: Trigger::CategoryRisk(Category::LdlClearance),
        text: "Recheck a fasting lipid panel 8-12 weeks after changing diet to confirm the LDL response.",
    },
    Tip {
        diets: HIGHER_CARB_DIETS,
        trigger: Trigger::CategoryRisk(Category::Triglyceride),
        text: "Choose whole-grain, high-fiber carbohydrate sources and keep refined starch low.",
    },
    Tip {
        diets: &[],
        trigger: Trigger::CategoryRisk(Category::Triglyceride),
        text: "Limit alcohol and added fructose; both raise triglycerides disproportionately.",
    },
    Tip {
        diets: &[],
        trigger: Trigger::CategoryRisk(Category::InsulinSensitivity),
        text: "Pair carbohydrate with protein and fiber; a short walk after meals blunts glucose spikes.",
    },
    Tip {
        diets: &[],
        trigger: Trigger::CategoryRisk(Category::HepaticLipogenesis),
        text: "Avoid sugar-sweetened beverages; fructose is the strongest dietary driver of liver fat.",
    },
    Tip {
        diets: HIGH_FAT_DIETS,
        trigger: Trigger::HyperAbsorber,
        text: "Limit egg yolks, organ meats and shellfish; cholesterol absorption is likely elevated.",
    },
    Tip {
        diets: &[],
        trigger: Trigger::HyperAbsorber,
        text: "Plant sterols and soluble fiber (oats, psyllium) reduce intestinal cholesterol absorption.",
    },
];

/// The booleans every prediction and explanation is driven by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskContext {
    pub flags: RiskFlags,
    pub hyper_absorber: bool,
}

impl RiskContext {
    pub fn new(flags: RiskFlags, hyper_absorber: bool) -> Self {
        Self {
            flags,
            hyper_absorber,
        }
    }

    pub fn from_results(profile: &CategoryProfile, phenotype: &PhenotypeResult) -> Self {
        Self::new(profile.risk_flags(), phenotype.is_hyper_absorber())
    }

    pub fn fires(&self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::CategoryRisk(category) => self.flags.is_set(category),
            Trigger::HyperAbsorber => self.hyper_absorber,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDiet {
    pub diet: DietKey,
    pub label: &'static str,
    pub score: f64,
    pub prediction: LabPrediction,
}

/// All presets ordered by fitness score, best first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DietRanking {
    pub entries: Vec<RankedDiet>,
}

impl DietRanking {
    pub fn best(&self) -> Option<&RankedDiet> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedDiet> {
        self.entries.iter()
    }

    pub fn get(&self, diet: DietKey) -> Option<&RankedDiet> {
        self.entries.iter().find(|e| e.diet == diet)
    }
}

/// Benefits, cautions and tips for one diet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DietExplanation {
    pub diet: DietKey,
    pub benefits: Vec<String>,
    pub cautions: Vec<String>,
    pub tips: Vec<String>,
}

/// Prediction and ranking engine over injected presets and scoring config
#[derive(Debug, Clone)]
pub struct DietEngine {
    profiles: Vec<DietProfile>,
    adjustments: Vec<Adjustment>,
    scoring: ScoringConfig,
}

impl Default for DietEngine {
    fn default() -> Self {
        Self::from_parts(ScoringConfig::default())
    }
}

impl DietEngine {
    /// Engine over the built-in presets; `scoring` is validated first
    pub fn new(scoring: ScoringConfig) -> Result<Self, ConfigError> {
        scoring.validate()?;
        Ok(Self::from_parts(scoring))
    }

    fn from_parts(scoring: ScoringConfig) -> Self {
        let profiles = builtin_profiles();
        debug_assert!(profiles.iter().map(|p| p.key).eq(DietKey::ALL));

        Self {
            profiles,
            adjustments: builtin_adjustments(),
            scoring,
        }
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    pub fn profiles(&self) -> &[DietProfile] {
        &self.profiles
    }

    pub fn profile(&self, diet: DietKey) -> &DietProfile {
        &self.profiles[diet.index()]
    }

    pub fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }

    /// Adjustment entries for `diet` whose trigger fires under `context`
    pub fn active_adjustments<'e>(
        &'e self,
        diet: DietKey,
        context: &'e RiskContext,
    ) -> impl Iterator<Item = &'e Adjustment> + 'e {
        self.adjustments
            .iter()
            .filter(move |a| a.diet == diet && context.fires(a.trigger))
    }

    /// Baseline plus every firing adjustment, floor-clamped
    pub fn predict_labs(&self, diet: DietKey, context: &RiskContext) -> LabPrediction {
        self.unclamped_labs(diet, context).clamped(&self.scoring.floors)
    }

    fn unclamped_labs(&self, diet: DietKey, context: &RiskContext) -> LabPrediction {
        self.active_adjustments(diet, context)
            .fold(self.profile(diet).baseline, |prediction, a| {
                prediction.adjusted(a.analyte, a.delta)
            })
    }

    /// Weighted composite fitness in [0, 1]
    pub fn score(&self, prediction: &LabPrediction) -> f64 {
        let s = &self.scoring;
        let ldl = declining_partial(prediction.ldl, s.ldl_desirable, s.ldl_penalty_range);
        let tg = declining_partial(prediction.tg, s.tg_desirable, s.tg_penalty_range);
        let hdl = (prediction.hdl / s.hdl_cap).clamp(0.0, 1.0);

        (s.ldl_weight * ldl + s.tg_weight * tg + s.hdl_weight * hdl).clamp(0.0, 1.0)
    }

    /// Score every preset and sort descending; ties keep declaration order
    pub fn rank(&self, context: &RiskContext) -> DietRanking {
        let mut entries: Vec<RankedDiet> = DietKey::ALL
            .into_iter()
            .map(|diet| {
                let prediction = self.predict_labs(diet, context);
                RankedDiet {
                    diet,
                    label: self.profile(diet).label,
                    score: self.score(&prediction),
                    prediction,
                }
            })
            .collect();

        // sort_by is stable
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));

        DietRanking { entries }
    }

    /// Explanation built from the same adjustment entries as the prediction
    pub fn explain(&self, diet: DietKey, context: &RiskContext) -> DietExplanation {
        let mut benefits = Vec::new();
        let mut cautions = Vec::new();
        let unclamped = self.unclamped_labs(diet, context);

        for adjustment in self.active_adjustments(diet, context) {
            let floor = self.scoring.floors.get(adjustment.analyte);
            let mut line = format!(
                "{}: {} (predicted {} {:+.0} mg/dL",
                adjustment.trigger.label(),
                adjustment.rationale,
                adjustment.analyte,
                adjustment.delta
            );
            if unclamped.get(adjustment.analyte) < floor {
                line.push_str(&format!(", limited by the {:.0} mg/dL floor", floor));
            }
            line.push(')');
            if adjustment.is_favorable() {
                benefits.push(line);
            } else {
                cautions.push(line);
            }
        }

        let mut tips: Vec<String> = TIPS
            .iter()
            .filter(|tip| tip.diets.is_empty() || tip.diets.contains(&diet))
            .filter(|tip| context.fires(tip.trigger))
            .map(|tip| tip.text.to_string())
            .collect();

        if benefits.is_empty() && cautions.is_empty() {
            tips.push(format!(
                "No genetic adjustments apply to the {} diet; predictions equal its baseline.",
                self.profile(diet).label
            ));
        }

        DietExplanation {
            diet,
            benefits,
            cautions,
            tips,
        }
    }
}

/// 1.0 up to `threshold`, then linear down to 0.0 at `threshold + range`
fn declining_partial(value: f64, threshold: f64, range: f64) -> f64 {
    if value <= threshold {
        1.0
    } else {
        (1.0 - (value - threshold) / range).max(0.0)
    }
}
