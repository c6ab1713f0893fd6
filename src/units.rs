// ==============================================================================
// units.rs - Display Units and Clinical Bands
// ==============================================================================
// Description: mg/dL <-> mmol/L conversion and desirable/borderline/high bands
// Author: Matt Barham
// Created: 2026-10-14
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Predictions are computed in mg/dL. Conversion happens only at output.
//   Cholesterol (LDL, HDL): mmol/L = mg/dL / 38.67
//   Triglycerides:          mmol/L = mg/dL / 88.57
// Bands (mg/dL, NCEP ATP III):
//   LDL  desirable < 100, borderline 100-159, high >= 160
//   HDL  desirable >= 60, borderline 40-59,   high risk < 40
//   TG   desirable < 150, borderline 150-199, high >= 200
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const CHOLESTEROL_MG_DL_PER_MMOL_L: f64 = 38.67;
pub const TRIGLYCERIDE_MG_DL_PER_MMOL_L: f64 = 88.57;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Analyte {
    Ldl,
    Hdl,
    Tg,
}

impl Analyte {
    pub const ALL: [Analyte; 3] = [Analyte::Ldl, Analyte::Hdl, Analyte::Tg];

    pub fn as_str(&self) -> &'static str {
        match self {
            Analyte::Ldl => "LDL",
            Analyte::Hdl => "HDL",
            Analyte::Tg => "TG",
        }
    }

    /// mg/dL per mmol/L for this analyte
    pub fn conversion_factor(&self) -> f64 {
        match self {
            Analyte::Ldl | Analyte::Hdl => CHOLESTEROL_MG_DL_PER_MMOL_L,
            Analyte::Tg => TRIGLYCERIDE_MG_DL_PER_MMOL_L,
        }
    }

    /// Whether a lower value is the healthier direction
    pub fn lower_is_better(&self) -> bool {
        !matches!(self, Analyte::Hdl)
    }
}

impl fmt::Display for Analyte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayUnit {
    #[default]
    #[serde(rename = "mg/dL")]
    MgDl,
    #[serde(rename = "mmol/L")]
    MmolL,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown display unit '{0}' (expected mg-dl or mmol-l)")]
pub struct UnknownDisplayUnit(pub String);

impl DisplayUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayUnit::MgDl => "mg/dL",
            DisplayUnit::MmolL => "mmol/L",
        }
    }

    /// Convert a canonical mg/dL value into this unit
    pub fn from_mg_dl(&self, analyte: Analyte, mg_dl: f64) -> f64 {
        match self {
            DisplayUnit::MgDl => mg_dl,
            DisplayUnit::MmolL => mg_dl / analyte.conversion_factor(),
        }
    }

    /// Convert a value in this unit back to mg/dL
    pub fn to_mg_dl(&self, analyte: Analyte, value: f64) -> f64 {
        match self {
            DisplayUnit::MgDl => value,
            DisplayUnit::MmolL => value * analyte.conversion_factor(),
        }
    }

    /// Format a canonical mg/dL value for display in this unit
    pub fn format(&self, analyte: Analyte, mg_dl: f64) -> String {
        match self {
            DisplayUnit::MgDl => format!("{:.0} {}", mg_dl, self.as_str()),
            DisplayUnit::MmolL => format!("{:.2} {}", self.from_mg_dl(analyte, mg_dl), self.as_str()),
        }
    }
}

impl FromStr for DisplayUnit {
    type Err = UnknownDisplayUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['/', '_'], "-").as_str() {
            "mg-dl" | "mgdl" => Ok(DisplayUnit::MgDl),
            "mmol-l" | "mmoll" | "mmol" => Ok(DisplayUnit::MmolL),
            _ => Err(UnknownDisplayUnit(s.to_string())),
        }
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-way clinical classification; `High` means high risk for every analyte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClinicalBand {
    Desirable,
    Borderline,
    High,
}

impl ClinicalBand {
    /// Classify a canonical mg/dL value
    pub fn classify(analyte: Analyte, mg_dl: f64) -> Self {
        match analyte {
            Analyte::Ldl => {
                if mg_dl < 100.0 {
                    ClinicalBand::Desirable
                } else if mg_dl < 160.0 {
                    ClinicalBand::Borderline
                } else {
                    ClinicalBand::High
                }
            }
            Analyte::Hdl => {
                if mg_dl >= 60.0 {
                    ClinicalBand::Desirable
                } else if mg_dl >= 40.0 {
                    ClinicalBand::Borderline
                } else {
                    ClinicalBand::High
                }
            }
            Analyte::Tg => {
                if mg_dl < 150.0 {
                    ClinicalBand::Desirable
                } else if mg_dl < 200.0 {
                    ClinicalBand::Borderline
                } else {
                    ClinicalBand::High
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClinicalBand::Desirable => "desirable",
            ClinicalBand::Borderline => "borderline",
            ClinicalBand::High => "high risk",
        }
    }
}

impl fmt::Display for ClinicalBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
