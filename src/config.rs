// ==============================================================================
// config.rs - Scoring Configuration
// ==============================================================================
// Description: Heuristic constants for diet fitness scoring and lab floors
// Author: Matt Barham
// Created: 2026-10-12
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// The fitness weights, desirable thresholds, penalty ranges and physiological
// floors have no cited derivation. They are carried as configuration so they
// can be tuned without touching the engine.
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::units::Analyte;

/// Errors raised while loading or validating configuration tables
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Minimum plausible lab values (mg/dL); predictions never drop below these
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabFloors {
    pub ldl: f64,
    pub hdl: f64,
    pub tg: f64,
}

impl LabFloors {
    pub fn get(&self, analyte: Analyte) -> f64 {
        match analyte {
            Analyte::Ldl => self.ldl,
            Analyte::Hdl => self.hdl,
            Analyte::Tg => self.tg,
        }
    }
}

impl Default for LabFloors {
    fn default() -> Self {
        Self {
            ldl: 30.0,
            hdl: 20.0,
            tg: 30.0,
        }
    }
}

/// Fitness scoring parameters
///
/// LDL and TG partial scores are 1.0 up to their desirable threshold and then
/// fall linearly to 0.0 over the penalty range. The HDL partial score rises
/// linearly from 0.0 to 1.0 at `hdl_cap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub ldl_weight: f64,
    pub tg_weight: f64,
    pub hdl_weight: f64,

    pub ldl_desirable: f64,
    pub ldl_penalty_range: f64,

    pub tg_desirable: f64,
    pub tg_penalty_range: f64,

    pub hdl_cap: f64,

    pub floors: LabFloors,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ldl_weight: 0.45,
            tg_weight: 0.35,
            hdl_weight: 0.20,
            ldl_desirable: 100.0,
            ldl_penalty_range: 100.0,
            tg_desirable: 100.0,
            tg_penalty_range: 200.0,
            hdl_cap: 60.0,
            floors: LabFloors::default(),
        }
    }
}

impl ScoringConfig {
    /// Load a scoring configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults, so a file containing only
    /// `{"ldl_weight": 0.5, "tg_weight": 0.3}` is valid.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path_str.clone(),
            source,
        })?;

        let config: ScoringConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| ConfigError::Json {
                path: path_str.clone(),
                source,
            })?;

        config.validate()?;
        info!("Loaded scoring configuration from {}", path_str);

        Ok(config)
    }

    /// Check weights sum to 1 and every range and floor is positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [self.ldl_weight, self.tg_weight, self.hdl_weight];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::Invalid(
                "fitness weights must be finite and non-negative".to_string(),
            ));
        }

        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(ConfigError::Invalid(format!(
                "fitness weights must sum to 1.0 (got {:.4})",
                total
            )));
        }

        let positive = [
            ("ldl_penalty_range", self.ldl_penalty_range),
            ("tg_penalty_range", self.tg_penalty_range),
            ("hdl_cap", self.hdl_cap),
            ("floors.ldl", self.floors.ldl),
            ("floors.hdl", self.floors.hdl),
            ("floors.tg", self.floors.tg),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be greater than zero (got {})",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_is_valid() {
        let config = ScoringConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ldl_weight, 0.45);
        assert_eq!(config.tg_weight, 0.35);
        assert_eq!(config.hdl_weight, 0.20);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let config = ScoringConfig {
            hdl_weight: 0.5,
            ..ScoringConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_floors_must_be_positive() {
        let config = ScoringConfig {
            floors: LabFloors {
                tg: 0.0,
                ..LabFloors::default()
            },
            ..ScoringConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"ldl_weight": 0.5, "tg_weight": 0.3, "floors": {{"ldl": 40.0}}}}"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = ScoringConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.ldl_weight, 0.5);
        assert_eq!(config.tg_weight, 0.3);
        assert_eq!(config.hdl_weight, 0.20);
        assert_eq!(config.floors.ldl, 40.0);
        assert_eq!(config.floors.hdl, 20.0);
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        file.flush().unwrap();

        match ScoringConfig::from_json_file(file.path()) {
            Err(ConfigError::Json { path, .. }) => {
                assert_eq!(path, file.path().display().to_string());
            }
            other => panic!("Expected Json error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let result = ScoringConfig::from_json_file("/nonexistent/scoring.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
