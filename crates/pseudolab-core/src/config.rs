//! Defaults, parameter checks, and the optional JSON configuration file.
//!
//! Every field of [`LabConfig`] is optional; anything left out falls back to
//! the defaults below. The CLI layers explicit flags on top of the file.
//!
//! ```json
//! {
//!   "count": 100,
//!   "confidence": 0.99,
//!   "intervals": 5,
//!   "middle_product_seeds": [4321, 8765]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::generator::{DEFAULT_COUNT, Method, MethodKind};

/// Default confidence level for all three acceptance tests.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Default number of intervals for the chi-square uniformity test.
pub const DEFAULT_INTERVALS: usize = 10;

/// Reject confidence levels outside the open interval (0, 1).
pub fn check_confidence(confidence: f64) -> Result<f64> {
    if confidence.is_finite() && confidence > 0.0 && confidence < 1.0 {
        Ok(confidence)
    } else {
        Err(Error::configuration(format!(
            "confidence must lie in (0, 1), got {confidence}"
        )))
    }
}

/// The uniformity test needs at least two intervals to have a degree of freedom.
pub fn check_intervals(intervals: usize) -> Result<usize> {
    if intervals >= 2 {
        Ok(intervals)
    } else {
        Err(Error::configuration(format!(
            "interval count must be at least 2, got {intervals}"
        )))
    }
}

/// Contents of a `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabConfig {
    pub count: Option<usize>,
    pub confidence: Option<f64>,
    pub intervals: Option<usize>,
    /// Use exact statistical quantiles instead of the classic approximations.
    pub exact_percentiles: Option<bool>,
    pub middle_square_seed: Option<i64>,
    pub middle_product_seeds: Option<(i64, i64)>,
    pub constant_multiplier_seed: Option<i64>,
    pub constant_multiplier_constant: Option<i64>,
}

impl LabConfig {
    /// Load and validate a configuration file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| {
            Error::configuration(format!(
                "failed to parse config JSON {}: {e}",
                path.display()
            ))
        })?;
        config.validate()?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(confidence) = self.confidence {
            check_confidence(confidence)?;
        }
        if let Some(intervals) = self.intervals {
            check_intervals(intervals)?;
        }
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.count.unwrap_or(DEFAULT_COUNT)
    }

    pub fn confidence(&self) -> f64 {
        self.confidence.unwrap_or(DEFAULT_CONFIDENCE)
    }

    pub fn intervals(&self) -> usize {
        self.intervals.unwrap_or(DEFAULT_INTERVALS)
    }

    pub fn exact_percentiles(&self) -> bool {
        self.exact_percentiles.unwrap_or(false)
    }

    /// Seeds for `kind`, with any values from the file replacing the defaults.
    pub fn method(&self, kind: MethodKind) -> Method {
        match Method::default_for(kind) {
            Method::MiddleSquare { seed } => Method::MiddleSquare {
                seed: self.middle_square_seed.unwrap_or(seed),
            },
            Method::MiddleProduct { seed1, seed2 } => {
                let (seed1, seed2) = self.middle_product_seeds.unwrap_or((seed1, seed2));
                Method::MiddleProduct { seed1, seed2 }
            }
            Method::ConstantMultiplier { seed, constant } => Method::ConstantMultiplier {
                seed: self.constant_multiplier_seed.unwrap_or(seed),
                constant: self.constant_multiplier_constant.unwrap_or(constant),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_check_confidence_bounds() {
        assert!(check_confidence(0.95).is_ok());
        assert!(check_confidence(0.0).is_err());
        assert!(check_confidence(1.0).is_err());
        assert!(check_confidence(-0.5).is_err());
        assert!(check_confidence(f64::NAN).is_err());
        assert!(check_confidence(f64::INFINITY).is_err());
    }

    #[test]
    fn test_check_intervals() {
        assert_eq!(check_intervals(10).unwrap(), 10);
        assert!(check_intervals(2).is_ok());
        assert!(check_intervals(1).is_err());
        assert!(check_intervals(0).is_err());
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = LabConfig::default();
        assert_eq!(config.count(), 15);
        assert_eq!(config.confidence(), 0.95);
        assert_eq!(config.intervals(), 10);
        assert!(!config.exact_percentiles());
        assert_eq!(
            config.method(MethodKind::MiddleSquare),
            Method::MiddleSquare { seed: 5115 }
        );
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let config = LabConfig {
            middle_product_seeds: Some((11, 22)),
            constant_multiplier_constant: Some(3),
            ..LabConfig::default()
        };
        assert_eq!(
            config.method(MethodKind::MiddleProduct),
            Method::MiddleProduct {
                seed1: 11,
                seed2: 22
            }
        );
        assert_eq!(
            config.method(MethodKind::ConstantMultiplier),
            Method::ConstantMultiplier {
                seed: 1234,
                constant: 3
            }
        );
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"count": 40, "confidence": 0.9, "middle_product_seeds": [4321, 8765]}}"#
        )
        .unwrap();
        let config = LabConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.count(), 40);
        assert_eq!(config.confidence(), 0.9);
        assert_eq!(config.middle_product_seeds, Some((4321, 8765)));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"confidence": 1.5}}"#).unwrap();
        assert!(matches!(
            LabConfig::load_from_path(file.path()),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"seeds": 3}}"#).unwrap();
        assert!(matches!(
            LabConfig::load_from_path(file.path()),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            LabConfig::load_from_path(&missing),
            Err(Error::Io(_))
        ));
    }
}
