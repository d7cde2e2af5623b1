//! # Checker Configuration
//!
//! Century pivots and the reference date used for expiry and plausibility
//! warnings. Loaded from YAML by the CLI; every key is optional.
//!
//! ```yaml
//! reference_date: 2026-10-19
//! birth_pivot: 27
//! expiry_pivot: 70
//! ```

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date::{sliding_birth_pivot, DEFAULT_EXPIRY_PIVOT};
use crate::error::{MrzError, Result};

/// Settings for [`Checker`](crate::checker::Checker).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerConfig {
    /// "Today" for expiry and future-birth warnings.
    pub reference_date: NaiveDate,
    /// Two-digit birth years at or above this map to 19xx. Defaults to the
    /// year after the reference year's.
    pub birth_pivot: Option<u8>,
    /// Two-digit expiry years at or above this map to 19xx.
    pub expiry_pivot: u8,
}

impl CheckerConfig {
    /// Configuration anchored at a fixed reference date.
    pub fn at(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            birth_pivot: None,
            expiry_pivot: DEFAULT_EXPIRY_PIVOT,
        }
    }

    /// Parse a YAML document. An empty document yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| MrzError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Effective birth pivot.
    pub fn birth_pivot(&self) -> u8 {
        self.birth_pivot
            .unwrap_or_else(|| sliding_birth_pivot(self.reference_date))
    }

    fn validate(&self) -> Result<()> {
        for (name, pivot) in [("birth_pivot", self.birth_pivot), ("expiry_pivot", Some(self.expiry_pivot))] {
            if let Some(p) = pivot.filter(|p| *p > 100) {
                return Err(MrzError::Config(format!("{name} must be in 0..=100, got {p}")));
            }
        }
        Ok(())
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self::at(Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_use_sliding_birth_pivot() {
        let config = CheckerConfig::at(day(2026, 10, 19));
        assert_eq!(config.birth_pivot(), 27);
        assert_eq!(config.expiry_pivot, 70);
    }

    #[test]
    fn yaml_overrides() {
        let config = CheckerConfig::from_yaml_str(
            "reference_date: 2030-01-01\nbirth_pivot: 50\nexpiry_pivot: 60\n",
        )
        .unwrap();
        assert_eq!(config.reference_date, day(2030, 1, 1));
        assert_eq!(config.birth_pivot(), 50);
        assert_eq!(config.expiry_pivot, 60);
    }

    #[test]
    fn yaml_partial_keeps_defaults() {
        let config = CheckerConfig::from_yaml_str("reference_date: 2001-05-05\n").unwrap();
        assert_eq!(config.birth_pivot(), 2);
        assert_eq!(config.expiry_pivot, 70);
    }

    #[test]
    fn empty_yaml_is_default() {
        let config = CheckerConfig::from_yaml_str("  \n").unwrap();
        assert_eq!(config.expiry_pivot, 70);
    }

    #[test]
    fn yaml_rejects_unknown_keys_and_bad_pivots() {
        assert!(matches!(
            CheckerConfig::from_yaml_str("pivot: 50\n"),
            Err(MrzError::Config(_))
        ));
        assert!(matches!(
            CheckerConfig::from_yaml_str("expiry_pivot: 101\n"),
            Err(MrzError::Config(_))
        ));
        assert!(matches!(
            CheckerConfig::from_yaml_str("reference_date: yesterday\n"),
            Err(MrzError::Config(_))
        ));
    }
}
