use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::PlannerError;
use crate::horizon::PlanningHorizon;
use crate::simulation::{RiskClassifier, RiskThresholds};
use crate::storage::json_backend::DEFAULT_RETENTION;
use crate::utils::paths::{ensure_dir, write_atomic, PathResolver};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    /// First planned month, `YYYY-MM`.
    pub planning_start: String,
    pub planning_months: u32,
    pub risk: RiskThresholds,
    pub backup_retention: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".into(),
            planning_start: "2025-08".into(),
            planning_months: 24,
            risk: RiskThresholds::default(),
            backup_retention: DEFAULT_RETENTION,
        }
    }
}

impl Config {
    /// `planning_months` consecutive calendar months from `planning_start`.
    pub fn horizon(&self) -> Result<PlanningHorizon, PlannerError> {
        let start = NaiveDate::parse_from_str(&format!("{}-01", self.planning_start), "%Y-%m-%d")
            .map_err(|_| {
                PlannerError::Config(format!(
                    "planning_start `{}` is not a YYYY-MM month",
                    self.planning_start
                ))
            })?;
        PlanningHorizon::consecutive(start, self.planning_months)
            .map_err(|err| PlannerError::Config(err.to_string()))
    }

    pub fn classifier(&self) -> Result<RiskClassifier, PlannerError> {
        let RiskThresholds { medium, high } = self.risk;
        if !medium.is_finite() || !high.is_finite() || medium < 0.0 || medium > high {
            return Err(PlannerError::Config(format!(
                "risk thresholds must satisfy 0 <= medium <= high (got {} / {})",
                medium, high
            )));
        }
        Ok(RiskClassifier::new(self.risk))
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, PlannerError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, PlannerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, PlannerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), PlannerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_horizon_spans_two_years_from_august() {
        let horizon = Config::default().horizon().expect("horizon");
        assert_eq!(horizon.len(), 24);
        assert_eq!(horizon.months()[0].as_str(), "Aug-25");
        assert_eq!(horizon.months()[23].as_str(), "Jul-27");
    }

    #[test]
    fn malformed_start_is_rejected() {
        let config = Config {
            planning_start: "August".into(),
            ..Config::default()
        };
        assert!(matches!(config.horizon(), Err(PlannerError::Config(_))));
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let config = Config {
            risk: RiskThresholds {
                medium: 100.0,
                high: 10.0,
            },
            ..Config::default()
        };
        assert!(config.classifier().is_err());
    }

    #[test]
    fn load_returns_default_when_missing_and_roundtrips() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        assert_eq!(manager.load().expect("load"), Config::default());

        let config = Config {
            currency_symbol: "$".into(),
            planning_months: 12,
            ..Config::default()
        };
        manager.save(&config).expect("save");
        assert_eq!(manager.load().expect("reload"), config);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        fs::write(manager.path(), r#"{"currency_symbol": "€"}"#).expect("write");
        let config = manager.load().expect("load");
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.planning_months, 24);
    }
}
