use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse bucket for the magnitude of a scenario's net impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(label)
    }
}

/// Sign of the net impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactDirection {
    Increase,
    Decrease,
    Neutral,
}

impl ImpactDirection {
    pub fn of(total_impact: f64) -> Self {
        if total_impact > 0.0 {
            ImpactDirection::Increase
        } else if total_impact < 0.0 {
            ImpactDirection::Decrease
        } else {
            ImpactDirection::Neutral
        }
    }
}

/// Absolute-impact boundaries, in currency units. `medium` and `high` are the
/// lowest magnitudes classified at that level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub medium: f64,
    pub high: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium: 10_000.0,
            high: 50_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiskClassifier {
    thresholds: RiskThresholds,
}

impl RiskClassifier {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> RiskThresholds {
        self.thresholds
    }

    pub fn classify(&self, total_impact: f64) -> RiskAssessment {
        let magnitude = total_impact.abs();
        let (risk_level, recommendation) = if magnitude < self.thresholds.medium {
            (
                RiskLevel::Low,
                "Low impact scenario — manageable changes.",
            )
        } else if magnitude < self.thresholds.high {
            (
                RiskLevel::Medium,
                "Moderate impact — review budget allocations.",
            )
        } else {
            (
                RiskLevel::High,
                "High impact scenario — significant budget review required.",
            )
        };
        RiskAssessment {
            risk_level,
            recommendation: recommendation.to_string(),
        }
    }
}
