//! Scenario simulation: apply changes to a budget copy, diff the result, and
//! classify how risky the difference is.

pub mod advice;
pub mod applicator;
pub mod engine;
pub mod impact;
pub mod risk;

pub use advice::{advise, format_amount, ScenarioAdvice};
pub use applicator::{apply, apply_all};
pub use engine::{ComparisonEntry, ScenarioComparison, SimulationResult, Simulator};
pub use impact::{compute_impact, CategoryImpact, ImpactReport, MonthlyChange, CHANGE_EPSILON};
pub use risk::{ImpactDirection, RiskAssessment, RiskClassifier, RiskLevel, RiskThresholds};
