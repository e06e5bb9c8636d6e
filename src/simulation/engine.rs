use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::budget::{BudgetSnapshot, BudgetStore, NegativeBudget};
use crate::errors::{SimulationError, ValidationError};
use crate::horizon::PlanningHorizon;
use crate::scenario::{Scenario, ScenarioStore};

use super::advice::{advise, ScenarioAdvice};
use super::applicator;
use super::impact::{compute_impact, ImpactReport};
use super::risk::{RiskClassifier, RiskLevel};

const DEFAULT_CURRENCY: &str = "₹";
const MIN_COMPARED_SCENARIOS: usize = 2;

/// Outcome of one simulation run. Plain data, safe to export as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub scenario: Scenario,
    pub impact: ImpactReport,
    pub advice: ScenarioAdvice,
    /// Simulated cells that went below zero; a warning, not an error.
    pub negative_budgets: Vec<NegativeBudget>,
    pub original_snapshot: BudgetSnapshot,
    pub simulated_snapshot: BudgetSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub scenario_id: Uuid,
    pub name: String,
    pub total_impact: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub entries: Vec<ComparisonEntry>,
    /// Scenario with the lowest total impact.
    pub recommended: Option<Uuid>,
}

impl ScenarioComparison {
    pub fn recommended_entry(&self) -> Option<&ComparisonEntry> {
        let id = self.recommended?;
        self.entries.iter().find(|entry| entry.scenario_id == id)
    }
}

/// Runs scenarios against the current budget without touching it.
pub struct Simulator<'a> {
    budgets: &'a dyn BudgetStore,
    scenarios: &'a dyn ScenarioStore,
    horizon: &'a PlanningHorizon,
    classifier: RiskClassifier,
    currency: String,
}

impl<'a> Simulator<'a> {
    pub fn new(
        budgets: &'a dyn BudgetStore,
        scenarios: &'a dyn ScenarioStore,
        horizon: &'a PlanningHorizon,
    ) -> Self {
        Self {
            budgets,
            scenarios,
            horizon,
            classifier: RiskClassifier::default(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn with_classifier(mut self, classifier: RiskClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn horizon(&self) -> &PlanningHorizon {
        self.horizon
    }

    /// Looks up a stored scenario and simulates it.
    pub fn simulate(&self, scenario_id: Uuid) -> Result<SimulationResult, SimulationError> {
        let scenario = self
            .scenarios
            .scenario(scenario_id)
            .ok_or_else(|| SimulationError::NotFound(format!("scenario {}", scenario_id)))?;
        self.run(scenario)
    }

    /// Simulates a scenario that has not been stored (yet).
    pub fn preview(&self, scenario: &Scenario) -> Result<SimulationResult, SimulationError> {
        self.run(scenario.clone())
    }

    fn run(&self, scenario: Scenario) -> Result<SimulationResult, SimulationError> {
        scenario.validate(self.horizon)?;

        let result = self.project(scenario);
        if let Err(SimulationError::Internal(message)) = &result {
            error!(%message, "simulation aborted by inconsistent budget data");
        }
        result
    }

    fn project(&self, scenario: Scenario) -> Result<SimulationResult, SimulationError> {
        let original = self.budgets.full_snapshot().aligned(self.horizon)?;

        let mut simulated = original.clone();
        for (position, change) in scenario.changes.iter().enumerate() {
            debug!(
                scenario = %scenario.id,
                position = position + 1,
                change = %change.summary(),
                "applying change"
            );
            simulated = applicator::apply(&simulated, change, self.horizon)?;
        }

        let impact = compute_impact(self.horizon, &original, &simulated, &self.classifier)?;
        let advice = advise(&impact, &self.currency);
        let negative_budgets = simulated.negative_entries(self.horizon);

        info!(
            scenario = %scenario.id,
            name = %scenario.name,
            total_impact = impact.total_impact,
            affected_months = impact.affected_months,
            risk = %impact.risk_level,
            "scenario simulated"
        );

        Ok(SimulationResult {
            scenario,
            impact,
            advice,
            negative_budgets,
            original_snapshot: original,
            simulated_snapshot: simulated,
        })
    }

    /// Simulates each scenario and ranks them by total impact.
    pub fn compare(&self, scenario_ids: &[Uuid]) -> Result<ScenarioComparison, SimulationError> {
        if scenario_ids.len() < MIN_COMPARED_SCENARIOS {
            return Err(ValidationError::TooFewScenarios {
                required: MIN_COMPARED_SCENARIOS,
                found: scenario_ids.len(),
            }
            .into());
        }
        let mut entries = Vec::with_capacity(scenario_ids.len());
        for id in scenario_ids {
            let result = self.simulate(*id)?;
            entries.push(ComparisonEntry {
                scenario_id: result.scenario.id,
                name: result.scenario.name,
                total_impact: result.impact.total_impact,
                risk_level: result.impact.risk_level,
            });
        }
        let recommended = entries
            .iter()
            .fold(None::<&ComparisonEntry>, |best, entry| match best {
                Some(current) if current.total_impact <= entry.total_impact => Some(current),
                _ => Some(entry),
            })
            .map(|entry| entry.scenario_id);
        Ok(ScenarioComparison {
            entries,
            recommended,
        })
    }
}
