pub mod json_backend;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::budget::{BudgetSnapshot, BudgetStore};
use crate::scenario::{Scenario, ScenarioStore};

pub use json_backend::JsonStorage;

pub type Result<T> = std::result::Result<T, crate::errors::PlannerError>;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataMetadata {
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl Default for DataMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            last_modified: now,
        }
    }
}

/// Everything the planner persists: the live budget matrix and the saved
/// scenarios. Serves as both the budget store and the scenario store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerData {
    #[serde(default = "default_schema_version")]
    pub schema_version: u8,
    #[serde(default)]
    pub budgets: BudgetSnapshot,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    #[serde(default)]
    pub metadata: DataMetadata,
}

fn default_schema_version() -> u8 {
    CURRENT_SCHEMA_VERSION
}

impl Default for PlannerData {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            budgets: BudgetSnapshot::default(),
            scenarios: Vec::new(),
            metadata: DataMetadata::default(),
        }
    }
}

impl PlannerData {
    pub fn touch(&mut self) {
        self.metadata.last_modified = Utc::now();
    }

    pub fn scenario_mut(&mut self, id: Uuid) -> Option<&mut Scenario> {
        self.scenarios.iter_mut().find(|scenario| scenario.id == id)
    }
}

impl BudgetStore for PlannerData {
    fn full_snapshot(&self) -> BudgetSnapshot {
        self.budgets.clone()
    }
}

impl ScenarioStore for PlannerData {
    fn scenario(&self, id: Uuid) -> Option<Scenario> {
        self.scenarios
            .iter()
            .find(|scenario| scenario.id == id)
            .cloned()
    }

    fn scenarios(&self) -> Vec<Scenario> {
        self.scenarios.clone()
    }

    fn insert_scenario(&mut self, scenario: Scenario) -> Uuid {
        let id = scenario.id;
        match self.scenario_mut(id) {
            Some(existing) => *existing = scenario,
            None => self.scenarios.push(scenario),
        }
        self.touch();
        id
    }

    fn remove_scenario(&mut self, id: Uuid) -> Option<Scenario> {
        let position = self.scenarios.iter().position(|scenario| scenario.id == id)?;
        self.touch();
        Some(self.scenarios.remove(position))
    }
}
