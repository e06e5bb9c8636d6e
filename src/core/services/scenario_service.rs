use tracing::info;
use uuid::Uuid;

use crate::horizon::PlanningHorizon;
use crate::scenario::{Change, Scenario, ScenarioStore};
use crate::storage::PlannerData;

use super::{ServiceError, ServiceResult};

const COPY_SUFFIX: &str = " (Copy)";

/// CRUD over saved what-if scenarios.
pub struct ScenarioService;

impl ScenarioService {
    /// Validates and stores a new scenario.
    pub fn create(
        data: &mut PlannerData,
        horizon: &PlanningHorizon,
        name: &str,
        description: &str,
        changes: Vec<Change>,
    ) -> ServiceResult<Uuid> {
        let scenario = Scenario::new(name.trim(), description.trim(), changes);
        scenario.validate(horizon)?;
        let id = data.insert_scenario(scenario);
        info!(scenario = %id, name = %name.trim(), "scenario created");
        Ok(id)
    }

    pub fn update(
        data: &mut PlannerData,
        horizon: &PlanningHorizon,
        id: Uuid,
        name: &str,
        description: &str,
        changes: Vec<Change>,
    ) -> ServiceResult<()> {
        let existing = Self::get(data, id)?;
        let candidate = Scenario {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            changes,
            ..existing
        };
        candidate.validate(horizon)?;
        data.insert_scenario(candidate);
        info!(scenario = %id, "scenario updated");
        Ok(())
    }

    /// Stores a copy under a fresh id with ` (Copy)` appended to the name.
    pub fn duplicate(data: &mut PlannerData, id: Uuid) -> ServiceResult<Uuid> {
        let original = Self::get(data, id)?;
        let copy = Scenario::new(
            format!("{}{}", original.name, COPY_SUFFIX),
            original.description,
            original.changes,
        );
        let copy_id = data.insert_scenario(copy);
        info!(source = %id, scenario = %copy_id, "scenario duplicated");
        Ok(copy_id)
    }

    pub fn delete(data: &mut PlannerData, id: Uuid) -> ServiceResult<Scenario> {
        let removed = data
            .remove_scenario(id)
            .ok_or_else(|| ServiceError::NotFound(format!("scenario {}", id)))?;
        info!(scenario = %id, name = %removed.name, "scenario deleted");
        Ok(removed)
    }

    pub fn list(data: &PlannerData) -> Vec<&Scenario> {
        data.scenarios.iter().collect()
    }

    pub fn get(data: &PlannerData, id: Uuid) -> ServiceResult<Scenario> {
        data.scenario(id)
            .ok_or_else(|| ServiceError::NotFound(format!("scenario {}", id)))
    }

    /// Resolves a scenario by id, id prefix, or case-insensitive name.
    pub fn find<'a>(data: &'a PlannerData, key: &str) -> ServiceResult<&'a Scenario> {
        let needle = key.trim();
        if let Ok(id) = Uuid::parse_str(needle) {
            if let Some(scenario) = data.scenarios.iter().find(|scenario| scenario.id == id) {
                return Ok(scenario);
            }
        }
        if let Some(scenario) = data
            .scenarios
            .iter()
            .find(|scenario| scenario.name.eq_ignore_ascii_case(needle))
        {
            return Ok(scenario);
        }
        let lowered = needle.to_ascii_lowercase();
        let by_prefix: Vec<&Scenario> = if lowered.is_empty() {
            Vec::new()
        } else {
            data.scenarios
                .iter()
                .filter(|scenario| scenario.id.to_string().starts_with(&lowered))
                .collect()
        };
        match by_prefix.as_slice() {
            [single] => Ok(*single),
            [] => Err(ServiceError::NotFound(format!("scenario `{}`", needle))),
            _ => Err(ServiceError::Invalid(format!(
                "`{}` matches more than one scenario",
                needle
            ))),
        }
    }

    /// Removes every saved scenario; returns how many were dropped.
    pub fn clear(data: &mut PlannerData) -> usize {
        let count = data.scenarios.len();
        data.scenarios.clear();
        data.touch();
        info!(count, "scenarios cleared");
        count
    }
}
