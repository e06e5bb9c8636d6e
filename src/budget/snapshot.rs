use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::errors::SimulationError;
use crate::horizon::{Month, PlanningHorizon};

use super::Category;

/// Planned amounts for a single month.
pub type MonthBudget = BTreeMap<Category, f64>;

/// Full month × category budget matrix.
///
/// Snapshots own all of their data, so `clone()` is a deep copy and two
/// snapshots never share mutable state. Sorted maps keep iteration (and hence
/// floating point summation order) deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetSnapshot {
    months: BTreeMap<Month, MonthBudget>,
}

/// A simulated cell that went below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegativeBudget {
    pub month: Month,
    pub category: Category,
    pub amount: f64,
}

impl BudgetSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty snapshot with one entry per horizon month.
    pub fn for_horizon(horizon: &PlanningHorizon) -> Self {
        let months = horizon
            .months()
            .iter()
            .map(|month| (month.clone(), MonthBudget::new()))
            .collect();
        Self { months }
    }

    pub fn from_months(months: BTreeMap<Month, MonthBudget>) -> Self {
        Self { months }
    }

    /// Returns a copy covering exactly the horizon: missing months become
    /// empty, months outside the horizon are an error in the data layer.
    pub fn aligned(&self, horizon: &PlanningHorizon) -> Result<Self, SimulationError> {
        if let Some(stray) = self.months.keys().find(|month| !horizon.contains(month)) {
            return Err(SimulationError::Internal(format!(
                "budget data references month `{}` outside the planning horizon",
                stray
            )));
        }
        let mut aligned = Self::for_horizon(horizon);
        for (month, budget) in &self.months {
            aligned.months.insert(month.clone(), budget.clone());
        }
        Ok(aligned)
    }

    pub fn month(&self, month: &Month) -> Option<&MonthBudget> {
        self.months.get(month)
    }

    pub(crate) fn month_mut(&mut self, month: &Month) -> Option<&mut MonthBudget> {
        self.months.get_mut(month)
    }

    pub fn contains_month(&self, month: &Month) -> bool {
        self.months.contains_key(month)
    }

    pub fn months(&self) -> impl Iterator<Item = &Month> {
        self.months.keys()
    }

    pub fn month_count(&self) -> usize {
        self.months.len()
    }

    pub fn amount(&self, month: &Month, category: &Category) -> Option<f64> {
        self.months.get(month)?.get(category).copied()
    }

    /// Sets a cell, creating the month entry when needed.
    pub fn set(&mut self, month: Month, category: Category, amount: f64) {
        self.months.entry(month).or_default().insert(category, amount);
    }

    /// Replaces a whole month.
    pub fn replace_month(&mut self, month: Month, budget: MonthBudget) {
        self.months.insert(month, budget);
    }

    pub fn month_total(&self, month: &Month) -> f64 {
        self.months
            .get(month)
            .map(|budget| budget.values().sum())
            .unwrap_or(0.0)
    }

    pub fn category_total(&self, category: &Category) -> f64 {
        self.months
            .values()
            .filter_map(|budget| budget.get(category))
            .sum()
    }

    pub fn categories(&self) -> BTreeSet<&Category> {
        self.months
            .values()
            .flat_map(|budget| budget.keys())
            .collect()
    }

    /// Every negative cell, in horizon order.
    pub fn negative_entries(&self, horizon: &PlanningHorizon) -> Vec<NegativeBudget> {
        horizon
            .months()
            .iter()
            .filter_map(|month| self.months.get(month).map(|budget| (month, budget)))
            .flat_map(|(month, budget)| {
                budget
                    .iter()
                    .filter(|(_, amount)| **amount < 0.0)
                    .map(move |(category, amount)| NegativeBudget {
                        month: month.clone(),
                        category: category.clone(),
                        amount: *amount,
                    })
            })
            .collect()
    }
}
