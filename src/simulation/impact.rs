//! Diffing an original and a simulated snapshot into an [`ImpactReport`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::budget::{BudgetSnapshot, Category};
use crate::errors::SimulationError;
use crate::horizon::{Month, PlanningHorizon};

use super::risk::{ImpactDirection, RiskClassifier, RiskLevel};

/// Deltas smaller than this are float residue, not a change.
pub const CHANGE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyChange {
    pub month: Month,
    pub original_total: f64,
    pub simulated_total: f64,
    pub change: f64,
    pub change_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryImpact {
    pub original_total: f64,
    pub simulated_total: f64,
    pub change: f64,
}

/// Structured difference between two snapshots plus its risk classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    /// Changed months only, in horizon order.
    pub monthly_changes: Vec<MonthlyChange>,
    /// Changed categories only, aggregated across the horizon.
    pub category_impact: BTreeMap<Category, CategoryImpact>,
    pub total_impact: f64,
    pub affected_months: usize,
    pub impact_type: ImpactDirection,
    pub risk_level: RiskLevel,
    pub recommendation: String,
}

impl ImpactReport {
    pub fn month(&self, month: &Month) -> Option<&MonthlyChange> {
        self.monthly_changes.iter().find(|entry| &entry.month == month)
    }

    pub fn category(&self, category: &Category) -> Option<&CategoryImpact> {
        self.category_impact.get(category)
    }

    /// Sum of per-category changes; agrees with `total_impact` up to float
    /// tolerance.
    pub fn category_change_total(&self) -> f64 {
        self.category_impact.values().map(|impact| impact.change).sum()
    }

    pub fn is_noop(&self) -> bool {
        self.monthly_changes.is_empty() && self.category_impact.is_empty()
    }
}

/// Computes the impact of `simulated` relative to `original` over the whole
/// horizon. Both snapshots must cover exactly the horizon's months.
pub fn compute_impact(
    horizon: &PlanningHorizon,
    original: &BudgetSnapshot,
    simulated: &BudgetSnapshot,
    classifier: &RiskClassifier,
) -> Result<ImpactReport, SimulationError> {
    ensure_covers(horizon, original, "original")?;
    ensure_covers(horizon, simulated, "simulated")?;

    let monthly_changes: Vec<MonthlyChange> = horizon
        .months()
        .iter()
        .filter_map(|month| {
            let original_total = original.month_total(month);
            let simulated_total = simulated.month_total(month);
            let change = simulated_total - original_total;
            if change.abs() <= CHANGE_EPSILON {
                return None;
            }
            let change_percent = if original_total.abs() > CHANGE_EPSILON {
                change / original_total * 100.0
            } else {
                0.0
            };
            Some(MonthlyChange {
                month: month.clone(),
                original_total,
                simulated_total,
                change,
                change_percent,
            })
        })
        .collect();

    let mut categories = original.categories();
    categories.extend(simulated.categories());
    let category_impact: BTreeMap<Category, CategoryImpact> = categories
        .into_iter()
        .filter_map(|category| {
            let original_total = original.category_total(category);
            let simulated_total = simulated.category_total(category);
            let change = simulated_total - original_total;
            (change.abs() > CHANGE_EPSILON).then(|| {
                (
                    category.clone(),
                    CategoryImpact {
                        original_total,
                        simulated_total,
                        change,
                    },
                )
            })
        })
        .collect();

    let total_impact: f64 = monthly_changes.iter().map(|entry| entry.change).sum();
    let assessment = classifier.classify(total_impact);

    Ok(ImpactReport {
        affected_months: monthly_changes.len(),
        monthly_changes,
        category_impact,
        total_impact,
        impact_type: ImpactDirection::of(total_impact),
        risk_level: assessment.risk_level,
        recommendation: assessment.recommendation,
    })
}

fn ensure_covers(
    horizon: &PlanningHorizon,
    snapshot: &BudgetSnapshot,
    label: &str,
) -> Result<(), SimulationError> {
    if let Some(missing) = horizon
        .months()
        .iter()
        .find(|month| !snapshot.contains_month(month))
    {
        return Err(SimulationError::Internal(format!(
            "{} snapshot is missing month `{}`",
            label, missing
        )));
    }
    if snapshot.month_count() != horizon.len() {
        return Err(SimulationError::Internal(format!(
            "{} snapshot covers {} months but the horizon has {}",
            label,
            snapshot.month_count(),
            horizon.len()
        )));
    }
    Ok(())
}
