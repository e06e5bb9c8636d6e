use tracing::info;
use uuid::Uuid;

use crate::budget::templates::{template, BudgetTemplate};
use crate::budget::{Category, MonthBudget};
use crate::errors::ValidationError;
use crate::horizon::{Month, PlanningHorizon};
use crate::simulation::{RiskClassifier, SimulationResult, Simulator};
use crate::storage::PlannerData;

use super::{ServiceError, ServiceResult};

/// Edits to the live budget matrix.
pub struct BudgetService;

impl BudgetService {
    pub fn set_budget(
        data: &mut PlannerData,
        horizon: &PlanningHorizon,
        month: &Month,
        category: Category,
        amount: f64,
    ) -> ServiceResult<()> {
        horizon.require(month)?;
        if category.is_blank() {
            return Err(ValidationError::EmptyCategory.into());
        }
        if !amount.is_finite() {
            return Err(ValidationError::NonFiniteAmount { field: "amount" }.into());
        }
        if amount < 0.0 {
            return Err(ValidationError::NegativeAmount {
                field: "amount",
                amount,
            }
            .into());
        }
        info!(month = %month, category = %category, amount, "budget updated");
        data.budgets.set(month.clone(), category, amount);
        data.touch();
        Ok(())
    }

    pub fn budget(data: &PlannerData, month: &Month, category: &Category) -> f64 {
        data.budgets.amount(month, category).unwrap_or(0.0)
    }

    pub fn month_budget(data: &PlannerData, month: &Month) -> MonthBudget {
        data.budgets.month(month).cloned().unwrap_or_default()
    }

    pub fn month_total(data: &PlannerData, month: &Month) -> f64 {
        data.budgets.month_total(month)
    }

    /// Replaces `target`'s budgets with a copy of `source`'s.
    pub fn copy_month(
        data: &mut PlannerData,
        horizon: &PlanningHorizon,
        source: &Month,
        target: &Month,
    ) -> ServiceResult<()> {
        horizon.require(source)?;
        horizon.require(target)?;
        let budget = Self::month_budget(data, source);
        info!(source = %source, target = %target, categories = budget.len(), "month copied");
        data.budgets.replace_month(target.clone(), budget);
        data.touch();
        Ok(())
    }

    /// Overwrites each listed month with a template. Months outside the
    /// horizon are skipped; returns how many months were filled.
    pub fn apply_template(
        data: &mut PlannerData,
        horizon: &PlanningHorizon,
        name: &str,
        months: &[Month],
    ) -> ServiceResult<usize> {
        let template = Self::lookup(name)?;
        let targets: Vec<&Month> = months
            .iter()
            .filter(|month| horizon.contains(month))
            .collect();
        if targets.is_empty() {
            return Err(ServiceError::Invalid(
                "no month of the planning horizon selected".into(),
            ));
        }
        for month in &targets {
            data.budgets
                .replace_month((*month).clone(), template.month_budget());
        }
        data.touch();
        info!(template = template.name, months = targets.len(), "template applied");
        Ok(targets.len())
    }

    /// Fills the whole horizon with a template.
    pub fn auto_fill(
        data: &mut PlannerData,
        horizon: &PlanningHorizon,
        name: &str,
    ) -> ServiceResult<usize> {
        Self::apply_template(data, horizon, name, horizon.months())
    }

    /// Makes a scenario's simulated budget the real one. Refused when any
    /// simulated amount would be negative.
    pub fn apply_scenario(
        data: &mut PlannerData,
        horizon: &PlanningHorizon,
        classifier: RiskClassifier,
        scenario_id: Uuid,
    ) -> ServiceResult<SimulationResult> {
        let result = Simulator::new(&*data, &*data, horizon)
            .with_classifier(classifier)
            .simulate(scenario_id)?;
        if let Some(first) = result.negative_budgets.first() {
            return Err(ServiceError::Invalid(format!(
                "scenario `{}` would leave {} negative budget(s), e.g. {} in {} at {:.2}",
                result.scenario.name,
                result.negative_budgets.len(),
                first.category,
                first.month,
                first.amount
            )));
        }
        data.budgets = result.simulated_snapshot.clone();
        data.touch();
        info!(
            scenario = %result.scenario.id,
            name = %result.scenario.name,
            total_impact = result.impact.total_impact,
            "scenario applied to budget"
        );
        Ok(result)
    }

    fn lookup(name: &str) -> ServiceResult<&'static BudgetTemplate> {
        template(name).ok_or_else(|| ValidationError::UnknownTemplate(name.to_string()).into())
    }
}
