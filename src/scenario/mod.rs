//! What-if scenarios and the closed set of hypothetical changes they carry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::budget::Category;
use crate::errors::ValidationError;
use crate::horizon::{Month, PlanningHorizon};

/// How an investment adjustment rewrites an existing allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Pause,
    Double,
}

/// One hypothetical modification of the budget plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Change {
    /// Adds `amount_delta` to the category for every month in the range.
    RecurringBudgetChange {
        category: Category,
        amount_delta: f64,
        start_month: Month,
        end_month: Month,
    },
    /// Adds `amount` to the category for exactly one month.
    OneTimeEvent {
        category: Category,
        amount: f64,
        event_month: Month,
    },
    /// Pauses or doubles an existing allocation over the range.
    InvestmentAdjustment {
        category: Category,
        adjustment: AdjustmentKind,
        start_month: Month,
        end_month: Month,
    },
}

impl Change {
    pub fn category(&self) -> &Category {
        match self {
            Change::RecurringBudgetChange { category, .. }
            | Change::OneTimeEvent { category, .. }
            | Change::InvestmentAdjustment { category, .. } => category,
        }
    }

    pub fn validate(&self, horizon: &PlanningHorizon) -> Result<(), ValidationError> {
        if self.category().is_blank() {
            return Err(ValidationError::EmptyCategory);
        }
        match self {
            Change::RecurringBudgetChange {
                amount_delta,
                start_month,
                end_month,
                ..
            } => {
                ensure_finite("amount_delta", *amount_delta)?;
                horizon.span(start_month, end_month)?;
            }
            Change::OneTimeEvent {
                amount,
                event_month,
                ..
            } => {
                ensure_finite("amount", *amount)?;
                if *amount < 0.0 {
                    return Err(ValidationError::NegativeAmount {
                        field: "amount",
                        amount: *amount,
                    });
                }
                horizon.require(event_month)?;
            }
            Change::InvestmentAdjustment {
                start_month,
                end_month,
                ..
            } => {
                horizon.span(start_month, end_month)?;
            }
        }
        Ok(())
    }

    pub fn summary(&self) -> String {
        match self {
            Change::RecurringBudgetChange {
                category,
                amount_delta,
                start_month,
                end_month,
            } => format!(
                "{:+.2} to {} from {} to {}",
                amount_delta, category, start_month, end_month
            ),
            Change::OneTimeEvent {
                category,
                amount,
                event_month,
            } => format!("One-time {:.2} to {} in {}", amount, category, event_month),
            Change::InvestmentAdjustment {
                category,
                adjustment,
                start_month,
                end_month,
            } => {
                let verb = match adjustment {
                    AdjustmentKind::Pause => "Pause",
                    AdjustmentKind::Double => "Double",
                };
                format!("{} {} from {} to {}", verb, category, start_month, end_month)
            }
        }
    }
}

fn ensure_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFiniteAmount { field })
    }
}

/// A named, ordered set of changes to evaluate together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub changes: Vec<Change>,
    pub created_at: DateTime<Utc>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, description: impl Into<String>, changes: Vec<Change>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            changes,
            created_at: Utc::now(),
        }
    }

    /// Checks the scenario is simulatable, stopping at the first problem.
    pub fn validate(&self, horizon: &PlanningHorizon) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.changes.is_empty() {
            return Err(ValidationError::NoChanges);
        }
        for (index, change) in self.changes.iter().enumerate() {
            change
                .validate(horizon)
                .map_err(|source| ValidationError::Change {
                    index: index + 1,
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }

    pub fn summary(&self) -> String {
        match self.changes.len() {
            1 => "1 change".to_string(),
            count => format!("{} changes", count),
        }
    }
}

/// Storage seam for scenarios.
pub trait ScenarioStore {
    fn scenario(&self, id: Uuid) -> Option<Scenario>;
    fn scenarios(&self) -> Vec<Scenario>;
    fn insert_scenario(&mut self, scenario: Scenario) -> Uuid;
    fn remove_scenario(&mut self, id: Uuid) -> Option<Scenario>;
}
