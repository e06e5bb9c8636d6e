//! Budget matrix types: categories, month × category snapshots, and the
//! read-only store seam the simulator consumes.

pub mod snapshot;
pub mod templates;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::horizon::Month;

pub use snapshot::{BudgetSnapshot, MonthBudget, NegativeBudget};
pub use templates::{BudgetTemplate, TEMPLATES};

/// Free-form budget category name. No registry is enforced; unknown
/// categories are created on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Read access to the live budget plan.
pub trait BudgetStore {
    /// A consistent deep copy of the full month × category matrix.
    fn full_snapshot(&self) -> BudgetSnapshot;

    /// Budgets for one month; empty when nothing is planned.
    fn month_budget(&self, month: &Month) -> BTreeMap<Category, f64> {
        self.full_snapshot()
            .month(month)
            .cloned()
            .unwrap_or_default()
    }

    /// Months that carry budget data. Horizon order comes from
    /// [`PlanningHorizon`](crate::horizon::PlanningHorizon), not from here.
    fn months(&self) -> Vec<Month> {
        self.full_snapshot().months().cloned().collect()
    }
}
