//! Pure application of a single [`Change`] to a budget snapshot.

use crate::budget::{BudgetSnapshot, Category, MonthBudget};
use crate::errors::SimulationError;
use crate::horizon::{Month, PlanningHorizon};
use crate::scenario::{AdjustmentKind, Change};

/// Returns a new snapshot with `change` applied; `snapshot` is left untouched.
///
/// Negative results from a recurring cut are kept as-is so the impact report
/// can surface them.
pub fn apply(
    snapshot: &BudgetSnapshot,
    change: &Change,
    horizon: &PlanningHorizon,
) -> Result<BudgetSnapshot, SimulationError> {
    let mut next = snapshot.clone();
    match change {
        Change::RecurringBudgetChange {
            category,
            amount_delta,
            start_month,
            end_month,
        } => {
            for month in horizon.span(start_month, end_month)? {
                add_to(month_entry(&mut next, month)?, category, *amount_delta);
            }
        }
        Change::OneTimeEvent {
            category,
            amount,
            event_month,
        } => {
            horizon.require(event_month)?;
            add_to(month_entry(&mut next, event_month)?, category, *amount);
        }
        Change::InvestmentAdjustment {
            category,
            adjustment,
            start_month,
            end_month,
        } => {
            for month in horizon.span(start_month, end_month)? {
                let budget = month_entry(&mut next, month)?;
                // Absent categories stay absent: nothing to pause or double.
                if let Some(amount) = budget.get_mut(category) {
                    match adjustment {
                        AdjustmentKind::Pause => *amount = 0.0,
                        AdjustmentKind::Double => *amount *= 2.0,
                    }
                }
            }
        }
    }
    Ok(next)
}

/// Folds `changes` over `snapshot` in list order; later changes see the
/// effects of earlier ones.
pub fn apply_all<'a, I>(
    snapshot: &BudgetSnapshot,
    changes: I,
    horizon: &PlanningHorizon,
) -> Result<BudgetSnapshot, SimulationError>
where
    I: IntoIterator<Item = &'a Change>,
{
    changes
        .into_iter()
        .try_fold(snapshot.clone(), |current, change| {
            apply(&current, change, horizon)
        })
}

fn month_entry<'s>(
    snapshot: &'s mut BudgetSnapshot,
    month: &Month,
) -> Result<&'s mut MonthBudget, SimulationError> {
    snapshot.month_mut(month).ok_or_else(|| {
        SimulationError::Internal(format!("snapshot is missing horizon month `{}`", month))
    })
}

fn add_to(budget: &mut MonthBudget, category: &Category, delta: f64) {
    *budget.entry(category.clone()).or_insert(0.0) += delta;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;

    fn horizon() -> PlanningHorizon {
        PlanningHorizon::new(vec!["Jan".into(), "Feb".into(), "Mar".into()]).expect("horizon")
    }

    fn base() -> BudgetSnapshot {
        let mut snapshot = BudgetSnapshot::for_horizon(&horizon());
        for month in ["Jan", "Feb", "Mar"] {
            snapshot.set(month.into(), "Rent".into(), 1000.0);
            snapshot.set(month.into(), "SIP".into(), 500.0);
        }
        snapshot
    }

    fn recurring(delta: f64, start: &str, end: &str) -> Change {
        Change::RecurringBudgetChange {
            category: "Rent".into(),
            amount_delta: delta,
            start_month: start.into(),
            end_month: end.into(),
        }
    }

    fn adjust(category: &str, adjustment: AdjustmentKind, start: &str, end: &str) -> Change {
        Change::InvestmentAdjustment {
            category: category.into(),
            adjustment,
            start_month: start.into(),
            end_month: end.into(),
        }
    }

    #[test]
    fn recurring_change_touches_only_the_range() {
        let original = base();
        let result = apply(&original, &recurring(250.0, "Feb", "Mar"), &horizon()).unwrap();
        assert_eq!(result.amount(&"Jan".into(), &"Rent".into()), Some(1000.0));
        assert_eq!(result.amount(&"Feb".into(), &"Rent".into()), Some(1250.0));
        assert_eq!(result.amount(&"Mar".into(), &"Rent".into()), Some(1250.0));
        assert_eq!(original, base(), "input snapshot must not change");
    }

    #[test]
    fn recurring_cut_can_go_negative_and_creates_missing_categories() {
        let cut = Change::RecurringBudgetChange {
            category: "Gym".into(),
            amount_delta: -40.0,
            start_month: "Jan".into(),
            end_month: "Jan".into(),
        };
        let result = apply(&base(), &cut, &horizon()).unwrap();
        assert_eq!(result.amount(&"Jan".into(), &"Gym".into()), Some(-40.0));
    }

    #[test]
    fn one_time_event_adds_to_single_month() {
        let event = Change::OneTimeEvent {
            category: "Travel".into(),
            amount: 3000.0,
            event_month: "Mar".into(),
        };
        let result = apply(&base(), &event, &horizon()).unwrap();
        assert_eq!(result.amount(&"Mar".into(), &"Travel".into()), Some(3000.0));
        assert_eq!(result.amount(&"Feb".into(), &"Travel".into()), None);
    }

    #[test]
    fn pause_and_double_ignore_absent_categories() {
        let paused = apply(&base(), &adjust("SIP", AdjustmentKind::Pause, "Jan", "Feb"), &horizon())
            .unwrap();
        assert_eq!(paused.amount(&"Jan".into(), &"SIP".into()), Some(0.0));
        assert_eq!(paused.amount(&"Mar".into(), &"SIP".into()), Some(500.0));

        let doubled = apply(&base(), &adjust("SIP", AdjustmentKind::Double, "Mar", "Mar"), &horizon())
            .unwrap();
        assert_eq!(doubled.amount(&"Mar".into(), &"SIP".into()), Some(1000.0));

        let untouched =
            apply(&base(), &adjust("Gold", AdjustmentKind::Double, "Jan", "Mar"), &horizon())
                .unwrap();
        assert_eq!(untouched, base());
    }

    #[test]
    fn order_of_changes_matters() {
        let mut snapshot = BudgetSnapshot::for_horizon(&horizon());
        snapshot.set("Jan".into(), "Rent".into(), 1000.0);
        let pause = adjust("Rent", AdjustmentKind::Pause, "Jan", "Jan");
        let raise = recurring(500.0, "Jan", "Jan");

        let a = apply_all(&snapshot, [&raise, &pause], &horizon()).unwrap();
        let b = apply_all(&snapshot, [&pause, &raise], &horizon()).unwrap();
        assert_eq!(a.amount(&"Jan".into(), &"Rent".into()), Some(0.0));
        assert_eq!(b.amount(&"Jan".into(), &"Rent".into()), Some(500.0));
    }

    #[test]
    fn invalid_range_is_reported_not_narrowed() {
        let err = apply(&base(), &recurring(1.0, "Mar", "Jan"), &horizon()).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Invalid(ValidationError::InvertedRange { .. })
        ));
    }

    #[test]
    fn missing_month_in_snapshot_is_internal() {
        let err = apply(&BudgetSnapshot::new(), &recurring(1.0, "Jan", "Jan"), &horizon())
            .unwrap_err();
        assert!(matches!(err, SimulationError::Internal(_)));
    }
}
