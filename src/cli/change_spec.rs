//! Command-line notation for scenario changes:
//!
//! - `recurring:<category>:<delta>:<start>:<end>`
//! - `event:<category>:<amount>:<month>`
//! - `pause:<category>:<start>:<end>`
//! - `double:<category>:<start>:<end>`

use crate::horizon::{Month, PlanningHorizon};
use crate::scenario::{AdjustmentKind, Change};

use super::core::CommandError;

pub fn parse_change(spec: &str, horizon: &PlanningHorizon) -> Result<Change, CommandError> {
    let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
    let (kind, rest) = parts
        .split_first()
        .ok_or_else(|| invalid(spec, "empty change"))?;

    match (kind.to_ascii_lowercase().as_str(), rest) {
        ("recurring", [category, delta, start, end]) => Ok(Change::RecurringBudgetChange {
            category: (*category).into(),
            amount_delta: parse_amount(spec, delta)?,
            start_month: month(horizon, start),
            end_month: month(horizon, end),
        }),
        ("event", [category, amount, event_month]) => Ok(Change::OneTimeEvent {
            category: (*category).into(),
            amount: parse_amount(spec, amount)?,
            event_month: month(horizon, event_month),
        }),
        ("pause", [category, start, end]) => Ok(adjustment(
            horizon,
            category,
            AdjustmentKind::Pause,
            start,
            end,
        )),
        ("double", [category, start, end]) => Ok(adjustment(
            horizon,
            category,
            AdjustmentKind::Double,
            start,
            end,
        )),
        ("recurring" | "event" | "pause" | "double", _) => {
            Err(invalid(spec, "wrong number of fields"))
        }
        _ => Err(invalid(
            spec,
            "expected recurring, event, pause or double",
        )),
    }
}

pub fn parse_changes(specs: &[&str], horizon: &PlanningHorizon) -> Result<Vec<Change>, CommandError> {
    specs.iter().map(|spec| parse_change(spec, horizon)).collect()
}

/// Canonical horizon label when the input matches one, otherwise the raw
/// text so validation can name the unknown month.
pub fn month(horizon: &PlanningHorizon, label: &str) -> Month {
    horizon
        .resolve(label)
        .cloned()
        .unwrap_or_else(|| Month::new(label.trim()))
}

fn adjustment(
    horizon: &PlanningHorizon,
    category: &str,
    adjustment: AdjustmentKind,
    start: &str,
    end: &str,
) -> Change {
    Change::InvestmentAdjustment {
        category: category.into(),
        adjustment,
        start_month: month(horizon, start),
        end_month: month(horizon, end),
    }
}

fn parse_amount(spec: &str, raw: &str) -> Result<f64, CommandError> {
    raw.parse::<f64>()
        .map_err(|_| invalid(spec, &format!("`{}` is not a number", raw)))
}

fn invalid(spec: &str, reason: &str) -> CommandError {
    CommandError::InvalidArguments(format!("invalid change `{}`: {}", spec, reason))
}
