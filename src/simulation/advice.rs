//! Human-readable pros, cons and action items for an impact report.

use serde::{Deserialize, Serialize};

use super::impact::ImpactReport;
use super::risk::RiskLevel;

const SPENDING_ACTION_THRESHOLD: f64 = 10_000.0;
const CATEGORY_FOCUS_THRESHOLD: f64 = 5_000.0;
const MAX_FOCUS_CATEGORIES: usize = 3;
const CHECKPOINT_MONTHS: usize = 6;
const LONG_TERM_MONTHS: usize = 12;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAdvice {
    pub advantages: Vec<String>,
    pub disadvantages: Vec<String>,
    pub actions: Vec<String>,
}

pub fn advise(report: &ImpactReport, currency: &str) -> ScenarioAdvice {
    let mut advice = ScenarioAdvice::default();
    let net = report.total_impact;

    if net < 0.0 {
        advice.advantages.push(format!(
            "Reduces overall spending by {}",
            format_amount(net.abs(), currency)
        ));
        advice
            .advantages
            .push("Improves budget efficiency".to_string());
    }
    let reduced = report
        .category_impact
        .values()
        .filter(|impact| impact.change < 0.0)
        .count();
    if reduced > 0 {
        advice
            .advantages
            .push(format!("Optimizes {} category budgets", reduced));
    }

    if net > 0.0 {
        advice.disadvantages.push(format!(
            "Increases spending by {}",
            format_amount(net, currency)
        ));
    }
    if report.risk_level == RiskLevel::High {
        advice
            .disadvantages
            .push("High risk - significant budget impact".to_string());
    }
    if report.affected_months > LONG_TERM_MONTHS {
        advice.disadvantages.push(format!(
            "Long-term commitment ({} months)",
            report.affected_months
        ));
    }

    advice.actions = action_items(report);
    advice
}

fn action_items(report: &ImpactReport) -> Vec<String> {
    let mut actions = Vec::new();
    if report.risk_level == RiskLevel::High {
        actions.push("Review and validate all assumptions before proceeding".to_string());
        actions.push("Consider implementing changes gradually".to_string());
    }
    if report.total_impact > SPENDING_ACTION_THRESHOLD {
        actions.push("Identify additional income sources or savings opportunities".to_string());
    }
    let focus: Vec<&str> = report
        .category_impact
        .iter()
        .filter(|(_, impact)| impact.change.abs() > CATEGORY_FOCUS_THRESHOLD)
        .map(|(category, _)| category.as_str())
        .take(MAX_FOCUS_CATEGORIES)
        .collect();
    if !focus.is_empty() {
        actions.push(format!("Focus on optimizing: {}", focus.join(", ")));
    }
    if report.affected_months > CHECKPOINT_MONTHS {
        actions.push("Set up monthly review checkpoints to track progress".to_string());
    }
    if actions.is_empty() {
        actions.push("Proceed with implementation and monitor results".to_string());
    }
    actions
}

pub fn format_amount(amount: f64, currency: &str) -> String {
    if amount < 0.0 {
        format!("-{}{:.2}", currency, amount.abs())
    } else {
        format!("{}{:.2}", currency, amount)
    }
}
