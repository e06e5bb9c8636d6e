mod common;

use budget_planner::{
    budget::BudgetStore,
    errors::{SimulationError, ValidationError},
    scenario::{AdjustmentKind, Change, Scenario, ScenarioStore},
    simulation::{
        apply, apply_all, ImpactDirection, RiskClassifier, RiskLevel, RiskThresholds, Simulator,
    },
};

use common::{data_with, horizon};

const TOLERANCE: f64 = 1e-6;

fn food_event(amount: f64, month: &str) -> Change {
    Change::OneTimeEvent {
        category: "Food".into(),
        amount,
        event_month: month.into(),
    }
}

fn recurring(category: &str, delta: f64, start: &str, end: &str) -> Change {
    Change::RecurringBudgetChange {
        category: category.into(),
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
fn one_time_food_event_matches_worked_example() {
    let horizon = horizon(&["Aug", "Sep"]);
    let mut data = data_with(&["Aug", "Sep"], &[("Food", 5000.0), ("Rent", 15000.0)]);
    let id = data.insert_scenario(Scenario::new(
        "Dinner party",
        "",
        vec![food_event(2000.0, "Aug")],
    ));

    let result = Simulator::new(&data, &data, &horizon)
        .simulate(id)
        .expect("simulation succeeds");
    let impact = &result.impact;

    assert_eq!(impact.monthly_changes.len(), 1);
    let aug = impact.month(&"Aug".into()).expect("Aug changed");
    assert_eq!(aug.original_total, 20000.0);
    assert_eq!(aug.simulated_total, 22000.0);
    assert_eq!(aug.change, 2000.0);
    assert!((aug.change_percent - 10.0).abs() < TOLERANCE);

    assert_eq!(impact.category_impact.len(), 1);
    assert_eq!(impact.category(&"Food".into()).map(|c| c.change), Some(2000.0));
    assert_eq!(impact.total_impact, 2000.0);
    assert_eq!(impact.affected_months, 1);
    assert_eq!(impact.risk_level, RiskLevel::Low);
    assert_eq!(impact.impact_type, ImpactDirection::Increase);
    assert_eq!(
        impact.recommendation,
        "Low impact scenario — manageable changes."
    );
}

#[test]
fn simulation_never_touches_the_live_budget() {
    let horizon = horizon(&["Aug", "Sep"]);
    let mut data = data_with(&["Aug", "Sep"], &[("SIP", 5000.0)]);
    let before = data.full_snapshot();
    let id = data.insert_scenario(Scenario::new(
        "Double SIP",
        "",
        vec![adjust("SIP", AdjustmentKind::Double, "Aug", "Sep")],
    ));

    let result = Simulator::new(&data, &data, &horizon)
        .simulate(id)
        .expect("simulate");
    assert_eq!(data.full_snapshot(), before);
    assert_eq!(result.original_snapshot, before);
    assert_eq!(
        result
            .simulated_snapshot
            .amount(&"Sep".into(), &"SIP".into()),
        Some(10000.0)
    );
}

#[test]
fn apply_leaves_its_input_unchanged() {
    let horizon = horizon(&["Jan"]);
    let original = data_with(&["Jan"], &[("Rent", 1000.0)]).full_snapshot();
    let copy = original.clone();
    let next = apply(&original, &recurring("Rent", 250.0, "Jan", "Jan"), &horizon).expect("apply");
    assert_eq!(original, copy);
    assert_eq!(next.amount(&"Jan".into(), &"Rent".into()), Some(1250.0));
}

#[test]
fn repeated_simulation_is_deterministic() {
    let horizon = horizon(&["Aug", "Sep", "Oct"]);
    let mut data = data_with(
        &["Aug", "Sep", "Oct"],
        &[("Food", 5000.1), ("Fuel", 333.33), ("SIP", 2500.0)],
    );
    let id = data.insert_scenario(Scenario::new(
        "Mixed",
        "",
        vec![
            recurring("Food", -123.45, "Aug", "Oct"),
            adjust("SIP", AdjustmentKind::Pause, "Sep", "Oct"),
            food_event(999.99, "Sep"),
        ],
    ));
    let simulator = Simulator::new(&data, &data, &horizon);
    let first = simulator.simulate(id).expect("first run");
    let second = simulator.simulate(id).expect("second run");
    assert_eq!(first.impact, second.impact);
    assert_eq!(
        serde_json::to_string(&first).expect("serialize"),
        serde_json::to_string(&second).expect("serialize")
    );
}

#[test]
fn monthly_and_category_partitions_agree() {
    let horizon = horizon(&["Aug", "Sep", "Oct", "Nov"]);
    let mut data = data_with(
        &["Aug", "Sep", "Oct", "Nov"],
        &[("Food", 4200.5), ("Rent", 15000.0), ("SIP", 3000.0)],
    );
    let id = data.insert_scenario(Scenario::new(
        "Busy quarter",
        "",
        vec![
            recurring("Food", 310.25, "Aug", "Nov"),
            recurring("Travel", 1200.0, "Sep", "Oct"),
            adjust("SIP", AdjustmentKind::Double, "Oct", "Nov"),
            recurring("Rent", -500.0, "Nov", "Nov"),
            food_event(75.5, "Aug"),
        ],
    ));
    let impact = Simulator::new(&data, &data, &horizon)
        .simulate(id)
        .expect("simulate")
        .impact;
    let monthly: f64 = impact.monthly_changes.iter().map(|m| m.change).sum();
    assert!((impact.total_impact - monthly).abs() < TOLERANCE);
    assert!((impact.total_impact - impact.category_change_total()).abs() < TOLERANCE);
    assert_eq!(impact.affected_months, 4);
    assert!(impact.category(&"Travel".into()).is_some());
}

#[test]
fn zero_delta_scenario_is_a_noop() {
    let horizon = horizon(&["Aug", "Sep"]);
    let mut data = data_with(&["Aug", "Sep"], &[("Food", 5000.0)]);
    let id = data.insert_scenario(Scenario::new(
        "Nothing",
        "",
        vec![recurring("Food", 0.0, "Aug", "Sep")],
    ));
    let impact = Simulator::new(&data, &data, &horizon)
        .simulate(id)
        .expect("simulate")
        .impact;
    assert_eq!(impact.affected_months, 0);
    assert!(impact.monthly_changes.is_empty());
    assert!(impact.category_impact.is_empty());
    assert_eq!(impact.total_impact, 0.0);
    assert_eq!(impact.risk_level, RiskLevel::Low);
    assert_eq!(impact.impact_type, ImpactDirection::Neutral);
}

#[test]
fn change_order_matters() {
    let horizon = horizon(&["Jan"]);
    let original = data_with(&["Jan"], &[("Rent", 1000.0)]).full_snapshot();

    let raise_then_pause = [
        recurring("Rent", 500.0, "Jan", "Jan"),
        adjust("Rent", AdjustmentKind::Pause, "Jan", "Jan"),
    ];
    let pause_then_raise = [
        adjust("Rent", AdjustmentKind::Pause, "Jan", "Jan"),
        recurring("Rent", 500.0, "Jan", "Jan"),
    ];

    let a = apply_all(&original, &raise_then_pause, &horizon).expect("scenario A");
    let b = apply_all(&original, &pause_then_raise, &horizon).expect("scenario B");
    assert_eq!(a.amount(&"Jan".into(), &"Rent".into()), Some(0.0));
    assert_eq!(b.amount(&"Jan".into(), &"Rent".into()), Some(500.0));
}

#[test]
fn doubling_before_or_after_a_raise_differs() {
    let horizon = horizon(&["Jan"]);
    let original = data_with(&["Jan"], &[("SIP", 1000.0)]).full_snapshot();

    let raise_then_double = [
        recurring("SIP", 500.0, "Jan", "Jan"),
        adjust("SIP", AdjustmentKind::Double, "Jan", "Jan"),
    ];
    let double_then_raise = [
        adjust("SIP", AdjustmentKind::Double, "Jan", "Jan"),
        recurring("SIP", 500.0, "Jan", "Jan"),
    ];

    let a = apply_all(&original, &raise_then_double, &horizon).expect("raise first");
    let b = apply_all(&original, &double_then_raise, &horizon).expect("double first");
    assert_eq!(a.amount(&"Jan".into(), &"SIP".into()), Some(3000.0));
    assert_eq!(b.amount(&"Jan".into(), &"SIP".into()), Some(2500.0));
}

#[test]
fn inverted_range_fails_before_any_work() {
    let horizon = horizon(&["Aug", "Sep", "Oct"]);
    let mut data = data_with(&["Aug", "Sep", "Oct"], &[("Food", 5000.0)]);
    let id = data.insert_scenario(Scenario::new(
        "Backwards",
        "",
        vec![recurring("Food", 100.0, "Oct", "Aug")],
    ));
    let err = Simulator::new(&data, &data, &horizon)
        .simulate(id)
        .unwrap_err();
    match err {
        SimulationError::Invalid(ValidationError::Change { index, source }) => {
            assert_eq!(index, 1);
            assert!(matches!(*source, ValidationError::InvertedRange { .. }));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn month_outside_horizon_is_rejected() {
    let horizon = horizon(&["Aug", "Sep"]);
    let mut data = data_with(&["Aug", "Sep"], &[("Food", 5000.0)]);
    let id = data.insert_scenario(Scenario::new("Later", "", vec![food_event(10.0, "Dec")]));
    let err = Simulator::new(&data, &data, &horizon)
        .simulate(id)
        .unwrap_err();
    assert!(matches!(err, SimulationError::Invalid(_)));
}

#[test]
fn negative_results_are_reported_not_clamped() {
    let horizon = horizon(&["Aug", "Sep"]);
    let mut data = data_with(&["Aug", "Sep"], &[("Food", 500.0)]);
    let id = data.insert_scenario(Scenario::new(
        "Overcut",
        "",
        vec![recurring("Food", -800.0, "Sep", "Sep")],
    ));
    let result = Simulator::new(&data, &data, &horizon)
        .simulate(id)
        .expect("simulate");
    assert_eq!(
        result
            .simulated_snapshot
            .amount(&"Sep".into(), &"Food".into()),
        Some(-300.0)
    );
    assert_eq!(result.negative_budgets.len(), 1);
    assert_eq!(result.negative_budgets[0].month.as_str(), "Sep");
    assert_eq!(result.impact.impact_type, ImpactDirection::Decrease);
}

#[test]
fn risk_thresholds_are_configurable_per_simulator() {
    let horizon = horizon(&["Aug"]);
    let mut data = data_with(&["Aug"], &[("Food", 5000.0)]);
    let id = data.insert_scenario(Scenario::new("Feast", "", vec![food_event(600.0, "Aug")]));
    let strict = RiskClassifier::new(RiskThresholds {
        medium: 100.0,
        high: 500.0,
    });
    let result = Simulator::new(&data, &data, &horizon)
        .with_classifier(strict)
        .simulate(id)
        .expect("simulate");
    assert_eq!(result.impact.risk_level, RiskLevel::High);
}

#[test]
fn risk_boundaries_follow_absolute_impact() {
    let classifier = RiskClassifier::default();
    assert_eq!(classifier.classify(9_999.99).risk_level, RiskLevel::Low);
    assert_eq!(classifier.classify(10_000.00).risk_level, RiskLevel::Medium);
    assert_eq!(classifier.classify(49_999.99).risk_level, RiskLevel::Medium);
    assert_eq!(classifier.classify(50_000.00).risk_level, RiskLevel::High);
    assert_eq!(classifier.classify(-50_000.00).risk_level, RiskLevel::High);
}

#[test]
fn compare_recommends_lowest_total_impact() {
    let horizon = horizon(&["Aug", "Sep"]);
    let mut data = data_with(&["Aug", "Sep"], &[("Food", 5000.0), ("SIP", 3000.0)]);
    let splurge = data.insert_scenario(Scenario::new(
        "Splurge",
        "",
        vec![food_event(4000.0, "Aug")],
    ));
    let pause = data.insert_scenario(Scenario::new(
        "Pause SIP",
        "",
        vec![adjust("SIP", AdjustmentKind::Pause, "Aug", "Sep")],
    ));

    let comparison = Simulator::new(&data, &data, &horizon)
        .compare(&[splurge, pause])
        .expect("compare");
    assert_eq!(comparison.entries.len(), 2);
    assert_eq!(comparison.entries[0].name, "Splurge");
    assert_eq!(comparison.recommended, Some(pause));
    assert_eq!(
        comparison.recommended_entry().map(|e| e.total_impact),
        Some(-6000.0)
    );
}

#[test]
fn compare_propagates_broken_scenarios() {
    let horizon = horizon(&["Aug"]);
    let mut data = data_with(&["Aug"], &[("Food", 5000.0)]);
    let fine = data.insert_scenario(Scenario::new("Fine", "", vec![food_event(1.0, "Aug")]));
    let broken = data.insert_scenario(Scenario::new("Broken", "", Vec::new()));
    let err = Simulator::new(&data, &data, &horizon)
        .compare(&[fine, broken])
        .unwrap_err();
    assert!(matches!(
        err,
        SimulationError::Invalid(ValidationError::NoChanges)
    ));
}

#[test]
fn preview_runs_unsaved_scenarios() {
    let horizon = horizon(&["Aug"]);
    let data = data_with(&["Aug"], &[("Food", 5000.0)]);
    let draft = Scenario::new("Draft", "", vec![food_event(250.0, "Aug")]);
    let result = Simulator::new(&data, &data, &horizon)
        .preview(&draft)
        .expect("preview");
    assert_eq!(result.impact.total_impact, 250.0);
    assert!(data.scenario(draft.id).is_none());
}
