mod common;

use std::fs;
use std::path::Path;

use budget_planner::{
    config::{Config, ConfigManager},
    errors::PlannerError,
    scenario::{Change, Scenario, ScenarioStore},
    simulation::{RiskThresholds, SimulationResult, Simulator},
    storage::{JsonStorage, PlannerData},
};
use tempfile::tempdir;

use common::{data_with, horizon, setup_storage};

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

fn gift_scenario() -> Scenario {
    Scenario::new(
        "Birthday",
        "gift in September",
        vec![Change::OneTimeEvent {
            category: "Gift".into(),
            amount: 1500.0,
            event_month: "Sep".into(),
        }],
    )
}

#[test]
fn data_survives_a_save_and_reload() {
    let storage = setup_storage();
    let mut data = data_with(&["Aug", "Sep"], &[("Food", 5000.0), ("Rent", 15000.0)]);
    let id = data.insert_scenario(gift_scenario());

    storage.save(&data).expect("save");
    let loaded = storage.load().expect("load");

    assert_eq!(loaded.budgets, data.budgets);
    assert_eq!(loaded.scenarios, data.scenarios);
    assert_eq!(loaded.scenario(id).map(|s| s.name), Some("Birthday".to_string()));
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let storage = setup_storage();
    let data = data_with(&["Aug"], &[("Food", 5000.0)]);
    storage.save(&data).expect("initial save");
    let original = fs::read_to_string(storage.data_path()).expect("read original");

    // A directory at the temp path makes the write fail before the rename.
    fs::create_dir_all(tmp_path_for(storage.data_path())).expect("block temp path");

    let changed = data_with(&["Aug"], &[("Food", 9000.0)]);
    assert!(storage.save(&changed).is_err());
    assert_eq!(
        fs::read_to_string(storage.data_path()).expect("read after failure"),
        original
    );
    assert!(
        !storage.list_backups().expect("list").is_empty(),
        "previous file is backed up before the write"
    );
}

#[test]
fn restore_brings_back_a_manual_backup() {
    let storage = setup_storage();
    let before = data_with(&["Aug"], &[("Food", 5000.0)]);
    storage.save(&before).expect("save");
    let name = storage
        .backup(&before, Some("before trip"))
        .expect("manual backup");
    assert!(name.ends_with("_before-trip.json"));

    let after = data_with(&["Aug"], &[("Food", 100.0), ("Travel", 40000.0)]);
    storage.save(&after).expect("save changed");

    let restored = storage.restore(&name).expect("restore");
    assert_eq!(restored.budgets, before.budgets);
    assert_eq!(storage.load().expect("reload").budgets, before.budgets);
    assert!(storage.list_backups().expect("list").contains(&name));
}

#[test]
fn restoring_unknown_backup_fails_cleanly() {
    let storage = setup_storage();
    let data = data_with(&["Aug"], &[("Food", 5000.0)]);
    storage.save(&data).expect("save");

    let err = storage.restore("planner_19990101_0000.json").unwrap_err();
    assert!(matches!(err, PlannerError::Storage(_)));
    assert_eq!(storage.load().expect("load").budgets, data.budgets);
}

#[test]
fn newer_schema_is_refused() {
    let storage = setup_storage();
    fs::write(
        storage.data_path(),
        r#"{"schema_version": 42, "budgets": {}, "scenarios": []}"#,
    )
    .expect("seed file");

    match storage.load() {
        Err(PlannerError::UnsupportedSchema { found, supported }) => {
            assert_eq!(found, 42);
            assert_eq!(supported, 1);
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn missing_schema_version_loads_as_current() {
    let storage = setup_storage();
    fs::write(storage.data_path(), r#"{"scenarios": []}"#).expect("seed file");
    let data = storage.load().expect("load legacy file");
    let fresh = PlannerData::default();
    assert_eq!(data.schema_version, fresh.schema_version);
    assert_eq!(data.budgets, fresh.budgets);
    assert!(data.scenarios.is_empty());
}

#[test]
fn exported_result_reads_back() {
    let storage = setup_storage();
    let horizon = horizon(&["Aug", "Sep"]);
    let mut data = data_with(&["Aug", "Sep"], &[("Food", 5000.0)]);
    let id = data.insert_scenario(gift_scenario());
    let result = Simulator::new(&data, &data, &horizon)
        .simulate(id)
        .expect("simulate");

    let target = storage.base_dir().join("exports").join("birthday.json");
    storage.export_result(&result, &target).expect("export");

    let json = fs::read_to_string(&target).expect("read export");
    let parsed: SimulationResult = serde_json::from_str(&json).expect("parse export");
    assert_eq!(parsed, result);
    assert!(json.contains("\"type\": \"one_time_event\""));
}

#[test]
fn config_manager_persists_settings() {
    let temp = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
    assert_eq!(manager.load().expect("defaults"), Config::default());

    let config = Config {
        currency_symbol: "$".into(),
        planning_start: "2026-01".into(),
        planning_months: 6,
        risk: RiskThresholds {
            medium: 500.0,
            high: 2_000.0,
        },
        backup_retention: 2,
    };
    manager.save(&config).expect("save config");
    let loaded = manager.load().expect("reload");
    assert_eq!(loaded, config);

    let horizon = loaded.horizon().expect("horizon");
    assert_eq!(horizon.len(), 6);
    assert_eq!(horizon.months()[0].as_str(), "Jan-26");
    assert_eq!(horizon.months()[5].as_str(), "Jun-26");
}

#[test]
fn retention_setting_limits_backups() {
    let temp = tempdir().expect("tempdir");
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), Some(2)).expect("storage");
    let data = data_with(&["Aug"], &[("Food", 5000.0)]);
    for note in ["one", "two", "three", "four"] {
        storage.backup(&data, Some(note)).expect("backup");
    }
    assert_eq!(storage.list_backups().expect("list").len(), 2);
}
