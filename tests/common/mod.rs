#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use budget_planner::{
    budget::Category,
    horizon::{Month, PlanningHorizon},
    storage::{JsonStorage, PlannerData},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Storage backed by a unique directory for each test.
pub fn setup_storage() -> JsonStorage {
    JsonStorage::new(Some(temp_base()), Some(3)).expect("create json storage backend")
}

pub fn horizon(labels: &[&str]) -> PlanningHorizon {
    PlanningHorizon::new(labels.iter().map(|label| Month::from(*label)).collect())
        .expect("valid horizon")
}

/// Planner data with the same category amounts in every listed month.
pub fn data_with(months: &[&str], budgets: &[(&str, f64)]) -> PlannerData {
    let mut data = PlannerData::default();
    for month in months {
        for (category, amount) in budgets {
            data.budgets
                .set(Month::from(*month), Category::from(*category), *amount);
        }
    }
    data
}
