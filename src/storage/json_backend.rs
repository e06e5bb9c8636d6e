use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

use crate::errors::PlannerError;
use crate::utils::paths::{ensure_dir, write_atomic, PathResolver};

use super::{PlannerData, Result, CURRENT_SCHEMA_VERSION};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_PREFIX: &str = "planner";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const DEFAULT_RETENTION: usize = 5;

/// File-backed persistence for [`PlannerData`] with rolling backups.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    data_file: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let app_root = PathResolver::resolve_base(root);
        ensure_dir(&app_root)?;
        ensure_dir(&PathResolver::data_dir_in(&app_root))?;
        let backups_dir = PathResolver::backup_dir_in(&app_root);
        ensure_dir(&backups_dir)?;
        Ok(Self {
            data_file: PathResolver::data_file_in(&app_root),
            root: app_root,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn data_path(&self) -> &Path {
        &self.data_file
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    /// Loads the planner data, or a fresh default when nothing was saved yet.
    pub fn load(&self) -> Result<PlannerData> {
        if !self.data_file.exists() {
            debug!(path = %self.data_file.display(), "no planner data yet, starting empty");
            return Ok(PlannerData::default());
        }
        load_data_from_path(&self.data_file)
    }

    /// Backs up the current file (if any), then writes `data` in its place.
    pub fn save(&self, data: &PlannerData) -> Result<()> {
        if self.data_file.exists() {
            self.backup_existing_file()?;
        }
        let json = serde_json::to_string_pretty(data)?;
        write_atomic(&self.data_file, &json)?;
        debug!(path = %self.data_file.display(), "planner data saved");
        Ok(())
    }

    /// Writes a manual snapshot of `data`; returns the backup file name.
    pub fn backup(&self, data: &PlannerData, note: Option<&str>) -> Result<String> {
        let name = self.next_backup_name(note);
        let json = serde_json::to_string_pretty(data)?;
        write_atomic(&self.backups_dir.join(&name), &json)?;
        info!(backup = %name, "backup created");
        self.prune_backups()?;
        Ok(name)
    }

    /// Backup file names, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        entries.sort_by(|a, b| {
            parse_backup_timestamp(b)
                .cmp(&parse_backup_timestamp(a))
                .then_with(|| b.cmp(a))
        });
        Ok(entries)
    }

    /// Replaces the live data with a backup. The current file is backed up
    /// first so a restore can itself be undone.
    pub fn restore(&self, backup_name: &str) -> Result<PlannerData> {
        let backup_path = self.backups_dir.join(backup_name);
        if !backup_path.exists() {
            return Err(PlannerError::Storage(format!(
                "backup `{}` not found",
                backup_name
            )));
        }
        let contents = fs::read_to_string(&backup_path)?;
        let data = parse_data(&contents)?;
        if self.data_file.exists() {
            self.backup_existing_file()?;
        }
        write_atomic(&self.data_file, &contents)?;
        info!(backup = %backup_name, "planner data restored");
        Ok(data)
    }

    pub fn backup_path(&self, backup_name: &str) -> PathBuf {
        self.backups_dir.join(backup_name)
    }

    /// Writes any serializable report (typically a simulation result) as
    /// pretty JSON. Nothing is exported implicitly.
    pub fn export_result<T: Serialize>(&self, result: &T, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(result)?;
        write_atomic(path, &json)?;
        info!(path = %path.display(), "result exported");
        Ok(())
    }

    fn backup_existing_file(&self) -> Result<()> {
        let name = self.next_backup_name(None);
        let backup_path = self.backups_dir.join(&name);
        ensure_dir(&self.backups_dir)?;
        fs::copy(&self.data_file, &backup_path)?;
        debug!(backup = %name, "previous data backed up");
        self.prune_backups()
    }

    /// Timestamped backup name that does not collide with an existing file;
    /// a second backup within the same second gets a `_2`, `_3`, ... suffix.
    fn next_backup_name(&self, note: Option<&str>) -> String {
        let stem = backup_stem(note);
        let mut name = format!("{}.{}", stem, BACKUP_EXTENSION);
        let mut counter = 2;
        while self.backups_dir.join(&name).exists() {
            name = format!("{}_{}.{}", stem, counter, BACKUP_EXTENSION);
            counter += 1;
        }
        name
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        for stale in backups.iter().skip(self.retention) {
            match fs::remove_file(self.backup_path(stale)) {
                Ok(()) => debug!(backup = %stale, "old backup pruned"),
                Err(err) => warn!(backup = %stale, error = %err, "failed to prune backup"),
            }
        }
        Ok(())
    }
}

pub fn load_data_from_path(path: &Path) -> Result<PlannerData> {
    let contents = fs::read_to_string(path)?;
    parse_data(&contents)
}

fn parse_data(contents: &str) -> Result<PlannerData> {
    let value: serde_json::Value = serde_json::from_str(contents)?;
    let found = value
        .get("schema_version")
        .and_then(|version| version.as_u64())
        .unwrap_or(u64::from(CURRENT_SCHEMA_VERSION));
    if found > u64::from(CURRENT_SCHEMA_VERSION) {
        return Err(PlannerError::UnsupportedSchema {
            found: u8::try_from(found).unwrap_or(u8::MAX),
            supported: CURRENT_SCHEMA_VERSION,
        });
    }
    Ok(serde_json::from_value(value)?)
}

fn backup_stem(note: Option<&str>) -> String {
    let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
    let mut stem = format!("{}_{}", BACKUP_PREFIX, timestamp);
    if let Some(label) = sanitize_backup_note(note) {
        stem.push('_');
        stem.push_str(&label);
    }
    stem
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.' | '_'))
            && !sanitized.is_empty()
            && !last_dash
        {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    let parts: Vec<&str> = stem.split('_').collect();
    parts.windows(2).find_map(|pair| {
        if !is_digits(pair[0], 8) {
            return None;
        }
        // Older backups were stamped to the minute only.
        let time = if is_digits(pair[1], 6) {
            pair[1].to_string()
        } else if is_digits(pair[1], 4) {
            format!("{}00", pair[1])
        } else {
            return None;
        };
        let raw = format!("{}{}", pair[0], time);
        NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M%S")
            .ok()
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
    })
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}
