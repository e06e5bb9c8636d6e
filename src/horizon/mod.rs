//! The planning horizon: a fixed, ordered run of month tokens that bounds every
//! budget and scenario date range.

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

const MONTH_LABEL_FORMAT: &str = "%b-%y";

/// Opaque month identifier such as `Aug-25`.
///
/// Ordering between months is only meaningful through a [`PlanningHorizon`];
/// the derived `Ord` is lexical and exists so months can key sorted maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Month(String);

impl Month {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Month {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Month {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Ordered sequence of months the whole budget plan spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningHorizon {
    months: Vec<Month>,
    positions: HashMap<Month, usize>,
}

impl PlanningHorizon {
    /// Builds a horizon from an explicit month order.
    pub fn new(months: Vec<Month>) -> Result<Self, ValidationError> {
        if months.is_empty() {
            return Err(ValidationError::EmptyHorizon);
        }
        let mut positions = HashMap::with_capacity(months.len());
        for (idx, month) in months.iter().enumerate() {
            if positions.insert(month.clone(), idx).is_some() {
                return Err(ValidationError::DuplicateMonth(month.to_string()));
            }
        }
        Ok(Self { months, positions })
    }

    /// Generates `count` consecutive calendar months starting at `start`,
    /// labelled like `Aug-25`.
    pub fn consecutive(start: NaiveDate, count: u32) -> Result<Self, ValidationError> {
        let first = start.with_day(1).unwrap_or(start);
        let months = (0..count)
            .map(|offset| {
                first
                    .checked_add_months(Months::new(offset))
                    .map(|date| Month::new(date.format(MONTH_LABEL_FORMAT).to_string()))
                    .ok_or(ValidationError::HorizonOutOfRange(offset))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(months)
    }

    pub fn months(&self) -> &[Month] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn contains(&self, month: &Month) -> bool {
        self.positions.contains_key(month)
    }

    pub fn index_of(&self, month: &Month) -> Option<usize> {
        self.positions.get(month).copied()
    }

    /// Resolves a month to its horizon position or reports it as unknown.
    pub fn require(&self, month: &Month) -> Result<usize, ValidationError> {
        self.index_of(month)
            .ok_or_else(|| ValidationError::MonthNotInHorizon(month.to_string()))
    }

    /// Inclusive slice of months between `start` and `end` in horizon order.
    pub fn span(&self, start: &Month, end: &Month) -> Result<&[Month], ValidationError> {
        let from = self.require(start)?;
        let to = self.require(end)?;
        if from > to {
            return Err(ValidationError::InvertedRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(&self.months[from..=to])
    }

    /// Case-insensitive lookup so users can type `aug-25`.
    pub fn resolve(&self, label: &str) -> Option<&Month> {
        let needle = label.trim();
        self.months
            .iter()
            .find(|month| month.as_str().eq_ignore_ascii_case(needle))
    }
}
