use thiserror::Error;

/// Malformed user input: a change, scenario, or budget edit that must be
/// rejected before any computation happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("scenario name is required")]
    EmptyName,
    #[error("category is required")]
    EmptyCategory,
    #[error("at least one change is required")]
    NoChanges,
    #[error("month `{0}` is not part of the planning horizon")]
    MonthNotInHorizon(String),
    #[error("range start `{start}` comes after range end `{end}`")]
    InvertedRange { start: String, end: String },
    #[error("{field} cannot be negative (got {amount})")]
    NegativeAmount { field: &'static str, amount: f64 },
    #[error("{field} must be a finite number")]
    NonFiniteAmount { field: &'static str },
    #[error("budget template `{0}` not found")]
    UnknownTemplate(String),
    #[error("month `{0}` appears more than once in the planning horizon")]
    DuplicateMonth(String),
    #[error("planning horizon must contain at least one month")]
    EmptyHorizon,
    #[error("planning horizon runs past the supported calendar ({0} months from the start)")]
    HorizonOutOfRange(u32),
    #[error("comparison needs at least {required} scenarios (got {found})")]
    TooFewScenarios { required: usize, found: usize },
    #[error("change #{index}: {source}")]
    Change {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

/// Failure modes of a simulation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid scenario: {0}")]
    Invalid(#[from] ValidationError),
    #[error("internal simulation error: {0}")]
    Internal(String),
}

/// Persistence and configuration failures.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("data schema v{found} is newer than supported v{supported}")]
    UnsupportedSchema { found: u8, supported: u8 },
    #[error("invalid configuration: {0}")]
    Config(String),
}
