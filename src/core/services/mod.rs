pub mod budget_service;
pub mod scenario_service;

pub use budget_service::BudgetService;
pub use scenario_service::ScenarioService;

use crate::errors::{SimulationError, ValidationError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests;
