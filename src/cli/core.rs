//! Shell context, dispatch, and the error types shared by command handlers.

use std::{io, path::PathBuf};

use strsim::levenshtein;
use tracing::debug;

use crate::{
    config::{Config, ConfigManager},
    core::services::{ScenarioService, ServiceError},
    errors::{PlannerError, SimulationError},
    horizon::{Month, PlanningHorizon},
    scenario::Scenario,
    simulation::{format_amount, RiskClassifier, SimulationResult, Simulator},
    storage::{JsonStorage, PlannerData},
};

use super::change_spec;
use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};

const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub storage: JsonStorage,
    pub config: Config,
    pub horizon: PlanningHorizon,
    pub classifier: RiskClassifier,
    pub data: PlannerData,
    /// Most recent simulation, kept for `export` without re-running.
    pub last_result: Option<SimulationResult>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::open(mode, None)
    }

    /// Opens the planner rooted at `base`, or the default data home.
    pub fn open(mode: CliMode, base: Option<PathBuf>) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = match &base {
            Some(dir) => ConfigManager::with_base_dir(dir.clone())?,
            None => ConfigManager::new()?,
        };
        let config = config_manager.load()?;
        let horizon = config.horizon()?;
        let classifier = config.classifier()?;
        let storage = JsonStorage::new(base, Some(config.backup_retention))?;
        let data = storage.load()?;
        debug!(
            base = %storage.base_dir().display(),
            scenarios = data.scenarios.len(),
            "planner data loaded"
        );

        Ok(ShellContext {
            mode,
            registry,
            storage,
            config,
            horizon,
            classifier,
            data,
            last_result: None,
            running: true,
        })
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        format!("planner ({} scenarios)> ", self.data.scenarios.len())
    }

    /// Writes the planner data to disk after a mutation. Any cached
    /// simulation was computed against the previous data and is dropped.
    pub(crate) fn persist(&mut self) -> CommandResult {
        self.last_result = None;
        self.data.touch();
        self.storage.save(&self.data)?;
        Ok(())
    }

    pub(crate) fn simulator(&self) -> Simulator<'_> {
        Simulator::new(&self.data, &self.data, &self.horizon)
            .with_classifier(self.classifier)
            .with_currency(self.config.currency_symbol.clone())
    }

    pub(crate) fn month(&self, label: &str) -> Month {
        change_spec::month(&self.horizon, label)
    }

    pub(crate) fn find_scenario(&self, key: &str) -> Result<Scenario, CommandError> {
        Ok(ScenarioService::find(&self.data, key)?.clone())
    }

    pub(crate) fn money(&self, amount: f64) -> String {
        format_amount(amount, &self.config.currency_symbol)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let raw = &tokens[0];
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, raw, &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &input.to_lowercase()), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= SUGGESTION_DISTANCE {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(prompt, false)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            other => cli_io::print_error(other.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error("Command failed: {0}")]
    Command(String),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Simulation(err) => CommandError::Simulation(err),
            ServiceError::Validation(err) => CommandError::InvalidArguments(err.to_string()),
            ServiceError::NotFound(what) => CommandError::Message(format!("{} not found", what)),
            ServiceError::Invalid(message) => CommandError::Message(message),
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

/// Runs `lines` against a script-mode context rooted at `base`.
#[cfg(test)]
pub(crate) fn process_script(base: PathBuf, lines: &[&str]) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::open(CliMode::Script, Some(base))?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err),
        }
    }
    Ok(app)
}
