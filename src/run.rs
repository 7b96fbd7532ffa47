//! Top-level orchestration of one CLI invocation.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use scopeguard::ScopeGuard;

use crate::args::{coarse_parse, derive_schema, refine};
use crate::command::CommandMap;
use crate::commands::get_commands;
use crate::config::{ConfigError, ConfigStore};
use crate::context::CollaboratorsBuilder;
use crate::error::{classify, codes, ClassifiedError, RunError};
use crate::logging::{init_tracing, parse_level, Logger};
use crate::phase::{PhaseLog, RunPhase};
use crate::prompt::{Prompter, StdinPrompter};
use crate::tasks::TaskRegistry;

/// Command used when the positional tokens name no registered command.
pub const DEFAULT_COMMAND: &str = "help";

/// What happened during a run that reached the end of the state machine.
#[derive(Debug)]
pub struct RunOutcome {
    pub command: String,
    pub error: Option<ClassifiedError>,
    /// Final config save failed. Only reported when `error` is `None`.
    pub save_error: Option<ConfigError>,
    pub phases: PhaseLog,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.save_error.is_none()
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            codes::SUCCESS
        } else {
            codes::FAILURE
        }
    }

    pub fn phases(&self) -> &[RunPhase] {
        self.phases.history()
    }
}

/// Runs commands from a [`CommandMap`] against the process arguments.
pub struct Runner {
    commands: Arc<CommandMap>,
    tasks: TaskRegistry,
    prompt: Arc<dyn Prompter>,
    project_dir: PathBuf,
    default_command: String,
}

impl Runner {
    pub fn new(commands: CommandMap) -> Self {
        Self {
            commands: Arc::new(commands),
            tasks: TaskRegistry::new(),
            prompt: Arc::new(StdinPrompter),
            project_dir: PathBuf::from("."),
            default_command: DEFAULT_COMMAND.to_string(),
        }
    }

    pub fn with_tasks(mut self, tasks: TaskRegistry) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_prompt(mut self, prompt: Arc<dyn Prompter>) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = dir.into();
        self
    }

    pub fn with_default_command(mut self, name: impl Into<String>) -> Self {
        self.default_command = name.into();
        self
    }

    pub fn tasks(&self) -> &TaskRegistry {
        &self.tasks
    }

    /// Run one invocation.
    ///
    /// `raw_args` excludes the program name. Command errors are classified,
    /// reported on stderr and returned inside the [`RunOutcome`]. A failed
    /// final save is also kept in the outcome; it is reported only when the
    /// command itself succeeded, so each run prints at most one error. Load,
    /// client and missing-default failures come back as [`RunError`].
    pub async fn run(
        &self,
        raw_args: &[String],
        env: &HashMap<String, String>,
    ) -> Result<RunOutcome, RunError> {
        let mut phases = PhaseLog::new();

        let coarse = coarse_parse(raw_args);
        let level = parse_level(coarse.get_str("loglevel"));
        init_tracing(level);
        let log = Logger::new(level);

        let config = ConfigStore::from_env(env);
        config.load().await?;
        phases.advance(RunPhase::ConfigLoaded);

        let collaborators = CollaboratorsBuilder::new(
            config.clone(),
            Arc::clone(&self.commands),
            log,
            Arc::clone(&self.prompt),
        )
        .with_tasks(self.tasks.clone())
        .with_project_dir(self.project_dir.clone())
        .build()?;
        phases.advance(RunPhase::CollaboratorsReady);

        let (inputs, resolved) = match self.commands.resolve(coarse.positional()) {
            // `<command> --help` describes the command through the default one
            (_, Some(command)) if coarse.get_bool("help") == Some(true) => {
                let words = command.metadata().name.split_whitespace();
                (words.map(str::to_string).collect(), None)
            }
            resolution => resolution,
        };
        phases.advance(RunPhase::ArgsResolved);

        let command = resolved
            .or_else(|| self.commands.get(&self.default_command))
            .ok_or_else(|| RunError::MissingDefaultCommand {
                name: self.default_command.clone(),
            })?;
        let name = command.metadata().name.to_string();
        tracing::debug!(command = %name, inputs = ?inputs, "Command resolved");
        phases.advance(RunPhase::CommandResolved);

        let mut argv = refine(raw_args, &derive_schema(command.metadata()));
        argv.set_positional(inputs);
        let ctx = collaborators.context(argv);

        phases.advance(RunPhase::Executing);
        let result = {
            // Cleanup still runs if the command panics
            let guard = scopeguard::guard_on_unwind(self.tasks.clone(), |tasks| {
                tasks.cleanup_all();
            });
            let result = command.execute(&ctx).await;
            ScopeGuard::into_inner(guard);
            result
        };
        phases.advance(if result.is_ok() {
            RunPhase::Succeeded
        } else {
            RunPhase::Failed
        });

        self.tasks.cleanup_all();
        phases.advance(RunPhase::CleanedUp);

        let error = result.err().map(classify);
        if let Some(error) = &error {
            error.report();
        }

        let save_error = match config.save().await {
            Ok(()) => {
                phases.advance(RunPhase::ConfigSaved);
                None
            }
            Err(e) => {
                if error.is_some() {
                    tracing::warn!(error = %e, "Config save failed after command error");
                } else {
                    eprintln!("Error: Configuration error: {}", e);
                }
                Some(e)
            }
        };
        phases.advance(RunPhase::Done);

        Ok(RunOutcome {
            command: name,
            error,
            save_error,
            phases,
        })
    }
}

/// Run the built-in commands and return the process exit code.
pub async fn run(raw_args: &[String], env: &HashMap<String, String>) -> i32 {
    let runner = Runner::new(get_commands());
    match runner.run(raw_args, env).await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}
