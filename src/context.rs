//! Execution context handed to a command.

use std::path::PathBuf;
use std::sync::Arc;

use crate::args::ParsedArgs;
use crate::client::{Client, ClientError};
use crate::command::CommandMap;
use crate::config::ConfigStore;
use crate::logging::Logger;
use crate::project::Project;
use crate::prompt::Prompter;
use crate::session::Session;
use crate::tasks::TaskRegistry;

/// Auxiliary facilities for commands.
#[derive(Clone)]
pub struct Modules {
    pub prompt: Arc<dyn Prompter>,
}

/// Read-only bundle handed to exactly one command execution.
#[derive(Clone)]
pub struct ExecutionContext {
    pub argv: ParsedArgs,
    pub commands: Arc<CommandMap>,
    pub client: Client,
    pub config: ConfigStore,
    pub log: Logger,
    pub modules: Modules,
    pub project: Project,
    pub session: Session,
    pub tasks: TaskRegistry,
}

/// Collaborators built once config is loaded, before the command is known.
#[derive(Clone)]
pub struct Collaborators {
    pub commands: Arc<CommandMap>,
    pub client: Client,
    pub config: ConfigStore,
    pub log: Logger,
    pub modules: Modules,
    pub project: Project,
    pub session: Session,
    pub tasks: TaskRegistry,
}

/// Builder for [`Collaborators`].
///
/// `build` constructs the client from the store's current `urls.api`, so the
/// store must already be loaded.
pub struct CollaboratorsBuilder {
    config: ConfigStore,
    commands: Arc<CommandMap>,
    log: Logger,
    tasks: TaskRegistry,
    prompt: Arc<dyn Prompter>,
    project_dir: PathBuf,
}

impl CollaboratorsBuilder {
    pub fn new(
        config: ConfigStore,
        commands: Arc<CommandMap>,
        log: Logger,
        prompt: Arc<dyn Prompter>,
    ) -> Self {
        Self {
            config,
            commands,
            log,
            tasks: TaskRegistry::new(),
            prompt,
            project_dir: PathBuf::from("."),
        }
    }

    pub fn with_tasks(mut self, tasks: TaskRegistry) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = dir.into();
        self
    }

    pub fn build(self) -> Result<Collaborators, ClientError> {
        let client = Client::new(&self.config.get().urls.api)?;
        let session = Session::new(self.config.clone(), client.clone());

        Ok(Collaborators {
            commands: self.commands,
            client,
            config: self.config,
            log: self.log,
            modules: Modules {
                prompt: self.prompt,
            },
            project: Project::new(self.project_dir),
            session,
            tasks: self.tasks,
        })
    }
}

impl Collaborators {
    /// Aggregate the collaborators with the refined arguments.
    pub fn context(&self, argv: ParsedArgs) -> ExecutionContext {
        ExecutionContext {
            argv,
            commands: Arc::clone(&self.commands),
            client: self.client.clone(),
            config: self.config.clone(),
            log: self.log,
            modules: self.modules.clone(),
            project: self.project.clone(),
            session: self.session.clone(),
            tasks: self.tasks.clone(),
        }
    }
}
