//! Shared test utilities and fake commands.

#![allow(dead_code, unused_imports)]

pub mod mock_api;

use async_trait::async_trait;
use ionic::args::{OptionType, ParsedArgs};
use ionic::client::ApiError;
use ionic::command::{Command, CommandMap, CommandMetadata, CommandOption};
use ionic::config::CONFIG_DIRECTORY_ENV;
use ionic::context::ExecutionContext;
use ionic::prompt::Prompter;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// A config directory that disappears with the test.
pub struct TestEnv {
    pub dir: TempDir,
    pub env: HashMap<String, String>,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut env = HashMap::new();
        env.insert(
            CONFIG_DIRECTORY_ENV.to_string(),
            dir.path().to_string_lossy().into_owned(),
        );
        Self { dir, env }
    }

    /// Write a config file pointing `urls.api` at `api`.
    pub fn with_api(self, api: &str) -> Self {
        std::fs::write(
            self.config_path(),
            format!("[urls]\napi = \"{}\"\n", api),
        )
        .expect("Failed to write config");
        self
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn config_text(&self) -> Option<String> {
        std::fs::read_to_string(self.config_path()).ok()
    }
}

pub fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|s| s.to_string()).collect()
}

// -- Fake commands ------------------------------------------------------------

/// What a fake command does when executed.
#[derive(Clone)]
pub enum Behavior {
    Succeed,
    FailGeneric(&'static str),
    FailApi(Value),
    /// Start a task, track a background job on it, and leave it running.
    LeaveTaskRunning,
    /// Start a task and leave it running, then fail.
    LeaveTaskRunningAndFail,
    /// `GET /apps` through the client, failing on any non-2xx status.
    FetchApps,
    /// Start a task that records whether `config_path` exists when cleared.
    ObserveCleanup {
        config_path: PathBuf,
        seen: Arc<Mutex<Option<bool>>>,
    },
    Panic,
}

/// Records the refined args of every execution.
pub struct FakeCommand {
    metadata: CommandMetadata,
    behavior: Behavior,
    pub seen: Arc<Mutex<Vec<ParsedArgs>>>,
}

impl FakeCommand {
    pub fn new(metadata: CommandMetadata, behavior: Behavior) -> Self {
        Self {
            metadata,
            behavior,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn named(name: &'static str, behavior: Behavior) -> Self {
        Self::new(CommandMetadata::new(name, "fake"), behavior)
    }

    /// `deploy` with a `--env/-e` string option.
    pub fn deploy() -> Self {
        Self::new(
            CommandMetadata::new("deploy", "Deploy the app")
                .with_input("app", "App to deploy")
                .with_option(
                    CommandOption::new("env", "Target environment", OptionType::String)
                        .with_aliases(&["e"]),
                ),
            Behavior::Succeed,
        )
    }

    pub fn seen(&self) -> Arc<Mutex<Vec<ParsedArgs>>> {
        Arc::clone(&self.seen)
    }
}

#[async_trait]
impl Command for FakeCommand {
    fn metadata(&self) -> &CommandMetadata {
        &self.metadata
    }

    async fn execute(&self, ctx: &ExecutionContext) -> anyhow::Result<()> {
        self.seen.lock().push(ctx.argv.clone());

        match &self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::FailGeneric(message) => Err(anyhow::anyhow!(*message)),
            Behavior::FailApi(response) => {
                Err(ApiError::new("API request failed", response.clone()).into())
            }
            Behavior::LeaveTaskRunning => {
                let task = ctx.tasks.create("Uploading");
                task.start();
                let job = tokio::spawn(async {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                });
                task.track(job.abort_handle());
                Ok(())
            }
            Behavior::LeaveTaskRunningAndFail => {
                ctx.tasks.create("Building").start();
                Err(anyhow::anyhow!("build broke"))
            }
            Behavior::FetchApps => {
                ctx.client
                    .make(reqwest::Method::GET, "/apps")
                    .send()
                    .await?
                    .error_for_status()?;
                Ok(())
            }
            Behavior::ObserveCleanup { config_path, seen } => {
                let config_path = config_path.clone();
                let seen = Arc::clone(seen);
                ctx.tasks
                    .create("Watching")
                    .start()
                    .on_clear(move || *seen.lock() = Some(config_path.exists()));
                Ok(())
            }
            Behavior::Panic => {
                ctx.tasks.create("Doomed").start();
                panic!("command exploded");
            }
        }
    }
}

/// Help-like default command that records what it was given.
pub fn fake_help() -> FakeCommand {
    FakeCommand::named("help", Behavior::Succeed)
}

// -- Prompter -----------------------------------------------------------------

/// Answers prompts from a script and records the questions.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    pub asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|s| s.to_string()).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, message: &str) -> std::io::Result<String> {
        self.asked.lock().push(message.to_string());
        self.answers.lock().pop_front().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "no scripted answer")
        })
    }

    fn confirm(&self, message: &str, default: bool) -> std::io::Result<bool> {
        let answer = self.input(message)?;
        Ok(match answer.as_str() {
            "" => default,
            a => a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes"),
        })
    }
}
