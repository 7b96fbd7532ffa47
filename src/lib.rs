pub mod args;
pub mod client;
pub mod command;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod phase;
pub mod project;
pub mod prompt;
pub mod run;
pub mod session;
pub mod tasks;

pub use command::{Command, CommandMap, CommandMetadata};
pub use context::ExecutionContext;
pub use error::{classify, ClassifiedError, RunError};
pub use run::{run, RunOutcome, Runner};
