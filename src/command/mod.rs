//! Command definitions and the command map.

mod map;

use async_trait::async_trait;

use crate::args::{ArgValue, OptionType};
use crate::context::ExecutionContext;

pub use map::CommandMap;

/// A declared positional input (for help output).
#[derive(Debug, Clone, PartialEq)]
pub struct CommandInput {
    pub name: &'static str,
    pub description: &'static str,
}

/// A declared flag/option.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOption {
    /// Name without dashes (e.g., "email").
    pub name: &'static str,
    pub description: &'static str,
    pub kind: OptionType,
    /// Alternative names without dashes (e.g., "e").
    pub aliases: &'static [&'static str],
    pub default: Option<ArgValue>,
}

impl CommandOption {
    pub fn new(name: &'static str, description: &'static str, kind: OptionType) -> Self {
        Self {
            name,
            description,
            kind,
            aliases: &[],
            default: None,
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_default(mut self, default: impl Into<ArgValue>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Static description of a command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandMetadata {
    /// Space-separated for namespaced commands (e.g., "config set").
    pub name: &'static str,
    pub description: &'static str,
    pub aliases: &'static [&'static str],
    pub inputs: Vec<CommandInput>,
    pub options: Vec<CommandOption>,
}

impl CommandMetadata {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            aliases: &[],
            inputs: Vec::new(),
            options: Vec::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_input(mut self, name: &'static str, description: &'static str) -> Self {
        self.inputs.push(CommandInput { name, description });
        self
    }

    pub fn with_option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }
}

/// An executable command.
///
/// Implementations read everything they need from the context; errors are
/// reported by the orchestrator and never escape it.
#[async_trait]
pub trait Command: Send + Sync {
    fn metadata(&self) -> &CommandMetadata;

    async fn execute(&self, ctx: &ExecutionContext) -> anyhow::Result<()>;
}
