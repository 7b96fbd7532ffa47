use async_trait::async_trait;

use crate::command::{Command, CommandMetadata};
use crate::context::ExecutionContext;

pub struct VersionCommand {
    metadata: CommandMetadata,
}

impl VersionCommand {
    pub fn new() -> Self {
        Self {
            metadata: CommandMetadata::new("version", "Returns the current CLI version"),
        }
    }
}

impl Default for VersionCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for VersionCommand {
    fn metadata(&self) -> &CommandMetadata {
        &self.metadata
    }

    async fn execute(&self, ctx: &ExecutionContext) -> anyhow::Result<()> {
        ctx.log.msg(env!("CARGO_PKG_VERSION"));
        Ok(())
    }
}
