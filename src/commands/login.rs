use anyhow::{bail, Context};
use async_trait::async_trait;

use crate::args::OptionType;
use crate::command::{Command, CommandMetadata, CommandOption};
use crate::context::ExecutionContext;
use crate::tasks::TaskChain;

pub struct LoginCommand {
    metadata: CommandMetadata,
}

impl LoginCommand {
    pub fn new() -> Self {
        Self {
            metadata: CommandMetadata::new("login", "Log in to your Ionic account")
                .with_option(
                    CommandOption::new("email", "Your email address", OptionType::String)
                        .with_aliases(&["e"]),
                )
                .with_option(
                    CommandOption::new("password", "Your password", OptionType::String)
                        .with_aliases(&["p"]),
                ),
        }
    }
}

impl Default for LoginCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// Value of a string option, or the prompter's answer when it is absent.
fn option_or_prompt(ctx: &ExecutionContext, name: &str, question: &str) -> anyhow::Result<String> {
    let value = match ctx.argv.get_str(name) {
        Some(value) => value.to_string(),
        None => ctx
            .modules
            .prompt
            .input(question)
            .with_context(|| format!("Failed to read {}", name))?,
    };

    if value.is_empty() {
        bail!("Missing {}", name);
    }
    Ok(value)
}

#[async_trait]
impl Command for LoginCommand {
    fn metadata(&self) -> &CommandMetadata {
        &self.metadata
    }

    async fn execute(&self, ctx: &ExecutionContext) -> anyhow::Result<()> {
        let email = option_or_prompt(ctx, "email", "Email:")?;
        let password = option_or_prompt(ctx, "password", "Password:")?;

        let mut chain = TaskChain::new(ctx.tasks.clone());
        chain.next("Logging in");

        match ctx.session.login(&email, &password).await {
            Ok(()) => {
                chain.end();
                ctx.log.msg("Successfully logged in.");
                Ok(())
            }
            Err(e) => {
                chain.fail();
                Err(e.into())
            }
        }
    }
}
