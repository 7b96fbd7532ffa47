use std::fmt::Write;

use anyhow::bail;
use async_trait::async_trait;

use crate::args::{ArgValue, OptionSchema, OptionType};
use crate::command::{Command, CommandMap, CommandMetadata, CommandOption};
use crate::context::ExecutionContext;

pub struct HelpCommand {
    metadata: CommandMetadata,
}

impl HelpCommand {
    pub fn new() -> Self {
        Self {
            metadata: CommandMetadata::new("help", "Provides help for a given command")
                .with_input("command", "The command to get help for"),
        }
    }
}

impl Default for HelpCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for HelpCommand {
    fn metadata(&self) -> &CommandMetadata {
        &self.metadata
    }

    async fn execute(&self, ctx: &ExecutionContext) -> anyhow::Result<()> {
        let inputs = ctx.argv.positional();
        if inputs.is_empty() {
            ctx.log.msg(&render_command_list(&ctx.commands));
            return Ok(());
        }

        match ctx.commands.resolve(inputs) {
            (rest, Some(command)) if rest.is_empty() => {
                ctx.log.msg(&render_command(command.metadata()));
                Ok(())
            }
            _ => bail!("Unable to find command: {}", inputs.join(" ")),
        }
    }
}

pub(crate) fn render_command_list(commands: &CommandMap) -> String {
    let width = commands.names().map(str::len).max().unwrap_or(0);

    let mut out = String::from("Usage: ionic <command> [inputs] [options]\n\nCommands:\n");
    for command in commands.iter() {
        let metadata = command.metadata();
        let _ = writeln!(out, "  {:width$}  {}", metadata.name, metadata.description);
    }

    out.push_str("\nGlobal options:\n");
    for option in OptionSchema::global().options() {
        let _ = writeln!(out, "  --{}", option.name);
    }
    out.push_str("\nRun `ionic help <command>` for details on a command.");
    out
}

pub(crate) fn render_command(metadata: &CommandMetadata) -> String {
    let mut out = format!("ionic {} - {}\n", metadata.name, metadata.description);

    if !metadata.aliases.is_empty() {
        let _ = writeln!(out, "\n  Aliases: {}", metadata.aliases.join(", "));
    }

    if !metadata.inputs.is_empty() {
        out.push_str("\n  Inputs:\n");
        for input in &metadata.inputs {
            let _ = writeln!(out, "    {:12}  {}", input.name, input.description);
        }
    }

    if !metadata.options.is_empty() {
        out.push_str("\n  Options:\n");
        for option in &metadata.options {
            let _ = writeln!(out, "    {:24}  {}", option_usage(option), option_detail(option));
        }
    }

    out.truncate(out.trim_end().len());
    out
}

fn option_usage(option: &CommandOption) -> String {
    let mut usage = format!("--{}", option.name);
    for alias in option.aliases {
        let dashes = if alias.len() == 1 { "-" } else { "--" };
        let _ = write!(usage, ", {}{}", dashes, alias);
    }
    match option.kind {
        OptionType::String => usage.push_str(" <string>"),
        OptionType::Number => usage.push_str(" <number>"),
        OptionType::Boolean => {}
    }
    usage
}

fn option_detail(option: &CommandOption) -> String {
    match option.default.as_ref().and_then(default_text) {
        Some(default) => format!("{} (default: {})", option.description, default),
        None => option.description.to_string(),
    }
}

fn default_text(value: &ArgValue) -> Option<String> {
    match value {
        ArgValue::String(s) => Some(s.clone()),
        ArgValue::Bool(b) => Some(b.to_string()),
        ArgValue::Number(n) => Some(n.to_string()),
        ArgValue::List(_) => None,
    }
}
