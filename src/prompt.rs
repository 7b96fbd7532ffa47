//! Interactive prompts available to commands via `ctx.modules.prompt`.

use std::io::{self, BufRead, Write};

/// Asks the user questions.
pub trait Prompter: Send + Sync {
    /// Free-text answer, trimmed.
    fn input(&self, message: &str) -> io::Result<String>;

    /// Yes/no answer; an empty answer picks `default`.
    fn confirm(&self, message: &str, default: bool) -> io::Result<bool>;
}

/// Prompts on stderr and reads answers from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn input(&self, message: &str) -> io::Result<String> {
        let mut stderr = io::stderr();
        write!(stderr, "{} ", message)?;
        stderr.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn confirm(&self, message: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let answer = self.input(&format!("{} {}", message, hint))?;
        Ok(parse_confirm(&answer, default))
    }
}

pub(crate) fn parse_confirm(answer: &str, default: bool) -> bool {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    }
}
