//! Built-in commands.

mod help;
mod login;
mod version;

pub use help::HelpCommand;
pub use login::LoginCommand;
pub use version::VersionCommand;

use crate::command::CommandMap;

/// The command map the `ionic` binary runs with.
pub fn get_commands() -> CommandMap {
    CommandMap::new()
        .with(HelpCommand::new())
        .with(VersionCommand::new())
        .with(LoginCommand::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::DEFAULT_COMMAND;

    #[test]
    fn default_command_is_registered() {
        let commands = get_commands();
        assert!(commands.contains(DEFAULT_COMMAND));
        assert_eq!(commands.names().collect::<Vec<_>>(), vec!["help", "login", "version"]);
    }
}
