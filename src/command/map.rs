use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::command::Command;

/// Registered commands keyed by name, with an alias index.
#[derive(Clone, Default)]
pub struct CommandMap {
    commands: BTreeMap<String, Arc<dyn Command>>,
    aliases: HashMap<String, String>,
    /// Longest registered name, in words.
    max_words: usize,
}

impl CommandMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its name and aliases. A later registration
    /// with the same name replaces the earlier one.
    pub fn register(&mut self, command: impl Command + 'static) -> &mut Self {
        self.insert(Arc::new(command));
        self
    }

    /// Builder form of [`CommandMap::register`].
    pub fn with(mut self, command: impl Command + 'static) -> Self {
        self.insert(Arc::new(command));
        self
    }

    fn insert(&mut self, command: Arc<dyn Command>) {
        let metadata = command.metadata();
        let name = metadata.name.to_string();
        for alias in metadata.aliases {
            self.aliases.insert(alias.to_string(), name.clone());
        }
        self.max_words = self.max_words.max(word_count(&name));
        for alias in metadata.aliases {
            self.max_words = self.max_words.max(word_count(alias));
        }
        self.commands.insert(name, command);
    }

    /// Look up a command by name or alias.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        let canonical = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        self.commands.get(canonical).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Registered commands, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Map positional tokens to a command plus the inputs left for it.
    ///
    /// The longest token prefix naming a registered command (or alias) wins
    /// and only that prefix is consumed. With no match nothing is consumed
    /// and the command is `None`.
    pub fn resolve(&self, tokens: &[String]) -> (Vec<String>, Option<Arc<dyn Command>>) {
        let longest = self.max_words.min(tokens.len());

        for width in (1..=longest).rev() {
            let candidate = tokens[..width].join(" ");
            if let Some(command) = self.get(&candidate) {
                return (tokens[width..].to_vec(), Some(command));
            }
        }

        (tokens.to_vec(), None)
    }
}

fn word_count(name: &str) -> usize {
    name.split_whitespace().count()
}
