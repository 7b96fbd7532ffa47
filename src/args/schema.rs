//! Option schemas: which flags a command recognizes and how they parse.

use crate::args::value::ArgValue;
use crate::command::CommandMetadata;

/// Value type of a declared option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    /// Takes a value, kept as a string (e.g., --env prod).
    String,
    /// Switch, never consumes the next token unless it is `true`/`false`.
    Boolean,
    /// Takes a value, coerced to a number when it parses as one.
    Number,
}

/// A single option as the parser sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    /// Canonical name, without dashes (e.g., "loglevel").
    pub name: String,
    pub kind: OptionType,
    /// Alternative names, without dashes (e.g., "h" for "help").
    pub aliases: Vec<String>,
    pub default: Option<ArgValue>,
}

impl OptionSpec {
    pub fn new(name: impl Into<String>, kind: OptionType) -> Self {
        Self {
            name: name.into(),
            kind,
            aliases: Vec::new(),
            default: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_default(mut self, default: ArgValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Check if this option answers to the given (dashless) key.
    pub fn matches(&self, key: &str) -> bool {
        self.name == key || self.aliases.iter().any(|a| a == key)
    }
}

/// Set of options recognized by one parse pass.
///
/// Never mutated once derived; the builder methods consume `self`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSchema {
    options: Vec<OptionSpec>,
}

impl OptionSchema {
    /// A schema with no options; every flag parses as undeclared.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Options understood by every command, including the coarse pass.
    pub fn global() -> Self {
        Self::empty()
            .with_option(OptionSpec::new("loglevel", OptionType::String))
            .with_option(OptionSpec::new("help", OptionType::Boolean).with_alias("h"))
    }

    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Append options from `other` whose names are not already declared.
    pub fn merged(mut self, other: OptionSchema) -> Self {
        for option in other.options {
            if self.find(&option.name).is_none() {
                self.options.push(option);
            }
        }
        self
    }

    /// Look up an option by name or alias.
    pub fn find(&self, key: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.matches(key))
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Convert a command's declared options into the schema its refined parse uses.
///
/// Global options are appended unless the command redeclares them.
pub fn derive_schema(metadata: &CommandMetadata) -> OptionSchema {
    let declared = metadata
        .options
        .iter()
        .fold(OptionSchema::empty(), |schema, option| {
            let mut spec = OptionSpec::new(option.name, option.kind);
            spec.aliases = option.aliases.iter().map(|a| a.to_string()).collect();
            spec.default = option.default.clone();
            schema.with_option(spec)
        });

    declared.merged(OptionSchema::global())
}
