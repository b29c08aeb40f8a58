use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

fn default_required() -> bool {
    true
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ArgumentDefinition {
    pub name: String,
    #[serde(default = "default_required")]
    pub required: bool,
    pub description: Option<String>,
}

impl Display for ArgumentDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.required {
            write!(formatter, "<{}>", self.name)
        } else {
            write!(formatter, "[{}]", self.name)
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct OptionDefinition {
    pub long: Option<String>,
    pub short: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub boolean: bool,
    pub choices: Option<Vec<String>>,
}

impl OptionDefinition {
    /// The flag as it is typed on the command line, preferring the long form.
    #[must_use]
    pub fn flag(&self) -> &str {
        self.long
            .as_deref()
            .or(self.short.as_deref())
            .unwrap_or_default()
    }

    /// The key this option is stored under in an argument bag.
    #[must_use]
    pub fn key(&self) -> String {
        option_key(self.long.as_deref(), self.short.as_deref())
    }

    #[must_use]
    pub fn is_boolean(&self) -> bool {
        self.boolean
    }

    /// Whether `token` (with any `=value` suffix already removed) names this option.
    #[must_use]
    pub fn matches_flag(&self, token: &str) -> bool {
        self.long.as_deref() == Some(token) || self.short.as_deref() == Some(token)
    }
}

/// Strips the leading dashes off the long form, or the short form when there is no long one.
///
/// ```
/// use argfill_core::command_definitions::option_key;
///
/// assert_eq!(option_key(Some("--env"), Some("-e")), "env");
/// assert_eq!(option_key(None, Some("-v")), "v");
/// ```
#[must_use]
pub fn option_key(long: Option<&str>, short: Option<&str>) -> String {
    match (long, short) {
        (Some(long), _) => long.strip_prefix("--").unwrap_or(long).to_string(),
        (None, Some(short)) => short.strip_prefix('-').unwrap_or(short).to_string(),
        (None, None) => String::new(),
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CommandDefinition {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub arguments: Vec<ArgumentDefinition>,
    #[serde(default)]
    pub options: Vec<OptionDefinition>,
    #[serde(default)]
    pub commands: Vec<CommandDefinition>,
}

impl CommandDefinition {
    #[must_use]
    pub fn subcommand(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.iter().find(|command| command.name == name)
    }

    #[must_use]
    pub fn find_option(&self, key: &str) -> Option<&OptionDefinition> {
        self.options.iter().find(|option| option.key() == key)
    }

    #[must_use]
    pub fn find_option_by_flag(&self, flag: &str) -> Option<&OptionDefinition> {
        self.options.iter().find(|option| option.matches_flag(flag))
    }

    #[must_use]
    pub fn has_subcommands(&self) -> bool {
        !self.commands.is_empty()
    }

    /// The positional arguments in usage form, e.g. `<database> [version]`.
    #[must_use]
    pub fn usage(&self) -> String {
        self.arguments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Display for CommandDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(desc) => write!(formatter, "{} ({})", self.name, desc),
            None => formatter.write_str(&self.name),
        }
    }
}
