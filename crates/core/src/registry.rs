//! Command lookup by path, and the ambient parse of arguments that were
//! already supplied on the command line.

use log::debug;

use crate::argument_bag::{ArgumentBag, OptionValue};
use crate::command_definitions::CommandDefinition;
use crate::error::{Error, Result};

/// Read access to the command tree the resolver works against.
pub trait CommandLookup {
    /// Name of the program the command paths are rooted at.
    fn program_name(&self) -> &str;

    /// Finds the command at `path`. The empty path is the program itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCommand`] if a segment of `path` does not exist.
    fn lookup(&self, path: &[String]) -> Result<&CommandDefinition>;

    /// Positional values already supplied for the command at `path`.
    fn positional_args_only(&self, path: &[String]) -> Vec<String>;
}

pub struct CommandRegistry {
    program: CommandDefinition,
    provided: Vec<String>,
}

impl CommandRegistry {
    #[must_use]
    pub fn new(program: CommandDefinition) -> Self {
        Self {
            program,
            provided: Vec::new(),
        }
    }

    /// Attaches the raw tokens typed after the command path.
    #[must_use]
    pub fn with_provided(mut self, provided: Vec<String>) -> Self {
        self.provided = provided;
        self
    }

    #[must_use]
    pub fn program(&self) -> &CommandDefinition {
        &self.program
    }

    /// Builds a bag holding every option and positional found in the provided tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCommand`] if `path` does not exist.
    pub fn parse_provided(&self, path: &[String]) -> Result<ArgumentBag> {
        let command = self.lookup(path)?;
        Ok(parse_tokens(command, &self.provided))
    }
}

impl CommandLookup for CommandRegistry {
    fn program_name(&self) -> &str {
        &self.program.name
    }

    fn lookup(&self, path: &[String]) -> Result<&CommandDefinition> {
        path.iter().try_fold(&self.program, |command, segment| {
            command
                .subcommand(segment)
                .ok_or_else(|| Error::unknown_command(path))
        })
    }

    fn positional_args_only(&self, path: &[String]) -> Vec<String> {
        match self.lookup(path) {
            Ok(command) => parse_tokens(command, &self.provided)
                .positionals
                .unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }
}

/// Splits raw tokens into options and positionals for `command`.
///
/// `--key=value`, `--key value` and boolean `--flag` forms are recognised, as
/// are short forms. `--` ends option parsing. Flags the command does not
/// declare are kept as text options when followed by `=value`, and as
/// boolean flags otherwise. A lone `-` and negative numbers such as `-5` are
/// positionals unless the command declares them as a flag.
#[must_use]
pub fn parse_tokens(command: &CommandDefinition, tokens: &[String]) -> ArgumentBag {
    let mut bag = ArgumentBag::with_positionals(Vec::new());
    let mut tokens = tokens.iter();
    let mut options_ended = false;

    while let Some(token) = tokens.next() {
        let is_flag = looks_like_flag(token) || command.find_option_by_flag(token).is_some();
        if options_ended || !is_flag {
            bag.push_positional(token.clone());
            continue;
        }

        if token == "--" {
            options_ended = true;
            continue;
        }

        let (flag, inline_value) = match token.split_once('=') {
            Some((flag, value)) => (flag, Some(value.to_string())),
            None => (token.as_str(), None),
        };

        let Some(option) = command.find_option_by_flag(flag) else {
            debug!("Provided flag `{flag}` is not declared on `{}`", command.name);
            let key = flag.trim_start_matches('-').to_string();
            let value = inline_value.map_or(OptionValue::Flag(true), OptionValue::Text);
            bag.set(key, value);
            continue;
        };

        let value = if option.is_boolean() {
            match inline_value.as_deref() {
                Some("false") => OptionValue::Flag(false),
                _ => OptionValue::Flag(true),
            }
        } else {
            match inline_value.or_else(|| tokens.next().cloned()) {
                Some(value) => OptionValue::Text(value),
                None => OptionValue::Unset,
            }
        };

        bag.set(option.key(), value);
    }

    bag
}

fn looks_like_flag(token: &str) -> bool {
    token
        .strip_prefix('-')
        .is_some_and(|rest| !rest.is_empty() && !rest.starts_with(|c: char| c.is_ascii_digit()))
}
