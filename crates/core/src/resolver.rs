//! Interactive resolution of a command's arguments.
//!
//! [`ArgumentResolver::resolve`] keeps prompting until every required
//! positional argument is filled and the operator picks `[Done]`, which is
//! only offered once every mandatory option is present in the bag.
//!
//! Each pass of the loop re-checks the positionals first, then echoes the
//! current command line and offers the option menu. Prompting goes through
//! the [`PromptService`] trait so the loop can be driven by a script in tests.

use std::io::{stdout, Write};

use log::{debug, info};

use crate::argument_bag::{ArgumentBag, OptionValue};
use crate::command_definitions::{ArgumentDefinition, CommandDefinition, OptionDefinition};
use crate::error::{Error, Result};
use crate::registry::CommandLookup;
use crate::rendering::{command_line, OptionsRenderer, ShellRenderer};

/// Value of the synthetic menu entry that finishes resolution.
///
/// The brackets keep it apart from option keys, so an option named `--done`
/// stays editable. The registry loader rejects an option keyed like this.
pub const DONE_VALUE: &str = "[done]";

const OPTION_MENU_LABEL: &str = "Choose option to edit";

/// One entry of a single-choice menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub title: String,
    pub value: String,
    pub hint: Option<String>,
}

impl Choice {
    pub fn new(title: impl Into<String>, value: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            hint,
        }
    }
}

/// Narrows a menu down to the entries matching what the operator typed so far.
pub type ChoiceFilter = for<'c> fn(&str, &'c [Choice]) -> Vec<&'c Choice>;

/// Asks the operator questions. `Ok(None)` means the prompt was cancelled.
pub trait PromptService {
    /// Asks for free text, optionally pre-filled with `initial`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    fn ask_text(&mut self, label: &str, initial: Option<&str>) -> Result<Option<String>>;

    /// Asks the operator to pick one of `choices`, returning its `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    fn ask_single_choice(
        &mut self,
        label: &str,
        choices: &[Choice],
        filter: ChoiceFilter,
    ) -> Result<Option<String>>;
}

/// What a [`CustomValueProvider`] is asked to supply.
#[derive(Debug, Clone, Copy)]
pub struct ValueRequest<'a> {
    pub command_path: &'a [String],
    pub option_name: &'a str,
}

/// Supplies option values out of band. `Ok(None)` defers to the default handling.
pub trait CustomValueProvider {
    /// # Errors
    ///
    /// Returns an error if the provider's own prompting fails.
    fn provide(
        &self,
        request: &ValueRequest<'_>,
        prompts: &mut dyn PromptService,
    ) -> Result<Option<OptionValue>>;
}

/// Matches entries whose title, or title without its leading `--`, starts with `input`.
#[must_use]
pub fn filter_choices<'c>(input: &str, choices: &'c [Choice]) -> Vec<&'c Choice> {
    choices
        .iter()
        .filter(|choice| {
            let bare = choice.title.strip_prefix("--").unwrap_or(&choice.title);
            choice.title.starts_with(input) || bare.starts_with(input)
        })
        .collect()
}

enum Step {
    Continue,
    Done,
}

pub struct ArgumentResolver<'a> {
    commands: &'a dyn CommandLookup,
    prompts: &'a mut dyn PromptService,
    renderer: Box<dyn OptionsRenderer + 'a>,
    echo: Box<dyn Write + 'a>,
}

impl<'a> ArgumentResolver<'a> {
    /// A resolver that renders with [`ShellRenderer`] and echoes to stdout.
    pub fn new(commands: &'a dyn CommandLookup, prompts: &'a mut dyn PromptService) -> Self {
        Self {
            commands,
            prompts,
            renderer: Box::new(ShellRenderer),
            echo: Box::new(stdout()),
        }
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: impl OptionsRenderer + 'a) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    #[must_use]
    pub fn with_echo(mut self, echo: impl Write + 'a) -> Self {
        self.echo = Box::new(echo);
        self
    }

    /// Prompts until `bag` satisfies the command at `command_path`, then returns it.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownCommand`] if `command_path` does not exist.
    /// - [`Error::RequiredArgumentMissing`] if a required positional prompt is cancelled.
    /// - [`Error::Cancelled`] if the option menu is cancelled.
    pub fn resolve(
        &mut self,
        command_path: &[String],
        mut bag: ArgumentBag,
        provider: Option<&dyn CustomValueProvider>,
    ) -> Result<ArgumentBag> {
        let commands = self.commands;
        let command = commands.lookup(command_path)?;

        if bag.positionals.is_none() {
            bag.positionals = Some(commands.positional_args_only(command_path));
        }

        loop {
            match self.step(command, command_path, &mut bag, provider)? {
                Step::Continue => {}
                Step::Done => {
                    info!("Resolved arguments for `{}`", command.name);
                    return Ok(bag);
                }
            }
        }
    }

    fn step(
        &mut self,
        command: &CommandDefinition,
        command_path: &[String],
        bag: &mut ArgumentBag,
        provider: Option<&dyn CustomValueProvider>,
    ) -> Result<Step> {
        if let Some(missing) = next_missing_positional(command, bag) {
            debug!("Prompting for positional argument `{}`", missing.name);
            let label = format!("Enter {}", missing.name);

            return match self.prompts.ask_text(&label, None)? {
                Some(answer) => {
                    bag.push_positional(answer);
                    Ok(Step::Continue)
                }
                None => Err(Error::RequiredArgumentMissing(missing.name.clone())),
            };
        }

        if command.options.is_empty() {
            return Ok(Step::Done);
        }

        let echo_line = command_line(
            self.renderer.as_ref(),
            self.commands.program_name(),
            command_path,
            bag,
        );
        writeln!(self.echo, "{echo_line}")?;

        let ready = has_mandatory_options(command, bag);
        let choices = option_choices(command, bag, ready);

        let Some(selected) =
            self.prompts
                .ask_single_choice(OPTION_MENU_LABEL, &choices, filter_choices)?
        else {
            return Err(Error::Cancelled);
        };

        if ready && selected == DONE_VALUE {
            return Ok(Step::Done);
        }

        let option = command
            .find_option(&selected)
            .ok_or_else(|| Error::Misc(format!("Selected an undeclared option: `{selected}`")))?;

        self.acquire_value(command_path, option, bag, provider)?;
        Ok(Step::Continue)
    }

    fn acquire_value(
        &mut self,
        command_path: &[String],
        option: &OptionDefinition,
        bag: &mut ArgumentBag,
        provider: Option<&dyn CustomValueProvider>,
    ) -> Result<()> {
        let key = option.key();

        if let Some(provider) = provider {
            let request = ValueRequest {
                command_path,
                option_name: &key,
            };

            if let Some(value) = provider
                .provide(&request, &mut *self.prompts)?
                .filter(is_usable)
            {
                debug!("Custom value provider supplied `{key}`");
                bag.set(key, value);
                return Ok(());
            }
        }

        if option.is_boolean() {
            let toggled = !matches!(bag.get(&key), Some(OptionValue::Flag(true)));
            bag.set(key, OptionValue::Flag(toggled));
            return Ok(());
        }

        let label = format!("Enter new value for {}", option.flag());
        let initial = bag.get(&key).and_then(OptionValue::as_initial_text);
        let value = self
            .prompts
            .ask_text(&label, initial.as_deref())?
            .map_or(OptionValue::Unset, OptionValue::Text);

        bag.set(key, value);
        Ok(())
    }
}

/// The first required positional whose slot is not filled yet.
fn next_missing_positional<'c>(
    command: &'c CommandDefinition,
    bag: &ArgumentBag,
) -> Option<&'c ArgumentDefinition> {
    let filled = bag.positionals().len();

    command
        .arguments
        .iter()
        .enumerate()
        .find(|(i, argument)| argument.required && *i >= filled)
        .map(|(_, argument)| argument)
}

fn has_mandatory_options(command: &CommandDefinition, bag: &ArgumentBag) -> bool {
    command
        .options
        .iter()
        .filter(|option| option.mandatory)
        .all(|option| bag.contains(&option.key()))
}

fn option_choices(command: &CommandDefinition, bag: &ArgumentBag, ready: bool) -> Vec<Choice> {
    let done = ready.then(|| {
        Choice::new(
            "[Done]",
            DONE_VALUE,
            Some("Done editing options".to_string()),
        )
    });

    let options = command.options.iter().map(|option| {
        let key = option.key();
        let marker = if option.mandatory { "*" } else { "" };
        let hint = match bag.get(&key) {
            Some(value) => Some(format!("[{value}]")),
            None => option.description.clone(),
        };

        Choice::new(format!("{}{marker}", option.flag()), key, hint)
    });

    done.into_iter().chain(options).collect()
}

fn is_usable(value: &OptionValue) -> bool {
    match value {
        OptionValue::Flag(flag) => *flag,
        OptionValue::Text(text) => !text.is_empty(),
        OptionValue::Unset => false,
    }
}
