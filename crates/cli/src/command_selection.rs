//! Interactive selection of the command to resolve.
//!
//! When no command path is given on the command line the operator walks the
//! command tree one menu at a time, searching each level with fuzzy matching.

use std::cmp::Reverse;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use itertools::Itertools;
use log::debug;

use argfill_core::command_definitions::CommandDefinition;
use argfill_core::error::Result;
use argfill_core::resolver::{Choice, PromptService};

/// Value of the menu entry that stops descending and resolves the current command.
pub const RUN_VALUE: &str = "[run]";

const COMMAND_MENU_LABEL: &str = "Choose command";

/// Keeps the entries whose title fuzzy matches `input`, best matches first.
///
/// Entries that score the same keep their menu order.
#[must_use]
pub fn fuzzy_filter<'c>(input: &str, choices: &'c [Choice]) -> Vec<&'c Choice> {
    if input.is_empty() {
        return choices.iter().collect();
    }

    let matcher = SkimMatcherV2::default();

    choices
        .iter()
        .filter_map(|choice| {
            matcher
                .fuzzy_match(&choice.title, input)
                .map(|score| (score, choice))
        })
        .sorted_by_key(|(score, _)| Reverse(*score))
        .map(|(_, choice)| choice)
        .collect()
}

/// A command can be resolved on its own when it declares arguments or options.
fn is_runnable(command: &CommandDefinition) -> bool {
    !command.arguments.is_empty() || !command.options.is_empty()
}

/// Usage followed by the description, skipping whichever is missing.
fn command_hint(command: &CommandDefinition) -> Option<String> {
    let usage = command.usage();
    let hint = [Some(usage.as_str()), command.description.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .join("  ");

    (!hint.is_empty()).then_some(hint)
}

fn command_choices(command: &CommandDefinition) -> Vec<Choice> {
    let run = is_runnable(command).then(|| {
        Choice::new(
            format!("[Run {}]", command.name),
            RUN_VALUE,
            command_hint(command),
        )
    });

    let subcommands = command
        .commands
        .iter()
        .map(|sub| Choice::new(sub.name.clone(), sub.name.clone(), command_hint(sub)));

    run.into_iter().chain(subcommands).collect()
}

/// Walks down from `program` until a leaf command or a `[Run ...]` entry is chosen.
///
/// Returns `Ok(None)` if the operator cancels any of the menus.
///
/// # Errors
///
/// Returns an error if prompting fails.
pub fn select_command_path(
    program: &CommandDefinition,
    prompts: &mut dyn PromptService,
) -> Result<Option<Vec<String>>> {
    let mut path: Vec<String> = Vec::new();
    let mut command = program;

    while command.has_subcommands() {
        let choices = command_choices(command);

        let Some(selected) = prompts.ask_single_choice(COMMAND_MENU_LABEL, &choices, fuzzy_filter)?
        else {
            return Ok(None);
        };

        if selected == RUN_VALUE {
            break;
        }

        // Menu values always come from `command.commands`
        let Some(subcommand) = command.subcommand(&selected) else {
            continue;
        };

        debug!("Descending into {subcommand}");
        path.push(selected);
        command = subcommand;
    }

    debug!("Selected command path `{}`", path.iter().join(" "));
    Ok(Some(path))
}
