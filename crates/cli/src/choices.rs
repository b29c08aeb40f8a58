use log::debug;

use argfill_core::argument_bag::OptionValue;
use argfill_core::error::Result;
use argfill_core::registry::CommandLookup;
use argfill_core::resolver::{Choice, CustomValueProvider, PromptService, ValueRequest};

use crate::command_selection::fuzzy_filter;

/// Offers an option's declared `choices` as a menu instead of free text.
///
/// Options without choices, and a cancelled menu, defer to the resolver's
/// own handling.
pub struct ChoicesProvider<'a> {
    commands: &'a dyn CommandLookup,
}

impl<'a> ChoicesProvider<'a> {
    #[must_use]
    pub fn new(commands: &'a dyn CommandLookup) -> Self {
        Self { commands }
    }
}

impl CustomValueProvider for ChoicesProvider<'_> {
    fn provide(
        &self,
        request: &ValueRequest<'_>,
        prompts: &mut dyn PromptService,
    ) -> Result<Option<OptionValue>> {
        let command = self.commands.lookup(request.command_path)?;
        let Some(option) = command.find_option(request.option_name) else {
            return Ok(None);
        };

        let allowed = match option.choices.as_deref() {
            Some(allowed) if !allowed.is_empty() => allowed,
            _ => return Ok(None),
        };

        let choices: Vec<Choice> = allowed
            .iter()
            .map(|value| Choice::new(value.clone(), value.clone(), None))
            .collect();

        let label = format!("Choose value for {}", option.flag());
        let answer = prompts.ask_single_choice(&label, &choices, fuzzy_filter)?;

        if answer.is_none() {
            debug!("No choice made for `{}`, deferring", request.option_name);
        }

        Ok(answer.map(OptionValue::Text))
    }
}
