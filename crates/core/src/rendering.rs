//! Rendering of argument bags back into command-line tokens.
//!
//! The rendered form is a display aid: values are neither escaped nor quoted.

use crate::argument_bag::{ArgumentBag, OptionValue};

/// Something that can turn a bag into a single display string.
pub trait OptionsRenderer {
    fn render(&self, bag: &ArgumentBag, positionals: &[String]) -> String;
}

/// Renders bags the way they would be typed in a shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRenderer;

impl OptionsRenderer for ShellRenderer {
    fn render(&self, bag: &ArgumentBag, positionals: &[String]) -> String {
        stringify_options(bag, positionals)
    }
}

fn flag_tokens(bag: &ArgumentBag) -> Vec<String> {
    bag.options
        .iter()
        .flat_map(|(key, value)| match value {
            OptionValue::Flag(true) => vec![format!("--{key}")],
            OptionValue::Flag(false) | OptionValue::Unset => vec![],
            OptionValue::Text(text) => vec![format!("--{key}"), text.clone()],
        })
        .collect()
}

/// Joins the flag tokens of `bag`, in key order, followed by `positionals`.
///
/// ```
/// use argfill_core::argument_bag::{ArgumentBag, OptionValue};
/// use argfill_core::rendering::stringify_options;
///
/// let mut bag = ArgumentBag::new();
/// bag.set("a", OptionValue::Flag(true));
/// bag.set("c", OptionValue::text("x"));
/// assert_eq!(stringify_options(&bag, &["p1".to_string()]), "--a --c x p1");
/// ```
#[must_use]
pub fn stringify_options(bag: &ArgumentBag, positionals: &[String]) -> String {
    let mut tokens = flag_tokens(bag);
    tokens.extend(positionals.iter().cloned());
    tokens.join(" ")
}

/// The bag's own flags and positionals as separate process arguments.
#[must_use]
pub fn to_argv(bag: &ArgumentBag) -> Vec<String> {
    let mut argv = flag_tokens(bag);
    argv.extend(bag.positionals().iter().cloned());
    argv
}

/// The echo line shown to the operator before each option menu.
#[must_use]
pub fn command_line(
    renderer: &dyn OptionsRenderer,
    program: &str,
    command_path: &[String],
    bag: &ArgumentBag,
) -> String {
    let segments: Vec<&str> = std::iter::once(program)
        .chain(command_path.iter().map(String::as_str))
        .filter(|segment| !segment.is_empty())
        .collect();

    format!(
        "> {} {}",
        segments.join(" "),
        renderer.render(bag, bag.positionals())
    )
}
