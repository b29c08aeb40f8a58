//! Loading and validation of the command registry YAML.
//!
//! The registry file holds a single program definition whose `commands`
//! nest to any depth. Flags are normalised on load so `long: env` and
//! `long: --env` mean the same thing.

use std::collections::HashSet;
use std::fs::File;

use log::debug;

use crate::command_definitions::CommandDefinition;
use crate::error::Error::{
    EmptyName, NameWithSpace, NonUniqueCommandName, NonUniqueOptionKey, RequiredAfterOptional,
    ReservedOptionKey, UnnamedOption,
};
use crate::error::{Error, Result};
use crate::resolver::DONE_VALUE;

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    match File::open(path) {
        Ok(reader) => Ok(reader),
        Err(e) => Err(Error::io_error(
            file_description.to_string(),
            path.to_string(),
            e,
        )),
    }
}

/// Reads the program definition from the registry file at `path`.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file contains invalid YAML or does not match the expected structure
/// - The program declares no commands, arguments or options
/// - Any name, subcommand or option fails validation
pub fn get_command_registry(path: &str) -> Result<CommandDefinition> {
    let reader = get_reader("command registry", path)?;

    let mut program: CommandDefinition = serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "command registry".to_string(),
            path.to_string(),
            e,
        )
    })?;

    if program.commands.is_empty() && program.arguments.is_empty() && program.options.is_empty() {
        return Err(Error::empty_registry(path.to_string()));
    }

    normalize_flags(&mut program);
    validate_command(&program, &[])?;

    debug!(
        "Loaded `{}` with {} top level commands",
        program.name,
        program.commands.len()
    );

    Ok(program)
}

fn normalize_flags(command: &mut CommandDefinition) {
    for option in &mut command.options {
        if let Some(long) = option.long.as_mut() {
            if !long.starts_with("--") {
                *long = format!("--{}", long.trim_start_matches('-'));
            }
        }
        if let Some(short) = option.short.as_mut() {
            if !short.starts_with('-') {
                *short = format!("-{short}");
            }
        }
    }

    for subcommand in &mut command.commands {
        normalize_flags(subcommand);
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(EmptyName);
    }

    if name.contains(' ') {
        return Err(NameWithSpace(name.to_string()));
    }

    Ok(())
}

fn validate_command(command: &CommandDefinition, parent_path: &[&str]) -> Result<()> {
    let path: Vec<&str> = parent_path
        .iter()
        .copied()
        .chain(std::iter::once(command.name.as_str()))
        .collect();
    let display_path = path.join(" ");

    let mut option_keys = HashSet::new();
    for option in &command.options {
        if option.long.is_none() && option.short.is_none() {
            return Err(UnnamedOption(display_path));
        }

        let key = option.key();
        validate_name(&key)?;
        if key == DONE_VALUE {
            return Err(ReservedOptionKey(display_path, key));
        }
        if !option_keys.insert(key.clone()) {
            return Err(NonUniqueOptionKey(display_path, key));
        }
    }

    let mut seen_optional = false;
    for argument in &command.arguments {
        validate_name(&argument.name)?;
        if argument.required && seen_optional {
            return Err(RequiredAfterOptional(display_path, argument.name.clone()));
        }
        seen_optional |= !argument.required;
    }

    let mut command_names = HashSet::new();
    for subcommand in &command.commands {
        validate_name(&subcommand.name)?;
        if !command_names.insert(subcommand.name.as_str()) {
            return Err(NonUniqueCommandName(
                display_path,
                subcommand.name.clone(),
            ));
        }
        validate_command(subcommand, &path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_definitions::{ArgumentDefinition, OptionDefinition};

    fn command(name: &str) -> CommandDefinition {
        CommandDefinition {
            name: name.to_string(),
            description: None,
            arguments: vec![],
            options: vec![],
            commands: vec![],
        }
    }

    fn long_option(long: &str) -> OptionDefinition {
        OptionDefinition {
            long: Some(long.to_string()),
            ..OptionDefinition::default()
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("deploy").is_ok());
        assert!(matches!(validate_name(""), Err(EmptyName)));
        assert!(matches!(validate_name("two words"), Err(NameWithSpace(_))));
    }

    #[test]
    fn test_normalize_flags() {
        let mut program = command("ops");
        program.options = vec![
            long_option("env"),
            long_option("--tag"),
            OptionDefinition {
                short: Some("v".to_string()),
                ..OptionDefinition::default()
            },
        ];
        program.commands = vec![command("deploy")];
        program.commands[0].options = vec![long_option("-region")];

        normalize_flags(&mut program);

        assert_eq!(program.options[0].long.as_deref(), Some("--env"));
        assert_eq!(program.options[1].long.as_deref(), Some("--tag"));
        assert_eq!(program.options[2].short.as_deref(), Some("-v"));
        assert_eq!(program.commands[0].options[0].long.as_deref(), Some("--region"));
    }

    #[test]
    fn test_duplicate_option_key() {
        let mut program = command("ops");
        program.options = vec![long_option("--env"), long_option("--env")];

        match validate_command(&program, &[]) {
            Err(NonUniqueOptionKey(path, key)) => {
                assert_eq!(path, "ops");
                assert_eq!(key, "env");
            }
            other => panic!("Expected NonUniqueOptionKey, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_subcommand_name_reports_path() {
        let mut deploy = command("deploy");
        deploy.commands = vec![command("web"), command("web")];
        let mut program = command("ops");
        program.commands = vec![deploy];

        match validate_command(&program, &[]) {
            Err(NonUniqueCommandName(path, name)) => {
                assert_eq!(path, "ops deploy");
                assert_eq!(name, "web");
            }
            other => panic!("Expected NonUniqueCommandName, got {other:?}"),
        }
    }

    #[test]
    fn test_reserved_option_key() {
        let mut program = command("ops");
        program.options = vec![long_option(&format!("--{DONE_VALUE}"))];

        match validate_command(&program, &[]) {
            Err(ReservedOptionKey(path, key)) => {
                assert_eq!(path, "ops");
                assert_eq!(key, DONE_VALUE);
            }
            other => panic!("Expected ReservedOptionKey, got {other:?}"),
        }
    }

    #[test]
    fn test_option_named_done_is_accepted() {
        let mut program = command("ops");
        program.options = vec![long_option("--done")];
        assert!(validate_command(&program, &[]).is_ok());
    }

    #[test]
    fn test_unnamed_option() {
        let mut program = command("ops");
        program.options = vec![OptionDefinition::default()];
        assert!(matches!(
            validate_command(&program, &[]),
            Err(UnnamedOption(_))
        ));
    }

    #[test]
    fn test_required_after_optional() {
        let mut program = command("ops");
        program.arguments = vec![
            ArgumentDefinition {
                name: "first".to_string(),
                required: false,
                description: None,
            },
            ArgumentDefinition {
                name: "second".to_string(),
                required: true,
                description: None,
            },
        ];

        assert!(matches!(
            validate_command(&program, &[]),
            Err(RequiredAfterOptional(_, name)) if name == "second"
        ));
    }
}
