//! Integration tests for argfill-core
//!
//! These tests verify that the core functionality works together correctly
//! by testing complete workflows end-to-end.

use argfill_core::{
    argument_bag::{ArgumentBag, OptionValue},
    config::get_config_path,
    error::{Error, Result},
    execution::build_command,
    file_handling::get_command_registry,
    registry::{CommandLookup, CommandRegistry},
    rendering::to_argv,
    resolver::{
        ArgumentResolver, Choice, ChoiceFilter, CustomValueProvider, PromptService,
        ValueRequest, DONE_VALUE,
    },
};
use std::collections::VecDeque;
use std::io::Write;
use tempfile::NamedTempFile;

const REGISTRY_YAML: &str = r#"
name: "ops"
description: "Operations toolbox"
commands:
  - name: "deploy"
    description: "Deploy a service"
    arguments:
      - name: "name"
        description: "Service to deploy"
    options:
      - long: "--env"
        short: "-e"
        description: "Target environment"
        mandatory: true
        choices: ["dev", "staging", "prod"]
      - long: "verbose"
        description: "Chatty output"
        boolean: true
  - name: "db"
    commands:
      - name: "migrate"
        arguments:
          - name: "database"
          - name: "version"
            required: false
"#;

fn write_registry(yaml_content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{yaml_content}").unwrap();
    temp_file
}

fn load_registry(yaml_content: &str) -> Result<CommandRegistry> {
    let temp_file = write_registry(yaml_content);
    let temp_path = temp_file.path().to_str().unwrap().to_string();
    get_command_registry(&temp_path).map(CommandRegistry::new)
}

fn path(segments: &[&str]) -> Vec<String> {
    segments.iter().map(ToString::to_string).collect()
}

/// Prompt service answering from a fixed script and recording every label.
#[derive(Default)]
struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
    labels: Vec<String>,
}

impl ScriptedPrompt {
    fn new(answers: &[Option<&str>]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.map(ToString::to_string)).collect(),
            labels: Vec::new(),
        }
    }
}

impl PromptService for ScriptedPrompt {
    fn ask_text(&mut self, label: &str, _initial: Option<&str>) -> Result<Option<String>> {
        self.labels.push(label.to_string());
        Ok(self.answers.pop_front().unwrap())
    }

    fn ask_single_choice(
        &mut self,
        label: &str,
        choices: &[Choice],
        filter: ChoiceFilter,
    ) -> Result<Option<String>> {
        self.labels.push(label.to_string());
        let answer = self.answers.pop_front().unwrap();
        // Every scripted answer must be reachable through the menu's own filter
        if let Some(value) = &answer {
            assert!(
                filter("", choices).iter().any(|c| &c.value == value),
                "`{value}` is not on the menu"
            );
        }
        Ok(answer)
    }
}

/// Test loading and parsing a complete command registry
#[test]
fn test_complete_registry_workflow() {
    let registry = load_registry(REGISTRY_YAML).unwrap();

    assert_eq!(registry.program_name(), "ops");
    assert_eq!(registry.program().commands.len(), 2);

    let deploy = registry.lookup(&path(&["deploy"])).unwrap();
    assert_eq!(deploy.to_string(), "deploy (Deploy a service)");
    assert_eq!(deploy.arguments.len(), 1);
    assert!(deploy.arguments[0].required);

    let env = &deploy.options[0];
    assert_eq!(env.key(), "env");
    assert!(env.mandatory);
    assert_eq!(
        env.choices,
        Some(vec!["dev".to_string(), "staging".to_string(), "prod".to_string()])
    );

    // Bare long names are normalised to flags
    let verbose = &deploy.options[1];
    assert_eq!(verbose.long.as_deref(), Some("--verbose"));
    assert!(verbose.is_boolean());

    let migrate = registry.lookup(&path(&["db", "migrate"])).unwrap();
    assert!(!migrate.arguments[1].required);

    assert!(matches!(
        registry.lookup(&path(&["db", "rollback"])),
        Err(Error::UnknownCommand(_))
    ));
}

/// Test error handling for invalid registries
#[test]
fn test_error_handling_workflow() {
    // Program without commands, arguments or options
    let result = load_registry("name: \"empty\"");
    assert!(matches!(result, Err(Error::EmptyRegistry { .. })));

    // Invalid YAML syntax
    let result = load_registry("invalid: yaml: [structure");
    assert!(matches!(result, Err(Error::Yaml { .. })));

    // Duplicate subcommand names
    let duplicate_yaml = r#"
name: "ops"
commands:
  - name: "deploy"
  - name: "deploy"
"#;
    assert!(matches!(
        load_registry(duplicate_yaml),
        Err(Error::NonUniqueCommandName(_, _))
    ));

    // Missing file
    let result = get_command_registry("/definitely/not/here/commands.yml");
    assert!(matches!(result, Err(Error::Io { .. })));
}

/// Test the interactive resolution from an empty bag to a finished one
#[test]
fn test_resolution_workflow() {
    let registry = load_registry(REGISTRY_YAML).unwrap();
    let mut prompts = ScriptedPrompt::new(&[
        Some("svc1"),
        Some("env"),
        Some("prod"),
        Some(DONE_VALUE),
    ]);
    let mut echo = Vec::new();

    let bag = ArgumentResolver::new(&registry, &mut prompts)
        .with_echo(&mut echo)
        .resolve(&path(&["deploy"]), ArgumentBag::new(), None)
        .unwrap();

    assert_eq!(bag.positionals(), ["svc1".to_string()]);
    assert_eq!(bag.get("env"), Some(&OptionValue::text("prod")));
    assert!(!bag.contains("verbose"));

    assert_eq!(
        prompts.labels,
        vec![
            "Enter name",
            "Choose option to edit",
            "Enter new value for --env",
            "Choose option to edit",
        ]
    );

    let echo = String::from_utf8(echo).unwrap();
    assert_eq!(echo, "> ops deploy svc1\n> ops deploy --env prod svc1\n");

    let command = build_command(registry.program_name(), &path(&["deploy"]), &bag);
    assert_eq!(command.get_args().count(), 4);
    assert_eq!(to_argv(&bag), vec!["--env", "prod", "svc1"]);
}

/// Test that values typed on the command line are picked up before prompting
#[test]
fn test_provided_arguments_workflow() {
    let registry = load_registry(REGISTRY_YAML)
        .unwrap()
        .with_provided(path(&["svc2", "-e", "dev", "--verbose"]));
    let command_path = path(&["deploy"]);

    let provided = registry.parse_provided(&command_path).unwrap();
    let mut prompts = ScriptedPrompt::new(&[Some(DONE_VALUE)]);

    let bag = ArgumentResolver::new(&registry, &mut prompts)
        .with_echo(std::io::sink())
        .resolve(&command_path, provided, None)
        .unwrap();

    assert_eq!(bag.positionals(), ["svc2".to_string()]);
    assert_eq!(bag.get("env"), Some(&OptionValue::text("dev")));
    assert_eq!(bag.get("verbose"), Some(&OptionValue::Flag(true)));
    assert_eq!(prompts.labels, vec!["Choose option to edit"]);
}

/// Test cancellation of a required positional aborts the whole resolution
#[test]
fn test_required_argument_cancel_workflow() {
    let registry = load_registry(REGISTRY_YAML).unwrap();
    let mut prompts = ScriptedPrompt::new(&[None]);

    let result = ArgumentResolver::new(&registry, &mut prompts)
        .with_echo(std::io::sink())
        .resolve(&path(&["db", "migrate"]), ArgumentBag::new(), None);

    match result {
        Err(error @ Error::RequiredArgumentMissing(_)) => {
            assert_eq!(error.to_string(), "database is required");
        }
        other => panic!("Expected RequiredArgumentMissing, got {other:?}"),
    }
}

/// Provider that asks its own follow-up question through the prompt service
struct ConfirmingProvider;

impl CustomValueProvider for ConfirmingProvider {
    fn provide(
        &self,
        request: &ValueRequest<'_>,
        prompts: &mut dyn PromptService,
    ) -> Result<Option<OptionValue>> {
        if request.option_name != "env" {
            return Ok(None);
        }

        let answer = prompts.ask_text(&format!("Custom {}", request.option_name), None)?;
        Ok(answer.map(OptionValue::Text))
    }
}

/// Test a custom provider that prompts on its own and defers for other options
#[test]
fn test_custom_provider_workflow() {
    let registry = load_registry(REGISTRY_YAML).unwrap();
    let mut prompts = ScriptedPrompt::new(&[
        Some("svc1"),
        Some("env"),
        Some("staging"),
        Some("verbose"),
        Some(DONE_VALUE),
    ]);

    let bag = ArgumentResolver::new(&registry, &mut prompts)
        .with_echo(std::io::sink())
        .resolve(&path(&["deploy"]), ArgumentBag::new(), Some(&ConfirmingProvider))
        .unwrap();

    assert_eq!(bag.get("env"), Some(&OptionValue::text("staging")));
    assert_eq!(bag.get("verbose"), Some(&OptionValue::Flag(true)));
    assert_eq!(prompts.labels[2], "Custom env");
}

/// Test configuration path resolution workflow
#[test]
fn test_configuration_path_workflow() {
    let default_config = get_config_path(&None);
    assert!(default_config.contains("commands.yml"));
    assert!(!default_config.starts_with('~')); // Should be expanded

    let custom_config = get_config_path(&Some("/custom/commands.yml".to_string()));
    assert_eq!(custom_config, "/custom/commands.yml");
}
