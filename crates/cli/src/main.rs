use clap::Parser;
use itertools::Itertools;
use log::{debug, info};
use std::process::ExitCode;

use argfill_cli::choices::ChoicesProvider;
use argfill_cli::cli_args::Args;
use argfill_cli::command_selection::select_command_path;
use argfill_cli::terminal::TerminalPrompt;
use argfill_core::error::{Error, Result};
use argfill_core::registry::{CommandLookup, CommandRegistry};
use argfill_core::rendering::{command_line, ShellRenderer};
use argfill_core::resolver::ArgumentResolver;
use argfill_core::{config, execution, file_handling};

/// Load the command registry and attach the arguments given after `--`
fn initialize_registry(args: &Args) -> Result<CommandRegistry> {
    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{}`", config_path);

    let program = file_handling::get_command_registry(&config_path)?;
    Ok(CommandRegistry::new(program).with_provided(args.provided_arguments.clone()))
}

/// Determine which command to resolve, asking the operator if none was given
fn determine_command_path(
    args: &Args,
    registry: &CommandRegistry,
    prompts: &mut TerminalPrompt,
) -> Result<Option<Vec<String>>> {
    if !args.command_path.is_empty() {
        return Ok(Some(args.command_path.clone()));
    }

    select_command_path(registry.program(), prompts)
}

fn execute() -> Result<()> {
    let args = Args::parse();

    let registry = initialize_registry(&args)?;
    let mut prompts = TerminalPrompt::new();

    let Some(command_path) = determine_command_path(&args, &registry, &mut prompts)? else {
        info!("No command selected");
        return Ok(());
    };
    debug!("Resolving `{}`", command_path.iter().join(" "));

    let provided = registry.parse_provided(&command_path)?;
    let provider = ChoicesProvider::new(&registry);

    let echo = prompts.echo();

    let resolved = match ArgumentResolver::new(&registry, &mut prompts)
        .with_echo(echo)
        .resolve(&command_path, provided, Some(&provider))
    {
        Ok(bag) => bag,
        Err(Error::Cancelled) => {
            // Cancelling the option menu is an expected way out
            info!("Option editing cancelled");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    println!(
        "{}",
        command_line(&ShellRenderer, registry.program_name(), &command_path, &resolved)
    );

    if !args.should_execute() {
        return Ok(());
    }

    let command = execution::build_command(registry.program_name(), &command_path, &resolved);
    execution::execute_command(command)
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
