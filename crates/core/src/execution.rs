use std::process::{Command, Stdio};

use log::info;

use crate::argument_bag::ArgumentBag;
use crate::error::{Error, Result};
use crate::rendering::to_argv;

/// Builds the process for `program`, its command path and the resolved arguments.
#[must_use]
pub fn build_command(program: &str, command_path: &[String], bag: &ArgumentBag) -> Command {
    let mut command = Command::new(program);
    command.args(command_path).args(to_argv(bag));
    command
}

/// Executes a command with inherited stdio.
///
/// # Errors
///
/// Returns an error if command execution fails or exits with non-zero status.
pub fn execute_command(mut command: Command) -> Result<()> {
    let command = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    info!("Executing {:?}", command);

    let subprocess_exit_success = command.spawn()?.wait()?.success();

    if subprocess_exit_success {
        Ok(())
    } else {
        Err(Error::SubProcessExit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument_bag::OptionValue;

    #[test]
    fn test_build_command_arguments() {
        let mut bag = ArgumentBag::with_positionals(vec!["svc1".to_string()]);
        bag.set("env", OptionValue::text("prod"));
        bag.set("verbose", OptionValue::Flag(true));

        let command = build_command("ops", &["deploy".to_string()], &bag);

        assert_eq!(command.get_program(), "ops");
        let args: Vec<&str> = command
            .get_args()
            .map(|arg| arg.to_str().unwrap())
            .collect();
        assert_eq!(args, vec!["deploy", "--env", "prod", "--verbose", "svc1"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_command_reports_failure() {
        assert!(execute_command(Command::new("true")).is_ok());
        assert!(matches!(
            execute_command(Command::new("false")),
            Err(Error::SubProcessExit)
        ));
    }
}
