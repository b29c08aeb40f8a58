//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the
//! `clap` crate.

use clap::Parser;

/// Command-line arguments for the argfill CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use argfill_cli::cli_args::Args;
///
/// let args = Args::parse_from(["argfill", "deploy", "--", "svc1", "--env", "prod"]);
/// assert_eq!(args.command_path, vec!["deploy"]);
/// assert_eq!(args.provided_arguments, vec!["svc1", "--env", "prod"]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the command registry YAML.
    ///
    /// If not provided, defaults to `~/.argfill/commands.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Run the resolved command once all arguments are filled in.
    ///
    /// Without this flag the resolved command line is only printed.
    #[arg(long, short = 'x', action)]
    pub execute: bool,

    /// Perform a dry run, which prints the resolved command but never executes it.
    ///
    /// Takes precedence over `--execute`.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    /// Path of the command to resolve, one segment per subcommand.
    ///
    /// If not provided, the command is chosen interactively.
    pub command_path: Vec<String>,

    /// Arguments already known for the command, given after `--`.
    ///
    /// These are parsed against the command's options and positionals and
    /// pre-fill the interactive session.
    ///
    /// # Examples
    /// ```bash
    /// argfill deploy -- svc1 --env prod
    /// ```
    #[arg(last = true)]
    pub provided_arguments: Vec<String>,
}

impl Args {
    /// Whether the resolved command should actually be run.
    #[must_use]
    pub fn should_execute(&self) -> bool {
        self.execute && !self.dry_run
    }
}
