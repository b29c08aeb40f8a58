//! Argfill CLI Library
//!
//! This crate provides the command-line interface for argfill. It loads a
//! command registry, lets the operator pick a command, and drives the
//! interactive resolution of that command's arguments in the terminal.
//!
//! # Key Features
//!
//! - **Interactive Command Selection**: Fuzzy searchable menus over the command tree
//! - **Terminal Prompts**: Inline text input and filterable single-choice menus
//! - **Declared Choices**: Options with a fixed set of values are picked from a menu
//! - **Execution**: Optionally run the resolved command
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`terminal`]: The `crossterm` backed prompt service
//! - [`command_selection`]: Interactive walk down the command tree
//! - [`choices`]: Custom value provider for options with declared choices
//!
//! # Examples
//!
//! ```bash
//! # Interactive mode - choose the command from a menu
//! argfill
//!
//! # Resolve a known command, pre-filling what is already known
//! argfill deploy -- svc1 --env prod
//!
//! # Resolve and run it
//! argfill --execute deploy
//!
//! # Use another registry
//! argfill -c ./commands.yml db migrate
//! ```

pub mod choices;
pub mod cli_args;
pub mod command_selection;
pub mod terminal;
