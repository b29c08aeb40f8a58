//! Argfill Core Library
//!
//! This crate provides the core functionality for argfill, an interactive
//! completion layer for command-line programs. Given a command definition and
//! whatever arguments were already supplied, it prompts the operator until
//! every required positional argument and mandatory option is filled in.
//!
//! # Key Features
//!
//! - **Command Registry**: Load and validate YAML-based command trees
//! - **Argument Bags**: Ordered option values plus positional arguments
//! - **Resolution Loop**: Prompt-driven completion of a bag against its command
//! - **Rendering**: Turn a resolved bag back into `--flag value` tokens
//! - **Error Handling**: Comprehensive error types for all failure modes
//!
//! # Examples
//!
//! Loading a registry and looking up a command:
//!
//! ```no_run
//! use argfill_core::file_handling::get_command_registry;
//! use argfill_core::registry::{CommandLookup, CommandRegistry};
//!
//! let program = get_command_registry("commands.yml")?;
//! let registry = CommandRegistry::new(program);
//! let deploy = registry.lookup(&["deploy".to_string()])?;
//! println!("Command: {}", deploy);
//! # Ok::<(), argfill_core::error::Error>(())
//! ```

pub mod argument_bag;
pub mod command_definitions;
pub mod config;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod registry;
pub mod rendering;
pub mod resolver;
