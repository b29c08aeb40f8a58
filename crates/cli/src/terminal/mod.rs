//! Terminal prompts for argfill.
//!
//! This module implements the [`PromptService`](argfill_core::resolver::PromptService)
//! the resolver talks to, on top of `crossterm`.
//!
//! # User Interface
//!
//! Text prompts:
//! - Type to edit the pre-filled value, `Ctrl-U` clears it
//! - Enter to accept, even when empty
//! - Escape or `Ctrl-C` to cancel
//!
//! Menus:
//! - Arrow keys, Tab or the mouse wheel to move the selection
//! - Typing to filter the entries
//! - Enter to pick the selected entry
//! - Escape or `Ctrl-C` to cancel
//! - The last echoed command line stays visible under the header

pub mod echo;
pub mod input;
pub mod types;
pub mod ui;

pub use ui::TerminalPrompt;
