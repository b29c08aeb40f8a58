//! Type definitions for the terminal prompts.
//!
//! This module defines the state the menu and text prompts keep between key
//! presses, and the outcomes a key press can lead to.

/// Direction to cycle through menu entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// State for the menu viewport.
///
/// Tracks the visible portion of the entry list when there are more
/// entries than can fit on screen.
#[derive(Clone, PartialEq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

/// Complete state of a single-choice menu.
#[derive(Clone, PartialEq, Debug)]
pub struct MenuState {
    /// Index into the filtered entries
    pub selected_index: usize,
    /// Viewport state for scrolling
    pub viewport: ViewportState,
    /// What the operator has typed so far
    pub filter_text: String,
}

impl MenuState {
    #[must_use]
    pub fn new(viewport: ViewportState) -> Self {
        Self {
            selected_index: 0,
            viewport,
            filter_text: String::new(),
        }
    }
}

/// What a key press did to a single-choice menu.
#[derive(Clone, PartialEq, Debug)]
pub enum MenuAction {
    /// Nothing to do, the key is ignored
    None,
    /// The state changed and needs redrawing
    Update(MenuState),
    /// Move the selection
    Cycle(CycleDirection),
    /// Pick the entry at this filtered index
    Select(usize),
    Cancel,
}

/// What a key press did to a text prompt.
#[derive(Clone, PartialEq, Debug)]
pub enum TextAction {
    None,
    Update(String),
    Submit(String),
    Cancel,
}
