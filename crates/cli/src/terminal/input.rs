//! Key handling for the terminal prompts.
//!
//! Everything here is free of terminal I/O so it can be tested directly:
//! a key event and the current state go in, an action comes out.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::types::CycleDirection::{Down, Up};
use super::types::{CycleDirection, MenuAction, MenuState, TextAction};

fn is_interrupt(key_event: &KeyEvent) -> bool {
    key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL)
}

/// A plain or shifted character. Chords with Ctrl or Alt are not text.
fn is_typed_char(key_event: &KeyEvent) -> bool {
    matches!(key_event.code, KeyCode::Char(_))
        && (KeyModifiers::SHIFT | KeyModifiers::NONE).contains(key_event.modifiers)
}

/// Handle keyboard events in a single-choice menu
#[must_use]
pub fn handle_menu_key(key_event: KeyEvent, state: &MenuState, entry_count: usize) -> MenuAction {
    if key_event.kind == KeyEventKind::Release {
        return MenuAction::None;
    }

    if is_interrupt(&key_event) {
        return MenuAction::Cancel;
    }

    match key_event.code {
        KeyCode::Up | KeyCode::BackTab => MenuAction::Cycle(Up),
        KeyCode::Down | KeyCode::Tab => MenuAction::Cycle(Down),
        KeyCode::Enter => {
            if state.selected_index < entry_count {
                MenuAction::Select(state.selected_index)
            } else {
                MenuAction::None
            }
        }
        KeyCode::Esc => MenuAction::Cancel,
        KeyCode::Backspace => {
            if state.filter_text.is_empty() {
                return MenuAction::None;
            }

            let mut updated_state = state.clone();
            updated_state.filter_text.pop();
            MenuAction::Update(reset_selection(updated_state))
        }
        KeyCode::Char(c) if is_typed_char(&key_event) => {
            let mut updated_state = state.clone();
            updated_state.filter_text.push(c);
            MenuAction::Update(reset_selection(updated_state))
        }
        _ => MenuAction::None,
    }
}

/// A changed filter can shrink the list, so start again from the top.
fn reset_selection(mut state: MenuState) -> MenuState {
    state.selected_index = 0;
    state.viewport.offset = 0;
    state
}

/// Handle keyboard events in a free text prompt
#[must_use]
pub fn handle_text_key(key_event: KeyEvent, buffer: &str) -> TextAction {
    if key_event.kind == KeyEventKind::Release {
        return TextAction::None;
    }

    if is_interrupt(&key_event) {
        return TextAction::Cancel;
    }

    match key_event.code {
        KeyCode::Enter => TextAction::Submit(buffer.to_string()),
        KeyCode::Esc => TextAction::Cancel,
        KeyCode::Backspace => {
            let mut updated = buffer.to_string();
            if updated.pop().is_some() {
                TextAction::Update(updated)
            } else {
                TextAction::None
            }
        }
        KeyCode::Char('u') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            if buffer.is_empty() {
                TextAction::None
            } else {
                TextAction::Update(String::new())
            }
        }
        KeyCode::Char(c) if is_typed_char(&key_event) => {
            TextAction::Update(format!("{buffer}{c}"))
        }
        _ => TextAction::None,
    }
}

/// Move the selected index in the given direction, wrapping at either end
#[must_use]
pub fn move_selected_index(
    state: &MenuState,
    entry_count: usize,
    direction: CycleDirection,
) -> MenuState {
    if entry_count == 0 {
        return state.clone();
    }

    let mut new_index = state.selected_index;
    let mut state = state.clone();
    let height = usize::from(state.viewport.height.max(1));

    match direction {
        Up => {
            if new_index == 0 {
                new_index = entry_count - 1;
                state.viewport.offset = new_index.saturating_sub(height - 1);
            } else {
                new_index -= 1;
                if new_index < state.viewport.offset {
                    state.viewport.offset = new_index;
                }
            }
        }
        Down => {
            new_index = (new_index + 1) % entry_count;
            if new_index < state.selected_index {
                state.viewport.offset = 0;
            } else if new_index >= state.viewport.offset + height {
                state.viewport.offset = new_index - height + 1;
            }
        }
    }

    state.selected_index = new_index;
    state
}
