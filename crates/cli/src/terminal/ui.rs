use std::io::{stdout, Stdout, Write};
use std::rc::Rc;
use std::time::Duration;

use crossterm::cursor::{MoveTo, MoveToColumn};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind};
use crossterm::style::Color::{DarkBlue, DarkGreen, DarkGrey, Reset, Yellow};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, event, queue, terminal, ExecutableCommand};
use log::debug;

use argfill_core::error::Result;
use argfill_core::resolver::{Choice, ChoiceFilter, PromptService};

use super::echo::{ContextEcho, EchoContext};
use super::input::{handle_menu_key, handle_text_key, move_selected_index};
use super::types::CycleDirection::{Down, Up};
use super::types::{MenuAction, MenuState, TextAction, ViewportState};

/// Rows taken by the header and filter lines of a menu, before any echo line
const MENU_CHROME_ROWS: u16 = 2;

struct RawModeGuard {
    alternate_screen: bool,
}

impl RawModeGuard {
    fn inline() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self {
            alternate_screen: false,
        })
    }

    fn alternate_screen() -> Result<Self> {
        let mut stdout = stdout();
        stdout.execute(EnterAlternateScreen)?;
        enable_raw_mode()?;
        stdout.execute(EnableMouseCapture)?;
        Ok(Self {
            alternate_screen: true,
        })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        if self.alternate_screen {
            let mut stdout = stdout();
            let _ = stdout.execute(DisableMouseCapture);
            let _ = stdout.execute(LeaveAlternateScreen);
        }
    }
}

/// [`PromptService`] backed by the controlling terminal.
///
/// Text prompts are edited inline. Menus take over the alternate screen
/// until an entry is picked or the menu is cancelled with `Esc`, and repeat
/// the last line written through [`TerminalPrompt::echo`] under their header.
#[derive(Default)]
pub struct TerminalPrompt {
    context: EchoContext,
}

impl TerminalPrompt {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A stdout writer whose last line is shown in later menus.
    #[must_use]
    pub fn echo(&self) -> ContextEcho<Stdout> {
        ContextEcho::new(stdout(), Rc::clone(&self.context))
    }
}

impl PromptService for TerminalPrompt {
    fn ask_text(&mut self, label: &str, initial: Option<&str>) -> Result<Option<String>> {
        let mut stdout = stdout();
        let _raw_mode_guard = RawModeGuard::inline()?;
        let mut buffer = initial.unwrap_or_default().to_string();

        redraw_text_line(label, &buffer)?;

        loop {
            let Event::Key(key_event) = event::read()? else {
                continue;
            };

            match handle_text_key(key_event, &buffer) {
                TextAction::None => {}
                TextAction::Update(updated) => {
                    buffer = updated;
                    redraw_text_line(label, &buffer)?;
                }
                TextAction::Submit(answer) => {
                    queue!(stdout, Print("\r\n"))?;
                    stdout.flush()?;
                    return Ok(Some(answer));
                }
                TextAction::Cancel => {
                    debug!("Text prompt `{label}` cancelled");
                    queue!(stdout, Print("\r\n"))?;
                    stdout.flush()?;
                    return Ok(None);
                }
            }
        }
    }

    fn ask_single_choice(
        &mut self,
        label: &str,
        choices: &[Choice],
        filter: ChoiceFilter,
    ) -> Result<Option<String>> {
        let context = self.context.borrow().clone();
        let chrome_rows = MENU_CHROME_ROWS + u16::from(context.is_some());
        let _raw_mode_guard = RawModeGuard::alternate_screen()?;

        let (width, height) = terminal::size()?;
        let mut state = MenuState::new(ViewportState {
            offset: 0,
            height: height.saturating_sub(chrome_rows),
            width,
        });
        let mut visible = filter(&state.filter_text, choices);
        redraw_menu(label, context.as_deref(), &state, &visible)?;

        loop {
            if !event::poll(Duration::from_millis(500))? {
                continue;
            }

            let action = match event::read()? {
                Event::Key(key_event) => handle_menu_key(key_event, &state, visible.len()),
                Event::Mouse(mouse_event) => match mouse_event.kind {
                    MouseEventKind::ScrollDown => MenuAction::Cycle(Down),
                    MouseEventKind::ScrollUp => MenuAction::Cycle(Up),
                    _ => MenuAction::None,
                },
                Event::Resize(width, height) => {
                    let mut resized = state.clone();
                    resized.viewport.width = width;
                    resized.viewport.height = height.saturating_sub(chrome_rows);
                    MenuAction::Update(resized)
                }
                _ => MenuAction::None,
            };

            let updated = match action {
                MenuAction::None => continue,
                MenuAction::Update(updated) => updated,
                MenuAction::Cycle(direction) => {
                    move_selected_index(&state, visible.len(), direction)
                }
                MenuAction::Select(index) => {
                    return Ok(visible.get(index).map(|choice| choice.value.clone()));
                }
                MenuAction::Cancel => {
                    debug!("Menu `{label}` cancelled");
                    return Ok(None);
                }
            };

            if updated != state {
                state = updated;
                visible = filter(&state.filter_text, choices);
                redraw_menu(label, context.as_deref(), &state, &visible)?;
            }
        }
    }
}

fn redraw_text_line(label: &str, buffer: &str) -> Result<()> {
    let mut stdout = stdout();

    queue!(
        stdout,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        SetForegroundColor(Color::Green),
        Print("? "),
        SetForegroundColor(Reset),
        SetAttribute(Attribute::Bold),
        Print(format!("{label}: ")),
        SetAttribute(Attribute::Reset),
        Print(buffer),
    )?;

    stdout.flush()?;
    Ok(())
}

fn redraw_menu(
    label: &str,
    context: Option<&str>,
    state: &MenuState,
    visible: &[&Choice],
) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    print_header(label, state, visible.len())?;

    let mut first_row = 1;
    if let Some(line) = context {
        queue!(
            stdout,
            MoveTo(0, first_row),
            SetAttribute(Attribute::Bold),
            Print(line),
            SetAttribute(Attribute::Reset)
        )?;
        first_row += 1;
    }

    if visible.is_empty() {
        queue!(
            stdout,
            MoveTo(0, first_row),
            SetForegroundColor(Color::Red),
            Print("No matching entries!".to_string()),
            SetAttribute(Attribute::Reset),
        )?;
    } else {
        print_entries_with_selection(state, visible, first_row)?;
    }

    queue!(
        stdout,
        MoveTo(0, state.viewport.height + first_row),
        SetAttribute(Attribute::Bold),
        Print(format!("Filter: {}", state.filter_text)),
        SetAttribute(Attribute::Reset)
    )?;

    stdout.flush()?;
    Ok(())
}

/// Print the header for a menu
fn print_header(label: &str, state: &MenuState, entry_count: usize) -> Result<()> {
    let mut stdout = stdout();
    let width = usize::from(state.viewport.width);

    let position = if entry_count == 0 {
        0
    } else {
        state.selected_index + 1
    };
    let header = format!("  {label}   |   {position}/{entry_count}   |   <esc>: Cancel");
    let right_padding = " ".repeat(width.saturating_sub(header.len()));

    queue!(
        stdout,
        MoveTo(0, 0),
        SetBackgroundColor(DarkGreen),
        Print(header),
        Print(right_padding),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Print the visible entries with the selected one highlighted
fn print_entries_with_selection(
    state: &MenuState,
    visible: &[&Choice],
    first_row: u16,
) -> Result<()> {
    let mut stdout = stdout();
    let viewport = &state.viewport;
    let width = usize::from(viewport.width);

    let rows = visible
        .iter()
        .enumerate()
        .skip(viewport.offset)
        .take(usize::from(viewport.height));

    for (row, (i, choice)) in (first_row..).zip(rows) {
        let is_selected = i == state.selected_index;
        let hint = choice
            .hint
            .as_deref()
            .map(|hint| format!("  {hint}"))
            .unwrap_or_default();
        let padding = " ".repeat(width.saturating_sub(choice.title.len() + hint.len()));

        queue!(stdout, MoveTo(0, row), Clear(ClearType::CurrentLine))?;

        if is_selected {
            queue!(
                stdout,
                SetAttribute(Attribute::Bold),
                SetBackgroundColor(DarkBlue),
                SetForegroundColor(Yellow),
            )?;
        }

        queue!(stdout, Print(&choice.title))?;

        if !is_selected {
            queue!(stdout, SetForegroundColor(DarkGrey))?;
        }

        queue!(
            stdout,
            Print(hint),
            Print(padding),
            SetAttribute(Attribute::Reset),
            SetBackgroundColor(Reset),
            SetForegroundColor(Reset),
            cursor::MoveToNextLine(1)
        )?;
    }

    Ok(())
}
