//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the dropdown,
//! and feeds keyboard and mouse events to it.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Frame cycle
//!
//! ```text
//! draw ──▶ settle ──▶ poll events ──▶ handle ──┐
//!  ▲                                           │
//!  └───────────────────────────────────────────┘
//! ```
//!
//! `settle` is where the navigator's `after_highlight` notifications run: the
//! frame showing the new highlight has already been drawn by then.

pub mod component;
pub mod components;
pub mod event;

use log::{debug, info};
use std::io::{self, Stderr, Write};
use std::time::Duration;

use crossterm::cursor::Show;
use crossterm::event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::core::config::ResolvedConfig;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{Dropdown, DropdownEvent, DropdownState, Entry, centered_rect};
use crate::tui::event::{poll_event_immediate, poll_event_timeout};

/// The picker draws on stderr; stdout only ever carries the selection.
type UiTerminal = Terminal<CrosstermBackend<Stderr>>;

fn enter_ui_modes<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(writer, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)
}

fn leave_ui_modes<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(writer, DisableFocusChange, DisableMouseCapture, LeaveAlternateScreen, Show)
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        // Drop undoes raw mode even if entering the screen modes fails.
        let guard = Self;
        enter_ui_modes(&mut io::stderr())?;
        info!("Terminal modes enabled on stderr (raw, alternate screen, mouse, focus change)");
        Ok(guard)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = leave_ui_modes(&mut io::stderr());
        let _ = disable_raw_mode();
    }
}

/// Run the picker until an entry is chosen (`Some`) or it is dismissed (`None`).
pub fn run(config: &ResolvedConfig, entries: Vec<Entry>) -> io::Result<Option<Entry>> {
    let mut state = DropdownState::new(
        config.navigator.clone(),
        entries,
        usize::from(config.max_visible),
    );

    let _guard = TerminalModeGuard::new()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stderr()))?;
    terminal.clear()?;
    event_loop(&mut terminal, &mut state, config)
}

fn event_loop(
    terminal: &mut UiTerminal,
    state: &mut DropdownState,
    config: &ResolvedConfig,
) -> io::Result<Option<Entry>> {
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|f| {
                let area = centered_rect(60, 70, f.area());
                Dropdown::new(&mut *state, &config.title, config.max_visible).render(f, area);
            })?;
            state.settle();
            needs_redraw = false;
        }

        // Drain all pending events before the next draw
        let first = poll_event_timeout(Duration::from_millis(250))?;
        let mut events = Vec::new();
        if let Some(event) = first {
            events.push(event);
            while let Some(event) = poll_event_immediate()? {
                events.push(event);
            }
        }

        for event in events {
            needs_redraw = true;
            match state.handle_event(&event) {
                Some(DropdownEvent::Select(entry)) => {
                    info!("Selected {:?}", entry.id);
                    return Ok(Some(entry));
                }
                Some(DropdownEvent::Dismiss) => {
                    debug!("Dismissed without a selection");
                    return Ok(None);
                }
                None => {}
            }
        }
    }
}
