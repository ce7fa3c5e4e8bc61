use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use std::io;
use std::time::Duration;

use crate::core::NavKey;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    ForceQuit, // Ctrl+C
    Escape,
    Submit,
    Navigate(NavKey),
    InputChar(char),
    Backspace,
    MouseMove(u16, u16),
    FocusLost,
}

/// Poll for an event with timeout
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(translate(event::read()?))
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            translate_key(key_event)
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Moved => Some(TuiEvent::MouseMove(mouse_event.column, mouse_event.row)),
            MouseEventKind::ScrollUp => Some(TuiEvent::Navigate(NavKey::Up)),
            MouseEventKind::ScrollDown => Some(TuiEvent::Navigate(NavKey::Down)),
            _ => None,
        },
        Event::FocusLost => Some(TuiEvent::FocusLost),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        // Emacs-style Ctrl+P / Ctrl+N, common in pickers
        (KeyModifiers::CONTROL, KeyCode::Char('p')) => Some(TuiEvent::Navigate(NavKey::Up)),
        (KeyModifiers::CONTROL, KeyCode::Char('n')) => Some(TuiEvent::Navigate(NavKey::Down)),
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::Up) => Some(TuiEvent::Navigate(NavKey::Up)),
        (_, KeyCode::Down) => Some(TuiEvent::Navigate(NavKey::Down)),
        (_, KeyCode::Home) => Some(TuiEvent::Navigate(NavKey::Home)),
        (_, KeyCode::End) => Some(TuiEvent::Navigate(NavKey::End)),
        _ => None,
    }
}
