use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Quit, // Ctrl+C / Ctrl+Q
    Back, // Esc / Backspace
    Up,
    Down,
    Tab,
    BackTab,
    Select, // Enter / Space
    PageUp,
    PageDown,
    Home,
    End,
    MouseRelease(u16, u16),
    ScrollUp(u16, u16),
    ScrollDown(u16, u16),
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO).unwrap_or_else(|e| {
        log::warn!("Event poll failed: {}", e);
        None
    })
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if event::poll(timeout)? {
        Ok(translate(event::read()?))
    } else {
        Ok(None)
    }
}

/// Map a raw crossterm event onto a `TuiEvent`.
pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => translate_key(key_event),
        Event::Mouse(mouse_event) => {
            let (col, row) = (mouse_event.column, mouse_event.row);
            match mouse_event.kind {
                MouseEventKind::Up(MouseButton::Left) => Some(TuiEvent::MouseRelease(col, row)),
                MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp(col, row)),
                MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown(col, row)),
                _ => None,
            }
        }
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Keyboard enhancement reports releases too; act on presses only
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c' | 'q')) => Some(TuiEvent::Quit),
        (_, KeyCode::BackTab) => Some(TuiEvent::BackTab),
        (m, KeyCode::Tab) if m.contains(KeyModifiers::SHIFT) => Some(TuiEvent::BackTab),
        (_, KeyCode::Tab) => Some(TuiEvent::Tab),
        (_, KeyCode::Up) => Some(TuiEvent::Up),
        (_, KeyCode::Down) => Some(TuiEvent::Down),
        (_, KeyCode::Enter | KeyCode::Char(' ')) => Some(TuiEvent::Select),
        (_, KeyCode::Esc | KeyCode::Backspace) => Some(TuiEvent::Back),
        (_, KeyCode::PageUp) => Some(TuiEvent::PageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::PageDown),
        (_, KeyCode::Home) => Some(TuiEvent::Home),
        (_, KeyCode::End) => Some(TuiEvent::End),
        _ => None,
    }
}
