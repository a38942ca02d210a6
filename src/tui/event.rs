use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};
use std::time::Duration;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Always quits, whatever is on screen
    ForceQuit,
    Escape,
    Submit,

    InputChar(char),
    Backspace,
    Delete,
    CursorUp,
    CursorDown,
    // Terminal resized - just needs a redraw
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => match event::read() {
            Ok(ev) => translate(ev),
            Err(e) => {
                warn!("Failed to read terminal event: {}", e);
                None
            }
        },
        Ok(false) => None,
        Err(e) => {
            warn!("Failed to poll terminal events: {}", e);
            None
        }
    }
}

fn translate(ev: Event) -> Option<TuiEvent> {
    match ev {
        Event::Key(key_event) => translate_key(key_event),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Some terminals report release/repeat too; act on presses only
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        // Other modified chars (Ctrl+D, Alt+R) must not trigger plain hotkeys
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Char(_)) => None,
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn press(code: KeyCode) -> Event {
        key(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    #[test]
    fn test_ctrl_c_force_quits() {
        let ev = key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        assert_eq!(translate(ev), Some(TuiEvent::ForceQuit));
    }

    #[test]
    fn test_shifted_char_kept() {
        let ev = key(KeyCode::Char('R'), KeyModifiers::SHIFT, KeyEventKind::Press);
        assert_eq!(translate(ev), Some(TuiEvent::InputChar('R')));
    }

    #[test]
    fn test_modified_chars_dropped() {
        for (c, modifiers) in [
            ('d', KeyModifiers::CONTROL),
            ('r', KeyModifiers::CONTROL),
            ('R', KeyModifiers::ALT | KeyModifiers::SHIFT),
            ('x', KeyModifiers::ALT),
        ] {
            let ev = key(KeyCode::Char(c), modifiers, KeyEventKind::Press);
            assert_eq!(translate(ev), None, "{:?}+{}", modifiers, c);
        }
    }

    #[test]
    fn test_release_ignored() {
        let ev = key(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(translate(ev), None);
    }

    #[test]
    fn test_basic_keys() {
        assert_eq!(translate(press(KeyCode::Enter)), Some(TuiEvent::Submit));
        assert_eq!(translate(press(KeyCode::Esc)), Some(TuiEvent::Escape));
        assert_eq!(translate(press(KeyCode::Delete)), Some(TuiEvent::Delete));
        assert_eq!(translate(press(KeyCode::Up)), Some(TuiEvent::CursorUp));
        assert_eq!(translate(press(KeyCode::Tab)), None);
        assert_eq!(translate(Event::Resize(80, 24)), Some(TuiEvent::Resize));
    }
}
