//! Keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::poll::{Key, Scroll};

/// Maps a key press to a dashboard key. Unbound keys map to `None`.
pub fn map_key(key: KeyEvent) -> Option<Key> {
    let key = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Key::Quit,
        KeyCode::Char('q') => Key::Quit,
        KeyCode::Char('r') | KeyCode::Char(' ') => Key::Refresh,

        KeyCode::Up | KeyCode::Char('k') => Key::Scroll(Scroll::LineUp),
        KeyCode::Down | KeyCode::Char('j') => Key::Scroll(Scroll::LineDown),
        KeyCode::PageUp | KeyCode::Char('b') => Key::Scroll(Scroll::PageUp),
        KeyCode::PageDown | KeyCode::Char('f') => Key::Scroll(Scroll::PageDown),
        // Plain and Ctrl variants both scroll half a page.
        KeyCode::Char('u') => Key::Scroll(Scroll::HalfPageUp),
        KeyCode::Char('d') => Key::Scroll(Scroll::HalfPageDown),
        KeyCode::Home | KeyCode::Char('g') => Key::Scroll(Scroll::Top),
        KeyCode::End | KeyCode::Char('G') => Key::Scroll(Scroll::Bottom),
        _ => return None,
    };
    Some(key)
}
