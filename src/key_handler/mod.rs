use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;

const C: KeyModifiers = KeyModifiers::CONTROL;

/// A single keystroke as delivered by the key reader role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Quit,
    Previous,
    Next,
    Other(char),
}

impl Key {
    /// Map a typed character, case-insensitively.
    pub fn from_char(c: char) -> Key {
        match c.to_ascii_uppercase() {
            'Q' => Key::Quit,
            'P' => Key::Previous,
            'N' => Key::Next,
            other => Key::Other(other),
        }
    }
}

/// Translate a terminal key event. Releases and non-character keys yield `None`.
pub fn handle_key_event(key: KeyEvent) -> Option<Key> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Raw mode swallows SIGINT, so Ctrl+C arrives here as a key
    match (key.modifiers, key.code) {
        (C, KeyCode::Char('c')) => Some(Key::Quit),
        (_, KeyCode::Esc) => Some(Key::Quit),
        (_, KeyCode::Char(c)) => Some(Key::from_char(c)),
        (_, KeyCode::Enter) => Some(Key::Other('\n')),
        _ => None,
    }
}

/// Block until one meaningful key press arrives.
pub fn next_key() -> io::Result<Key> {
    loop {
        if let Event::Key(key) = event::read()? {
            if let Some(key) = handle_key_event(key) {
                return Ok(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn letters_are_case_insensitive() {
        for (c, key) in [
            ('q', Key::Quit),
            ('Q', Key::Quit),
            ('p', Key::Previous),
            ('n', Key::Next),
            ('N', Key::Next),
        ] {
            assert_eq!(handle_key_event(press(KeyCode::Char(c), KeyModifiers::NONE)), Some(key));
        }
    }

    #[test]
    fn other_characters_are_uppercased() {
        assert_eq!(
            handle_key_event(press(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(Key::Other('X'))
        );
        assert_eq!(Key::from_char('7'), Key::Other('7'));
    }

    #[test]
    fn interrupt_keys_quit() {
        assert_eq!(handle_key_event(press(KeyCode::Char('c'), C)), Some(Key::Quit));
        assert_eq!(handle_key_event(press(KeyCode::Esc, KeyModifiers::NONE)), Some(Key::Quit));
    }

    #[test]
    fn releases_and_arrows_are_ignored() {
        let mut release = press(KeyCode::Char('n'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;

        assert_eq!(handle_key_event(release), None);
        assert_eq!(handle_key_event(press(KeyCode::Left, KeyModifiers::NONE)), None);
    }
}
