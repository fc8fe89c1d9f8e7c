//! Keyboard bindings for the terminal front end.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::Input;

pub fn input_for_key(key: KeyEvent) -> Option<Input> {
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(Input::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(Input::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(Input::SoftDrop)
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(Input::Rotate)
        }
        KeyCode::Char(' ') => Some(Input::HardDrop),
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(Input::Restart),
        _ => None,
    }
}

pub fn is_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
