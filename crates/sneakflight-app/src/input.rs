use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use sneakflight_core::{Direction, Input};

/// What a key press asks the front end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Forward to the session state machine.
    Game(Input),
    /// Ctrl-C: leave immediately, whatever the session is doing.
    ForceQuit,
}

/// Decode a terminal key event. Key releases are dropped.
#[must_use]
pub fn translate_key(key: KeyEvent) -> Option<KeyCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c' | 'C'))
    {
        return Some(KeyCommand::ForceQuit);
    }
    let input = match key.code {
        KeyCode::Char('w' | 'W') | KeyCode::Up => Input::Move(Direction::Up),
        KeyCode::Char('s' | 'S') | KeyCode::Down => Input::Move(Direction::Down),
        KeyCode::Char('a' | 'A') | KeyCode::Left => Input::Move(Direction::Left),
        KeyCode::Char('d' | 'D') | KeyCode::Right => Input::Move(Direction::Right),
        KeyCode::Char(' ' | 'p' | 'P') => Input::PauseToggle,
        KeyCode::Char('m' | 'M') => Input::Menu,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Input::Quit,
        KeyCode::Char('r' | 'R') => Input::Restart,
        KeyCode::Char(digit @ '1'..='3') => Input::Select(digit as u8 - b'0'),
        _ => Input::Other,
    };
    Some(KeyCommand::Game(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn movement_keys_cover_wasd_and_arrows() {
        for (code, direction) in [
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Up, Direction::Up),
            (KeyCode::Char('A'), Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Char('s'), Direction::Down),
        ] {
            assert_eq!(
                translate_key(press(code)),
                Some(KeyCommand::Game(Input::Move(direction)))
            );
        }
    }

    #[test]
    fn menu_keys_map_to_session_inputs() {
        assert_eq!(
            translate_key(press(KeyCode::Char('2'))),
            Some(KeyCommand::Game(Input::Select(2)))
        );
        assert_eq!(
            translate_key(press(KeyCode::Char(' '))),
            Some(KeyCommand::Game(Input::PauseToggle))
        );
        assert_eq!(
            translate_key(press(KeyCode::Esc)),
            Some(KeyCommand::Game(Input::Quit))
        );
        assert_eq!(
            translate_key(press(KeyCode::Char('4'))),
            Some(KeyCommand::Game(Input::Other))
        );
    }

    #[test]
    fn ctrl_c_bypasses_the_session() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate_key(key), Some(KeyCommand::ForceQuit));
    }

    #[test]
    fn releases_are_ignored() {
        let key = KeyEvent::new_with_kind(
            KeyCode::Char('w'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(translate_key(key), None);
    }
}
