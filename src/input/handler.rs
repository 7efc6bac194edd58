use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Difficulty, Direction, GameEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(GameEvent),
    SetDifficulty(Difficulty),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::GameAction(GameEvent::Turn(Direction::Up)),
            KeyCode::Down => KeyAction::GameAction(GameEvent::Turn(Direction::Down)),
            KeyCode::Left => KeyAction::GameAction(GameEvent::Turn(Direction::Left)),
            KeyCode::Right => KeyAction::GameAction(GameEvent::Turn(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::GameAction(GameEvent::Turn(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::GameAction(GameEvent::Turn(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::GameAction(GameEvent::Turn(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::GameAction(GameEvent::Turn(Direction::Right))
            }

            // Game flow
            KeyCode::Enter => KeyAction::GameAction(GameEvent::Start),
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                KeyAction::GameAction(GameEvent::TogglePause)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::GameAction(GameEvent::Reset),

            // Speed
            KeyCode::Char('1') => KeyAction::SetDifficulty(Difficulty::Easy),
            KeyCode::Char('2') => KeyAction::SetDifficulty(Difficulty::Medium),
            KeyCode::Char('3') => KeyAction::SetDifficulty(Difficulty::Hard),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(handler: &InputHandler, code: KeyCode) -> KeyAction {
        handler.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Up),
            KeyAction::GameAction(GameEvent::Turn(Direction::Up))
        );
        assert_eq!(
            press(&handler, KeyCode::Down),
            KeyAction::GameAction(GameEvent::Turn(Direction::Down))
        );
        assert_eq!(
            press(&handler, KeyCode::Left),
            KeyAction::GameAction(GameEvent::Turn(Direction::Left))
        );
        assert_eq!(
            press(&handler, KeyCode::Right),
            KeyAction::GameAction(GameEvent::Turn(Direction::Right))
        );
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Char('w')),
            KeyAction::GameAction(GameEvent::Turn(Direction::Up))
        );
        assert_eq!(
            press(&handler, KeyCode::Char('a')),
            KeyAction::GameAction(GameEvent::Turn(Direction::Left))
        );

        let s_upper = KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(s_upper),
            KeyAction::GameAction(GameEvent::Turn(Direction::Down))
        );
    }

    #[test]
    fn test_flow_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Enter),
            KeyAction::GameAction(GameEvent::Start)
        );
        assert_eq!(
            press(&handler, KeyCode::Char(' ')),
            KeyAction::GameAction(GameEvent::TogglePause)
        );
        assert_eq!(
            press(&handler, KeyCode::Char('p')),
            KeyAction::GameAction(GameEvent::TogglePause)
        );
        assert_eq!(
            press(&handler, KeyCode::Char('R')),
            KeyAction::GameAction(GameEvent::Reset)
        );
    }

    #[test]
    fn test_difficulty_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Char('1')),
            KeyAction::SetDifficulty(Difficulty::Easy)
        );
        assert_eq!(
            press(&handler, KeyCode::Char('3')),
            KeyAction::SetDifficulty(Difficulty::Hard)
        );
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(&handler, KeyCode::Esc), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Char('x')), KeyAction::None);
        assert_eq!(press(&handler, KeyCode::Tab), KeyAction::None);
    }
}
