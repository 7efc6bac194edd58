use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Everything that can change a game, fed one at a time to
/// [`GameEngine::apply`](super::GameEngine::apply)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Advance the snake by one cell
    Tick,
    /// Request a new direction for the next tick
    Turn(Direction),
    /// Leave the start screen, or resume when paused
    Start,
    /// Switch between running and paused
    TogglePause,
    /// Periodic big food spawn
    SpawnBigFood,
    /// Back to the start screen, keeping the top score
    Reset,
}

impl From<Direction> for GameEvent {
    fn from(direction: Direction) -> Self {
        GameEvent::Turn(direction)
    }
}
