use std::collections::HashSet;

use super::action::Direction;
use super::grid::{Board, Position};

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction the next tick moves in, `None` while idle
    pub direction: Option<Direction>,
    /// Direction of the last completed move
    pub heading: Option<Direction>,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self {
            body,
            direction: Some(direction),
            heading: Some(direction),
        }
    }

    /// A single-cell snake that waits for its first direction
    pub fn idle(head: Position) -> Self {
        Self {
            body: vec![head],
            direction: None,
            heading: None,
        }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty());
        Self {
            body,
            direction: Some(direction),
            heading: Some(direction),
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Check whether moving the head to `pos` would hit the body
    ///
    /// Without growth the tail moves out of its cell during the same tick,
    /// so it does not count.
    pub fn collides_with_body(&self, pos: Position, grows: bool) -> bool {
        let remaining = if grows {
            &self.body[..]
        } else {
            &self.body[..self.body.len() - 1]
        };
        remaining.contains(&pos)
    }

    /// Move snake in its current direction, growing if should_grow is true
    pub fn move_snake(&mut self, should_grow: bool) {
        let Some(direction) = self.direction else {
            return;
        };

        let new_head = self.head().moved_in_direction(direction);
        self.body.insert(0, new_head);
        self.heading = Some(direction);

        if !should_grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Where a game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// No free cell left for food
    BoardFilled,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub big_food: Option<Position>,
    pub board: Board,
    pub score: u32,
    pub top_score: u32,
    pub steps: u32,
    pub phase: Phase,
    pub game_over_reason: Option<GameOverReason>,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, board: Board, top_score: u32) -> Self {
        Self {
            snake,
            food,
            big_food: None,
            board,
            score: 0,
            top_score,
            steps: 0,
            phase: Phase::NotStarted,
            game_over_reason: None,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.board.contains(pos)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.body.contains(&pos)
    }

    /// Cells food must not be placed on: the snake and both foods
    pub fn occupied(&self) -> HashSet<Position> {
        let mut cells: HashSet<Position> = self.snake.body.iter().copied().collect();
        cells.insert(self.food);
        if let Some(big) = self.big_food {
            cells.insert(big);
        }
        cells
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}
