use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::action::Direction;
use super::grid::{Board, Position};

/// Largest board that still fits a terminal and keeps coordinates in `i32`
pub const MAX_BOARD_SIZE: usize = 1024;

/// Rule preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    /// 20x20 board, snake starts moving right, periodic big food
    Classic,
    /// 12x12 board, snake waits for the first arrow key
    Compact,
}

/// Game speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Time between two ticks
    pub fn tick_period(&self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(300),
            Difficulty::Medium => Duration::from_millis(200),
            Difficulty::Hard => Duration::from_millis(100),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width and height of the square grid
    pub board_size: usize,
    /// Where the snake's head starts
    pub start: Position,
    /// Direction at start, `None` to wait for the first turn
    pub initial_direction: Option<Direction>,
    /// Initial length of the snake, laid out behind the head
    pub initial_snake_length: usize,
    /// Fixed first food, random when `None`
    pub initial_food: Option<Position>,

    /// Big food appears when the score reaches a multiple of this
    pub big_food_threshold: u32,
    /// Points for eating big food
    pub big_food_bonus: u32,
    /// Period of the timed big food spawn, in milliseconds
    pub big_food_interval_ms: Option<u64>,

    /// Key the top score is stored under
    pub score_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl GameConfig {
    pub fn classic() -> Self {
        Self {
            board_size: 20,
            start: Position::new(0, 0),
            initial_direction: Some(Direction::Right),
            initial_snake_length: 1,
            initial_food: Some(Position::new(10, 10)),
            big_food_threshold: 15,
            big_food_bonus: 5,
            big_food_interval_ms: Some(15_000),
            score_key: "highScore".to_string(),
        }
    }

    pub fn compact() -> Self {
        Self {
            board_size: 12,
            start: Position::new(5, 5),
            initial_direction: None,
            initial_snake_length: 1,
            initial_food: None,
            big_food_threshold: 5,
            big_food_bonus: 5,
            big_food_interval_ms: None,
            score_key: "topScore".to_string(),
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self::classic(),
            Variant::Compact => Self::compact(),
        }
    }

    /// Override the board size
    ///
    /// Fixed positions that no longer fit are dropped or pulled back on the
    /// board so the preset stays playable.
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        let board = self.board();
        if self.initial_food.is_some_and(|food| !board.contains(food)) {
            self.initial_food = None;
        }
        if !board.contains(self.start) {
            let mid = (size / 2) as i32;
            self.start = Position::new(mid, mid);
        }
        self
    }

    pub fn board(&self) -> Board {
        Board::new(self.board_size)
    }

    pub fn big_food_interval(&self) -> Option<Duration> {
        self.big_food_interval_ms.map(Duration::from_millis)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if !(2..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(format!(
                "board_size must be in [2, {}], got {}",
                MAX_BOARD_SIZE, self.board_size
            ));
        }

        let board = self.board();
        if !board.contains(self.start) {
            return Err(format!(
                "start ({}, {}) is outside a {}x{} board",
                self.start.x, self.start.y, self.board_size, self.board_size
            ));
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        match self.initial_direction {
            Some(direction) => {
                let (dx, dy) = direction.delta();
                let back = (self.initial_snake_length - 1) as i32;
                let tail = self.start.moved_by(-dx * back, -dy * back);
                if !board.contains(tail) {
                    return Err(format!(
                        "a snake of length {} does not fit behind ({}, {})",
                        self.initial_snake_length, self.start.x, self.start.y
                    ));
                }
            }
            None if self.initial_snake_length > 1 => {
                return Err("an idle snake must start with length 1".to_string());
            }
            None => {}
        }

        if let Some(food) = self.initial_food {
            if !board.contains(food) {
                return Err(format!(
                    "initial_food ({}, {}) is outside the board",
                    food.x, food.y
                ));
            }
            if food == self.start {
                return Err("initial_food must not start under the snake".to_string());
            }
        }

        if self.big_food_threshold == 0 {
            return Err("big_food_threshold must be at least 1".to_string());
        }

        if self.big_food_interval_ms == Some(0) {
            return Err("big_food_interval_ms must be positive".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let classic = GameConfig::classic();
        assert_eq!(classic.board_size, 20);
        assert_eq!(classic.big_food_threshold, 15);
        assert_eq!(classic.initial_direction, Some(Direction::Right));
        assert!(classic.validate().is_ok());

        let compact = GameConfig::for_variant(Variant::Compact);
        assert_eq!(compact.board_size, 12);
        assert_eq!(compact.big_food_threshold, 5);
        assert_eq!(compact.initial_direction, None);
        assert!(compact.validate().is_ok());
    }

    #[test]
    fn test_difficulty_periods() {
        assert_eq!(Difficulty::Easy.tick_period(), Duration::from_millis(300));
        assert_eq!(Difficulty::default().tick_period(), Duration::from_millis(200));
        assert_eq!(Difficulty::Hard.tick_period(), Duration::from_millis(100));
    }

    #[test]
    fn test_board_size_override() {
        let config = GameConfig::classic().with_board_size(8);
        assert_eq!(config.board_size, 8);
        assert_eq!(config.initial_food, None);
        assert!(config.validate().is_ok());

        let config = GameConfig::compact().with_board_size(4);
        assert_eq!(config.start, Position::new(2, 2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = GameConfig::compact();
        config.big_food_threshold = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::classic();
        config.initial_snake_length = 3;
        assert!(config.validate().is_err(), "tail would hang off the left edge");

        let mut config = GameConfig::compact();
        config.initial_food = Some(config.start);
        assert!(config.validate().is_err());

        let config = GameConfig::compact().with_board_size(1);
        assert!(config.validate().is_err());

        let config = GameConfig::compact().with_board_size(MAX_BOARD_SIZE + 1);
        assert!(config.validate().is_err());

        // Does not fit in i32 coordinates
        let config = GameConfig::classic().with_board_size(i32::MAX as usize + 3);
        assert!(config.validate().is_err());

        assert!(GameConfig::compact().with_board_size(MAX_BOARD_SIZE).validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::compact();
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
