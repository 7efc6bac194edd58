use super::{
    action::{Direction, GameEvent},
    config::GameConfig,
    food::FoodPlacer,
    state::{GameOverReason, GameState, Phase, Snake},
};
use crate::score::ScoreStore;
use log::{debug, info, warn};
use std::collections::HashSet;

/// What happened while applying one event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Whether the snake ate big food this step
    pub ate_big_food: bool,
    /// Whether big food appeared this step
    pub big_food_spawned: bool,
    /// A turn that would have reversed the snake was ignored
    pub turn_rejected: bool,
    /// The top score went up this step
    pub new_top_score: bool,
    /// Set on the step that ended the game
    pub game_over: Option<GameOverReason>,
}

/// Result of applying an event
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game is over after this event
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
///
/// All state changes go through [`GameEngine::apply`]. The engine owns the
/// randomness for food placement and the score store, the state itself is
/// plain data the caller keeps.
pub struct GameEngine {
    config: GameConfig,
    placer: FoodPlacer,
    scores: Box<dyn ScoreStore>,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig, scores: Box<dyn ScoreStore>) -> Self {
        Self::with_placer(config, scores, FoodPlacer::new())
    }

    pub fn with_placer(config: GameConfig, scores: Box<dyn ScoreStore>, placer: FoodPlacer) -> Self {
        Self {
            config,
            placer,
            scores,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scores(&self) -> &dyn ScoreStore {
        self.scores.as_ref()
    }

    /// Build the first state, reading the top score from the store
    pub fn reset(&mut self) -> GameState {
        let top_score = match self.scores.load() {
            Ok(score) => score,
            Err(e) => {
                warn!("Failed to load top score, starting from 0: {:#}", e);
                0
            }
        };

        self.initial_state(top_score)
    }

    /// Apply one event to the state
    pub fn apply(&mut self, state: &mut GameState, event: GameEvent) -> StepResult {
        let info = match event {
            GameEvent::Tick => self.tick(state),
            GameEvent::Turn(direction) => Self::turn(state, direction),
            GameEvent::Start => Self::start(state),
            GameEvent::TogglePause => Self::toggle_pause(state),
            GameEvent::SpawnBigFood => self.spawn_big_food(state),
            GameEvent::Reset => self.restart(state),
        };

        StepResult {
            terminated: state.is_game_over(),
            info,
        }
    }

    /// By-value form of [`GameEngine::apply`]
    pub fn reduce(&mut self, mut state: GameState, event: GameEvent) -> (GameState, StepResult) {
        let result = self.apply(&mut state, event);
        (state, result)
    }

    fn initial_state(&mut self, top_score: u32) -> GameState {
        let board = self.config.board();
        let snake = match self.config.initial_direction {
            Some(direction) => {
                Snake::new(self.config.start, direction, self.config.initial_snake_length)
            }
            None => Snake::idle(self.config.start),
        };

        let occupied: HashSet<_> = snake.body.iter().copied().collect();
        // A validated config always leaves at least one free cell
        let food = self
            .config
            .initial_food
            .filter(|food| board.contains(*food) && !occupied.contains(food))
            .or_else(|| self.placer.place(board, &occupied))
            .unwrap_or(self.config.start);

        GameState::new(snake, food, board, top_score)
    }

    fn tick(&mut self, state: &mut GameState) -> StepInfo {
        let mut info = StepInfo::default();

        if state.phase != Phase::Running {
            return info;
        }

        // Idle snake: nothing moves until the first turn
        let Some(direction) = state.snake.direction else {
            return info;
        };

        let new_head = state.snake.head().moved_in_direction(direction);
        state.steps += 1;

        if !state.is_in_bounds(new_head) {
            Self::end_game(state, GameOverReason::Wall, &mut info);
            return info;
        }

        let ate_food = new_head == state.food;
        let ate_big_food = !ate_food && state.big_food == Some(new_head);

        if state.snake.collides_with_body(new_head, ate_food || ate_big_food) {
            Self::end_game(state, GameOverReason::SelfCollision, &mut info);
            return info;
        }

        state.snake.move_snake(ate_food || ate_big_food);

        if ate_food {
            info.ate_food = true;
            state.score += 1;

            match self.placer.place(state.board, &state.occupied()) {
                Some(food) => state.food = food,
                None => {
                    info.new_top_score = self.record_top_score(state);
                    Self::end_game(state, GameOverReason::BoardFilled, &mut info);
                    return info;
                }
            }

            if state.score % self.config.big_food_threshold == 0 && state.big_food.is_none() {
                info.big_food_spawned = self.place_big_food(state);
            }
        } else if ate_big_food {
            info.ate_big_food = true;
            state.score += self.config.big_food_bonus;
            state.big_food = None;
        }

        info.new_top_score = self.record_top_score(state);
        info
    }

    fn turn(state: &mut GameState, direction: Direction) -> StepInfo {
        let mut info = StepInfo::default();

        if state.is_game_over() {
            return info;
        }

        // Compare with the last move actually made, so two quick presses
        // inside one tick cannot fold the snake back onto itself
        if state
            .snake
            .heading
            .is_some_and(|heading| heading.is_opposite(direction))
        {
            info.turn_rejected = true;
        } else {
            state.snake.direction = Some(direction);
        }

        info
    }

    fn start(state: &mut GameState) -> StepInfo {
        match state.phase {
            Phase::NotStarted => {
                info!("Game started");
                state.phase = Phase::Running;
            }
            Phase::Paused => state.phase = Phase::Running,
            Phase::Running | Phase::GameOver => {}
        }

        StepInfo::default()
    }

    fn toggle_pause(state: &mut GameState) -> StepInfo {
        match state.phase {
            Phase::Running => state.phase = Phase::Paused,
            Phase::Paused => state.phase = Phase::Running,
            Phase::NotStarted | Phase::GameOver => {}
        }

        StepInfo::default()
    }

    fn spawn_big_food(&mut self, state: &mut GameState) -> StepInfo {
        let mut info = StepInfo::default();

        if state.is_running() && state.big_food.is_none() {
            info.big_food_spawned = self.place_big_food(state);
        }

        info
    }

    fn restart(&mut self, state: &mut GameState) -> StepInfo {
        let info = StepInfo {
            new_top_score: self.record_top_score(state),
            ..Default::default()
        };

        *state = self.initial_state(state.top_score);
        debug!("Game reset, top score {}", state.top_score);

        info
    }

    fn place_big_food(&mut self, state: &mut GameState) -> bool {
        state.big_food = self.placer.place(state.board, &state.occupied());

        if let Some(big) = state.big_food {
            debug!("Big food placed at ({}, {})", big.x, big.y);
        }

        state.big_food.is_some()
    }

    /// Raise the top score to the current score and persist it
    fn record_top_score(&mut self, state: &mut GameState) -> bool {
        if state.score <= state.top_score {
            return false;
        }

        state.top_score = state.score;
        if let Err(e) = self.scores.save(state.top_score) {
            warn!("Failed to persist top score {}: {:#}", state.top_score, e);
        }

        true
    }

    fn end_game(state: &mut GameState, reason: GameOverReason, info: &mut StepInfo) {
        state.phase = Phase::GameOver;
        state.game_over_reason = Some(reason);
        info.game_over = Some(reason);

        info!(
            "Game over ({:?}) with score {} after {} steps",
            reason, state.score, state.steps
        );
    }
}
