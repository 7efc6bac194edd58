//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The scheduler feeds it [`GameEvent`]s; renderers only read [`GameState`].

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, GameEvent};
pub use config::{Difficulty, GameConfig, Variant};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use food::FoodPlacer;
pub use grid::{Board, Position};
pub use state::{GameOverReason, GameState, Phase, Snake};
