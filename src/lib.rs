//! Grid Snake - a terminal Snake game with big food and a persisted top score
//!
//! This library provides:
//! - Core game logic as a single event reducer (game module)
//! - Top score persistence behind a store trait (score module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - The timer-driven interactive loop (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod score;
