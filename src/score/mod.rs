//! Top score persistence
//!
//! The engine only talks to [`ScoreStore`]; the binary picks a JSON file
//! store, tests and `--no-persist` use the in-memory one.

pub mod store;

pub use store::{FileScoreStore, MemoryScoreStore, ScoreStore};
