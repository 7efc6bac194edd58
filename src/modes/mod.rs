pub mod human;
pub mod timers;

pub use human::HumanMode;
pub use timers::GameTimers;
