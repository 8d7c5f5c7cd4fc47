//! Puzzle rounds, sessions and screen flow

pub mod round;
pub mod screen;
pub mod session;
pub mod signal;

pub use screen::{AppCoordinator, Screen};
