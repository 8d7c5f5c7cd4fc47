//! Terminal UI components using ratatui

mod terminal;
mod ui;

pub use terminal::{restore, Tui};
pub use ui::render;
