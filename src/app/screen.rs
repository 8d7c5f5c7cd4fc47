//! Application screen state management
//!
//! Handles transitions between different application screens:
//! - Home: category list
//! - Levels: puzzles in a category with their lock state
//! - Puzzle: playing a session through the category
//! - Error

use super::session::Session;
use super::signal::{SessionEvent, Signal};
use crate::catalog::Catalog;
use crate::game::slots::DragCarry;
use crate::storage::progress::{LevelStatus, ProgressionGate};
use crate::storage::KeyValueStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, info};

/// How long a signal stays on the status line
const STATUS_TTL: Duration = Duration::from_millis(1200);

/// Interaction state for the puzzle screen.
pub struct PuzzleView {
    pub category: usize,
    pub session: Session<StdRng>,
    /// Pool tile under the cursor
    pub cursor: usize,
    /// Tile lifted with Space and waiting for a slot
    pub carry: Option<DragCarry>,
    /// Answer to show once the attempts are used up
    pub revealed_answer: Option<String>,
}

impl PuzzleView {
    fn new(category: usize, session: Session<StdRng>) -> Self {
        Self {
            category,
            session,
            cursor: 0,
            carry: None,
            revealed_answer: None,
        }
    }
}

/// The current application screen
pub enum Screen {
    /// Category list
    Home { selected: usize },
    /// Levels in one category
    Levels { category: usize, selected: usize },
    /// Playing
    Puzzle(Box<PuzzleView>),
    /// Something went wrong
    Error { message: String },
}

/// Main application coordinator
pub struct AppCoordinator<S> {
    /// Current screen
    pub screen: Screen,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Transient line under the board (last signal, saved-progress warnings)
    pub status: Option<(String, Tone)>,
    /// Message shown on the levels screen after leaving a session
    pub banner: Option<String>,
    catalog: Catalog,
    gate: ProgressionGate<S>,
    rng: StdRng,
    status_age: Duration,
}

impl<S: KeyValueStore> AppCoordinator<S> {
    /// Create a new app coordinator starting at the category list
    pub fn new(catalog: Catalog, gate: ProgressionGate<S>, rng: StdRng) -> Self {
        Self {
            screen: Screen::Home { selected: 0 },
            should_quit: false,
            status: None,
            banner: None,
            catalog,
            gate,
            rng,
            status_age: Duration::ZERO,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn gate(&self) -> &ProgressionGate<S> {
        &self.gate
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Lock state of a level in a category
    pub fn level_status(&self, category: usize, index: usize) -> LevelStatus {
        match self.catalog.get(category) {
            Some(c) => self.gate.level_status(&c.items, index),
            None => LevelStatus::Locked,
        }
    }

    pub fn up(&mut self) {
        match &mut self.screen {
            Screen::Home { selected } | Screen::Levels { selected, .. } => {
                *selected = selected.saturating_sub(1);
            }
            _ => {}
        }
    }

    pub fn down(&mut self) {
        let limit = match &self.screen {
            Screen::Home { .. } => self.catalog.len(),
            Screen::Levels { category, .. } => {
                self.catalog.get(*category).map_or(0, |c| c.items.len())
            }
            _ => return,
        };
        if let Screen::Home { selected } | Screen::Levels { selected, .. } = &mut self.screen {
            if *selected + 1 < limit {
                *selected += 1;
            }
        }
    }

    pub fn left(&mut self) {
        if let Screen::Puzzle(view) = &mut self.screen {
            view.cursor = view.cursor.saturating_sub(1);
        }
    }

    pub fn right(&mut self) {
        if let Screen::Puzzle(view) = &mut self.screen {
            let len = view.session.round().pool().len();
            if view.cursor + 1 < len {
                view.cursor += 1;
            }
        }
    }

    /// Enter: open a category, start a level, or tap the tile under the cursor
    pub fn select(&mut self) {
        match &mut self.screen {
            Screen::Home { selected } => {
                if *selected < self.catalog.len() {
                    let category = *selected;
                    self.open_levels(category, 0);
                }
            }
            Screen::Levels { category, selected } => {
                let (category, index) = (*category, *selected);
                self.start_level(category, index);
            }
            Screen::Puzzle(view) => {
                if view.carry.is_some() {
                    return;
                }
                let cursor = view.cursor;
                view.session.place_at(cursor, &mut self.gate);
            }
            Screen::Error { .. } => self.go_home(),
        }
    }

    /// Space: lift the tile under the cursor. A new pick-up replaces any
    /// earlier carry.
    pub fn pick_up(&mut self) {
        if let Screen::Puzzle(view) = &mut self.screen {
            view.carry = view.session.pick_up(view.cursor);
        }
    }

    /// Digit key: drop the carry onto slot `slot`, or clear the slot when
    /// nothing is carried.
    pub fn slot_key(&mut self, slot: usize) {
        if let Screen::Puzzle(view) = &mut self.screen {
            match view.carry.take() {
                Some(carry) => {
                    view.session.drop_onto(slot, carry, &mut self.gate);
                }
                None => {
                    view.session.clear(slot);
                }
            }
        }
    }

    pub fn hint(&mut self) {
        if let Screen::Puzzle(view) = &mut self.screen {
            view.session.hint(&mut self.gate);
        }
    }

    /// Manual retry of the current puzzle
    pub fn reset(&mut self) {
        if let Screen::Puzzle(view) = &mut self.screen {
            view.carry = None;
            if view.session.reset() {
                view.revealed_answer = None;
            }
        }
    }

    /// Esc: drop a carry first, otherwise go back one screen
    pub fn back(&mut self) {
        match &mut self.screen {
            Screen::Home { .. } => self.quit(),
            Screen::Levels { .. } | Screen::Error { .. } => self.go_home(),
            Screen::Puzzle(view) => {
                if view.carry.take().is_some() {
                    return;
                }
                let category = view.category;
                let index = view.session.sequence().index();
                self.open_levels(category, index);
            }
        }
    }

    /// Advance timers and collect what the session reported.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.status.is_some() {
            self.status_age += elapsed;
            if self.status_age >= STATUS_TTL {
                self.status = None;
            }
        }

        let (signals, events) = match &mut self.screen {
            Screen::Puzzle(view) => {
                view.session.tick(elapsed);
                (view.session.take_signals(), view.session.poll_events())
            }
            _ => return,
        };

        if let Some(&signal) = signals.last() {
            self.set_status(signal.label(), signal.into());
        }
        for event in events {
            self.handle_event(event);
        }
    }

    fn go_home(&mut self) {
        let selected = match &self.screen {
            Screen::Levels { category, .. } => *category,
            Screen::Puzzle(view) => view.category,
            _ => 0,
        };
        self.banner = None;
        self.screen = Screen::Home { selected };
    }

    fn open_levels(&mut self, category: usize, selected: usize) {
        // Progress may have changed while the levels were out of view
        self.gate.reload();
        self.screen = Screen::Levels { category, selected };
    }

    fn start_level(&mut self, category: usize, index: usize) {
        let Some(cat) = self.catalog.get(category) else {
            return;
        };
        if !self.gate.is_unlocked(&cat.items, index) {
            self.banner = Some("That level is locked".to_string());
            return;
        }
        if cat.items.is_empty() {
            self.screen = Screen::Error {
                message: format!("Category {} has no puzzles", cat.name),
            };
            return;
        }

        info!(category = %cat.name, index, "starting level");
        let session = Session::new(cat.sequence(index), StdRng::from_rng(&mut self.rng));
        self.banner = None;
        self.status = None;
        self.screen = Screen::Puzzle(Box::new(PuzzleView::new(category, session)));
    }

    fn set_status(&mut self, text: impl Into<String>, tone: Tone) {
        self.status = Some((text.into(), tone));
        self.status_age = Duration::ZERO;
    }

    fn handle_event(&mut self, event: SessionEvent) {
        debug!(?event, "session event");
        match event {
            SessionEvent::Advanced { .. } => {
                if let Screen::Puzzle(view) = &mut self.screen {
                    view.cursor = 0;
                    view.carry = None;
                    view.revealed_answer = None;
                }
            }
            SessionEvent::Retry { attempts_remaining } => {
                if let Screen::Puzzle(view) = &mut self.screen {
                    view.carry = None;
                    if view.revealed_answer.is_none() {
                        self.set_status(
                            format!("Wrong! Attempts left: {}", attempts_remaining),
                            Tone::Bad,
                        );
                    }
                }
            }
            SessionEvent::AttemptsExhausted { answer } => {
                if let Screen::Puzzle(view) = &mut self.screen {
                    view.revealed_answer = Some(answer);
                }
            }
            SessionEvent::PersistenceFailed { puzzle_id, message } => {
                self.set_status(
                    format!("Progress for {} not saved: {}", puzzle_id, message),
                    Tone::Bad,
                );
            }
            SessionEvent::Finished { sequence_complete } => {
                let (category, index) = match &self.screen {
                    Screen::Puzzle(view) => (view.category, view.session.sequence().index()),
                    _ => return,
                };
                self.open_levels(category, index);
                if sequence_complete {
                    self.banner = Some("Category complete!".to_string());
                }
            }
        }
    }
}

/// How a status line should be coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Bad,
    Neutral,
}

impl From<Signal> for Tone {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::RoundCorrect | Signal::HintUsed => Tone::Good,
            Signal::RoundWrong => Tone::Bad,
            Signal::TilePlaced | Signal::TileCleared => Tone::Neutral,
        }
    }
}
