//! A single round: one attempt-cycle at one puzzle
//!
//! Player actions only take effect while the round is `Active`. The round
//! becomes `Correct` or `Wrong` the moment its last slot is filled and
//! stays there until the session clears or replaces it.

use crate::game::hint::{apply_hint, Hint};
use crate::game::outcome::{evaluate, Outcome};
use crate::game::puzzle::PuzzleDescriptor;
use crate::game::slots::{DragCarry, SlotBoard};
use crate::game::KeyPool;
use rand::Rng;
use tracing::debug;

/// Wrong answers allowed before the answer is offered
pub const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Active,
    Correct,
    Wrong,
}

#[derive(Debug, Clone)]
pub struct Round {
    puzzle: PuzzleDescriptor,
    word: Vec<char>,
    pool: KeyPool,
    board: SlotBoard,
    status: RoundStatus,
    hint_used: bool,
    attempts_remaining: u32,
}

impl Round {
    /// Start a round with a freshly built pool.
    pub fn new<R: Rng + ?Sized>(puzzle: PuzzleDescriptor, rng: &mut R) -> Self {
        let word = puzzle.letters();
        let pool = KeyPool::build(&word, rng);
        Self::with_pool(puzzle, pool)
    }

    /// Start a round over a given pool.
    pub fn with_pool(puzzle: PuzzleDescriptor, pool: KeyPool) -> Self {
        let word = puzzle.letters();
        Self {
            board: SlotBoard::new(word.len()),
            puzzle,
            word,
            pool,
            status: RoundStatus::Active,
            hint_used: false,
            attempts_remaining: MAX_ATTEMPTS,
        }
    }

    pub fn puzzle(&self) -> &PuzzleDescriptor {
        &self.puzzle
    }

    pub fn word(&self) -> &[char] {
        &self.word
    }

    pub fn answer(&self) -> String {
        self.word.iter().collect()
    }

    pub fn pool(&self) -> &KeyPool {
        &self.pool
    }

    pub fn board(&self) -> &SlotBoard {
        &self.board
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == RoundStatus::Active
    }

    pub fn hint_used(&self) -> bool {
        self.hint_used
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    /// Fraction of slots filled, 0.0 for a puzzle with no letters.
    pub fn progress(&self) -> f64 {
        if self.board.is_empty() {
            0.0
        } else {
            self.board.filled_count() as f64 / self.board.len() as f64
        }
    }

    /// Whether a pool tile can still be picked.
    pub fn is_available(&self, tile_index: usize) -> bool {
        tile_index < self.pool.len() && !self.board.is_used(tile_index)
    }

    /// Lift a tile out of the pool for dragging.
    pub fn pick_up(&self, tile_index: usize) -> Option<DragCarry> {
        if !self.is_active() || !self.is_available(tile_index) {
            return None;
        }
        self.pool.get(tile_index).copied().map(DragCarry::from)
    }

    /// Tap a pool tile: it goes into the leftmost empty slot.
    pub fn place_at(&mut self, tile_index: usize) -> bool {
        if !self.is_active() {
            return false;
        }
        match self.pool.get(tile_index).copied() {
            Some(tile) => self.board.place(tile).is_some(),
            None => false,
        }
    }

    /// Tap a filled slot: its tile returns to the pool.
    pub fn clear(&mut self, slot: usize) -> bool {
        self.is_active() && self.board.clear(slot).is_some()
    }

    /// Drop a carried tile onto a slot. A carry that does not match this
    /// round's pool (left over from another puzzle) is ignored.
    pub fn drop_onto(&mut self, slot: usize, carry: DragCarry) -> bool {
        if !self.is_active() {
            return false;
        }
        let from_this_pool = self
            .pool
            .get(carry.tile_index)
            .is_some_and(|t| t.letter == carry.letter);
        if !from_this_pool {
            return false;
        }
        match self.board.drop_onto(slot, carry) {
            Some(dropped) => {
                debug!(slot = dropped.slot, displaced = ?dropped.displaced, "tile dropped");
                true
            }
            None => false,
        }
    }

    /// Use the round's one hint.
    pub fn hint<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Hint> {
        if self.hint_used || !self.is_active() {
            return None;
        }
        let hint = apply_hint(&mut self.board, &self.pool, &self.word, rng)?;
        self.hint_used = true;
        Some(hint)
    }

    /// Classify the board and lock the round if it is resolved.
    pub fn evaluate(&mut self) -> Outcome {
        if !self.is_active() {
            return match self.status {
                RoundStatus::Correct => Outcome::Correct,
                RoundStatus::Wrong => Outcome::Wrong,
                RoundStatus::Active => Outcome::Pending,
            };
        }

        let outcome = evaluate(&self.board, &self.word);
        match outcome {
            Outcome::Correct => self.status = RoundStatus::Correct,
            Outcome::Wrong => {
                self.status = RoundStatus::Wrong;
                self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
            }
            Outcome::Pending => {}
        }
        outcome
    }

    /// Clear the slots after a wrong answer. The hint stays spent and the
    /// pool is kept.
    pub fn clear_for_retry(&mut self) {
        self.board.clear_all();
        self.status = RoundStatus::Active;
    }

    /// Start this puzzle over: empty slots, hint and attempts restored.
    pub fn restart(&mut self) {
        self.board.clear_all();
        self.status = RoundStatus::Active;
        self.hint_used = false;
        self.attempts_remaining = MAX_ATTEMPTS;
    }

    /// True when a restart would change nothing: empty slots, hint unused
    /// and the full attempt budget.
    pub fn is_pristine(&self) -> bool {
        self.is_active()
            && self.board.all_empty()
            && !self.hint_used
            && self.attempts_remaining == MAX_ATTEMPTS
    }
}
