//! Playing through a sequence of puzzles
//!
//! The session wraps the current [`Round`], reacts to its outcome and owns
//! the delayed follow-ups: advancing after a correct answer, clearing the
//! slots after a wrong one. At most one follow-up is pending. Each fresh
//! round gets a new generation number and a pending timer from an older
//! generation is discarded instead of fired.

use super::round::{Round, RoundStatus};
use super::signal::{SessionEvent, Signal};
use crate::game::outcome::Outcome;
use crate::game::puzzle::{PuzzleDescriptor, PuzzleSequence};
use crate::game::slots::DragCarry;
use crate::storage::progress::CompletionRecorder;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Delays before a resolved round is followed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTimings {
    /// After a correct answer, before moving on
    pub advance_delay: Duration,
    /// After a wrong answer, before the slots are cleared
    pub retry_delay: Duration,
}

impl Default for RoundTimings {
    fn default() -> Self {
        Self {
            advance_delay: Duration::from_millis(700),
            retry_delay: Duration::from_millis(200),
        }
    }
}

/// Handle for a scheduled follow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
    id: u64,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    Advance,
    Retry,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    token: TimerToken,
    remaining: Duration,
    follow_up: FollowUp,
}

pub struct Session<R> {
    sequence: PuzzleSequence,
    round: Round,
    rng: R,
    timings: RoundTimings,
    generation: u64,
    next_timer_id: u64,
    pending: Option<PendingTimer>,
    signals: Vec<Signal>,
    events: Vec<SessionEvent>,
    finished: bool,
}

impl<R: Rng> Session<R> {
    /// Start playing `sequence` at its current position.
    ///
    /// An empty sequence plays a puzzle with no letters, which can never be
    /// completed.
    pub fn new(sequence: PuzzleSequence, mut rng: R) -> Self {
        let puzzle = sequence
            .current()
            .cloned()
            .unwrap_or_else(|| PuzzleDescriptor::new("", ""));
        let round = Round::new(puzzle, &mut rng);
        Self::with_round(sequence, round, rng)
    }

    /// Start with a prepared first round.
    pub fn with_round(sequence: PuzzleSequence, round: Round, rng: R) -> Self {
        info!(
            puzzle = %round.puzzle().id,
            index = sequence.index(),
            letters = round.word().len(),
            "round started"
        );
        Self {
            sequence,
            round,
            rng,
            timings: RoundTimings::default(),
            generation: 0,
            next_timer_id: 0,
            pending: None,
            signals: Vec::new(),
            events: Vec::new(),
            finished: false,
        }
    }

    #[cfg(test)]
    pub fn with_timings(mut self, timings: RoundTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn sequence(&self) -> &PuzzleSequence {
        &self.sequence
    }

    pub fn status(&self) -> RoundStatus {
        self.round.status()
    }

    /// True once control has been handed back to the caller.
    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The follow-up waiting to fire, if any.
    #[cfg(test)]
    pub fn pending(&self) -> Option<(TimerToken, FollowUp, Duration)> {
        self.pending
            .map(|timer| (timer.token, timer.follow_up, timer.remaining))
    }

    /// Drain the presentation cues emitted since the last call.
    pub fn take_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    /// Drain the caller-facing events emitted since the last call.
    pub fn poll_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pick_up(&self, tile_index: usize) -> Option<DragCarry> {
        self.round.pick_up(tile_index)
    }

    /// Tap a pool tile into the leftmost empty slot.
    pub fn place_at(&mut self, tile_index: usize, recorder: &mut impl CompletionRecorder) -> bool {
        if !self.round.place_at(tile_index) {
            return false;
        }
        self.signals.push(Signal::TilePlaced);
        self.resolve(recorder);
        true
    }

    /// Tap a slot to send its tile back to the pool.
    pub fn clear(&mut self, slot: usize) -> bool {
        if !self.round.clear(slot) {
            return false;
        }
        self.signals.push(Signal::TileCleared);
        true
    }

    /// Drop a carried tile onto a slot. The carry is spent either way.
    pub fn drop_onto(
        &mut self,
        slot: usize,
        carry: DragCarry,
        recorder: &mut impl CompletionRecorder,
    ) -> bool {
        if !self.round.drop_onto(slot, carry) {
            return false;
        }
        self.signals.push(Signal::TilePlaced);
        self.resolve(recorder);
        true
    }

    /// Use the round's hint.
    pub fn hint(&mut self, recorder: &mut impl CompletionRecorder) -> bool {
        let Some(hint) = self.round.hint(&mut self.rng) else {
            return false;
        };
        debug!(slot = hint.slot(), ?hint, "hint applied");
        self.signals.push(Signal::HintUsed);
        self.resolve(recorder);
        true
    }

    /// Start the current puzzle over: empty slots, hint and attempts back,
    /// same pool. Cancels any pending follow-up. Refused only when there is
    /// nothing to undo.
    pub fn reset(&mut self) -> bool {
        if self.finished || (self.pending.is_none() && self.round.is_pristine()) {
            return false;
        }
        self.cancel_pending();
        self.round.restart();
        self.generation += 1;
        info!(puzzle = %self.round.puzzle().id, "round reset");
        true
    }

    /// Let time pass. Fires the pending follow-up once its delay runs out.
    pub fn tick(&mut self, elapsed: Duration) {
        let due = match self.pending.as_mut() {
            Some(timer) => {
                timer.remaining = timer.remaining.saturating_sub(elapsed);
                timer.remaining.is_zero().then_some(timer.token)
            }
            None => None,
        };
        if let Some(token) = due {
            self.fire(token);
        }
    }

    /// Run the follow-up for `token` now.
    ///
    /// Returns false for a token that was cancelled or belongs to an earlier
    /// round.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if token.generation != self.generation {
            debug!(?token, generation = self.generation, "discarding stale timer");
            return false;
        }
        let timer = match self.pending {
            Some(timer) if timer.token == token => timer,
            _ => {
                debug!(?token, "discarding cancelled timer");
                return false;
            }
        };
        self.pending = None;

        match timer.follow_up {
            FollowUp::Advance => self.advance(),
            FollowUp::Retry => self.retry(),
        }
        true
    }

    fn resolve(&mut self, recorder: &mut impl CompletionRecorder) {
        match self.round.evaluate() {
            Outcome::Pending => {}
            Outcome::Correct => {
                info!(puzzle = %self.round.puzzle().id, "round correct");
                self.signals.push(Signal::RoundCorrect);
                self.record(recorder);
                self.schedule(FollowUp::Advance, self.timings.advance_delay);
            }
            Outcome::Wrong => {
                let attempts_remaining = self.round.attempts_remaining();
                info!(
                    puzzle = %self.round.puzzle().id,
                    attempts_remaining,
                    "round wrong"
                );
                self.signals.push(Signal::RoundWrong);
                if attempts_remaining == 0 {
                    self.events.push(SessionEvent::AttemptsExhausted {
                        answer: self.round.answer(),
                    });
                }
                self.schedule(FollowUp::Retry, self.timings.retry_delay);
            }
        }
    }

    fn record(&mut self, recorder: &mut impl CompletionRecorder) {
        let id = self.round.puzzle().id.clone();
        if id.is_empty() {
            return;
        }
        if let Err(e) = recorder.record_complete(&id) {
            warn!(puzzle = %id, error = %e, "could not save progress");
            self.events.push(SessionEvent::PersistenceFailed {
                puzzle_id: id,
                message: e.to_string(),
            });
        }
    }

    fn schedule(&mut self, follow_up: FollowUp, delay: Duration) -> TimerToken {
        let token = TimerToken {
            id: self.next_timer_id,
            generation: self.generation,
        };
        self.next_timer_id += 1;
        self.pending = Some(PendingTimer {
            token,
            remaining: delay,
            follow_up,
        });
        token
    }

    fn cancel_pending(&mut self) {
        if let Some(timer) = self.pending.take() {
            debug!(token = ?timer.token, follow_up = ?timer.follow_up, "cancelled pending timer");
        }
    }

    fn advance(&mut self) {
        if self.round.puzzle().id.is_empty() {
            self.finish(false);
            return;
        }
        if !self.sequence.advance() {
            self.finish(true);
            return;
        }

        let puzzle = match self.sequence.current() {
            Some(puzzle) => puzzle.clone(),
            None => {
                self.finish(true);
                return;
            }
        };
        self.round = Round::new(puzzle, &mut self.rng);
        self.generation += 1;
        info!(
            puzzle = %self.round.puzzle().id,
            index = self.sequence.index(),
            "advanced to next puzzle"
        );
        self.events.push(SessionEvent::Advanced {
            index: self.sequence.index(),
        });
    }

    fn retry(&mut self) {
        self.round.clear_for_retry();
        self.generation += 1;
        debug!(puzzle = %self.round.puzzle().id, "slots cleared for retry");
        self.events.push(SessionEvent::Retry {
            attempts_remaining: self.round.attempts_remaining(),
        });
    }

    fn finish(&mut self, sequence_complete: bool) {
        self.finished = true;
        info!(sequence_complete, "session finished");
        self.events.push(SessionEvent::Finished { sequence_complete });
    }
}
