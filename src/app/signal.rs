//! Notifications the engine hands to whoever drives it

use crate::game::puzzle::PuzzleId;

/// Fire-and-forget cues for the presentation layer (sounds, flashes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    TilePlaced,
    TileCleared,
    HintUsed,
    RoundCorrect,
    RoundWrong,
}

impl Signal {
    pub fn label(&self) -> &'static str {
        match self {
            Signal::TilePlaced => "click",
            Signal::TileCleared => "clack",
            Signal::HintUsed => "hint",
            Signal::RoundCorrect => "CORRECT!",
            Signal::RoundWrong => "WRONG",
        }
    }
}

/// Things the caller has to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A fresh round started for the puzzle at `index`
    Advanced { index: usize },
    /// A wrong attempt was cleared and the round is playable again
    Retry { attempts_remaining: u32 },
    /// The last attempt was used up; the caller may show the answer
    AttemptsExhausted { answer: String },
    /// Saving progress failed. Play carries on.
    PersistenceFailed { puzzle_id: PuzzleId, message: String },
    /// Nothing more to play here; hand control back.
    /// `sequence_complete` is false when the solved puzzle had no id.
    Finished { sequence_complete: bool },
}
