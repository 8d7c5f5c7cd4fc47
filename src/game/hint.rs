//! Hint selection: reveal the correct letter for one empty slot

use super::slots::SlotBoard;
use super::KeyPool;
use rand::prelude::*;

/// What a hint did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    /// A matching unused tile was moved into the slot
    Placed { slot: usize, tile_index: usize },
    /// No unused tile matched; the letter is shown without a tile
    Revealed { slot: usize, letter: char },
}

impl Hint {
    pub fn slot(&self) -> usize {
        match self {
            Hint::Placed { slot, .. } | Hint::Revealed { slot, .. } => *slot,
        }
    }
}

/// Pick a random empty slot and fill it with its correct letter.
///
/// The lowest-index unused pool tile with that letter is spent if one
/// exists. Returns `None` when every slot is filled.
pub fn apply_hint<R: Rng + ?Sized>(
    board: &mut SlotBoard,
    pool: &KeyPool,
    word: &[char],
    rng: &mut R,
) -> Option<Hint> {
    let empty = board.empty_positions();
    let slot = *empty.choose(rng)?;
    let letter = *word.get(slot)?;

    let spare = pool
        .tiles()
        .iter()
        .find(|t| t.letter == letter && !board.is_used(t.index))
        .copied();

    match spare {
        Some(tile) => {
            if board.occupy(slot, tile) {
                Some(Hint::Placed {
                    slot,
                    tile_index: tile.index,
                })
            } else {
                None
            }
        }
        None => {
            if board.reveal(slot, letter) {
                Some(Hint::Revealed { slot, letter })
            } else {
                None
            }
        }
    }
}
