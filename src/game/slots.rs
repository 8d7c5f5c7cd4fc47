//! Slot assignment: which pool tile sits in which answer position
//!
//! The board keeps a `used` set alongside the slots. After every operation
//! the set holds exactly the tile indices found in `Slot::Tile` entries,
//! and no tile index appears in two slots.

use super::Tile;
use std::collections::BTreeSet;

/// One answer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Nothing placed yet
    Empty,
    /// Holds a tile from the pool
    Tile(Tile),
    /// Letter shown by a hint with no tile behind it
    Revealed(char),
}

impl Slot {
    pub fn letter(&self) -> Option<char> {
        match self {
            Slot::Empty => None,
            Slot::Tile(tile) => Some(tile.letter),
            Slot::Revealed(c) => Some(*c),
        }
    }

    /// Pool index of the tile occupying this slot, if any.
    pub fn occupant(&self) -> Option<usize> {
        match self {
            Slot::Tile(tile) => Some(tile.index),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}

/// A tile lifted from the pool and not yet dropped.
///
/// Owned by whoever drives the interaction and handed to
/// [`SlotBoard::drop_onto`] by value, so a carry is spent by the drop
/// whether or not the drop changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragCarry {
    pub tile_index: usize,
    pub letter: char,
}

impl From<Tile> for DragCarry {
    fn from(tile: Tile) -> Self {
        DragCarry {
            tile_index: tile.index,
            letter: tile.letter,
        }
    }
}

/// Result of a successful drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dropped {
    pub slot: usize,
    /// Tile that was in the slot before and is now back in the pool
    pub displaced: Option<usize>,
}

/// The answer slots for one round plus the set of tiles in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotBoard {
    slots: Vec<Slot>,
    used: BTreeSet<usize>,
}

impl SlotBoard {
    /// Create `len` empty slots.
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![Slot::Empty; len],
            used: BTreeSet::new(),
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_used(&self, tile_index: usize) -> bool {
        self.used.contains(&tile_index)
    }

    #[cfg(test)]
    pub fn used(&self) -> &BTreeSet<usize> {
        &self.used
    }

    /// True when every slot holds something. A zero-slot board is never full,
    /// so a degenerate puzzle stays pending.
    pub fn is_full(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(|s| !s.is_empty())
    }

    pub fn all_empty(&self) -> bool {
        self.slots.iter().all(Slot::is_empty)
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// Positions of every empty slot, left to right.
    pub fn empty_positions(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    /// Put `tile` into the leftmost empty slot.
    ///
    /// Returns the slot index, or `None` if the tile is already in use or
    /// every slot is taken.
    pub fn place(&mut self, tile: Tile) -> Option<usize> {
        if self.used.contains(&tile.index) {
            return None;
        }
        let slot = self.slots.iter().position(Slot::is_empty)?;
        self.slots[slot] = Slot::Tile(tile);
        self.used.insert(tile.index);
        Some(slot)
    }

    /// Empty a slot holding a tile and hand the tile back.
    ///
    /// Empty slots and revealed letters are left alone.
    pub fn clear(&mut self, slot: usize) -> Option<Tile> {
        match self.slots.get(slot).copied() {
            Some(Slot::Tile(tile)) => {
                self.used.remove(&tile.index);
                self.slots[slot] = Slot::Empty;
                Some(tile)
            }
            _ => None,
        }
    }

    /// Drop a carried tile onto a slot, displacing whatever was there.
    pub fn drop_onto(&mut self, slot: usize, carry: DragCarry) -> Option<Dropped> {
        if slot >= self.slots.len() || self.used.contains(&carry.tile_index) {
            return None;
        }

        let displaced = self.slots[slot].occupant();
        if let Some(old) = displaced {
            self.used.remove(&old);
        }

        self.slots[slot] = Slot::Tile(Tile {
            index: carry.tile_index,
            letter: carry.letter,
        });
        self.used.insert(carry.tile_index);

        Some(Dropped { slot, displaced })
    }

    /// Put a specific tile into a specific empty slot.
    pub fn occupy(&mut self, slot: usize, tile: Tile) -> bool {
        if !self.slots.get(slot).is_some_and(Slot::is_empty) || self.used.contains(&tile.index) {
            return false;
        }
        self.slots[slot] = Slot::Tile(tile);
        self.used.insert(tile.index);
        true
    }

    /// Show a letter in an empty slot without spending a tile.
    pub fn reveal(&mut self, slot: usize, letter: char) -> bool {
        if !self.slots.get(slot).is_some_and(Slot::is_empty) {
            return false;
        }
        self.slots[slot] = Slot::Revealed(letter);
        true
    }

    /// Empty every slot and return every tile to the pool.
    pub fn clear_all(&mut self) {
        self.slots.fill(Slot::Empty);
        self.used.clear();
    }

    /// Slot letters in order; empty slots are skipped.
    #[cfg(test)]
    pub fn letters(&self) -> String {
        self.slots.iter().filter_map(Slot::letter).collect()
    }

    /// Check that the used set matches the slot occupants exactly.
    #[cfg(test)]
    pub fn is_consistent(&self) -> bool {
        let mut seen = BTreeSet::new();
        for index in self.slots.iter().filter_map(Slot::occupant) {
            if !seen.insert(index) {
                return false;
            }
        }
        seen == self.used
    }
}
