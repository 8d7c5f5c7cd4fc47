//! Game logic: key pools, slot assignment, hints, outcome evaluation

pub mod hint;
pub mod outcome;
pub mod puzzle;
pub mod slots;

use rand::prelude::*;

/// Minimum number of tiles in a pool. Short words are padded with distractors.
pub const POOL_CAP: usize = 12;

const ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// One selectable letter in the pool. Identity is the index, not the letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub index: usize,
    pub letter: char,
}

/// The fixed set of tiles for a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPool {
    tiles: Vec<Tile>,
}

impl KeyPool {
    /// Build a pool for `word` with the default cap.
    pub fn build<R: Rng + ?Sized>(word: &[char], rng: &mut R) -> Self {
        Self::build_with_cap(word, POOL_CAP, rng)
    }

    /// Build a pool holding every letter of `word` plus distinct distractors
    /// not found in `word`, padded up to `cap` tiles and shuffled.
    ///
    /// If the alphabet runs out of distractors the pool ends up shorter
    /// than `cap`.
    pub fn build_with_cap<R: Rng + ?Sized>(word: &[char], cap: usize, rng: &mut R) -> Self {
        let mut distractors: Vec<char> = ALPHABET
            .iter()
            .copied()
            .filter(|c| !word.contains(c))
            .collect();
        distractors.shuffle(rng);
        distractors.truncate(cap.saturating_sub(word.len()));

        let mut letters: Vec<char> = word.to_vec();
        letters.extend(distractors);
        letters.shuffle(rng);

        let tiles = letters
            .into_iter()
            .enumerate()
            .map(|(index, letter)| Tile { index, letter })
            .collect();

        Self { tiles }
    }

    /// Build a pool from letters in a known order (no shuffling).
    #[cfg(test)]
    pub fn from_letters(letters: &[char]) -> Self {
        Self {
            tiles: letters
                .iter()
                .enumerate()
                .map(|(index, &letter)| Tile { index, letter })
                .collect(),
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Display the pool as a string.
    #[cfg(test)]
    pub fn as_string(&self) -> String {
        self.tiles.iter().map(|t| t.letter).collect()
    }
}
