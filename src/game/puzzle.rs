//! Puzzle descriptors and the ordered sequences they are played in

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a puzzle, string-normalized.
///
/// Catalog files may give ids as strings or numbers; both end up as the
/// same string so `7` and `"7"` refer to one puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PuzzleId(String);

impl PuzzleId {
    pub fn new(id: impl Into<String>) -> Self {
        PuzzleId(id.into().trim().to_string())
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty id cannot be recorded as complete.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PuzzleId {
    fn from(s: &str) -> Self {
        PuzzleId::new(s)
    }
}

impl From<u64> for PuzzleId {
    fn from(n: u64) -> Self {
        PuzzleId(n.to_string())
    }
}

/// Raw id as it may appear in JSON.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Float(f64),
}

impl<'de> Deserialize<'de> for PuzzleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => PuzzleId::new(s),
            RawId::Int(n) => PuzzleId(n.to_string()),
            RawId::Float(n) => PuzzleId(n.to_string()),
        })
    }
}

/// One puzzle as supplied by the caller.
///
/// The word may be given as `word` or `name` and the picture as `image` or
/// `imageRef`. When both spellings are present `word` and `image` win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDescriptor")]
pub struct PuzzleDescriptor {
    pub id: PuzzleId,
    pub word: String,
    /// Opaque reference to the picture shown with the puzzle
    pub image: Option<String>,
}

#[derive(Deserialize)]
struct RawDescriptor {
    id: PuzzleId,
    #[serde(default)]
    word: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default, rename = "imageRef")]
    image_ref: Option<String>,
}

impl From<RawDescriptor> for PuzzleDescriptor {
    fn from(raw: RawDescriptor) -> Self {
        Self {
            id: raw.id,
            word: raw.word.or(raw.name).unwrap_or_default(),
            image: raw.image.or(raw.image_ref),
        }
    }
}

impl PuzzleDescriptor {
    pub fn new(id: impl Into<PuzzleId>, word: &str) -> Self {
        Self {
            id: id.into(),
            word: word.to_string(),
            image: None,
        }
    }

    /// The word as uppercase letters, the form the engine plays with.
    pub fn letters(&self) -> Vec<char> {
        normalize_word(&self.word)
    }
}

/// Uppercase the word and drop anything that is not a letter.
pub fn normalize_word(word: &str) -> Vec<char> {
    word.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_uppercase)
        .collect()
}

/// An ordered run of puzzles and the position currently being played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleSequence {
    puzzles: Vec<PuzzleDescriptor>,
    index: usize,
}

impl PuzzleSequence {
    /// Create a sequence positioned at `index`, clamped into range.
    pub fn new(puzzles: Vec<PuzzleDescriptor>, index: usize) -> Self {
        let index = index.min(puzzles.len().saturating_sub(1));
        Self { puzzles, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn current(&self) -> Option<&PuzzleDescriptor> {
        self.puzzles.get(self.index)
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.puzzles.len()
    }

    /// Move to the next puzzle. Returns false at the end of the sequence.
    pub fn advance(&mut self) -> bool {
        if self.has_next() {
            self.index += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_string_or_number() {
        let a: PuzzleId = serde_json::from_str("\"7\"").unwrap();
        let b: PuzzleId = serde_json::from_str("7").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "7");
    }

    #[test]
    fn test_id_trimmed() {
        assert_eq!(PuzzleId::new("  cat-1 ").as_str(), "cat-1");
        assert!(PuzzleId::new("   ").is_empty());
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("cat"), vec!['C', 'A', 'T']);
        assert_eq!(normalize_word("Ice cream"), "ICECREAM".chars().collect::<Vec<_>>());
        assert!(normalize_word("").is_empty());
        assert!(normalize_word(" 42 ").is_empty());
    }

    #[test]
    fn test_descriptor_defaults() {
        let d: PuzzleDescriptor = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(d.id.as_str(), "3");
        assert!(d.letters().is_empty());
        assert!(d.image.is_none());

        let d: PuzzleDescriptor =
            serde_json::from_str(r#"{"id": "a", "word": "dog", "imageRef": "dog.png"}"#).unwrap();
        assert_eq!(d.letters(), vec!['D', 'O', 'G']);
        assert_eq!(d.image.as_deref(), Some("dog.png"));
    }

    #[test]
    fn test_descriptor_word_and_name_both_given() {
        let d: PuzzleDescriptor = serde_json::from_str(
            r#"{"id": 1, "name": "owl", "word": "cat", "image": "a.png", "imageRef": "b.png"}"#,
        )
        .unwrap();
        assert_eq!(d.word, "cat");
        assert_eq!(d.image.as_deref(), Some("a.png"));

        let d: PuzzleDescriptor = serde_json::from_str(r#"{"id": 1, "name": "owl"}"#).unwrap();
        assert_eq!(d.word, "owl");
    }

    #[test]
    fn test_sequence_advance() {
        let mut seq = PuzzleSequence::new(
            vec![PuzzleDescriptor::new("1", "CAT"), PuzzleDescriptor::new("2", "DOG")],
            0,
        );
        assert!(seq.has_next());
        assert!(seq.advance());
        assert_eq!(seq.current().map(|p| p.word.as_str()), Some("DOG"));
        assert!(!seq.advance());
        assert_eq!(seq.index(), 1);
    }

    #[test]
    fn test_sequence_index_clamped() {
        let seq = PuzzleSequence::new(vec![PuzzleDescriptor::new("1", "CAT")], 9);
        assert_eq!(seq.index(), 0);

        let empty = PuzzleSequence::new(Vec::new(), 3);
        assert!(empty.current().is_none());
        assert!(!empty.has_next());
    }
}
