//! Puzzle progression: which puzzles are solved and which are unlocked
//!
//! The completion record is one key in the store holding a JSON array of
//! puzzle ids. It only ever grows. When loading, a missing key, a failed
//! read or a malformed value all read as an empty record. Recording never
//! writes a record it could not first read back.

use super::{KeyValueStore, StorageError};
use crate::game::puzzle::{PuzzleDescriptor, PuzzleId};
use tracing::{debug, warn};

/// Store key holding the completion record.
pub const COMPLETION_KEY: &str = "completedWords";

/// Something that can remember a solved puzzle.
pub trait CompletionRecorder {
    /// Mark `id` complete. Returns whether the id was newly added.
    fn record_complete(&mut self, id: &PuzzleId) -> Result<bool, StorageError>;
}

/// How a level shows up in a level grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStatus {
    Solved,
    Unlocked,
    Locked,
}

/// Unlock gating over a key-value store.
///
/// Holds a snapshot of the completion record, valid until the next
/// [`ProgressionGate::reload`].
pub struct ProgressionGate<S> {
    store: S,
    completed: Vec<PuzzleId>,
}

impl<S: KeyValueStore> ProgressionGate<S> {
    /// Wrap a store and load the completion record from it.
    pub fn new(store: S) -> Self {
        let completed = read_record(&store);
        Self { store, completed }
    }

    /// Re-read the completion record from the store.
    pub fn reload(&mut self) {
        self.completed = read_record(&self.store);
    }

    #[cfg(test)]
    pub fn completed(&self) -> &[PuzzleId] {
        &self.completed
    }

    pub fn is_complete(&self, id: &PuzzleId) -> bool {
        self.completed.contains(id)
    }

    /// Position 0 is always open; any later position opens once the puzzle
    /// before it is solved. Positions past the end are locked.
    pub fn is_unlocked(&self, sequence: &[PuzzleDescriptor], index: usize) -> bool {
        if index == 0 {
            return true;
        }
        if index >= sequence.len() {
            return false;
        }
        self.is_complete(&sequence[index - 1].id)
    }

    pub fn level_status(&self, sequence: &[PuzzleDescriptor], index: usize) -> LevelStatus {
        match sequence.get(index) {
            Some(puzzle) if self.is_complete(&puzzle.id) => LevelStatus::Solved,
            _ if self.is_unlocked(sequence, index) => LevelStatus::Unlocked,
            _ => LevelStatus::Locked,
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> CompletionRecorder for ProgressionGate<S> {
    /// The snapshot is updated before the write, so a failed read or write
    /// still unlocks the next puzzle for the rest of this run.
    fn record_complete(&mut self, id: &PuzzleId) -> Result<bool, StorageError> {
        if id.is_empty() {
            return Ok(false);
        }

        // Merge with whatever is stored now so entries written elsewhere survive
        let stored = match self.store.get(COMPLETION_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                if !self.completed.contains(id) {
                    self.completed.push(id.clone());
                }
                return Err(e);
            }
        };
        let mut merged = stored.as_deref().map(parse_record).unwrap_or_default();
        for known in &self.completed {
            if !merged.contains(known) {
                merged.push(known.clone());
            }
        }

        let added = !merged.contains(id);
        if added {
            merged.push(id.clone());
        }
        self.completed = merged;

        if !added {
            debug!(puzzle = %id, "puzzle already recorded complete");
            return Ok(false);
        }

        let encoded = serde_json::to_string(&self.completed)?;
        self.store.set(COMPLETION_KEY, &encoded)?;
        debug!(puzzle = %id, total = self.completed.len(), "recorded puzzle complete");
        Ok(true)
    }
}

fn read_record<S: KeyValueStore>(store: &S) -> Vec<PuzzleId> {
    match store.get(COMPLETION_KEY) {
        Ok(Some(raw)) => parse_record(&raw),
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(error = %e, "could not read completion record");
            Vec::new()
        }
    }
}

fn parse_record(raw: &str) -> Vec<PuzzleId> {
    match serde_json::from_str::<Vec<PuzzleId>>(raw) {
        Ok(ids) => {
            let mut unique: Vec<PuzzleId> = Vec::with_capacity(ids.len());
            for id in ids {
                if !id.is_empty() && !unique.contains(&id) {
                    unique.push(id);
                }
            }
            unique
        }
        Err(e) => {
            warn!(error = %e, "completion record is malformed, treating as empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, SqliteStore};

    fn sequence() -> Vec<PuzzleDescriptor> {
        vec![
            PuzzleDescriptor::new("1", "CAT"),
            PuzzleDescriptor::new("2", "DOG"),
            PuzzleDescriptor::new("3", "COW"),
        ]
    }

    #[test]
    fn test_first_level_always_unlocked() {
        let gate = ProgressionGate::new(MemoryStore::new());
        assert!(gate.is_unlocked(&sequence(), 0));
        assert!(gate.is_unlocked(&[], 0));
    }

    #[test]
    fn test_next_level_unlocks_after_completion() {
        let mut gate = ProgressionGate::new(MemoryStore::new());
        let seq = sequence();
        assert!(!gate.is_unlocked(&seq, 1));

        assert!(gate.record_complete(&seq[0].id).unwrap());
        assert!(gate.is_unlocked(&seq, 1));
        assert!(!gate.is_unlocked(&seq, 2));
        assert!(!gate.is_unlocked(&seq, 3));
    }

    #[test]
    fn test_record_is_idempotent() {
        let mut gate = ProgressionGate::new(MemoryStore::new());
        let id = PuzzleId::from("1");
        assert!(gate.record_complete(&id).unwrap());
        assert!(!gate.record_complete(&id).unwrap());
        assert_eq!(gate.completed().len(), 1);

        let stored = gate.store().get(COMPLETION_KEY).unwrap();
        assert_eq!(stored.as_deref(), Some(r#"["1"]"#));
    }

    #[test]
    fn test_empty_id_never_recorded() {
        let mut gate = ProgressionGate::new(MemoryStore::new());
        assert!(!gate.record_complete(&PuzzleId::new("  ")).unwrap());
        assert!(gate.completed().is_empty());
        assert_eq!(gate.store().get(COMPLETION_KEY).unwrap(), None);
    }

    #[test]
    fn test_malformed_record_reads_empty() {
        let mut store = MemoryStore::new();
        store.set(COMPLETION_KEY, "{not json").unwrap();
        let gate = ProgressionGate::new(store);
        assert!(gate.completed().is_empty());

        let mut store = MemoryStore::new();
        store.set(COMPLETION_KEY, r#"{"1": true}"#).unwrap();
        let gate = ProgressionGate::new(store);
        assert!(gate.completed().is_empty());
    }

    #[test]
    fn test_numeric_ids_normalized() {
        let mut store = MemoryStore::new();
        store.set(COMPLETION_KEY, r#"[1, "2", 2]"#).unwrap();
        let gate = ProgressionGate::new(store);
        assert_eq!(gate.completed(), &[PuzzleId::from("1"), PuzzleId::from("2")]);
        assert!(gate.is_unlocked(&sequence(), 2));
    }

    #[test]
    fn test_failed_read_is_empty_record() {
        let gate = ProgressionGate::new(MemoryStore::new().fail_reads());
        assert!(gate.completed().is_empty());
        assert!(!gate.is_unlocked(&sequence(), 1));
    }

    #[test]
    fn test_failed_write_keeps_snapshot() {
        let mut gate = ProgressionGate::new(MemoryStore::new().fail_writes());
        let seq = sequence();
        assert!(gate.record_complete(&seq[0].id).is_err());
        // The session still sees the puzzle as solved
        assert!(gate.is_unlocked(&seq, 1));
    }

    #[test]
    fn test_level_status() {
        let mut gate = ProgressionGate::new(MemoryStore::new());
        let seq = sequence();
        gate.record_complete(&seq[0].id).unwrap();

        assert_eq!(gate.level_status(&seq, 0), LevelStatus::Solved);
        assert_eq!(gate.level_status(&seq, 1), LevelStatus::Unlocked);
        assert_eq!(gate.level_status(&seq, 2), LevelStatus::Locked);
    }

    #[test]
    fn test_reload_sees_other_writers() {
        let mut gate = ProgressionGate::new(SqliteStore::open_in_memory().unwrap());
        assert!(gate.completed().is_empty());

        gate.store.set(COMPLETION_KEY, r#"["9"]"#).unwrap();
        assert!(gate.completed().is_empty());

        gate.reload();
        assert!(gate.is_complete(&PuzzleId::from("9")));
    }

    #[test]
    fn test_record_merges_with_store() {
        let mut gate = ProgressionGate::new(MemoryStore::new());
        gate.store.set(COMPLETION_KEY, r#"["9"]"#).unwrap();

        gate.record_complete(&PuzzleId::from("1")).unwrap();
        assert_eq!(
            gate.store().get(COMPLETION_KEY).unwrap().as_deref(),
            Some(r#"["9","1"]"#)
        );
    }

    #[test]
    fn test_failed_read_never_overwrites_record() {
        let mut store = MemoryStore::new();
        store.set(COMPLETION_KEY, r#"["9"]"#).unwrap();
        let mut gate = ProgressionGate::new(store.fail_reads());

        assert!(gate.record_complete(&PuzzleId::from("1")).is_err());
        assert!(gate.is_complete(&PuzzleId::from("1")));
        assert_eq!(
            gate.store.values.get(COMPLETION_KEY).map(String::as_str),
            Some(r#"["9"]"#)
        );
    }

    #[test]
    fn test_record_survives_reopen() {
        let mut gate = ProgressionGate::new(MemoryStore::new());
        gate.record_complete(&PuzzleId::from("1")).unwrap();
        let gate = ProgressionGate::new(gate.into_store());
        assert!(gate.is_complete(&PuzzleId::from("1")));
    }
}
