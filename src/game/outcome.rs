//! Round outcome: pending until every slot is filled, then right or wrong

use super::slots::SlotBoard;

/// Classification of the current board against the target word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    Correct,
    Wrong,
}

/// Compare a full board against `word`, ignoring case.
pub fn evaluate(board: &SlotBoard, word: &[char]) -> Outcome {
    if !board.is_full() {
        return Outcome::Pending;
    }

    let matches = board
        .slots()
        .iter()
        .zip(word)
        .all(|(slot, expected)| {
            slot.letter()
                .is_some_and(|c| c.to_uppercase().eq(expected.to_uppercase()))
        });

    if matches && board.len() == word.len() {
        Outcome::Correct
    } else {
        Outcome::Wrong
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Tile;

    fn fill(letters: &str) -> SlotBoard {
        let mut board = SlotBoard::new(letters.len());
        for (index, letter) in letters.chars().enumerate() {
            board.place(Tile { index, letter });
        }
        board
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_pending_until_full() {
        let mut board = SlotBoard::new(3);
        assert_eq!(evaluate(&board, &chars("CAT")), Outcome::Pending);
        board.place(Tile {
            index: 0,
            letter: 'C',
        });
        board.place(Tile {
            index: 1,
            letter: 'A',
        });
        assert_eq!(evaluate(&board, &chars("CAT")), Outcome::Pending);
    }

    #[test]
    fn test_exact_match_is_correct() {
        assert_eq!(evaluate(&fill("CAT"), &chars("CAT")), Outcome::Correct);
    }

    #[test]
    fn test_permutations_are_wrong() {
        for p in ["ACT", "TAC", "CTA", "ATC", "TCA"] {
            assert_eq!(evaluate(&fill(p), &chars("CAT")), Outcome::Wrong, "{}", p);
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(evaluate(&fill("cat"), &chars("CAT")), Outcome::Correct);
    }

    #[test]
    fn test_revealed_letters_count() {
        let mut board = SlotBoard::new(2);
        board.reveal(0, 'O');
        board.place(Tile {
            index: 3,
            letter: 'X',
        });
        assert_eq!(evaluate(&board, &chars("OX")), Outcome::Correct);
    }

    #[test]
    fn test_zero_slots_stay_pending() {
        assert_eq!(evaluate(&SlotBoard::new(0), &[]), Outcome::Pending);
    }
}
