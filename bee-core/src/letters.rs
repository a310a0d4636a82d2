use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

use crate::errors::LetterError;

pub const OUTER_LETTER_COUNT: usize = 6;
pub const TILE_COUNT: usize = OUTER_LETTER_COUNT + 1;
pub const MIN_WORD_LENGTH: usize = 4;

/// The seven letters a word may be built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidLetters {
    letters: BTreeSet<char>,
}

impl ValidLetters {
    pub fn new(outer_letters: &str, center_letter: char) -> Self {
        let mut letters: BTreeSet<char> = outer_letters.chars().collect();
        letters.insert(center_letter);
        Self { letters }
    }

    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().copied()
    }

    /// Map a typed character onto the grid's letter case, so `b` counts as
    /// `B` on an upper-case grid. Characters with no grid counterpart come
    /// back unchanged and are left for `filter` to drop.
    pub fn normalize_case(&self, letter: char) -> char {
        if self.contains(letter) {
            return letter;
        }
        let swapped = if letter.is_lowercase() {
            letter.to_uppercase().next()
        } else {
            letter.to_lowercase().next()
        };
        match swapped {
            Some(candidate) if self.contains(candidate) => candidate,
            _ => letter,
        }
    }

    pub fn filter(&self, candidate: &str) -> String {
        filter(candidate, self)
    }
}

/// Strip every character that is not one of the valid letters, keeping the
/// order of the rest.
pub fn filter(candidate: &str, valid_letters: &ValidLetters) -> String {
    candidate
        .chars()
        .filter(|letter| valid_letters.contains(*letter))
        .collect()
}

/// The hexagonal grid: six outer letters around a mandatory center letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterGrid {
    outer: Vec<char>,
    center: char,
    valid: ValidLetters,
}

impl LetterGrid {
    pub fn new(outer_letters: &str, center_letter: char) -> Result<Self, LetterError> {
        let outer: Vec<char> = outer_letters.chars().collect();
        if outer.len() != OUTER_LETTER_COUNT {
            return Err(LetterError::WrongOuterCount {
                expected: OUTER_LETTER_COUNT,
                actual: outer.len(),
            });
        }

        Ok(Self {
            valid: ValidLetters::new(outer_letters, center_letter),
            outer,
            center: center_letter,
        })
    }

    pub fn outer(&self) -> &[char] {
        &self.outer
    }

    pub fn center(&self) -> char {
        self.center
    }

    pub fn valid_letters(&self) -> &ValidLetters {
        &self.valid
    }

    /// Tiles in display order: the first three outer letters, the center,
    /// then the last three outer letters.
    pub fn tiles(&self) -> [char; TILE_COUNT] {
        let mut tiles = [self.center; TILE_COUNT];
        tiles[..3].copy_from_slice(&self.outer[..3]);
        tiles[4..].copy_from_slice(&self.outer[3..]);
        tiles
    }

    pub fn tile(&self, index: usize) -> Option<char> {
        self.tiles().get(index).copied()
    }

    /// Reorder the outer letters. The center never moves.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.outer.shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn grid() -> LetterGrid {
        LetterGrid::new("BCDEFG", 'A').unwrap()
    }

    #[test]
    fn test_filter_strips_invalid_letters() {
        let valid = ValidLetters::new("BCDEFG", 'A');
        assert_eq!(filter("BADE", &valid), "BADE");
        assert_eq!(filter("BXAYDZE", &valid), "BADE");
        assert_eq!(filter("", &valid), "");
        assert_eq!(filter("xyz 123", &valid), "");
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let valid = ValidLetters::new("BCDEFG", 'A');
        assert_eq!(filter("bade", &valid), "");
    }

    #[test]
    fn test_normalize_case() {
        let valid = ValidLetters::new("BCDEFG", 'A');
        assert_eq!(valid.normalize_case('b'), 'B');
        assert_eq!(valid.normalize_case('A'), 'A');
        assert_eq!(valid.normalize_case('z'), 'z');

        let lower = ValidLetters::new("bcdefg", 'a');
        assert_eq!(lower.normalize_case('B'), 'b');
    }

    #[test]
    fn test_grid_requires_six_outer_letters() {
        assert!(LetterGrid::new("BCDEF", 'A').is_err());
        assert!(LetterGrid::new("BCDEFGH", 'A').is_err());

        let err = LetterGrid::new("", 'A').unwrap_err();
        assert_eq!(
            err,
            LetterError::WrongOuterCount {
                expected: 6,
                actual: 0
            }
        );
    }

    #[test]
    fn test_tiles_place_center_in_the_middle() {
        assert_eq!(grid().tiles(), ['B', 'C', 'D', 'A', 'E', 'F', 'G']);
        assert_eq!(grid().tile(3), Some('A'));
        assert_eq!(grid().tile(7), None);
    }

    #[test]
    fn test_shuffle_keeps_letters_and_center() {
        let mut grid = grid();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            grid.shuffle(&mut rng);
            assert_eq!(grid.center(), 'A');
            let mut outer = grid.outer().to_vec();
            outer.sort_unstable();
            assert_eq!(outer, vec!['B', 'C', 'D', 'E', 'F', 'G']);
            assert_eq!(grid.valid_letters(), &ValidLetters::new("BCDEFG", 'A'));
        }
    }

    proptest! {
        #[test]
        fn prop_filter_output_only_valid_letters(candidate in "[A-Za-z0-9 ]{0,24}") {
            let valid = ValidLetters::new("BCDEFG", 'A');
            let filtered = filter(&candidate, &valid);
            prop_assert!(filtered.chars().all(|c| valid.contains(c)));
        }

        #[test]
        fn prop_filter_preserves_order(candidate in "[A-Z]{0,24}") {
            let valid = ValidLetters::new("BCDEFG", 'A');
            let expected: String = candidate.chars().filter(|c| "ABCDEFG".contains(*c)).collect();
            prop_assert_eq!(filter(&candidate, &valid), expected);
        }

        #[test]
        fn prop_filter_is_idempotent(candidate in "\\PC{0,24}") {
            let valid = ValidLetters::new("BCDEFG", 'A');
            let once = filter(&candidate, &valid);
            prop_assert_eq!(filter(&once, &valid), once.clone());
        }
    }
}
