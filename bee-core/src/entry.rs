use crate::errors::ValidationError;
use crate::letters::{MIN_WORD_LENGTH, ValidLetters};

/// The candidate word being built from tile taps and typing.
///
/// Every write goes through the letter filter, so the entry never holds a
/// character outside the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordEntry {
    text: String,
}

impl WordEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a tapped or typed letter.
    pub fn push(&mut self, letter: char, valid_letters: &ValidLetters) {
        let letter = valid_letters.normalize_case(letter);
        if valid_letters.contains(letter) {
            self.text.push(letter);
        }
    }

    /// Replace the whole entry, as a text field edit does.
    pub fn set(&mut self, text: &str, valid_letters: &ValidLetters) {
        let normalized: String = text
            .chars()
            .map(|letter| valid_letters.normalize_case(letter))
            .collect();
        self.text = valid_letters.filter(&normalized);
    }

    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// The entry's text if it is long enough to send.
    pub fn submittable(&self) -> Result<&str, ValidationError> {
        if self.len() < MIN_WORD_LENGTH {
            return Err(ValidationError::WordTooShort);
        }
        Ok(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> ValidLetters {
        ValidLetters::new("BCDEFG", 'A')
    }

    #[test]
    fn test_push_ignores_letters_outside_grid() {
        let valid = letters();
        let mut entry = WordEntry::new();
        for letter in ['B', 'X', 'a', 'D', '!', 'e'] {
            entry.push(letter, &valid);
        }
        assert_eq!(entry.as_str(), "BADE");
    }

    #[test]
    fn test_set_filters_whole_text() {
        let valid = letters();
        let mut entry = WordEntry::new();
        entry.set("cab bag", &valid);
        assert_eq!(entry.as_str(), "CABBAG");
    }

    #[test]
    fn test_pop_and_clear() {
        let valid = letters();
        let mut entry = WordEntry::new();
        entry.set("FACE", &valid);
        assert_eq!(entry.pop(), Some('E'));
        assert_eq!(entry.as_str(), "FAC");
        entry.clear();
        assert!(entry.is_empty());
        assert_eq!(entry.pop(), None);
    }

    #[test]
    fn test_submittable_length_boundary() {
        let valid = letters();
        let mut entry = WordEntry::new();
        entry.set("BAD", &valid);
        assert_eq!(entry.submittable(), Err(ValidationError::WordTooShort));
        assert_eq!(
            ValidationError::WordTooShort.to_string(),
            "Words must be at least 4 letters."
        );

        entry.push('E', &valid);
        assert_eq!(entry.submittable(), Ok("BADE"));
    }
}
