//! Scoring module - Scrabble-style letter values
//!
//! A word is worth the sum of its letters' point values. There are no length
//! bonuses or chain multipliers: a cascade scores exactly the sum of the words
//! it cleared.

use std::collections::HashMap;

use crate::scanner::Match;
use crate::types::Letter;

/// Point value of a single letter
pub fn letter_value(letter: Letter) -> u32 {
    letter.points()
}

/// Sum of letter values. Characters that are not letters score nothing.
///
/// # Examples
///
/// ```
/// use wordcrush_core::scoring::word_score;
///
/// assert_eq!(word_score("CATS"), 6);
/// assert_eq!(word_score("quiz"), 22);
/// ```
pub fn word_score(word: &str) -> u32 {
    word.chars()
        .filter_map(Letter::from_char)
        .map(letter_value)
        .sum()
}

/// Memoizing word scorer, kept for the lifetime of a game session
#[derive(Debug, Clone, Default)]
pub struct ScoreCalculator {
    cache: HashMap<String, u32>,
}

impl ScoreCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score_of(&mut self, word: &str) -> u32 {
        if let Some(&score) = self.cache.get(word) {
            return score;
        }
        let score = word_score(word);
        self.cache.insert(word.to_string(), score);
        score
    }

    /// Total for a set of matches found in one pass
    pub fn score_matches(&mut self, matches: &[Match]) -> u32 {
        matches
            .iter()
            .map(|m| self.score_of(&m.word))
            .fold(0u32, u32::saturating_add)
    }

    /// Number of distinct words scored so far
    pub fn cached_words(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_letter_values() {
        assert_eq!(letter_value(Letter::A), 1);
        assert_eq!(letter_value(Letter::D), 2);
        assert_eq!(letter_value(Letter::C), 3);
        assert_eq!(letter_value(Letter::F), 4);
        assert_eq!(letter_value(Letter::K), 5);
        assert_eq!(letter_value(Letter::X), 8);
        assert_eq!(letter_value(Letter::Q), 10);
    }

    #[test]
    fn test_word_scores() {
        assert_eq!(word_score("CAT"), 5);
        assert_eq!(word_score("CATS"), 3 + 1 + 1 + 1);
        assert_eq!(word_score("cat"), 5);
        assert_eq!(word_score(""), 0);
    }

    #[test]
    fn test_calculator_memoizes() {
        let mut scores = ScoreCalculator::new();
        assert_eq!(scores.score_of("BOX"), 3 + 1 + 8);
        assert_eq!(scores.score_of("BOX"), 12);
        assert_eq!(scores.cached_words(), 1);
        assert_eq!(scores.score_of("SUN"), 3);
        assert_eq!(scores.cached_words(), 2);
    }
}
