//! Tiles module - weighted random letter generation
//!
//! New tiles are drawn from the pool weights in [`LETTER_WEIGHTS`] rather than
//! uniformly, so common letters show up about as often as they do in a tile bag.
//! Two heuristics keep grids playable without handing out free words:
//!
//! - **Vowel boost**: a plain draw is replaced by a (weighted) vowel with a
//!   fixed probability, so rows rarely run dry of vowels.
//! - **Context**: when the letters around the new tile are known, two or more
//!   neighbouring vowels force a consonant, and a neighbouring common bigram
//!   (TH, IN, ER, ...) biases the draw toward Q/X/Z/J/K.
//!
//! Neither heuristic guarantees a word-free grid; callers re-scan afterwards.
//!
//! Also provides [`ScriptedTiles`], a fixed cyclic sequence for deterministic
//! tests and replays.
//!
//! [`LETTER_WEIGHTS`]: crate::types::LETTER_WEIGHTS

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{
    Letter, COMMON_BIGRAMS, RARE_BIAS_PROBABILITY, RARE_CONSONANTS, VOWELS,
    VOWEL_BOOST_PROBABILITY,
};

/// Anything that can hand out the next tile letter.
///
/// `context` holds the letters already adjacent to the cell being filled,
/// and may be empty.
pub trait TileSource {
    fn next_letter(&mut self, context: &[Letter]) -> Letter;
}

impl<T: TileSource + ?Sized> TileSource for &mut T {
    fn next_letter(&mut self, context: &[Letter]) -> Letter {
        (**self).next_letter(context)
    }
}

/// Frequency-weighted generator with vowel and bigram heuristics
#[derive(Debug, Clone)]
pub struct TileGenerator<R = StdRng> {
    rng: R,
    vowel_boost: f64,
    rare_bias: f64,
}

impl TileGenerator<StdRng> {
    /// Create a reproducible generator from a seed
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TileGenerator<R> {
    pub fn from_rng(rng: R) -> Self {
        Self {
            rng,
            vowel_boost: VOWEL_BOOST_PROBABILITY,
            rare_bias: RARE_BIAS_PROBABILITY,
        }
    }

    /// Override the vowel-boost probability (clamped to `0.0..=1.0`)
    pub fn with_vowel_boost(mut self, probability: f64) -> Self {
        self.vowel_boost = clamp_probability(probability);
        self
    }

    /// Override the rare-consonant bias probability (clamped to `0.0..=1.0`)
    pub fn with_rare_bias(mut self, probability: f64) -> Self {
        self.rare_bias = clamp_probability(probability);
        self
    }

    pub fn vowel_boost(&self) -> f64 {
        self.vowel_boost
    }

    pub fn rare_bias(&self) -> f64 {
        self.rare_bias
    }

    /// Context-free draw: vowel boost first, otherwise the full pool
    pub fn draw(&mut self) -> Letter {
        if self.rng.random_bool(self.vowel_boost) {
            self.draw_vowel()
        } else {
            weighted_pick(&mut self.rng, Letter::ALL.iter().copied())
        }
    }

    pub fn draw_vowel(&mut self) -> Letter {
        weighted_pick(&mut self.rng, VOWELS.iter().copied())
    }

    pub fn draw_consonant(&mut self) -> Letter {
        weighted_pick(
            &mut self.rng,
            Letter::ALL.iter().copied().filter(|l| !l.is_vowel()),
        )
    }

    /// Uniform pick among the rare consonants
    pub fn draw_rare(&mut self) -> Letter {
        RARE_CONSONANTS[self.rng.random_range(0..RARE_CONSONANTS.len())]
    }
}

impl<R: Rng> TileSource for TileGenerator<R> {
    fn next_letter(&mut self, context: &[Letter]) -> Letter {
        if context.is_empty() {
            return self.draw();
        }
        if forms_common_bigram(context) && self.rng.random_bool(self.rare_bias) {
            return self.draw_rare();
        }
        if vowel_count(context) >= 2 {
            return self.draw_consonant();
        }
        self.draw()
    }
}

/// Replays a fixed letter sequence, wrapping around at the end
#[derive(Debug, Clone)]
pub struct ScriptedTiles {
    letters: Vec<Letter>,
    cursor: usize,
}

impl ScriptedTiles {
    /// An empty script would have nothing to hand out, so it is padded with `X`.
    pub fn new(letters: Vec<Letter>) -> Self {
        let letters = if letters.is_empty() {
            vec![Letter::X]
        } else {
            letters
        };
        Self { letters, cursor: 0 }
    }

    /// Build from a string, ignoring non-letters
    ///
    /// # Examples
    ///
    /// ```
    /// use wordcrush_core::tiles::{ScriptedTiles, TileSource};
    /// use wordcrush_core::types::Letter;
    ///
    /// let mut tiles = ScriptedTiles::from_letters("ab");
    /// assert_eq!(tiles.next_letter(&[]), Letter::A);
    /// assert_eq!(tiles.next_letter(&[]), Letter::B);
    /// assert_eq!(tiles.next_letter(&[]), Letter::A);
    /// ```
    pub fn from_letters(s: &str) -> Self {
        Self::new(s.chars().filter_map(Letter::from_char).collect())
    }

    /// Number of letters handed out so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl TileSource for ScriptedTiles {
    fn next_letter(&mut self, _context: &[Letter]) -> Letter {
        let letter = self.letters[self.cursor % self.letters.len()];
        self.cursor += 1;
        letter
    }
}

/// Whether any two context letters, in either order, make a common bigram
pub fn forms_common_bigram(context: &[Letter]) -> bool {
    for (i, &a) in context.iter().enumerate() {
        for &b in &context[i + 1..] {
            if is_common_bigram(a, b) || is_common_bigram(b, a) {
                return true;
            }
        }
    }
    false
}

fn is_common_bigram(first: Letter, second: Letter) -> bool {
    COMMON_BIGRAMS.iter().any(|bigram| {
        let mut chars = bigram.chars();
        chars.next() == Some(first.as_char()) && chars.next() == Some(second.as_char())
    })
}

fn vowel_count(context: &[Letter]) -> usize {
    context.iter().filter(|l| l.is_vowel()).count()
}

/// Cumulative-weight draw over `letters` using their pool weights
fn weighted_pick<R: Rng>(rng: &mut R, letters: impl Iterator<Item = Letter> + Clone) -> Letter {
    let total: u32 = letters.clone().map(Letter::weight).sum();
    let mut roll = rng.random_range(0..total.max(1));
    let mut last = Letter::E;
    for letter in letters {
        let weight = letter.weight();
        if roll < weight {
            return letter;
        }
        roll -= weight;
        last = letter;
    }
    last
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_generator_deterministic() {
        let mut a = TileGenerator::seeded(12345);
        let mut b = TileGenerator::seeded(12345);
        for _ in 0..200 {
            assert_eq!(a.next_letter(&[]), b.next_letter(&[]));
        }
    }

    #[test]
    fn test_distribution_is_weighted() {
        let mut tiles = TileGenerator::seeded(7).with_vowel_boost(0.0);
        let mut counts = [0u32; 26];
        for _ in 0..20_000 {
            counts[tiles.draw().index()] += 1;
        }
        // E carries 12x the weight of Z.
        assert!(counts[Letter::E.index()] > counts[Letter::Z.index()] * 4);
        assert!(counts.iter().all(|&c| c > 0));
    }

    #[test]
    fn test_full_vowel_boost_draws_only_vowels() {
        let mut tiles = TileGenerator::seeded(3).with_vowel_boost(1.0);
        for _ in 0..500 {
            assert!(tiles.draw().is_vowel());
        }
    }

    #[test]
    fn test_vowel_neighbours_force_consonant() {
        // AI is not a listed bigram, so only the vowel rule applies.
        let context = [Letter::A, Letter::I];
        assert!(!forms_common_bigram(&context));
        let mut tiles = TileGenerator::seeded(11).with_vowel_boost(1.0);
        for _ in 0..500 {
            assert!(!tiles.next_letter(&context).is_vowel());
        }
    }

    #[test]
    fn test_bigram_neighbours_bias_rare() {
        let context = [Letter::T, Letter::H];
        assert!(forms_common_bigram(&context));
        // Reversed order counts too.
        assert!(forms_common_bigram(&[Letter::H, Letter::T]));

        let mut tiles = TileGenerator::seeded(5).with_rare_bias(1.0);
        for _ in 0..200 {
            assert!(tiles.next_letter(&context).is_rare());
        }
    }

    #[test]
    fn test_no_bigram_for_unrelated_letters() {
        assert!(!forms_common_bigram(&[Letter::Q, Letter::Z]));
        assert!(!forms_common_bigram(&[Letter::T]));
        assert!(!forms_common_bigram(&[]));
    }

    #[test]
    fn test_probabilities_are_clamped() {
        let tiles = TileGenerator::seeded(1)
            .with_vowel_boost(3.0)
            .with_rare_bias(f64::NAN);
        assert_eq!(tiles.vowel_boost(), 1.0);
        assert_eq!(tiles.rare_bias(), 0.0);
    }

    #[test]
    fn test_scripted_tiles_wrap() {
        let mut tiles = ScriptedTiles::from_letters("xyz");
        let drawn: Vec<Letter> = (0..5).map(|_| tiles.next_letter(&[])).collect();
        assert_eq!(
            drawn,
            vec![Letter::X, Letter::Y, Letter::Z, Letter::X, Letter::Y]
        );
        assert_eq!(tiles.drawn(), 5);
    }

    #[test]
    fn test_empty_script_still_draws() {
        let mut tiles = ScriptedTiles::new(Vec::new());
        assert_eq!(tiles.next_letter(&[]), Letter::X);
    }
}
