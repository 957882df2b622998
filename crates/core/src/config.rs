//! Game configuration with environment overrides.

use std::path::PathBuf;

use crate::lexicon::WordList;
use crate::tiles::TileGenerator;
use crate::types::{
    DEFAULT_HINTS, GENERATION_ATTEMPTS, MAX_CASCADE_ROUNDS, RARE_BIAS_PROBABILITY,
    ROUND_TIME_MS, TOTAL_MOVES, VOWEL_BOOST_PROBABILITY,
};

/// Default dictionary location on most Unix systems
pub const DEFAULT_DICTIONARY_PATH: &str = "/usr/share/dict/words";

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub total_moves: u32,
    pub round_time_ms: u32,
    pub hints: u32,
    pub max_cascade_rounds: u32,
    pub generation_attempts: u32,
    pub vowel_boost: f64,
    pub rare_bias: f64,
    /// Fixed RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
    pub dictionary_path: PathBuf,
    pub log_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_moves: TOTAL_MOVES,
            round_time_ms: ROUND_TIME_MS,
            hints: DEFAULT_HINTS,
            max_cascade_rounds: MAX_CASCADE_ROUNDS,
            generation_attempts: GENERATION_ATTEMPTS,
            vowel_boost: VOWEL_BOOST_PROBABILITY,
            rare_bias: RARE_BIAS_PROBABILITY,
            seed: None,
            dictionary_path: PathBuf::from(DEFAULT_DICTIONARY_PATH),
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or unparseable values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u32>().ok());
        let path = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) })
        };

        Self {
            total_moves: parsed("WORDCRUSH_MOVES").unwrap_or(defaults.total_moves),
            round_time_ms: parsed("WORDCRUSH_TIME_SECS")
                .map(|secs| secs.saturating_mul(1000))
                .unwrap_or(defaults.round_time_ms),
            hints: parsed("WORDCRUSH_HINTS").unwrap_or(defaults.hints),
            max_cascade_rounds: parsed("WORDCRUSH_MAX_CASCADE")
                .filter(|&n| n > 0)
                .unwrap_or(defaults.max_cascade_rounds),
            seed: lookup("WORDCRUSH_SEED").and_then(|s| s.trim().parse().ok()),
            dictionary_path: path("WORDCRUSH_DICT").unwrap_or(defaults.dictionary_path),
            log_path: path("WORDCRUSH_LOG_PATH"),
            ..defaults
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Tile generator for this config, seeded from `seed` or the OS
    pub fn tile_generator(&self) -> TileGenerator {
        let seed = self.seed.unwrap_or_else(rand::random);
        TileGenerator::seeded(seed)
            .with_vowel_boost(self.vowel_boost)
            .with_rare_bias(self.rare_bias)
    }

    /// Load the configured dictionary, falling back to the built-in list
    pub fn load_lexicon(&self) -> WordList {
        WordList::load(&self.dictionary_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = GameConfig::from_lookup(lookup(&[]));
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.total_moves, 10);
        assert_eq!(config.round_time_ms, 180_000);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = GameConfig::from_lookup(lookup(&[
            ("WORDCRUSH_MOVES", "25"),
            ("WORDCRUSH_TIME_SECS", "60"),
            ("WORDCRUSH_HINTS", "0"),
            ("WORDCRUSH_SEED", "12345"),
            ("WORDCRUSH_DICT", " /tmp/words.txt "),
            ("WORDCRUSH_LOG_PATH", "/tmp/wordcrush.log"),
        ]));
        assert_eq!(config.total_moves, 25);
        assert_eq!(config.round_time_ms, 60_000);
        assert_eq!(config.hints, 0);
        assert_eq!(config.seed, Some(12345));
        assert_eq!(config.dictionary_path, PathBuf::from("/tmp/words.txt"));
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/wordcrush.log")));
    }

    #[test]
    fn bad_values_keep_defaults() {
        let config = GameConfig::from_lookup(lookup(&[
            ("WORDCRUSH_MOVES", "lots"),
            ("WORDCRUSH_MAX_CASCADE", "0"),
            ("WORDCRUSH_DICT", "   "),
            ("WORDCRUSH_SEED", "-1"),
        ]));
        assert_eq!(config.total_moves, TOTAL_MOVES);
        assert_eq!(config.max_cascade_rounds, MAX_CASCADE_ROUNDS);
        assert_eq!(config.dictionary_path, PathBuf::from(DEFAULT_DICTIONARY_PATH));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn seeded_generators_repeat() {
        use crate::tiles::TileSource;

        let config = GameConfig::default().with_seed(77);
        let mut a = config.tile_generator();
        let mut b = config.tile_generator();
        for _ in 0..50 {
            assert_eq!(a.next_letter(&[]), b.next_letter(&[]));
        }
    }
}
