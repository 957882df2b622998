//! Lexicon module - dictionary membership for the word scanner
//!
//! Words are stored uppercase and compared in uppercase, so lookups are
//! case-insensitive. Anything shorter than [`MIN_WORD_LEN`] is never a word,
//! whatever the loaded list contains.
//!
//! Loading never fails: a missing or empty dictionary file degrades to a small
//! built-in list so the game always has something to match.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::types::MIN_WORD_LEN;

/// Built-in words used when no dictionary file can be read
pub const FALLBACK_WORDS: [&str; 27] = [
    "CAT", "DOG", "PIG", "BAT", "HAT", "RUN", "SIT", "FLY", "BIG", "RED", "MAP", "PIN", "CUP",
    "BOX", "CAR", "BUS", "SUN", "AIR", "SEA", "TOP", "LOW", "HOT", "ICE", "ONE", "TWO", "EAT",
    "TEN",
];

/// Exact-match word membership
pub trait Lexicon {
    /// True iff `word` has at least three letters and is in the word set.
    fn is_valid_word(&self, word: &str) -> bool;
}

impl<L: Lexicon + ?Sized> Lexicon for &L {
    fn is_valid_word(&self, word: &str) -> bool {
        (**self).is_valid_word(word)
    }
}

/// Where a [`WordList`] got its words
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexiconSource {
    File(PathBuf),
    Inline,
    Fallback,
}

/// Hash-set backed lexicon
#[derive(Debug, Clone)]
pub struct WordList {
    words: HashSet<String>,
    source: LexiconSource,
}

impl WordList {
    /// Build from any word iterator.
    ///
    /// Entries are trimmed and uppercased; entries that are too short or
    /// contain anything but ASCII letters are dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: normalize(words),
            source: LexiconSource::Inline,
        }
    }

    /// The built-in fallback list
    pub fn fallback() -> Self {
        Self {
            words: normalize(FALLBACK_WORDS),
            source: LexiconSource::Fallback,
        }
    }

    /// Read one word per line.
    ///
    /// Lines that are not valid UTF-8 are skipped; only read errors fail.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut lines = Vec::new();
        let mut skipped = 0usize;
        for line in reader.split(b'\n') {
            match String::from_utf8(line?) {
                Ok(word) => lines.push(word),
                Err(_) => skipped += 1,
            }
        }
        if skipped > 0 {
            log::debug!("skipped {} undecodable dictionary line(s)", skipped);
        }
        Ok(Self::from_words(lines))
    }

    /// Load a dictionary file, falling back to [`FALLBACK_WORDS`] if the file
    /// cannot be read or has no usable words.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = File::open(path).and_then(|f| Self::from_reader(BufReader::new(f)));

        match loaded {
            Ok(list) if !list.is_empty() => {
                log::info!("loaded {} words from {}", list.len(), path.display());
                Self {
                    source: LexiconSource::File(path.to_path_buf()),
                    ..list
                }
            }
            Ok(_) => {
                log::warn!(
                    "dictionary {} has no usable words, using fallback list",
                    path.display()
                );
                Self::fallback()
            }
            Err(e) => {
                log::warn!(
                    "dictionary {} unavailable ({}), using fallback list",
                    path.display(),
                    e
                );
                Self::fallback()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn source(&self) -> &LexiconSource {
        &self.source
    }

    pub fn is_fallback(&self) -> bool {
        self.source == LexiconSource::Fallback
    }
}

impl Default for WordList {
    fn default() -> Self {
        Self::fallback()
    }
}

impl Lexicon for WordList {
    fn is_valid_word(&self, word: &str) -> bool {
        if word.chars().count() < MIN_WORD_LEN {
            return false;
        }
        self.words.contains(&word.to_ascii_uppercase())
    }
}

fn normalize<I, S>(words: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| w.as_ref().trim().to_ascii_uppercase())
        .filter(|w| w.len() >= MIN_WORD_LEN && w.bytes().all(|b| b.is_ascii_uppercase()))
        .collect()
}
