//! Generation module - word-free starting grids
//!
//! A fresh game must start settled: a word already on the board would be a
//! free clear the player never made. Whole grids are drawn until one comes up
//! clean. If the attempts run out (a dense dictionary makes this likely), the
//! middle tile of each offending word is swapped for a rare consonant and the
//! grid is re-checked, a bounded number of times.

use crate::grid::Grid;
use crate::lexicon::Lexicon;
use crate::scanner::find_matches;
use crate::tiles::TileSource;
use crate::types::{RARE_CONSONANTS, REPAIR_PASSES};

/// A starting grid plus how hard it was to get
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedGrid {
    pub grid: Grid,
    /// Whole-grid draws made (at least 1)
    pub attempts: u32,
    /// Whether the repair pass ran
    pub repaired: bool,
    /// Whether the final grid is word-free
    pub settled: bool,
}

/// Draw grids until one holds no words, falling back to repair.
pub fn generate_settled_grid<L, T>(lexicon: &L, tiles: &mut T, max_attempts: u32) -> GeneratedGrid
where
    L: Lexicon + ?Sized,
    T: TileSource + ?Sized,
{
    let max_attempts = max_attempts.max(1);
    let mut grid = Grid::filled(tiles);
    let mut attempts = 1;

    loop {
        if find_matches(&grid, lexicon).is_empty() {
            log::debug!("settled grid after {} attempt(s)", attempts);
            return GeneratedGrid {
                grid,
                attempts,
                repaired: false,
                settled: true,
            };
        }
        if attempts >= max_attempts {
            break;
        }
        grid = Grid::filled(tiles);
        attempts += 1;
    }

    let settled = repair(&mut grid, lexicon, REPAIR_PASSES);
    if !settled {
        log::warn!(
            "starting grid still holds words after {} repair passes:\n{}",
            REPAIR_PASSES,
            grid
        );
    }
    GeneratedGrid {
        grid,
        attempts,
        repaired: true,
        settled,
    }
}

/// Break up words by replacing each one's middle tile with a rare consonant.
///
/// Re-scans after every pass and stops once the grid is clean.
/// Returns whether the grid ended up word-free.
pub fn repair<L: Lexicon + ?Sized>(grid: &mut Grid, lexicon: &L, passes: u32) -> bool {
    for pass in 0..passes as usize {
        let matches = find_matches(grid, lexicon);
        if matches.is_empty() {
            return true;
        }
        for (i, m) in matches.iter().enumerate() {
            let middle = m.positions[m.len() / 2];
            let current = grid.letter(middle);
            // Rotate through the rare letters so repeated passes try new ones.
            let replacement = (0..RARE_CONSONANTS.len())
                .map(|k| RARE_CONSONANTS[(pass + i + k) % RARE_CONSONANTS.len()])
                .find(|&l| Some(l) != current)
                .unwrap_or(RARE_CONSONANTS[0]);
            grid.set(middle, Some(replacement));
        }
    }
    find_matches(grid, lexicon).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::WordList;
    use crate::tiles::{ScriptedTiles, TileGenerator};
    use crate::types::{Letter, Position};

    #[test]
    fn seeded_generation_is_settled() {
        let lexicon = WordList::fallback();
        let mut tiles = TileGenerator::seeded(42);
        let generated = generate_settled_grid(&lexicon, &mut tiles, 100);
        assert!(generated.settled);
        assert!(generated.grid.is_full());
        assert!(find_matches(&generated.grid, &lexicon).is_empty());
    }

    #[test]
    fn same_seed_same_grid() {
        let lexicon = WordList::fallback();
        let a = generate_settled_grid(&lexicon, &mut TileGenerator::seeded(9), 100);
        let b = generate_settled_grid(&lexicon, &mut TileGenerator::seeded(9), 100);
        assert_eq!(a, b);
    }

    #[test]
    fn exhausted_attempts_fall_back_to_repair() {
        // Every draw is A, and AAA is a word: no attempt can succeed.
        let lexicon = WordList::from_words(["AAA"]);
        let mut tiles = ScriptedTiles::from_letters("A");
        let generated = generate_settled_grid(&lexicon, &mut tiles, 3);
        assert_eq!(generated.attempts, 3);
        assert!(generated.repaired);
        assert!(generated.settled);
        assert!(find_matches(&generated.grid, &lexicon).is_empty());
    }

    #[test]
    fn repair_replaces_middle_tile() {
        let lexicon = WordList::from_words(["CAT"]);
        let mut grid =
            Grid::from_rows(&["CATQXZ", "QXZJKQ", "JKQXZJ", "XZJKQX", "KQXZJK", "ZJKQXZ"])
                .unwrap();
        assert!(repair(&mut grid, &lexicon, 1));
        assert_eq!(grid.letter(Position::new(0, 0)), Some(Letter::C));
        assert!(grid.letter(Position::new(0, 1)).is_some_and(Letter::is_rare));
        assert_eq!(grid.letter(Position::new(0, 2)), Some(Letter::T));
    }

    #[test]
    fn repair_reports_unfixable_grid() {
        // Any three letters are a word here, so nothing can be repaired.
        let all: Vec<String> = Letter::ALL
            .iter()
            .flat_map(|a| {
                Letter::ALL.iter().flat_map(move |b| {
                    Letter::ALL
                        .iter()
                        .map(move |c| format!("{}{}{}", a, b, c))
                })
            })
            .collect();
        let lexicon = WordList::from_words(all);
        let mut grid = Grid::filled(&mut ScriptedTiles::from_letters("QZ"));
        assert!(!repair(&mut grid, &lexicon, 2));
    }
}
