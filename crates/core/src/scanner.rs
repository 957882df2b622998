//! Scanner module - finds dictionary words in rows and columns
//!
//! Every contiguous run of three or more letters in every row (left to right)
//! and every column (top to bottom) is tested against the lexicon. That is
//! O(N³) per line, which is nothing at N = 6.
//!
//! Candidates are then resolved so that no tile is claimed twice: longer words
//! win, and equal lengths keep scan order (all rows, row-major, before all
//! columns, column-major). "CAT" inside an accepted "CATS" is dropped rather
//! than scored twice.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::lexicon::Lexicon;
use crate::types::{Letter, Position, GRID_CELLS, GRID_SIZE, MIN_WORD_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A word on the grid and the tiles it covers, in reading order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    pub word: String,
    pub positions: ArrayVec<Position, GRID_SIZE>,
    pub orientation: Orientation,
}

impl Match {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Whether this match covers `pos`
    pub fn covers(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }
}

/// All retained matches on the grid, longest first.
pub fn find_matches<L: Lexicon + ?Sized>(grid: &Grid, lexicon: &L) -> Vec<Match> {
    resolve_overlaps(scan_candidates(grid, lexicon))
}

/// True when the grid holds no words at all
pub fn is_settled<L: Lexicon + ?Sized>(grid: &Grid, lexicon: &L) -> bool {
    // Any candidate means at least one match survives resolution.
    scan_candidates(grid, lexicon).is_empty()
}

/// Every valid word in every line, before overlap resolution.
///
/// Order: rows top to bottom, then columns left to right; within a line by
/// start index, then by end index.
pub fn scan_candidates<L: Lexicon + ?Sized>(grid: &Grid, lexicon: &L) -> Vec<Match> {
    let mut out = Vec::new();
    for row in 0..GRID_SIZE {
        let line: [Position; GRID_SIZE] = std::array::from_fn(|col| Position::new(row, col));
        scan_line(grid, lexicon, &line, Orientation::Horizontal, &mut out);
    }
    for col in 0..GRID_SIZE {
        let line: [Position; GRID_SIZE] = std::array::from_fn(|row| Position::new(row, col));
        scan_line(grid, lexicon, &line, Orientation::Vertical, &mut out);
    }
    out
}

fn scan_line<L: Lexicon + ?Sized>(
    grid: &Grid,
    lexicon: &L,
    line: &[Position; GRID_SIZE],
    orientation: Orientation,
    out: &mut Vec<Match>,
) {
    let letters: [Option<Letter>; GRID_SIZE] = std::array::from_fn(|i| grid.letter(line[i]));
    let mut word = String::with_capacity(GRID_SIZE);

    for start in 0..=GRID_SIZE - MIN_WORD_LEN {
        word.clear();
        for end in start..GRID_SIZE {
            // Runs cannot span an empty cell.
            let Some(letter) = letters[end] else {
                break;
            };
            word.push(letter.as_char());
            if end - start + 1 < MIN_WORD_LEN {
                continue;
            }
            if lexicon.is_valid_word(&word) {
                let mut positions = ArrayVec::new();
                positions.extend(line[start..=end].iter().copied());
                out.push(Match {
                    word: word.clone(),
                    positions,
                    orientation,
                });
            }
        }
    }
}

/// Longest-first greedy selection of non-overlapping matches.
///
/// The sort is stable, so equal lengths keep their scan order.
pub fn resolve_overlaps(mut candidates: Vec<Match>) -> Vec<Match> {
    candidates.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut covered = [false; GRID_CELLS];
    let mut accepted = Vec::new();
    for candidate in candidates {
        let free = candidate
            .positions
            .iter()
            .all(|p| !covered[p.row * GRID_SIZE + p.col]);
        if !free {
            continue;
        }
        for p in &candidate.positions {
            covered[p.row * GRID_SIZE + p.col] = true;
        }
        accepted.push(candidate);
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::WordList;

    fn grid(rows: [&str; 6]) -> Grid {
        Grid::from_rows(&rows).unwrap()
    }

    fn words(matches: &[Match]) -> Vec<&str> {
        matches.iter().map(|m| m.word.as_str()).collect()
    }

    #[test]
    fn finds_words_in_rows_and_columns() {
        let lexicon = WordList::from_words(["CAT", "DOG"]);
        let g = grid(["CATQXZ", "QXZJKD", "JKQXZO", "XZJKQG", "KQXZJK", "ZJKQXZ"]);
        let found = find_matches(&g, &lexicon);
        assert_eq!(words(&found), vec!["CAT", "DOG"]);
        assert_eq!(found[0].orientation, Orientation::Horizontal);
        assert_eq!(found[1].orientation, Orientation::Vertical);
        assert_eq!(
            found[1].positions.as_slice(),
            &[Position::new(1, 5), Position::new(2, 5), Position::new(3, 5)]
        );
    }

    #[test]
    fn longer_word_suppresses_contained_word() {
        let lexicon = WordList::from_words(["CAT", "CATS"]);
        let g = grid(["CATSXZ", "QXZJKQ", "JKQXZJ", "XZJKQX", "KQXZJK", "ZJKQXZ"]);
        let candidates = scan_candidates(&g, &lexicon);
        assert_eq!(words(&candidates), vec!["CAT", "CATS"]);

        let found = find_matches(&g, &lexicon);
        assert_eq!(words(&found), vec!["CATS"]);
        assert_eq!(found[0].len(), 4);
    }

    #[test]
    fn crossing_words_keep_the_longer_one() {
        // TEN across row 1 and TEAS down column 1 share (1,1).
        let lexicon = WordList::from_words(["TEN", "TEAS"]);
        let g = grid(["QTZJKX", "TENXZQ", "ZAJKQZ", "JSQXZJ", "KQXZJK", "ZJKQXZ"]);
        let found = find_matches(&g, &lexicon);
        assert_eq!(words(&found), vec!["TEAS"]);
    }

    #[test]
    fn equal_length_tie_prefers_rows() {
        let lexicon = WordList::from_words(["CAT", "COW"]);
        // CAT across row 0 and COW down column 0 share (0,0).
        let g = grid(["CATQXZ", "OXZJKQ", "WKQXZJ", "XZJKQX", "KQXZJK", "ZJKQXZ"]);
        let found = find_matches(&g, &lexicon);
        assert_eq!(words(&found), vec!["CAT"]);
    }

    #[test]
    fn disjoint_words_all_survive() {
        let lexicon = WordList::from_words(["CAT", "DOG", "SUN"]);
        let g = grid(["CATDOG", "QXZJKQ", "SUNXZJ", "XZJKQX", "KQXZJK", "ZJKQXZ"]);
        let found = find_matches(&g, &lexicon);
        assert_eq!(words(&found), vec!["CAT", "DOG", "SUN"]);
    }

    #[test]
    fn empty_cells_break_runs() {
        let lexicon = WordList::from_words(["CAT"]);
        let g = grid(["C.ATQX", "QXZJKQ", "JKQXZJ", "XZJKQX", "KQXZJK", "ZJKQXZ"]);
        assert!(find_matches(&g, &lexicon).is_empty());
        assert!(is_settled(&g, &lexicon));
    }

    #[test]
    fn scan_is_idempotent() {
        let lexicon = WordList::from_words(["CAT", "CATS", "ATE", "DOG"]);
        let g = grid(["CATSXZ", "QTZJKD", "AEEXZO", "ZAJKQG", "JSQXZJ", "KQXZJK"]);
        let first = find_matches(&g, &lexicon);
        let second = find_matches(&g, &lexicon);
        assert_eq!(first, second);
    }
}
