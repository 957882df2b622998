//! Grid module - owns the letter tiles
//!
//! The grid is a 6x6 square where each cell holds a letter, or is briefly empty
//! while a cascade clears matched words.
//! Uses a flat array for cache locality and zero-allocation.
//! Coordinates: (row, col), row 0 at the top, col 0 at the left.
//! Gravity pulls tiles toward higher row numbers.

use std::fmt;

use arrayvec::ArrayVec;

use crate::error::{GridError, SwapError};
use crate::tiles::TileSource;
use crate::types::{Cell, Letter, Position, GRID_CELLS, GRID_SIZE};

/// The letter grid - 6x6 tiles using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * GRID_SIZE + col)
    cells: [Cell; GRID_CELLS],
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn empty() -> Self {
        Self {
            cells: [None; GRID_CELLS],
        }
    }

    /// Fill every cell row-major from a tile source.
    ///
    /// Each draw sees the letters to its left and above as context.
    pub fn filled<T: TileSource + ?Sized>(tiles: &mut T) -> Self {
        let mut grid = Self::empty();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let pos = Position::new(row, col);
                let context = grid.neighbors(pos);
                grid.set(pos, Some(tiles.next_letter(&context)));
            }
        }
        grid
    }

    /// Parse a grid from one string per row. `.` marks an empty cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordcrush_core::Grid;
    /// use wordcrush_core::types::{Letter, Position};
    ///
    /// let grid = Grid::from_rows(&[
    ///     "CATXQZ", "JKQXZJ", "QZJKXQ", "XJZQKX", "KQXJZK", "ZXKZQJ",
    /// ])
    /// .unwrap();
    /// assert_eq!(grid.letter(Position::new(0, 1)), Some(Letter::A));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, GridError> {
        if rows.len() != GRID_SIZE {
            return Err(GridError::RowCount {
                expected: GRID_SIZE,
                actual: rows.len(),
            });
        }

        let mut grid = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != GRID_SIZE {
                return Err(GridError::RowLength {
                    row,
                    expected: GRID_SIZE,
                    actual: len,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let pos = Position::new(row, col);
                let cell = match ch {
                    '.' => None,
                    _ => Some(Letter::from_char(ch).ok_or(GridError::InvalidTile { ch, pos })?),
                };
                grid.set(pos, cell);
            }
        }
        Ok(grid)
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(pos: Position) -> Option<usize> {
        if !pos.in_bounds() {
            return None;
        }
        Some(pos.row * GRID_SIZE + pos.col)
    }

    /// Side length of the grid
    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    /// Get cell at `pos`
    /// Returns None if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        Self::index(pos).map(|idx| self.cells[idx])
    }

    /// Letter at `pos`, or None if empty or out of bounds
    pub fn letter(&self, pos: Position) -> Option<Letter> {
        self.get(pos).flatten()
    }

    /// Set cell at `pos`
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match Self::index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Swap two orthogonally adjacent tiles in place.
    ///
    /// Out-of-bounds or non-adjacent requests are rejected without touching
    /// the grid.
    pub fn swap(&mut self, a: Position, b: Position) -> Result<(), SwapError> {
        let ia = Self::index(a).ok_or(SwapError::OutOfBounds(a))?;
        let ib = Self::index(b).ok_or(SwapError::OutOfBounds(b))?;
        if !a.is_adjacent(b) {
            return Err(SwapError::NotAdjacent(a, b));
        }
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Mark cells as empty. Out-of-bounds positions are ignored.
    pub fn mark_empty<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = Position>,
    {
        for pos in positions {
            self.set(pos, None);
        }
    }

    /// Let the tiles in `col` fall to close gaps, then top the column up.
    ///
    /// Letters keep their relative order. New tiles are drawn bottom-up so each
    /// draw sees the tile beneath it as context.
    /// Returns the number of new tiles.
    pub fn compact_column<T: TileSource + ?Sized>(&mut self, col: usize, tiles: &mut T) -> usize {
        if col >= GRID_SIZE {
            return 0;
        }

        // Two-pointer pass from the bottom, like clearing rows in a well.
        let mut write_row = GRID_SIZE;
        for read_row in (0..GRID_SIZE).rev() {
            let cell = self.cells[read_row * GRID_SIZE + col];
            if cell.is_some() {
                write_row -= 1;
                self.cells[write_row * GRID_SIZE + col] = cell;
            }
        }

        let opened = write_row;
        for row in 0..opened {
            self.cells[row * GRID_SIZE + col] = None;
        }
        for row in (0..opened).rev() {
            let pos = Position::new(row, col);
            let context = self.neighbors(pos);
            self.set(pos, Some(tiles.next_letter(&context)));
        }
        opened
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Letters orthogonally adjacent to `pos` (empty cells skipped)
    pub fn neighbors(&self, pos: Position) -> ArrayVec<Letter, 4> {
        let mut out = ArrayVec::new();
        let candidates = [
            pos.row.checked_sub(1).map(|r| Position::new(r, pos.col)),
            Some(Position::new(pos.row + 1, pos.col)),
            pos.col.checked_sub(1).map(|c| Position::new(pos.row, c)),
            Some(Position::new(pos.row, pos.col + 1)),
        ];
        for neighbor in candidates.into_iter().flatten() {
            if let Some(letter) = self.letter(neighbor) {
                out.push(letter);
            }
        }
        out
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> [Cell; GRID_SIZE] {
        let mut out = [None; GRID_SIZE];
        if row < GRID_SIZE {
            out.copy_from_slice(&self.cells[row * GRID_SIZE..(row + 1) * GRID_SIZE]);
        }
        out
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, col: usize) -> [Cell; GRID_SIZE] {
        let mut out = [None; GRID_SIZE];
        if col < GRID_SIZE {
            for (row, slot) in out.iter_mut().enumerate() {
                *slot = self.cells[row * GRID_SIZE + col];
            }
        }
        out
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the grid as ASCII bytes (0 for empty) into a fixed array
    pub fn write_u8_grid(&self, out: &mut [[u8; GRID_SIZE]; GRID_SIZE]) {
        for (row, line) in out.iter_mut().enumerate() {
            for (col, slot) in line.iter_mut().enumerate() {
                *slot = self.cells[row * GRID_SIZE + col]
                    .map(|l| l.as_char() as u8)
                    .unwrap_or(0);
            }
        }
    }

    /// One string per row, `.` for empty cells
    pub fn to_rows(&self) -> Vec<String> {
        (0..GRID_SIZE)
            .map(|row| self.row(row).iter().map(|c| cell_char(*c)).collect())
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.to_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}

fn cell_char(cell: Cell) -> char {
    cell.map(Letter::as_char).unwrap_or('.')
}
