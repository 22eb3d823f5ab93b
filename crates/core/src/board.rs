//! Board module - manages the game grid
//!
//! The board is `width x (visible + invisible)` cells, each holding a style id
//! (0 = empty). Uses a flat row-major vector sized once at construction.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom;
//! the first `invisible_rows` rows sit above the visible play area.

use arrayvec::ArrayVec;

use crate::types::{Cell, EMPTY_STYLE};

/// The game board, flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY_STYLE; width * height],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(EMPTY_STYLE))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY_STYLE)
    }

    /// Cells of row `y`.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY_STYLE)
    }

    /// Full rows within `top..=bottom` (clamped to the board), top to bottom.
    pub fn full_rows_in(&self, top: usize, bottom: usize) -> ArrayVec<usize, 4> {
        let mut rows = ArrayVec::new();
        if self.height == 0 {
            return rows;
        }
        for y in top..=bottom.min(self.height - 1) {
            if self.is_row_full(y) && rows.try_push(y).is_err() {
                break;
            }
        }
        rows
    }

    /// Remove `rows` and compact the rest downward, refilling the top with
    /// empty rows. Rows that are not listed keep their relative order.
    pub fn remove_rows(&mut self, rows: &[usize]) -> usize {
        let width = self.width;
        let mut write_y = self.height;
        let mut removed = 0;

        // Scan from bottom to top
        for read_y in (0..self.height).rev() {
            if rows.contains(&read_y) {
                removed += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                // copy_within handles overlap without allocating
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * width].fill(EMPTY_STYLE);
        removed
    }

    /// Whether any of the first `rows` rows holds a filled cell.
    pub fn any_filled_above(&self, rows: usize) -> bool {
        let end = rows.min(self.height) * self.width;
        self.cells[..end].iter().any(|&cell| cell != EMPTY_STYLE)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY_STYLE);
    }

    /// Build a board from text rows, `.` for empty and a digit for a style.
    /// Rows are aligned to the bottom of the board.
    #[cfg(test)]
    pub fn from_rows(width: usize, height: usize, rows: &[&str]) -> Self {
        let mut board = Self::new(width, height);
        let top = height - rows.len();
        for (i, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let cell = ch.to_digit(10).unwrap_or(0) as Cell;
                board.set(x as i16, (top + i) as i16, cell);
            }
        }
        board
    }
}
