//! Board module - the 10x20 grid.
//!
//! Each cell is empty or holds the kind of the piece that locked there.
//! Flat array storage, row-major. Coordinates: (x, y) with x in 0..10
//! left to right and y in 0..20 top to bottom. Pieces may extend above
//! row 0 while falling; only merge and sweep mutate the grid.

use crate::core::shape::Shape;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell at (x, y), or None when out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set a cell. Returns false when out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Collision test for a shape with its matrix top-left at (x, y).
    ///
    /// A filled shape cell collides when it is out of horizontal bounds,
    /// at or below the bottom boundary, or over an occupied cell. Cells
    /// above row 0 never collide; pieces spawn partly above the grid.
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        for (dx, dy) in shape.cells() {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
                return true;
            }
            if py < 0 {
                continue;
            }
            if self.is_occupied(px, py) {
                return true;
            }
        }
        false
    }

    /// Write a shape's cells into the grid at (x, y). Irreversible; cells
    /// still above row 0 are discarded.
    pub fn merge(&mut self, shape: &Shape, x: i8, y: i8) {
        let kind = shape.kind();
        for (dx, dy) in shape.cells() {
            self.set(x + dx, y + dy, Some(kind));
        }
    }

    /// Whether every column of a row is occupied.
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove a row: shift every row above it down one and clear the top.
    fn remove_row(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;

        // copy_within handles the overlapping ranges safely.
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        for cell in &mut self.cells[..width] {
            *cell = None;
        }
    }

    /// Remove all full rows and return how many were cleared.
    ///
    /// Scans bottom-up. Row 0 is never checked; the scan stops above the
    /// top row and a clear filling it stays put. After a removal the same
    /// index is re-checked, since the row that slid down may itself be
    /// full.
    pub fn sweep(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = (BOARD_HEIGHT - 1) as usize;
        while y >= 1 {
            if self.is_row_full(y) {
                self.remove_row(y);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
