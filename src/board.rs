//! The playfield: a fixed 10x20 grid of cells.
//!
//! Coordinates are `(x, y)` with the origin at the top-left and `y` growing
//! downward. Rows above the board (`y < 0`) are treated as open space so a
//! piece can poke out of the top while it spawns or rotates.

use crate::shapes::Color;

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_filled(self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    rows: Vec<Vec<Cell>>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            rows: vec![Self::empty_row(); BOARD_HEIGHT],
        }
    }

    /// Builds a board from explicit rows. Panics unless the grid is exactly
    /// `BOARD_HEIGHT` rows of `BOARD_WIDTH` cells.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        assert_eq!(rows.len(), BOARD_HEIGHT, "board must have {} rows", BOARD_HEIGHT);
        assert!(
            rows.iter().all(|row| row.len() == BOARD_WIDTH),
            "every row must have {} cells",
            BOARD_WIDTH
        );
        Self { rows }
    }

    fn empty_row() -> Vec<Cell> {
        vec![Cell::Empty; BOARD_WIDTH]
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Cell at `(x, y)`, or `None` outside the grid.
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// Only cells inside the grid can be occupied. Bounds for movement are
    /// enforced by the piece, not here.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).map_or(false, Cell::is_filled)
    }

    /// Writes colored cells into the grid. Cells outside the grid are skipped.
    pub fn place<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = (i32, i32, Color)>,
    {
        for (x, y, color) in cells {
            if x < 0 || y < 0 {
                continue;
            }
            if let Some(cell) = self
                .rows
                .get_mut(y as usize)
                .and_then(|row| row.get_mut(x as usize))
            {
                *cell = Cell::Filled(color);
            }
        }
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y].iter().all(|cell| cell.is_filled())
    }

    pub fn filled_in_row(&self, y: usize) -> usize {
        self.rows[y].iter().filter(|cell| cell.is_filled()).count()
    }

    pub fn filled_cells(&self) -> usize {
        self.rows.iter().flatten().filter(|cell| cell.is_filled()).count()
    }

    /// Removes every full row, scanning from the bottom up. Rows above a
    /// removed row shift down by one and an empty row enters at the top.
    /// Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT;

        while y > 0 {
            if self.is_row_full(y - 1) {
                self.rows.remove(y - 1);
                self.rows.insert(0, Self::empty_row());
                cleared += 1;
                // The row above now sits at y - 1; look at it again.
            } else {
                y -= 1;
            }
        }

        cleared
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
