//! Board representation: a square grid of cells with an integer-coded
//! external form for renderers and persistence-free state transfer.

use std::fmt;

use crate::GameError;

/// A `(row, col)` position on the board, zero-indexed from the top-left.
pub type Coord = (usize, usize);

/// The largest numeric tile a board can hold.
///
/// This is the biggest power of two an `i32` cell code can carry. Merges
/// that would exceed it are refused, so every reachable board survives the
/// grid codec round trip.
pub const MAX_TILE_VALUE: u32 = 1 << 30;

/// A single board cell.
///
/// `Value` always holds a power of two in `2..=MAX_TILE_VALUE`. `Wildcard`
/// is the joker tile: it merges with any numeric tile (producing that value
/// doubled) but never with another wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Value(u32),
    Wildcard,
}

impl Cell {
    /// The integer code used by the external grid representation:
    /// 0 for empty, the tile value for numeric tiles, -1 for a wildcard.
    ///
    /// Numeric tiles never exceed [`MAX_TILE_VALUE`], so the cast cannot
    /// wrap.
    pub fn code(self) -> i32 {
        match self {
            Cell::Empty => 0,
            Cell::Value(value) => value as i32,
            Cell::Wildcard => -1,
        }
    }

    /// Parse an external cell code. Returns None for anything that is not
    /// 0, -1, or a power of two in `2..=MAX_TILE_VALUE` (no larger positive
    /// `i32` is a power of two).
    pub fn from_code(code: i32) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            -1 => Some(Cell::Wildcard),
            value if value >= 2 && (value as u32).is_power_of_two() => {
                Some(Cell::Value(value as u32))
            }
            _ => None,
        }
    }

    /// Whether this cell is empty.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A square N x N board.
///
/// Cells are stored in a flat row-major vector (index `row * size + col`).
/// The size is fixed once the board exists; only a new game may resize.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board of the given size.
    pub fn empty(size: usize) -> Board {
        Board {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// The board's side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the cell at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }

    /// Set the cell at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.size + col] = cell;
    }

    /// Coordinates of every empty cell, in row-major order.
    pub fn empty_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(i, _)| (i / self.size, i % self.size))
            .collect()
    }

    /// The number of empty cells.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Whether no cell is empty.
    pub fn is_full(&self) -> bool {
        self.count_empty() == 0
    }

    /// The largest numeric tile on the board (0 if there is none).
    /// Wildcards have no numeric value and are ignored.
    pub fn max_value(&self) -> u32 {
        self.cells
            .iter()
            .filter_map(|cell| match cell {
                Cell::Value(value) => Some(*value),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Export the board as a nested grid of cell codes.
    pub fn to_grid(&self) -> Vec<Vec<i32>> {
        (0..self.size)
            .map(|row| (0..self.size).map(|col| self.get(row, col).code()).collect())
            .collect()
    }

    /// Build a board from a nested grid of cell codes.
    ///
    /// The grid must be square and every code must parse; anything else is
    /// rejected with [`GameError::NotSquare`] or [`GameError::InvalidCell`].
    pub fn from_grid(grid: &[Vec<i32>]) -> Result<Board, GameError> {
        let size = grid.len();
        let mut board = Board::empty(size);
        for (row, codes) in grid.iter().enumerate() {
            if codes.len() != size {
                return Err(GameError::NotSquare {
                    rows: size,
                    row,
                    cols: codes.len(),
                });
            }
            for (col, &code) in codes.iter().enumerate() {
                let cell = Cell::from_code(code).ok_or(GameError::InvalidCell {
                    row,
                    col,
                    code,
                })?;
                board.set(row, col, cell);
            }
        }
        Ok(board)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{}", self.size, self.size)?;
        for row in 0..self.size {
            for col in 0..self.size {
                match self.get(row, col) {
                    Cell::Empty => write!(f, "    .")?,
                    Cell::Value(value) => write!(f, "{:5}", value)?,
                    Cell::Wildcard => write!(f, "    *")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = format!("+{}", "------+".repeat(self.size));
        writeln!(f, "{}", rule)?;
        for row in 0..self.size {
            write!(f, "|")?;
            for col in 0..self.size {
                match self.get(row, col) {
                    Cell::Empty => write!(f, "      |")?,
                    Cell::Value(value) => write!(f, "{:^6}|", value)?,
                    Cell::Wildcard => write!(f, "{:^6}|", "*")?,
                }
            }
            writeln!(f)?;
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
