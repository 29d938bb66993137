//! Tile spawning. The generator is injected so sessions stay deterministic
//! under a seed and tests can drive the distribution directly.

use rand::Rng;

use crate::board::{Board, Cell, Coord};

/// Spawn a new tile in a uniformly chosen empty cell.
///
/// Distribution: 30% wildcard, otherwise the classic 90/10 split between
/// 2 and 4 (so 63% two, 7% four overall). Returns the coordinate written,
/// or None when the board is full. A full board is not an error; the caller
/// decides what a failed spawn means.
pub fn spawn_tile<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Option<Coord> {
    let empty_cells = board.empty_cells();
    if empty_cells.is_empty() {
        return None;
    }

    let (row, col) = empty_cells[rng.gen_range(0..empty_cells.len())];
    let cell = if rng.gen::<f32>() < 0.3 {
        Cell::Wildcard
    } else if rng.gen::<f32>() < 0.9 {
        Cell::Value(2)
    } else {
        Cell::Value(4)
    };
    board.set(row, col, cell);
    Some((row, col))
}

// =============================================================================
// Tests
// =============================================================================
