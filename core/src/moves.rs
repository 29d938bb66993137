//! Move resolution: every slide is canonicalized to a single leftward
//! compress-and-merge pass through an orientation transform, then mapped
//! back. Terminal detection shares the same merge predicate.

use crate::board::{Board, Cell, Coord, MAX_TILE_VALUE};

/// The four slide directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    /// Convert a u8 to a Direction (0=Up, 1=Down, 2=Left, 3=Right).
    /// Returns None for invalid values.
    pub fn from_u8(value: u8) -> Option<Direction> {
        match value {
            0 => Some(Direction::Up),
            1 => Some(Direction::Down),
            2 => Some(Direction::Left),
            3 => Some(Direction::Right),
            _ => None,
        }
    }

    /// Get all four directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

/// The movement of one tile during a move, in original board coordinates.
///
/// Every tile that existed before the move gets exactly one trace, including
/// tiles that did not travel. Two traces share a `to` coordinate exactly when
/// they merged there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileTrace {
    /// Where the tile started.
    pub from: Coord,
    /// Where the tile ended up.
    pub to: Coord,
    /// What the tile was before the move.
    pub cell: Cell,
    /// Whether the tile was consumed by a merge at `to`.
    pub merging: bool,
}

/// Everything a move produces. Purely descriptive; applying it to game
/// state is the session's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// The board after the slide, before any spawn.
    pub board: Board,
    /// Whether any tile moved or merged. A false here means the move is
    /// rejected and `board` equals the input.
    pub moved: bool,
    /// Points earned from merges in this move.
    pub score_gained: u32,
    /// One entry per pre-move tile.
    pub traces: Vec<TileTrace>,
    /// Coordinates that received a merged tile, for flash effects.
    pub merged_cells: Vec<Coord>,
}

/// Board transform that turns a slide in any direction into a slide to the
/// left. Each variant knows its coordinate map and its inverse, so trace
/// endpoints computed in canonical space can be mapped back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Identity,
    MirrorRows,
    RotateCcw,
    RotateCw,
}

impl Orientation {
    fn for_direction(direction: Direction) -> Orientation {
        match direction {
            Direction::Left => Orientation::Identity,
            Direction::Right => Orientation::MirrorRows,
            Direction::Up => Orientation::RotateCcw,
            Direction::Down => Orientation::RotateCw,
        }
    }

    fn inverse(self) -> Orientation {
        match self {
            Orientation::Identity => Orientation::Identity,
            Orientation::MirrorRows => Orientation::MirrorRows,
            Orientation::RotateCcw => Orientation::RotateCw,
            Orientation::RotateCw => Orientation::RotateCcw,
        }
    }

    /// Map a coordinate of the input board to its transformed position.
    fn map(self, size: usize, (row, col): Coord) -> Coord {
        match self {
            Orientation::Identity => (row, col),
            Orientation::MirrorRows => (row, size - 1 - col),
            Orientation::RotateCcw => (size - 1 - col, row),
            Orientation::RotateCw => (col, size - 1 - row),
        }
    }

    /// Build the transformed board by relocating every cell through `map`.
    fn apply(self, board: &Board) -> Board {
        let size = board.size();
        let mut out = Board::empty(size);
        for row in 0..size {
            for col in 0..size {
                let (to_row, to_col) = self.map(size, (row, col));
                out.set(to_row, to_col, board.get(row, col));
            }
        }
        out
    }
}

/// Whether two adjacent tiles merge: equal numeric values, or a wildcard
/// next to any numeric tile. Two wildcards never merge. The merged tile's
/// value is the numeric side doubled; a doubling that would exceed
/// [`MAX_TILE_VALUE`] is refused, so a pair of maximum tiles (or a wildcard
/// beside one) stays put.
fn merged_value(a: Cell, b: Cell) -> Option<u32> {
    let value = match (a, b) {
        (Cell::Value(x), Cell::Value(y)) if x == y => x * 2,
        (Cell::Wildcard, Cell::Value(v)) | (Cell::Value(v), Cell::Wildcard) => v * 2,
        _ => return None,
    };
    if value <= MAX_TILE_VALUE {
        Some(value)
    } else {
        None
    }
}

fn can_merge(a: Cell, b: Cell) -> bool {
    merged_value(a, b).is_some()
}

/// Resolve a slide in the given direction.
///
/// The board is reoriented so the slide points left, then each row gets a
/// single left-to-right pass: adjacent mergeable tiles combine once (a tile
/// created by a merge never merges again in the same move) and everything
/// compacts toward the edge. Trace endpoints and merge destinations are
/// mapped back through the inverse orientation, so the result reads in the
/// input board's coordinates.
pub fn resolve_move(board: &Board, direction: Direction) -> MoveResult {
    let size = board.size();
    let orientation = Orientation::for_direction(direction);
    let inverse = orientation.inverse();
    let canonical = orientation.apply(board);

    let mut merged = Board::empty(size);
    let mut traces = Vec::new();
    let mut merged_cells = Vec::new();
    let mut score_gained: u32 = 0;
    let mut moved = false;

    for row in 0..size {
        // Non-empty tiles of this canonical row with their source columns.
        let entries: Vec<(usize, Cell)> = (0..size)
            .filter_map(|col| match canonical.get(row, col) {
                Cell::Empty => None,
                cell => Some((col, cell)),
            })
            .collect();

        let mut slot = 0;
        let mut i = 0;
        while i < entries.len() {
            let (src, cell) = entries[i];
            if let Some(&(next_src, next_cell)) = entries.get(i + 1) {
                if let Some(value) = merged_value(cell, next_cell) {
                    let to = inverse.map(size, (row, slot));
                    merged.set(row, slot, Cell::Value(value));
                    traces.push(TileTrace {
                        from: inverse.map(size, (row, src)),
                        to,
                        cell,
                        merging: true,
                    });
                    traces.push(TileTrace {
                        from: inverse.map(size, (row, next_src)),
                        to,
                        cell: next_cell,
                        merging: true,
                    });
                    merged_cells.push(to);
                    score_gained = score_gained.saturating_add(value);
                    moved = true;
                    slot += 1;
                    i += 2;
                    continue;
                }
            }
            merged.set(row, slot, cell);
            traces.push(TileTrace {
                from: inverse.map(size, (row, src)),
                to: inverse.map(size, (row, slot)),
                cell,
                merging: false,
            });
            if src != slot {
                moved = true;
            }
            slot += 1;
            i += 1;
        }
    }

    MoveResult {
        board: inverse.apply(&merged),
        moved,
        score_gained,
        traces,
        merged_cells,
    }
}

/// Whether the game is over: the board is full and no adjacent pair (right
/// or down neighbor) can merge. Uses the exact merge predicate of
/// [`resolve_move`], so a wildcard next to any numeric tile keeps the game
/// alive while adjacent wildcards do not.
pub fn is_terminal(board: &Board) -> bool {
    let size = board.size();
    for row in 0..size {
        for col in 0..size {
            let cell = board.get(row, col);
            if cell.is_empty() {
                return false;
            }
            if col + 1 < size && can_merge(cell, board.get(row, col + 1)) {
                return false;
            }
            if row + 1 < size && can_merge(cell, board.get(row + 1, col)) {
                return false;
            }
        }
    }
    true
}

/// Get the legal directions as a boolean array [Up, Down, Left, Right].
///
/// A direction is legal if sliding it would change the board.
pub fn legal_moves(board: &Board) -> [bool; 4] {
    [
        resolve_move(board, Direction::Up).moved,
        resolve_move(board, Direction::Down).moved,
        resolve_move(board, Direction::Left).moved,
        resolve_move(board, Direction::Right).moved,
    ]
}

// =============================================================================
// Tests
// =============================================================================
