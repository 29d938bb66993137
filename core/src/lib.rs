//! # 2048 Plus Core Engine
//!
//! A pure Rust implementation of the 2048 Plus board logic: classic
//! sliding-tile merges extended with a wildcard tile that merges with
//! numeric neighbors. Deterministic, seedable PRNG for reproducible
//! gameplay; designed for easy integration with CLI and WebAssembly front
//! ends.
//!
//! The engine is synchronous and side-effect free: [`resolve_move`],
//! [`spawn_tile`] and [`is_terminal`] are plain functions over [`Board`],
//! and [`Session`] is the single mutable owner that strings them together
//! with scoring, single-level undo and the animation gate.
//!
//! ## Example
//!
//! ```rust
//! use plus2048_core::{Direction, Session};
//!
//! let mut session = Session::new(4, 42).unwrap();  // 4x4 board, seed 42
//! if let Some(step) = session.apply_move(Direction::Left) {
//!     println!("Gained: {}, Terminal: {}", step.score_gained, step.terminal);
//! }
//! ```

use thiserror::Error;

pub mod board;
pub mod moves;
pub mod session;
pub mod spawn;

pub use board::{Board, Cell, Coord, MAX_TILE_VALUE};
pub use moves::{is_terminal, legal_moves, resolve_move, Direction, MoveResult, TileTrace};
pub use session::{
    AnimationPhase, Session, StepResult, DEFAULT_BOARD_SIZE, MIN_BOARD_SIZE,
};
pub use spawn::spawn_tile;

/// Errors produced at the crate's input boundaries.
///
/// In-game rejections (an illegal move, undo with no history, input while
/// an animation is in flight) are not errors; they surface as `None` or
/// `false` on [`Session`]. These variants only ever come from untyped
/// external data: direction codes, grids and sizes supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A direction code outside 0..=3.
    #[error("invalid direction code {0}, expected 0..=3")]
    InvalidDirection(u8),
    /// An external grid whose rows do not all match its height.
    #[error("grid is not square: {rows} rows but row {row} has {cols} columns")]
    NotSquare { rows: usize, row: usize, cols: usize },
    /// An external cell code that is not 0, -1, or a power of two >= 2.
    #[error("invalid cell code {code} at ({row}, {col})")]
    InvalidCell { row: usize, col: usize, code: i32 },
    /// A requested board smaller than [`MIN_BOARD_SIZE`].
    #[error("board size {0} is below the minimum of 2")]
    BoardTooSmall(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GameError::InvalidDirection(9).to_string(),
            "invalid direction code 9, expected 0..=3"
        );
        assert_eq!(
            GameError::BoardTooSmall(1).to_string(),
            "board size 1 is below the minimum of 2"
        );
        assert_eq!(
            GameError::InvalidCell {
                row: 2,
                col: 0,
                code: 7
            }
            .to_string(),
            "invalid cell code 7 at (2, 0)"
        );
    }
}
