//! Game session control: one struct owns the board, score, RNG, the undo
//! snapshot, and the animation gate, and is the only writer of game state.

use std::fmt;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Board, Coord};
use crate::moves::{self, Direction, TileTrace};
use crate::spawn;
use crate::GameError;

/// The board size used when nothing else is requested.
pub const DEFAULT_BOARD_SIZE: usize = 4;
/// The smallest playable board.
pub const MIN_BOARD_SIZE: usize = 2;

/// Cosmetic phases of an accepted move, advanced by the renderer as its
/// effects complete: slide animation, then the spawn pop, then the merge
/// flash. While any phase is in flight the session rejects input, which
/// serializes moves without the engine knowing anything about timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    Idle,
    Moving,
    Spawning,
    Flashing,
}

impl AnimationPhase {
    /// The phase that follows this one. `Idle` stays `Idle`.
    pub fn next(self) -> AnimationPhase {
        match self {
            AnimationPhase::Idle => AnimationPhase::Idle,
            AnimationPhase::Moving => AnimationPhase::Spawning,
            AnimationPhase::Spawning => AnimationPhase::Flashing,
            AnimationPhase::Flashing => AnimationPhase::Idle,
        }
    }
}

/// State captured right before a move is applied. One level deep: a new
/// move overwrites it, an undo consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    board: Board,
    score: u32,
    terminal: bool,
}

/// Result of one accepted move: everything a renderer needs to animate it.
///
/// Purely descriptive; dropping it loses nothing but the animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// Points earned from merges in this move.
    pub score_gained: u32,
    /// Whether the game is over after the spawn.
    pub terminal: bool,
    /// One entry per pre-move tile, in original coordinates.
    pub traces: Vec<TileTrace>,
    /// Cells that received a merged tile, for flash effects.
    pub merged_cells: Vec<Coord>,
    /// Where the new tile spawned, if the board had room.
    pub spawned: Option<Coord>,
}

/// A 2048 Plus game in progress.
///
/// The session is the single owner of mutable game state. Moves, undo and
/// reset all go through it, and every rejection is a quiet outcome
/// (`None` / `false`) rather than an error: pressing a key that does
/// nothing is part of normal play.
#[derive(Clone)]
pub struct Session {
    board: Board,
    score: u32,
    terminal: bool,
    snapshot: Option<Snapshot>,
    phase: AnimationPhase,
    rng: SmallRng,
}

impl Session {
    /// Create a new game with the given board size and seed.
    ///
    /// The game starts with two spawned tiles and no undo history.
    /// Sizes below [`MIN_BOARD_SIZE`] are rejected.
    pub fn new(size: usize, seed: u64) -> Result<Session, GameError> {
        if size < MIN_BOARD_SIZE {
            return Err(GameError::BoardTooSmall(size));
        }
        let mut session = Session {
            board: Board::empty(size),
            score: 0,
            terminal: false,
            snapshot: None,
            phase: AnimationPhase::Idle,
            rng: SmallRng::seed_from_u64(seed),
        };
        spawn::spawn_tile(&mut session.board, &mut session.rng);
        spawn::spawn_tile(&mut session.board, &mut session.rng);
        session.terminal = moves::is_terminal(&session.board);
        Ok(session)
    }

    /// Resume play from an externally supplied position.
    ///
    /// The terminal flag is recomputed from the board; the undo history
    /// starts empty.
    pub fn from_board(board: Board, score: u32, seed: u64) -> Result<Session, GameError> {
        if board.size() < MIN_BOARD_SIZE {
            return Err(GameError::BoardTooSmall(board.size()));
        }
        let terminal = moves::is_terminal(&board);
        Ok(Session {
            board,
            score,
            terminal,
            snapshot: None,
            phase: AnimationPhase::Idle,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Reset to a fresh game with a new seed, keeping the board size.
    pub fn reset(&mut self, seed: u64) {
        self.board = Board::empty(self.board.size());
        self.score = 0;
        self.snapshot = None;
        self.phase = AnimationPhase::Idle;
        self.rng = SmallRng::seed_from_u64(seed);
        spawn::spawn_tile(&mut self.board, &mut self.rng);
        spawn::spawn_tile(&mut self.board, &mut self.rng);
        self.terminal = moves::is_terminal(&self.board);
    }

    /// Apply a move in the given direction.
    ///
    /// Returns None, leaving the session untouched, when the game is over,
    /// while an animation phase is in flight, or when the slide would not
    /// change the board. An accepted move snapshots the prior state for
    /// undo, accumulates the score, spawns one tile, recomputes the
    /// terminal flag and enters the `Moving` phase.
    pub fn apply_move(&mut self, direction: Direction) -> Option<StepResult> {
        if self.terminal || self.phase != AnimationPhase::Idle {
            return None;
        }
        let result = moves::resolve_move(&self.board, direction);
        if !result.moved {
            return None;
        }

        self.snapshot = Some(Snapshot {
            board: self.board.clone(),
            score: self.score,
            terminal: self.terminal,
        });
        self.board = result.board;
        self.score = self.score.saturating_add(result.score_gained);
        let spawned = spawn::spawn_tile(&mut self.board, &mut self.rng);
        self.terminal = moves::is_terminal(&self.board);
        self.phase = AnimationPhase::Moving;

        Some(StepResult {
            score_gained: result.score_gained,
            terminal: self.terminal,
            traces: result.traces,
            merged_cells: result.merged_cells,
            spawned,
        })
    }

    /// Revert the last accepted move.
    ///
    /// Restores board, score and terminal flag exactly as they were before
    /// that move, including the tile it spawned. Returns false without
    /// changing anything when there is nothing to undo or an animation
    /// phase is in flight. The snapshot is consumed, so a second
    /// consecutive undo is a no-op.
    pub fn undo(&mut self) -> bool {
        if self.phase != AnimationPhase::Idle {
            return false;
        }
        match self.snapshot.take() {
            Some(snapshot) => {
                self.board = snapshot.board;
                self.score = snapshot.score;
                self.terminal = snapshot.terminal;
                true
            }
            None => false,
        }
    }

    /// Move the animation gate to its next phase and return it.
    ///
    /// Renderers call this as each effect completes; headless consumers
    /// can skip straight to [`Session::finish_animation`].
    pub fn advance_animation(&mut self) -> AnimationPhase {
        self.phase = self.phase.next();
        self.phase
    }

    /// Close the animation gate immediately, whatever phase it is in.
    pub fn finish_animation(&mut self) {
        self.phase = AnimationPhase::Idle;
    }

    /// Whether a move's animation phases are still in flight.
    pub fn is_animating(&self) -> bool {
        self.phase != AnimationPhase::Idle
    }

    /// The current animation phase.
    pub fn animation_phase(&self) -> AnimationPhase {
        self.phase
    }

    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The board's side length.
    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// The current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Whether the game is over (no legal moves remaining).
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Whether an undo would succeed once the animation gate is idle.
    pub fn can_undo(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Get the legal directions as a boolean array [Up, Down, Left, Right].
    pub fn legal_moves(&self) -> [bool; 4] {
        moves::legal_moves(&self.board)
    }
}

impl fmt::Debug for Session {
    // The RNG has no useful Debug output, so render the game state instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Session {{ score: {}, terminal: {}, phase: {:?} }}",
            self.score, self.terminal, self.phase
        )?;
        write!(f, "{:?}", self.board)
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        write!(f, "{}", self.board)
    }
}

// =============================================================================
// Tests
// =============================================================================
