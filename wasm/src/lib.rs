//! # 2048 Plus WebAssembly Bindings
//!
//! This crate provides JavaScript-friendly bindings to the 2048 Plus engine
//! using wasm-bindgen. It wraps the core session and exposes a class-like
//! API suitable for use in web applications; the renderer drives the
//! animation gate back through [`WasmSession::advance_animation`] as its
//! CSS effects complete.

use plus2048_core::{AnimationPhase, Board, Coord, Direction, GameError, Session, StepResult};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// One tile movement, serialized for JavaScript.
#[derive(Serialize)]
pub struct JsTrace {
    /// Starting cell as [row, col].
    pub from: [usize; 2],
    /// Destination cell as [row, col].
    pub to: [usize; 2],
    /// The tile's pre-move cell code (-1 for a wildcard).
    pub value: i32,
    /// Whether the tile was consumed by a merge at `to`.
    pub merging: bool,
}

/// Result of a step operation, serialized for JavaScript.
#[derive(Serialize)]
pub struct JsStepResult {
    /// The updated board as a nested grid of cell codes.
    pub board: Vec<Vec<i32>>,
    /// Current total score.
    pub score: u32,
    /// Points earned from this move.
    pub gained: u32,
    /// Whether the board changed.
    pub moved: bool,
    /// Whether the game is over.
    pub terminal: bool,
    /// One movement trace per pre-move tile.
    pub traces: Vec<JsTrace>,
    /// Cells that received a merged tile, as [row, col] pairs.
    pub merged: Vec<[usize; 2]>,
    /// Where the new tile spawned, if the board had room.
    pub spawned: Option<[usize; 2]>,
}

/// WebAssembly wrapper for a 2048 Plus session.
#[wasm_bindgen]
pub struct WasmSession {
    session: Session,
}

#[wasm_bindgen]
impl WasmSession {
    /// Create a new session with the given board size and seed.
    ///
    /// The seed is a 64-bit integer used to initialize the deterministic
    /// RNG. Sizes below 2 throw.
    #[wasm_bindgen(constructor)]
    pub fn new(size: usize, seed: u64) -> Result<WasmSession, String> {
        let session = Session::new(size, seed).map_err(|e| e.to_string())?;
        Ok(WasmSession { session })
    }

    /// Reset to a fresh game with a new seed, keeping the board size.
    pub fn reset(&mut self, seed: u64) {
        self.session.reset(seed);
    }

    /// Replace the session with an externally supplied position.
    ///
    /// `grid` must be a square nested array of cell codes (0 empty,
    /// powers of two for tiles, -1 for a wildcard); anything else throws.
    #[wasm_bindgen(js_name = loadBoard)]
    pub fn load_board(&mut self, grid: JsValue, score: u32, seed: u64) -> Result<(), String> {
        let grid: Vec<Vec<i32>> = serde_wasm_bindgen::from_value(grid)
            .map_err(|e| format!("Failed to parse grid: {:?}", e))?;
        let board = Board::from_grid(&grid).map_err(|e| e.to_string())?;
        self.session = Session::from_board(board, score, seed).map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Execute a move in the given direction.
    ///
    /// Direction values:
    /// - 0 = Up
    /// - 1 = Down
    /// - 2 = Left
    /// - 3 = Right
    ///
    /// Any other value throws. A legal code whose move is rejected (game
    /// over, animation in flight, or nothing would slide) returns the
    /// current state with `moved: false`.
    pub fn step(&mut self, direction: u8) -> Result<JsValue, String> {
        let direction = Direction::from_u8(direction)
            .ok_or_else(|| GameError::InvalidDirection(direction).to_string())?;

        let result = match self.session.apply_move(direction) {
            Some(step) => self.step_payload(step),
            None => self.rejected_payload(),
        };
        Ok(result)
    }

    /// Revert the last accepted move. Returns whether anything was undone.
    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    /// Whether an undo would succeed once the animation gate is idle.
    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    /// Get the current board as a nested grid of cell codes.
    #[wasm_bindgen(js_name = getBoard)]
    pub fn get_board(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.session.board().to_grid()).unwrap_or(JsValue::NULL)
    }

    /// Get the current score.
    #[wasm_bindgen(js_name = getScore)]
    pub fn get_score(&self) -> u32 {
        self.session.score()
    }

    /// Check if the game is over.
    #[wasm_bindgen(js_name = isTerminal)]
    pub fn is_terminal(&self) -> bool {
        self.session.is_terminal()
    }

    /// Get the board's side length.
    #[wasm_bindgen(js_name = getSize)]
    pub fn get_size(&self) -> usize {
        self.session.size()
    }

    /// Get the maximum numeric tile value on the board.
    #[wasm_bindgen(js_name = getMaxTile)]
    pub fn get_max_tile(&self) -> u32 {
        self.session.board().max_value()
    }

    /// Get legal directions as an array of 4 booleans [Up, Down, Left, Right].
    #[wasm_bindgen(js_name = getLegalMoves)]
    pub fn get_legal_moves(&self) -> Vec<u8> {
        self.session
            .legal_moves()
            .iter()
            .map(|&b| if b { 1 } else { 0 })
            .collect()
    }

    /// Whether a move's animation phases are still in flight.
    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.session.is_animating()
    }

    /// The current animation phase: "idle", "moving", "spawning" or
    /// "flashing".
    #[wasm_bindgen(js_name = animationPhase)]
    pub fn animation_phase(&self) -> String {
        phase_name(self.session.animation_phase()).to_string()
    }

    /// Signal that the current animation effect completed; returns the
    /// next phase name.
    #[wasm_bindgen(js_name = advanceAnimation)]
    pub fn advance_animation(&mut self) -> String {
        phase_name(self.session.advance_animation()).to_string()
    }

    /// Close the animation gate immediately, whatever phase it is in.
    #[wasm_bindgen(js_name = finishAnimation)]
    pub fn finish_animation(&mut self) {
        self.session.finish_animation();
    }

    /// Helper to build the JS payload for an accepted move.
    fn step_payload(&self, step: StepResult) -> JsValue {
        let js_result = JsStepResult {
            board: self.session.board().to_grid(),
            score: self.session.score(),
            gained: step.score_gained,
            moved: true,
            terminal: step.terminal,
            traces: step
                .traces
                .iter()
                .map(|t| JsTrace {
                    from: coord_pair(t.from),
                    to: coord_pair(t.to),
                    value: t.cell.code(),
                    merging: t.merging,
                })
                .collect(),
            merged: step.merged_cells.iter().map(|&c| coord_pair(c)).collect(),
            spawned: step.spawned.map(coord_pair),
        };
        serde_wasm_bindgen::to_value(&js_result).unwrap_or(JsValue::NULL)
    }

    /// Helper to build the JS payload for a rejected move.
    fn rejected_payload(&self) -> JsValue {
        let js_result = JsStepResult {
            board: self.session.board().to_grid(),
            score: self.session.score(),
            gained: 0,
            moved: false,
            terminal: self.session.is_terminal(),
            traces: Vec::new(),
            merged: Vec::new(),
            spawned: None,
        };
        serde_wasm_bindgen::to_value(&js_result).unwrap_or(JsValue::NULL)
    }
}

fn coord_pair((row, col): Coord) -> [usize; 2] {
    [row, col]
}

fn phase_name(phase: AnimationPhase) -> &'static str {
    match phase {
        AnimationPhase::Idle => "idle",
        AnimationPhase::Moving => "moving",
        AnimationPhase::Spawning => "spawning",
        AnimationPhase::Flashing => "flashing",
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_names() {
        assert_eq!(phase_name(AnimationPhase::Idle), "idle");
        assert_eq!(phase_name(AnimationPhase::Moving), "moving");
        assert_eq!(phase_name(AnimationPhase::Spawning), "spawning");
        assert_eq!(phase_name(AnimationPhase::Flashing), "flashing");
    }

    #[test]
    fn test_coord_pair() {
        assert_eq!(coord_pair((2, 3)), [2, 3]);
    }
}
