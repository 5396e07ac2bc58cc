//! The Black - A Lights Out style grid puzzle
//!
//! Core modules:
//! - `engine`: Puzzle logic (board, toggle rule, win check, session phases)
//! - `settings`: Player preferences persisted in LocalStorage
//! - `web`: wasm-bindgen facade for the browser front end

pub mod engine;
pub mod settings;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use engine::{Board, Cell, Coord, EngineError, PuzzleEvent, PuzzlePhase, Session};
pub use settings::{GridSize, Settings};

/// Game configuration constants
pub mod consts {
    /// Grid dimension used when nothing else is chosen
    pub const DEFAULT_GRID_SIZE: usize = 3;
    /// Grid dimensions offered to the player
    pub const GRID_SIZES: [usize; 2] = [3, 4];
    /// Cells set to black when a puzzle starts
    pub const DEFAULT_SEED_COUNT: usize = 4;
    /// Countdown length per grid unit (a 3x3 puzzle gets 3 minutes)
    pub const SECONDS_PER_GRID_UNIT: u32 = 60;
}

/// Derive a run seed from the wall clock
#[cfg(target_arch = "wasm32")]
pub fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Derive a run seed from the wall clock
#[cfg(not(target_arch = "wasm32"))]
pub fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
