//! Puzzle engine
//!
//! All puzzle logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Row-major iteration order
//! - No rendering or platform dependencies

pub mod board;
pub mod error;
pub mod session;

pub use board::{Board, Cell, Coord};
pub use error::EngineError;
pub use session::{PuzzleEvent, PuzzlePhase, Session};
