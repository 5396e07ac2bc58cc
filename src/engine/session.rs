//! Puzzle session: one board plus the countdown and phase around it
//!
//! The host calls `toggle` once per cell click and `advance` once per frame
//! (or `tick_second` from a 1 s interval). Both return the events the
//! presentation layer should react to.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::{Board, Coord};
use super::error::EngineError;
use crate::consts::{DEFAULT_SEED_COUNT, SECONDS_PER_GRID_UNIT};

/// Current phase of a puzzle run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzlePhase {
    /// Accepting toggles, countdown running
    InProgress,
    /// Every cell turned black
    Solved,
    /// Countdown reached zero first
    TimedOut,
}

impl PuzzlePhase {
    /// No further toggles or countdown once terminal
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PuzzlePhase::InProgress)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PuzzlePhase::InProgress => "in_progress",
            PuzzlePhase::Solved => "solved",
            PuzzlePhase::TimedOut => "timed_out",
        }
    }
}

/// Something the presentation layer should animate or announce
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleEvent {
    /// These cells changed color (target first)
    CellsFlipped(Vec<Coord>),
    /// Board became all black
    Solved,
    /// Countdown expired
    TimedOut,
}

/// Complete puzzle run state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Run seed the board was generated from
    seed: u64,
    board: Board,
    phase: PuzzlePhase,
    /// Whole seconds left on the countdown
    remaining_seconds: u32,
    /// Accepted toggles so far
    moves: u32,
    /// Sub-second time carried between `advance` calls
    #[serde(default)]
    accumulator: f32,
}

impl Session {
    /// Start a new run with the default number of seed cells
    pub fn new(grid_size: usize, seed: u64) -> Result<Self, EngineError> {
        Self::with_seed_count(grid_size, DEFAULT_SEED_COUNT, seed)
    }

    /// Start a new run with `seed_count` black cells
    pub fn with_seed_count(
        grid_size: usize,
        seed_count: usize,
        seed: u64,
    ) -> Result<Self, EngineError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let board = Board::initialize(grid_size, seed_count, &mut rng)?;
        log::info!(
            "New {}x{} puzzle (seed {}, {} black)",
            grid_size,
            grid_size,
            seed,
            seed_count
        );
        Ok(Self::from_board(board, seed))
    }

    /// Wrap an existing board (replays, scripted setups)
    pub fn from_board(board: Board, seed: u64) -> Self {
        let units = u32::try_from(board.size()).unwrap_or(u32::MAX);
        let phase = if board.is_solved() {
            PuzzlePhase::Solved
        } else {
            PuzzlePhase::InProgress
        };
        Self {
            seed,
            board,
            phase,
            remaining_seconds: units.saturating_mul(SECONDS_PER_GRID_UNIT),
            moves: 0,
            accumulator: 0.0,
        }
    }

    /// Throw the current board away and start over
    pub fn restart(&mut self, grid_size: usize, seed: u64) -> Result<(), EngineError> {
        *self = Self::new(grid_size, seed)?;
        Ok(())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> PuzzlePhase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    /// Apply a player click at (row, col).
    ///
    /// Out-of-range coordinates are always an error. Once the run is over
    /// the click is ignored and no events are produced.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<Vec<PuzzleEvent>, EngineError> {
        if let Err(e) = self.board.get(row, col) {
            log::warn!("Rejected toggle: {}", e);
            return Err(e);
        }
        if self.phase.is_terminal() {
            log::debug!("Ignoring toggle at ({}, {}) after {}", row, col, self.phase.as_str());
            return Ok(Vec::new());
        }

        let changed = self.board.toggle_at(row, col)?;
        self.moves += 1;
        log::debug!(
            "Toggle ({}, {}) flipped {} cells, move {}",
            row,
            col,
            changed.len(),
            self.moves
        );

        let mut events = vec![PuzzleEvent::CellsFlipped(changed)];
        if self.board.is_solved() {
            self.phase = PuzzlePhase::Solved;
            log::info!(
                "Puzzle solved in {} moves with {}s left",
                self.moves,
                self.remaining_seconds
            );
            events.push(PuzzleEvent::Solved);
        }
        Ok(events)
    }

    /// Count the timer down by one whole second
    pub fn tick_second(&mut self) -> Option<PuzzleEvent> {
        if self.phase.is_terminal() {
            return None;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = PuzzlePhase::TimedOut;
            log::info!("Time's up after {} moves", self.moves);
            return Some(PuzzleEvent::TimedOut);
        }
        None
    }

    /// Feed elapsed wall time (seconds) into the countdown
    pub fn advance(&mut self, dt: f32) -> Vec<PuzzleEvent> {
        let mut events = Vec::new();
        if self.phase.is_terminal() || !dt.is_finite() || dt <= 0.0 {
            return events;
        }

        self.accumulator += dt;
        while self.accumulator >= 1.0 && !self.phase.is_terminal() {
            self.accumulator -= 1.0;
            events.extend(self.tick_second());
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x3 board that one click in the middle solves
    fn one_move_from_solved() -> Board {
        let black = [
            Coord::new(0, 0),
            Coord::new(0, 2),
            Coord::new(2, 0),
            Coord::new(2, 2),
        ];
        Board::from_black_cells(3, &black).unwrap()
    }

    #[test]
    fn test_new_session_in_progress() {
        let session = Session::new(3, 12345).unwrap();
        assert_eq!(session.phase(), PuzzlePhase::InProgress);
        assert_eq!(session.board().black_count(), DEFAULT_SEED_COUNT);
        assert_eq!(session.remaining_seconds(), 180);
        assert_eq!(session.moves(), 0);

        let session = Session::new(4, 12345).unwrap();
        assert_eq!(session.remaining_seconds(), 240);
    }

    #[test]
    fn test_same_seed_reproduces_board() {
        let a = Session::new(4, 99).unwrap();
        let b = Session::new(4, 99).unwrap();
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_toggle_to_solved() {
        let mut session = Session::from_board(one_move_from_solved(), 0);
        let events = session.toggle(1, 1).unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], PuzzleEvent::CellsFlipped(c) if c.len() == 5));
        assert_eq!(events[1], PuzzleEvent::Solved);
        assert_eq!(session.phase(), PuzzlePhase::Solved);
        assert!(session.is_solved());
        assert_eq!(session.moves(), 1);
    }

    #[test]
    fn test_toggle_ignored_after_solved() {
        let mut session = Session::from_board(one_move_from_solved(), 0);
        session.toggle(1, 1).unwrap();
        let before = session.board().clone();

        assert!(session.toggle(0, 0).unwrap().is_empty());
        assert_eq!(session.board(), &before);
        assert_eq!(session.moves(), 1);
        assert!(session.advance(10.0).is_empty());
        assert_eq!(session.remaining_seconds(), 180);
    }

    #[test]
    fn test_toggle_out_of_bounds_is_error_in_any_phase() {
        let mut session = Session::new(3, 5).unwrap();
        assert!(matches!(
            session.toggle(0, 3),
            Err(EngineError::OutOfBounds { .. })
        ));
        assert_eq!(session.moves(), 0);

        let mut solved = Session::from_board(one_move_from_solved(), 0);
        solved.toggle(1, 1).unwrap();
        assert!(solved.toggle(9, 9).is_err());
    }

    #[test]
    fn test_countdown_times_out() {
        let mut session = Session::new(3, 1).unwrap();
        assert!(session.advance(179.5).is_empty());
        assert_eq!(session.remaining_seconds(), 1);

        let events = session.advance(0.5);
        assert_eq!(events, vec![PuzzleEvent::TimedOut]);
        assert_eq!(session.phase(), PuzzlePhase::TimedOut);
        assert_eq!(session.remaining_seconds(), 0);

        assert!(session.toggle(1, 1).unwrap().is_empty());
        assert!(session.tick_second().is_none());
    }

    #[test]
    fn test_advance_ignores_bad_dt() {
        let mut session = Session::new(3, 1).unwrap();
        assert!(session.advance(-5.0).is_empty());
        assert!(session.advance(f32::NAN).is_empty());
        assert!(session.advance(f32::INFINITY).is_empty());
        assert_eq!(session.remaining_seconds(), 180);
    }

    #[test]
    fn test_tick_second() {
        let mut session = Session::new(3, 1).unwrap();
        assert!(session.tick_second().is_none());
        assert_eq!(session.remaining_seconds(), 179);
    }

    #[test]
    fn test_restart_changes_grid() {
        let mut session = Session::from_board(one_move_from_solved(), 0);
        session.toggle(1, 1).unwrap();
        session.restart(4, 77).unwrap();
        assert_eq!(session.phase(), PuzzlePhase::InProgress);
        assert_eq!(session.board().size(), 4);
        assert_eq!(session.seed(), 77);
        assert_eq!(session.moves(), 0);
        assert_eq!(session.remaining_seconds(), 240);

        assert!(session.restart(0, 1).is_err());
    }

    #[test]
    fn test_single_cell_session_starts_solved() {
        let session = Session::with_seed_count(1, 1, 3).unwrap();
        assert_eq!(session.phase(), PuzzlePhase::Solved);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut session = Session::new(4, 2024).unwrap();
        session.toggle(2, 2).unwrap();
        session.advance(3.25);

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.board(), session.board());
        assert_eq!(restored.moves(), 1);
        assert_eq!(restored.remaining_seconds(), 237);
        assert_eq!(restored.phase(), PuzzlePhase::InProgress);
        assert_eq!(restored.seed(), 2024);
    }

    #[test]
    fn test_snapshot_with_malformed_board_is_rejected() {
        let short = r#"{"seed":0,"board":{"size":3,"cells":["Black"]},
            "phase":"InProgress","remaining_seconds":180,"moves":0}"#;
        assert!(serde_json::from_str::<Session>(short).is_err());

        let empty = r#"{"seed":0,"board":{"size":0,"cells":[]},
            "phase":"InProgress","remaining_seconds":0,"moves":0}"#;
        assert!(serde_json::from_str::<Session>(empty).is_err());

        let ok = r#"{"seed":0,"board":{"size":1,"cells":["White"]},
            "phase":"InProgress","remaining_seconds":60,"moves":0}"#;
        let mut session: Session = serde_json::from_str(ok).unwrap();
        assert_eq!(session.toggle(0, 0).unwrap().last(), Some(&PuzzleEvent::Solved));
    }
}
