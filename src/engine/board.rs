//! Board state and the toggle rule
//!
//! The board is a plain row-major array of cell colors. The presentation
//! layer keeps its own coordinate -> visual mapping and looks cells up
//! after every state change.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Orthogonal neighbour offsets: up, down, left, right
const NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Color of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    Black,
    #[default]
    White,
}

impl Cell {
    /// The opposite color
    pub fn flipped(self) -> Self {
        match self {
            Cell::Black => Cell::White,
            Cell::White => Cell::Black,
        }
    }

    pub fn is_black(self) -> bool {
        self == Cell::Black
    }
}

/// A (row, col) position on the board, 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// N x N grid of cells, always fully populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

/// Unchecked board as stored in a snapshot
#[derive(Deserialize)]
struct RawBoard {
    size: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawBoard> for Board {
    type Error = EngineError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let mut board = Self::blank(raw.size)?;
        if raw.cells.len() != board.cells.len() {
            return Err(EngineError::invalid(format!(
                "{} cells stored for a {}x{} grid",
                raw.cells.len(),
                raw.size,
                raw.size
            )));
        }
        board.cells = raw.cells;
        Ok(board)
    }
}

impl Board {
    /// All-white board, checking the dimension
    fn blank(size: usize) -> Result<Self, EngineError> {
        if size == 0 {
            return Err(EngineError::invalid("grid size must be at least 1"));
        }
        let len = size
            .checked_mul(size)
            .ok_or_else(|| EngineError::invalid(format!("grid size {size} is too large")))?;
        Ok(Self {
            size,
            cells: vec![Cell::White; len],
        })
    }

    /// Create a board with `seed_count` black cells picked uniformly at
    /// random without replacement; every other cell is white.
    pub fn initialize<R: Rng + ?Sized>(
        size: usize,
        seed_count: usize,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let mut board = Self::blank(size)?;
        let len = board.cells.len();
        if seed_count > len {
            return Err(EngineError::invalid(format!(
                "seed count {seed_count} exceeds the {len} cells of a {size}x{size} grid"
            )));
        }

        for index in rand::seq::index::sample(rng, len, seed_count) {
            board.cells[index] = Cell::Black;
        }

        Ok(board)
    }

    /// Create a board whose black cells are exactly `black` (duplicates collapse)
    pub fn from_black_cells(size: usize, black: &[Coord]) -> Result<Self, EngineError> {
        let mut board = Self::blank(size)?;
        for &coord in black {
            let index = board.index_of(coord.row, coord.col)?;
            board.cells[index] = Cell::Black;
        }
        Ok(board)
    }

    /// Grid dimension N
    pub fn size(&self) -> usize {
        self.size
    }

    /// Color at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, EngineError> {
        self.index_of(row, col).map(|i| self.cells[i])
    }

    /// Number of black cells
    pub fn black_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_black()).count()
    }

    /// Cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (Coord::new(i / size, i % size), cell))
    }

    /// Flip the cell at (row, col) and its in-bounds orthogonal neighbours.
    ///
    /// Returns the changed coordinates: the target first, then up, down,
    /// left, right (missing neighbours are skipped).
    pub fn toggle_at(&mut self, row: usize, col: usize) -> Result<Vec<Coord>, EngineError> {
        let target = self.index_of(row, col)?;
        self.cells[target] = self.cells[target].flipped();

        let mut changed = Vec::with_capacity(1 + NEIGHBOURS.len());
        changed.push(Coord::new(row, col));

        for (dr, dc) in NEIGHBOURS {
            let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
            else {
                continue;
            };
            if r < self.size && c < self.size {
                let i = r * self.size + c;
                self.cells[i] = self.cells[i].flipped();
                changed.push(Coord::new(r, c));
            }
        }

        Ok(changed)
    }

    /// True when every cell is black
    pub fn is_solved(&self) -> bool {
        self.cells.iter().all(|c| c.is_black())
    }

    fn index_of(&self, row: usize, col: usize) -> Result<usize, EngineError> {
        if row >= self.size || col >= self.size {
            return Err(EngineError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        Ok(row * self.size + col)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            for cell in row {
                f.write_str(if cell.is_black() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
