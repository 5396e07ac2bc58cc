/// Precondition failures reported by the puzzle engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Bad grid dimension or seed count at initialization
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
    /// Coordinate outside the current grid
    #[error("cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },
}

impl EngineError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        EngineError::InvalidArgument {
            reason: reason.into(),
        }
    }
}
