pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Requested board dimensions are outside the supported range.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display(
    "board size {width}x{height} out of range (width {min_width}..={max}, height {min_height}..={max})",
    min_width = Board::MIN_WIDTH,
    min_height = Board::MIN_HEIGHT,
    max = Board::MAX_SIZE
)]
pub struct BoardSizeError {
    pub width: i32,
    pub height: i32,
}

/// A piece was constructed with a rotation index its shape does not have.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("rotation index {rotation} out of range for {shape:?} ({state_count} states)")]
pub struct RotationOutOfRangeError {
    pub shape: ShapeKind,
    pub rotation: usize,
    pub state_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardParseError {
    #[display("board text is empty")]
    Empty,
    #[display("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("unexpected character {found:?} at row {row}, column {column}")]
    InvalidCell {
        row: usize,
        column: usize,
        found: char,
    },
    #[display("{_0}")]
    Size(BoardSizeError),
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: expected 32 hex digits")]
pub struct ShapeSeedParseError {
    pub input: String,
}
