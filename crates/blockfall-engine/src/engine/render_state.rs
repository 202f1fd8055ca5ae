use serde::Serialize;

use crate::core::{Color, Position};

/// Snapshot of everything a renderer needs, taken between engine calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderState {
    /// Cells of the falling piece, including any still above row 0.
    pub piece_cells: Vec<PieceCell>,
    /// Occupied board cells in row-major order.
    pub board_cells: Vec<Position>,
    pub terminal: Terminal,
    pub score: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceCell {
    pub x: i32,
    pub y: i32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Terminal {
    pub is_over: bool,
    pub reason: Option<String>,
}
