use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::RotationOutOfRangeError;

use super::shape::{ShapeCatalog, ShapeKind};

/// Integer grid coordinate.
///
/// - X increases rightward (columns)
/// - Y increases downward (rows)
/// - Row 0 is the topmost visible row; negative rows lie above the grid
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box of a piece's pixels, both corners inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: Position,
    pub max: Position,
}

/// Opaque color attribute carried by a piece.
///
/// The engine never looks inside; renderers decide what the value means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Color(pub u32);

impl Color {
    /// Color assigned to every newly spawned piece.
    pub const PLACEHOLDER: Self = Self(0x00ff_d700);
}

/// A falling piece: shape, rotation state, grid offset and color.
///
/// Pieces are immutable values. Movement and rotation return new `Piece`s.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Color, Piece, Position, ShapeKind};
///
/// let piece = Piece::new(ShapeKind::L, 0, Position::new(4, 0), Color::PLACEHOLDER).unwrap();
/// let moved = piece.translated(-1, 0).down();
/// assert_eq!(moved.offset(), Position::new(3, 1));
///
/// let spun = piece.rotated().rotated().rotated().rotated();
/// assert_eq!(spun.pixels(), piece.pixels());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    offset: Position,
    shape: ShapeKind,
    rotation: usize,
    color: Color,
}

impl Piece {
    /// Creates a new piece, checking `rotation` against the shape's state count.
    pub fn new(
        shape: ShapeKind,
        rotation: usize,
        offset: Position,
        color: Color,
    ) -> Result<Self, RotationOutOfRangeError> {
        let state_count = shape.state_count();
        if rotation >= state_count {
            return Err(RotationOutOfRangeError {
                shape,
                rotation,
                state_count,
            });
        }
        Ok(Self {
            offset,
            shape,
            rotation,
            color,
        })
    }

    /// Creates a piece in its default rotation at the spawn point of a board
    /// `board_width` cells wide.
    ///
    /// The piece is horizontally centered and its lowest row sits at `y = -1`,
    /// just above the visible grid.
    #[must_use]
    pub fn spawn(shape: ShapeKind, board_width: i32, color: Color) -> Self {
        let lowest = ShapeCatalog::state_at(shape, 0)
            .iter()
            .map(|p| p.y)
            .max()
            .unwrap_or(0);
        Self {
            offset: Position::new((board_width - 1) / 2, -1 - lowest),
            shape,
            rotation: 0,
            color,
        }
    }

    #[must_use]
    pub fn offset(&self) -> Position {
        self.offset
    }

    #[must_use]
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Absolute cell positions: the current state's offsets shifted by the piece offset.
    #[must_use]
    pub fn pixels(&self) -> [Position; 4] {
        let state = *ShapeCatalog::state_at(self.shape, self.rotation);
        state.map(|p| Position::new(p.x + self.offset.x, p.y + self.offset.y))
    }

    /// Pixels that lie inside or below row 0 (`y >= 0`).
    #[must_use]
    pub fn visible_pixels(&self) -> ArrayVec<Position, 4> {
        self.pixels().into_iter().filter(|p| p.y >= 0).collect()
    }

    /// Returns a copy moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            offset: Position::new(self.offset.x + dx, self.offset.y + dy),
            ..*self
        }
    }

    /// Returns a copy moved one row down.
    #[must_use]
    pub fn down(&self) -> Self {
        self.translated(0, 1)
    }

    /// Returns a copy turned to the next clockwise rotation state, wrapping around.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % self.shape.state_count(),
            ..*self
        }
    }

    /// Returns the inclusive bounding box of [`Self::pixels`].
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let pixels = self.pixels();
        let mut bounds = Bounds {
            min: pixels[0],
            max: pixels[0],
        };
        for p in &pixels[1..] {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        bounds
    }
}
