use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::piece::Position;

/// One rotation configuration of a shape: four cell offsets relative to the
/// piece offset.
pub type ShapeState = [Position; 4];

/// Enum representing the type of a falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// I-piece.
    I = 0,
    /// O-piece (square). Has a single rotation state.
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of shape types (7).
    pub const LEN: usize = 7;

    /// All shape types in declaration order.
    pub const ALL: [Self; Self::LEN] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::T,
    ];

    /// Returns the ordered rotation states of this shape.
    #[must_use]
    pub fn states(self) -> &'static [ShapeState] {
        ShapeCatalog::states_for(self)
    }

    /// Returns how many distinct rotation states this shape has.
    #[must_use]
    pub fn state_count(self) -> usize {
        self.states().len()
    }

    /// Returns the single character representation of this shape kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.as_char(), 'I');
    /// assert_eq!(ShapeKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::O => 'O',
            ShapeKind::S => 'S',
            ShapeKind::Z => 'Z',
            ShapeKind::J => 'J',
            ShapeKind::L => 'L',
            ShapeKind::T => 'T',
        }
    }

    /// Parses a shape kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_char('O'), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(ShapeKind::I),
            'O' => Some(ShapeKind::O),
            'S' => Some(ShapeKind::S),
            'Z' => Some(ShapeKind::Z),
            'J' => Some(ShapeKind::J),
            'L' => Some(ShapeKind::L),
            'T' => Some(ShapeKind::T),
            _ => None,
        }
    }
}

/// Static lookup of the rotation states of every shape.
///
/// Shapes are a closed set, so lookups never fail. Rotation indices are
/// reduced modulo the state count before indexing.
///
/// # Example
///
/// ```
/// use blockfall_engine::{ShapeCatalog, ShapeKind};
///
/// assert_eq!(ShapeCatalog::states_for(ShapeKind::L).len(), 4);
/// assert_eq!(ShapeCatalog::states_for(ShapeKind::O).len(), 1);
/// assert_eq!(
///     ShapeCatalog::state_at(ShapeKind::T, 5),
///     ShapeCatalog::state_at(ShapeKind::T, 1),
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ShapeCatalog;

impl ShapeCatalog {
    /// Returns the clockwise rotation states of `kind`.
    #[must_use]
    pub fn states_for(kind: ShapeKind) -> &'static [ShapeState] {
        match kind {
            ShapeKind::I => &I_STATES,
            ShapeKind::O => &O_STATES,
            ShapeKind::S => &S_STATES,
            ShapeKind::Z => &Z_STATES,
            ShapeKind::J => &J_STATES,
            ShapeKind::L => &L_STATES,
            ShapeKind::T => &T_STATES,
        }
    }

    /// Returns the state for `rotation`, taken modulo the number of states.
    #[must_use]
    pub fn state_at(kind: ShapeKind, rotation: usize) -> &'static ShapeState {
        let states = Self::states_for(kind);
        &states[rotation % states.len()]
    }
}

/// Generates all 4 rotation states by turning the spawn state a quarter turn
/// clockwise around the pivot cell `(0, 1)`.
///
/// Y grows downward, so a clockwise turn maps a pivot-relative `(x, y)` to
/// `(-y, x)`.
const fn state_rotations(spawn: [(i32, i32); 4]) -> [ShapeState; 4] {
    const PIVOT_X: i32 = 0;
    const PIVOT_Y: i32 = 1;

    let mut states = [[Position::new(0, 0); 4]; 4];
    let mut i = 0;
    while i < 4 {
        states[0][i] = Position::new(spawn[i].0, spawn[i].1);
        i += 1;
    }
    let mut r = 1;
    while r < 4 {
        let mut i = 0;
        while i < 4 {
            let prev = states[r - 1][i];
            let dx = prev.x - PIVOT_X;
            let dy = prev.y - PIVOT_Y;
            states[r][i] = Position::new(PIVOT_X - dy, PIVOT_Y + dx);
            i += 1;
        }
        r += 1;
    }
    states
}

const I_STATES: [ShapeState; 4] = state_rotations([(-1, 1), (0, 1), (1, 1), (2, 1)]);
const O_STATES: [ShapeState; 1] = [[
    Position::new(0, 0),
    Position::new(1, 0),
    Position::new(0, 1),
    Position::new(1, 1),
]];
const S_STATES: [ShapeState; 4] = state_rotations([(0, 0), (1, 0), (-1, 1), (0, 1)]);
const Z_STATES: [ShapeState; 4] = state_rotations([(-1, 0), (0, 0), (0, 1), (1, 1)]);
const J_STATES: [ShapeState; 4] = state_rotations([(0, 0), (0, 1), (0, 2), (-1, 2)]);
const L_STATES: [ShapeState; 4] = state_rotations([(0, 0), (0, 1), (0, 2), (1, 2)]);
const T_STATES: [ShapeState; 4] = state_rotations([(0, 0), (-1, 1), (0, 1), (1, 1)]);
