use crate::{
    BoardSizeError,
    core::{Board, Color, Piece},
};

use super::{
    game_stats::GameStats,
    render_state::{PieceCell, RenderState, Terminal},
    shape_generator::{RandomShapeGenerator, ShapeGenerator, ShapeSeed},
};

/// Reason recorded when a landing piece reaches the top row.
pub const GAME_OVER_REASON: &str = "Game over";

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum EngineState {
    /// A piece is falling and input is accepted.
    Running,
    /// Terminal. `update()` leaves everything untouched from here on.
    GameOver {
        reason: String,
    },
}

/// What a single [`GameEngine::update`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The piece moved down one row.
    Fell,
    /// The piece was fixed into the board and a new one spawned.
    Landed { cleared_rows: usize },
    /// The piece came to rest touching the top row; the game is over.
    GameOver,
    /// The game was already over; nothing changed.
    Inert,
}

/// Orchestrates one game session: the falling piece, the board and the score.
///
/// The engine does not know about time. A driver calls [`update`](Self::update)
/// once per logical tick and forwards player input to
/// [`move_left`](Self::move_left), [`move_right`](Self::move_right) and
/// [`rotate`](Self::rotate). Rejected input leaves the state unchanged.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameEngine, ShapeKind, TickOutcome};
///
/// let mut engine = GameEngine::with_generator(10, 20, || ShapeKind::O).unwrap();
/// engine.move_left();
/// engine.rotate();
///
/// let mut landed = false;
/// while !landed {
///     landed = engine.update().is_landed();
/// }
/// assert_eq!(engine.board().occupied_count(), 4);
/// assert!(engine.state().is_running());
/// ```
#[derive(Debug, Clone)]
pub struct GameEngine<G = RandomShapeGenerator> {
    board: Board,
    piece: Piece,
    stats: GameStats,
    state: EngineState,
    speed: u32,
    generator: G,
}

impl GameEngine {
    /// Creates an engine with an empty `width` x `height` board and a randomly
    /// seeded shape generator.
    pub fn new(width: i32, height: i32) -> Result<Self, BoardSizeError> {
        Self::with_generator(width, height, RandomShapeGenerator::new())
    }

    /// Like [`Self::new`], but the shape sequence is fixed by `seed`.
    pub fn with_seed(width: i32, height: i32, seed: ShapeSeed) -> Result<Self, BoardSizeError> {
        Self::with_generator(width, height, RandomShapeGenerator::with_seed(seed))
    }
}

impl<G> GameEngine<G>
where
    G: ShapeGenerator,
{
    /// Speed multiplier a fresh engine reports.
    pub const NORMAL_SPEED: u32 = 1;

    /// Creates an engine with an empty board that takes its shapes from `generator`.
    pub fn with_generator(width: i32, height: i32, generator: G) -> Result<Self, BoardSizeError> {
        Ok(Self::from_board(Board::new(width, height)?, generator))
    }

    /// Starts a session on a pre-filled board.
    pub fn from_board(board: Board, mut generator: G) -> Self {
        let piece = Piece::spawn(generator.next_shape(), board.width(), Color::PLACEHOLDER);
        Self {
            board,
            piece,
            stats: GameStats::new(),
            state: EngineState::Running,
            speed: Self::NORMAL_SPEED,
            generator,
        }
    }

    /// Reinitializes the session: empty board, zeroed stats, fresh piece.
    pub fn restart(&mut self) {
        self.board.clear();
        self.stats = GameStats::new();
        self.state = EngineState::Running;
        self.speed = Self::NORMAL_SPEED;
        self.piece = self.spawn();
    }

    fn spawn(&mut self) -> Piece {
        Piece::spawn(
            self.generator.next_shape(),
            self.board.width(),
            Color::PLACEHOLDER,
        )
    }

    /// Returns the landed cells.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the falling piece.
    #[must_use]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// Returns the counters of the current session.
    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Returns `true` once the session has ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Speed multiplier chosen by the driver. Never read by the engine itself.
    #[must_use]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Sets the speed multiplier, clamped to at least 1.
    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.max(1);
    }

    /// Advances the game by one logical tick.
    ///
    /// 1. A piece resting on the floor or on landed cells while reaching row 0
    ///    ends the game; board and piece are left as they are.
    /// 2. Otherwise a resting piece is fixed, full rows are cleared and a new
    ///    piece spawns.
    /// 3. Otherwise the piece moves down one row.
    pub fn update(&mut self) -> TickOutcome {
        if self.state.is_game_over() {
            return TickOutcome::Inert;
        }

        let bounds = self.piece.bounds();
        let touched_ground = bounds.max.y + 1 >= self.board.height();
        let touched_existing = self.board.overlaps(&self.piece.down());

        if bounds.min.y <= 0 && touched_existing {
            self.state = EngineState::GameOver {
                reason: GAME_OVER_REASON.to_owned(),
            };
            return TickOutcome::GameOver;
        }

        if touched_ground || touched_existing {
            self.board.fix(&self.piece);
            let cleared_rows = self.board.clear_full_rows();
            self.stats.complete_piece_drop(cleared_rows);
            self.piece = self.spawn();
            return TickOutcome::Landed { cleared_rows };
        }

        self.piece = self.piece.down();
        TickOutcome::Fell
    }

    /// Shifts the piece one column left. Returns whether the piece moved.
    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1)
    }

    /// Shifts the piece one column right. Returns whether the piece moved.
    pub fn move_right(&mut self) -> bool {
        self.try_shift(1)
    }

    fn try_shift(&mut self, dx: i32) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        let candidate = self.piece.translated(dx, 0);
        if self.board.overlaps(&candidate) {
            return false;
        }
        self.commit(self.make_inside(candidate))
    }

    /// Turns the piece to its next rotation state. Returns whether it changed.
    ///
    /// A rotation pushing the piece past a side wall is shifted back inside;
    /// one that would reach below the floor is rejected.
    pub fn rotate(&mut self) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        let candidate = self.piece.rotated();
        if self.board.overlaps(&candidate) {
            return false;
        }
        let candidate = self.make_inside(candidate);
        if candidate.bounds().max.y >= self.board.height() {
            return false;
        }
        self.commit(candidate)
    }

    fn commit(&mut self, candidate: Piece) -> bool {
        // A wall shift can push the piece onto landed cells.
        if candidate == self.piece || self.board.overlaps(&candidate) {
            return false;
        }
        self.piece = candidate;
        true
    }

    /// Shifts `piece` horizontally so that every pixel lies in `0..width`.
    ///
    /// The vertical offset is never changed.
    #[must_use]
    pub fn make_inside(&self, piece: Piece) -> Piece {
        let bounds = piece.bounds();
        if bounds.min.x < 0 {
            return piece.translated(-bounds.min.x, 0);
        }
        let width = self.board.width();
        if bounds.max.x >= width {
            return piece.translated(width - 1 - bounds.max.x, 0);
        }
        piece
    }

    /// Takes a snapshot of everything a renderer needs.
    #[must_use]
    pub fn render_state(&self) -> RenderState {
        let color = self.piece.color();
        let reason = match &self.state {
            EngineState::Running => None,
            EngineState::GameOver { reason } => Some(reason.clone()),
        };
        RenderState {
            piece_cells: self
                .piece
                .pixels()
                .iter()
                .map(|p| PieceCell {
                    x: p.x,
                    y: p.y,
                    color,
                })
                .collect(),
            board_cells: self.board.occupied_cells().collect(),
            terminal: Terminal {
                is_over: reason.is_some(),
                reason,
            },
            score: self.stats.score(),
        }
    }
}
