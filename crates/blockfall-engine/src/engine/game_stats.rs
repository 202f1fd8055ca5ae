use serde::Serialize;

/// Counters tracked over one game session.
///
/// The score is a placeholder counter: each landing adds the number of rows it
/// cleared.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(0);
/// stats.complete_piece_drop(2);
///
/// assert_eq!(stats.score(), 2);
/// assert_eq!(stats.completed_pieces(), 2);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    cleared_rows: usize,
}

impl GameStats {
    /// Creates zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            cleared_rows: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns how many pieces have been fixed into the board.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn cleared_rows(&self) -> usize {
        self.cleared_rows
    }

    /// Records one landing that removed `cleared_rows` rows.
    pub const fn complete_piece_drop(&mut self, cleared_rows: usize) {
        self.completed_pieces += 1;
        self.cleared_rows += cleared_rows;
        self.score += cleared_rows;
    }
}
