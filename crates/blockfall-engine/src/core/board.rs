use std::{fmt, str::FromStr};

use crate::{BoardParseError, BoardSizeError};

use super::piece::{Piece, Position};

/// Fixed-size occupancy grid of landed cells.
///
/// Cells are stored row-major: cell `(x, y)` lives at index `y * width + x`.
/// Only rows `0..height` exist; piece pixels above row 0 are never stored.
///
/// # Text form
///
/// `Display` and `FromStr` use one line per row, `#` for an occupied cell and
/// `.` for an empty one.
///
/// ```
/// use blockfall_engine::Board;
///
/// let mut board: Board = "....\n....\n....\n####\n#.##".parse().unwrap();
/// assert!(board.is_occupied(0, 4));
/// assert!(!board.is_occupied(1, 4));
///
/// assert_eq!(board.clear_full_rows(), 1);
/// assert_eq!(board.to_string(), "....\n....\n....\n....\n#.##");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl Board {
    /// Smallest width that fits every rotation state of every shape.
    pub const MIN_WIDTH: i32 = 4;
    /// Smallest height at which a piece resting on the floor lies wholly below row 0.
    pub const MIN_HEIGHT: i32 = 5;
    /// Largest width or height accepted by [`Board::new`].
    pub const MAX_SIZE: i32 = 256;

    /// Creates an empty `width` x `height` board.
    pub fn new(width: i32, height: i32) -> Result<Self, BoardSizeError> {
        if !(Self::MIN_WIDTH..=Self::MAX_SIZE).contains(&width)
            || !(Self::MIN_HEIGHT..=Self::MAX_SIZE).contains(&height)
        {
            return Err(BoardSizeError { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![false; to_usize(width) * to_usize(height)],
        })
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        Some(to_usize(y) * to_usize(self.width) + to_usize(x))
    }

    /// Returns whether the cell at `(x, y)` holds a landed block.
    ///
    /// Coordinates outside the grid (above row 0, below the floor, or past
    /// either side) report `false`; horizontal limits are enforced by the
    /// engine before the board is queried.
    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    /// Returns whether any visible pixel of `piece` lands on an occupied cell.
    #[must_use]
    pub fn overlaps(&self, piece: &Piece) -> bool {
        piece
            .visible_pixels()
            .iter()
            .any(|p| self.is_occupied(p.x, p.y))
    }

    /// Marks every visible pixel of a landed piece as occupied.
    ///
    /// Pixels above row 0 are dropped.
    pub fn fix(&mut self, piece: &Piece) {
        for p in piece.visible_pixels() {
            if let Some(i) = self.index(p.x, p.y) {
                self.cells[i] = true;
            }
        }
    }

    /// Returns `true` if every cell of row `y` is occupied.
    ///
    /// Rows outside the grid are never full.
    #[must_use]
    pub fn is_row_full(&self, y: i32) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(|&c| c))
    }

    fn row(&self, y: i32) -> Option<&[bool]> {
        let start = self.index(0, y)?;
        Some(&self.cells[start..][..to_usize(self.width)])
    }

    /// Removes every full row and compacts the rows above it downward.
    ///
    /// Rows are scanned bottom to top with a write cursor; a retained row is
    /// copied to the cursor, a full row is skipped. Rows left above the cursor
    /// are emptied.
    ///
    /// Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = to_usize(self.width);
        let mut tail = to_usize(self.height);
        for y in (0..self.height).rev() {
            if self.is_row_full(y) {
                continue;
            }
            tail -= 1;
            let start = to_usize(y) * width;
            if tail * width != start {
                self.cells.copy_within(start..start + width, tail * width);
            }
        }
        self.cells[..tail * width].fill(false);
        tail
    }

    /// Positions of every occupied cell, in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let width = to_usize(self.width);
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &occupied)| occupied)
            .map(move |(i, _)| Position::new(to_i32(i % width), to_i32(i / width)))
    }

    /// Returns the number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(to_usize(self.width)).enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for &occupied in row {
                f.write_str(if occupied { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let expected = rows.first().ok_or(BoardParseError::Empty)?.chars().count();

        let mut cells = Vec::with_capacity(expected * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(BoardParseError::RaggedRow {
                    row,
                    expected,
                    found,
                });
            }
            for (column, c) in line.chars().enumerate() {
                match c {
                    '#' => cells.push(true),
                    '.' => cells.push(false),
                    found => {
                        return Err(BoardParseError::InvalidCell { row, column, found });
                    }
                }
            }
        }

        let width = i32::try_from(expected).unwrap_or(i32::MAX);
        let height = i32::try_from(rows.len()).unwrap_or(i32::MAX);
        let mut board = Board::new(width, height).map_err(BoardParseError::Size)?;
        board.cells = cells;
        Ok(board)
    }
}

#[expect(clippy::cast_sign_loss)]
fn to_usize(v: i32) -> usize {
    debug_assert!(v >= 0);
    v as usize
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn to_i32(v: usize) -> i32 {
    v as i32
}

#[cfg(test)]
mod tests {
    use crate::{Color, ShapeKind};

    use super::*;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    fn piece(shape: ShapeKind, x: i32, y: i32) -> Piece {
        Piece::new(shape, 0, Position::new(x, y), Color::PLACEHOLDER).unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(10, 20).unwrap();
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 20);
        assert_eq!(board.cells.len(), 200);
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_new_rejects_bad_sizes() {
        assert!(Board::new(3, 20).is_err());
        assert!(Board::new(10, 4).is_err());
        assert!(Board::new(-1, 20).is_err());
        assert!(Board::new(10, Board::MAX_SIZE + 1).is_err());
        assert!(Board::new(Board::MIN_WIDTH, Board::MIN_HEIGHT).is_ok());

        let err = Board::new(2, 20).unwrap_err();
        assert_eq!(
            err.to_string(),
            "board size 2x20 out of range (width 4..=256, height 5..=256)"
        );
    }

    #[test]
    fn test_is_occupied_outside_grid_is_false() {
        let board = board("####\n####\n####\n####\n####");
        assert!(board.is_occupied(0, 0));
        assert!(board.is_occupied(3, 4));
        assert!(!board.is_occupied(0, -1));
        assert!(!board.is_occupied(-1, 0));
        assert!(!board.is_occupied(4, 0));
        assert!(!board.is_occupied(0, 5));
    }

    #[test]
    fn test_overlaps_ignores_pixels_above_grid() {
        let board = board("####\n....\n....\n....\n....");
        // L at (1, -2): cells (1,-2) (1,-1) (1,0) (2,0)
        assert!(board.overlaps(&piece(ShapeKind::L, 1, -2)));
        // L at (1, -3): lowest cells at row -1
        assert!(!board.overlaps(&piece(ShapeKind::L, 1, -3)));
    }

    #[test]
    fn test_fix_drops_pixels_above_grid() {
        let mut board = Board::new(4, 5).unwrap();
        board.fix(&piece(ShapeKind::L, 1, -2));
        assert_eq!(board.to_string(), ".##.\n....\n....\n....\n....");
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_clear_full_rows_no_full_rows_is_noop() {
        let mut board = board("....\n#...\n##.#\n.###\n###.");
        let before = board.clone();
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_full_rows_single() {
        let mut board = board("#...\n.#..\n####\n#.#.\n.###");
        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.to_string(), "....\n#...\n.#..\n#.#.\n.###");
    }

    #[test]
    fn test_clear_full_rows_non_adjacent() {
        let mut board = board("..#.\n####\n.#..\n####\n#..#");
        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.to_string(), "....\n....\n..#.\n.#..\n#..#");
    }

    #[test]
    fn test_clear_full_rows_all_full() {
        let mut board = board("####\n####\n####\n####\n####");
        assert_eq!(board.clear_full_rows(), 5);
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_occupied_cells_row_major() {
        let board = board(".#..\n....\n#..#\n....\n....");
        let cells: Vec<_> = board.occupied_cells().collect();
        assert_eq!(
            cells,
            [(1, 0), (0, 2), (3, 2)].map(|(x, y)| Position::new(x, y))
        );
    }

    #[test]
    fn test_is_row_full() {
        let board = board("....\n####\n#.##\n....\n####");
        let full: Vec<_> = (0..5).filter(|&y| board.is_row_full(y)).collect();
        assert_eq!(full, [1, 4]);
        assert!(!board.is_row_full(-1));
        assert!(!board.is_row_full(5));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Board>(), Err(BoardParseError::Empty));
        assert!(matches!(
            "....\n...\n....\n....\n....".parse::<Board>(),
            Err(BoardParseError::RaggedRow { row: 1, .. })
        ));
        assert!(matches!(
            "....\n..x.\n....\n....\n....".parse::<Board>(),
            Err(BoardParseError::InvalidCell {
                row: 1,
                column: 2,
                found: 'x'
            })
        ));
        assert!(matches!(
            "...\n...\n...\n...\n...".parse::<Board>(),
            Err(BoardParseError::Size(_))
        ));
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let text = "#..#\n.##.\n....\n####\n#...";
        assert_eq!(board(text).to_string(), text);
    }

    #[test]
    fn test_clear_resets_board() {
        let mut board = board("#..#\n.##.\n....\n####\n#...");
        board.clear();
        assert_eq!(board, Board::new(4, 5).unwrap());
    }
}
