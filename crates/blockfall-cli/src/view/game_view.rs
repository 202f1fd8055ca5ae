use blockfall_engine::{RenderState, ShapeKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::{Block, Widget},
};

use super::{BufferSurface, render};

/// Bordered board with the score in the title.
///
/// When a falling shape is set, its letter is shown next to the name.
#[derive(Debug)]
pub struct GameView<'a> {
    state: &'a RenderState,
    shape: Option<ShapeKind>,
    columns: i32,
    rows: i32,
}

impl<'a> GameView<'a> {
    pub fn new(state: &'a RenderState, columns: i32, rows: i32) -> Self {
        Self {
            state,
            shape: None,
            columns,
            rows,
        }
    }

    #[must_use]
    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Terminal columns needed to show the whole board.
    pub fn width(&self) -> u16 {
        to_u16(self.columns)
            .saturating_mul(BufferSurface::CELL_WIDTH)
            .saturating_add(2)
    }

    /// Terminal rows needed to show the whole board.
    pub fn height(&self) -> u16 {
        to_u16(self.rows).saturating_add(2)
    }
}

impl Widget for &GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Constraint::Length(self.width())])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::vertical([Constraint::Length(self.height())])
            .flex(Flex::Center)
            .areas(area);

        let title = match self.shape {
            Some(shape) => format!(" blockfall [{}] ", shape.as_char()),
            None => " blockfall ".to_owned(),
        };
        let block = Block::bordered()
            .title(Line::from(title).centered())
            .title_bottom(Line::from(format!(" score {} ", self.state.score)).right_aligned());
        let inner = block.inner(area);
        block.render(area, buf);

        let mut surface = BufferSurface::new(buf, inner, self.columns, self.rows);
        render(self.state, &mut surface);
    }
}

fn to_u16(v: i32) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}
