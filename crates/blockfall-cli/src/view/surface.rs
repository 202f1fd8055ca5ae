use blockfall_engine::{Color, Position, RenderState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color as TermColor, Style, Stylize},
    text::Line,
    widgets::{Clear, Widget},
};

/// Color of landed cells.
pub const BOARD_COLOR: Color = Color(0x0080_8080);

/// Drawing target for one frame of the game.
pub trait Surface {
    /// Erases everything drawn so far.
    fn clear(&mut self);

    /// Fills the given board cells with `color`. Cells outside the board are skipped.
    fn draw_cells(&mut self, cells: &[Position], color: Color);

    /// Shows `text` over the board.
    fn draw_banner(&mut self, text: &str);
}

/// Draws a complete frame from `state`.
pub fn render(state: &RenderState, surface: &mut impl Surface) {
    surface.clear();
    surface.draw_cells(&state.board_cells, BOARD_COLOR);
    for cell in &state.piece_cells {
        surface.draw_cells(&[Position::new(cell.x, cell.y)], cell.color);
    }
    if let Some(reason) = &state.terminal.reason {
        surface.draw_banner(reason);
    }
}

/// [`Surface`] over a region of a ratatui [`Buffer`], two columns per cell.
#[derive(Debug)]
pub struct BufferSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    columns: i32,
    rows: i32,
}

impl<'a> BufferSurface<'a> {
    pub const CELL_WIDTH: u16 = 2;
    const CELL_SYMBOL: &'static str = "██";

    pub fn new(buf: &'a mut Buffer, area: Rect, columns: i32, rows: i32) -> Self {
        Self {
            buf,
            area,
            columns,
            rows,
        }
    }

    fn cell_origin(&self, p: Position) -> Option<(u16, u16)> {
        if p.x < 0 || p.x >= self.columns || p.y < 0 || p.y >= self.rows {
            return None;
        }
        let dx = u16::try_from(p.x).ok()?.checked_mul(Self::CELL_WIDTH)?;
        let dy = u16::try_from(p.y).ok()?;
        if dx + Self::CELL_WIDTH > self.area.width || dy >= self.area.height {
            return None;
        }
        Some((self.area.x + dx, self.area.y + dy))
    }
}

impl Surface for BufferSurface<'_> {
    fn clear(&mut self) {
        Clear.render(self.area, self.buf);
    }

    fn draw_cells(&mut self, cells: &[Position], color: Color) {
        let style = Style::new().fg(TermColor::from_u32(color.0));
        for &p in cells {
            if let Some((x, y)) = self.cell_origin(p) {
                self.buf.set_string(x, y, Self::CELL_SYMBOL, style);
            }
        }
    }

    fn draw_banner(&mut self, text: &str) {
        if self.area.is_empty() {
            return;
        }
        let row = Rect {
            y: self.area.y + self.area.height / 2,
            height: 1,
            ..self.area
        };
        Line::from(format!(" {text} "))
            .bold()
            .reversed()
            .centered()
            .render(row, self.buf);
    }
}
