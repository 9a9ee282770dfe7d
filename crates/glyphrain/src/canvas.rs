//! Drawing the rain into a ratatui buffer.

use glyphrain_core::Rgb;
use glyphrain_engine::{Glyph, GlyphCanvas, RainView};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::Widget,
};

/// A [`GlyphCanvas`] over a ratatui buffer where one cell is one symbol.
///
/// Pixel positions snap to the nearest cell. Terminals cannot blend, so a
/// glyph's alpha is baked into its color against the background.
pub struct TerminalCanvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    cell_size: f32,
    background: Rgb,
}

impl<'a> TerminalCanvas<'a> {
    /// Canvas over `area` of `buf`, with cells `cell_size` pixels square.
    pub fn new(buf: &'a mut Buffer, area: Rect, cell_size: f32, background: Rgb) -> Self {
        Self {
            buf,
            area,
            cell_size,
            background,
        }
    }

    /// Cell under a glyph whose cell spans `x..x + cell` and `y - cell..y`.
    fn cell_at(&self, x: f32, y: f32) -> Option<Position> {
        let col = (x / self.cell_size).round();
        let row = ((y - self.cell_size) / self.cell_size).round();
        if col < 0.0
            || row < 0.0
            || col >= f32::from(self.area.width)
            || row >= f32::from(self.area.height)
        {
            return None;
        }
        let x = self.area.x + col as u16;
        let y = self.area.y + row as u16;
        Some(Position::new(x, y))
    }
}

impl GlyphCanvas for TerminalCanvas<'_> {
    fn measure(&self, symbol: char) -> f32 {
        let mut utf8 = [0u8; 4];
        let width = Span::raw(&*symbol.encode_utf8(&mut utf8)).width();
        width as f32 * self.cell_size
    }

    fn draw_glyph(&mut self, glyph: &Glyph) {
        let Some(position) = self.cell_at(glyph.x, glyph.y) else {
            return;
        };
        let color = glyph.color.over(self.background, glyph.alpha);
        let mut style = Style::new().fg(color.into());
        if glyph.alpha == u8::MAX {
            style = style.add_modifier(Modifier::BOLD);
        }
        if let Some(cell) = self.buf.cell_mut(position) {
            cell.set_char(glyph.symbol).set_style(style);
        }
    }
}

/// Widget that paints a [`RainView`] over its whole area.
pub struct RainLayer<'a, R> {
    view: &'a RainView<R>,
}

impl<'a, R> RainLayer<'a, R> {
    /// Widget drawing `view`.
    pub fn new(view: &'a RainView<R>) -> Self {
        Self { view }
    }
}

impl<R> Widget for RainLayer<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = *self.view.palette();
        buf.set_style(area, Style::new().bg(palette.background.into()));
        let cell_size = self.view.engine().geometry().symbol_size;
        let mut canvas = TerminalCanvas::new(buf, area, cell_size, palette.background);
        self.view.draw(&mut canvas);
    }
}
