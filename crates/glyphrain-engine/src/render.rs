//! Turning engine state into glyph draw calls.

use glyphrain_core::{Palette, RainConfig, Rgb};

use crate::engine::RainEngine;

/// One glyph to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub symbol: char,
    /// Left edge of the glyph in surface pixels.
    pub x: f32,
    /// Bottom edge of the glyph's cell in surface pixels.
    pub y: f32,
    pub color: Rgb,
    pub alpha: u8,
}

/// A surface that can measure and draw single glyphs.
pub trait GlyphCanvas {
    /// Advance width of `symbol` in surface pixels.
    fn measure(&self, symbol: char) -> f32;

    fn draw_glyph(&mut self, glyph: &Glyph);
}

/// Reads an engine and emits one [`Glyph`] per visible symbol.
///
/// Rendering never touches engine state, so frames may be skipped freely.
#[derive(Debug, Clone)]
pub struct Renderer {
    palette: Palette,
    alpha_max: u8,
    alpha_floor: u8,
    alpha_fallback: u8,
}

impl Renderer {
    /// Create a renderer with the alpha constants from `config`.
    pub fn new(palette: Palette, config: &RainConfig) -> Self {
        Self {
            palette,
            alpha_max: config.alpha_max,
            alpha_floor: config.alpha_floor,
            alpha_fallback: config.alpha_fallback,
        }
    }

    /// Colors used for heads and trails.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Replace the colors used for subsequent draws.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Alpha of slot `index` in a line of `size` slots.
    ///
    /// The head is opaque; the body fades linearly from `alpha_max` at slot 1
    /// to `alpha_floor` at the last slot. Lines with two slots or fewer have
    /// nothing to interpolate over and use `alpha_fallback`.
    pub fn trail_alpha(&self, index: usize, size: usize) -> u8 {
        if index == 0 {
            return u8::MAX;
        }
        if size <= 2 {
            return self.alpha_fallback;
        }
        let max = f32::from(self.alpha_max);
        let floor = f32::from(self.alpha_floor);
        let t = (index - 1) as f32 / (size - 2) as f32;
        (max - (max - floor) * t).round().clamp(0.0, 255.0) as u8
    }

    /// All visible glyphs, column by column, before glyph centering.
    pub fn glyphs<'a, R>(&'a self, engine: &'a RainEngine<R>) -> impl Iterator<Item = Glyph> + 'a {
        let geometry = engine.geometry();
        engine
            .columns()
            .iter()
            .enumerate()
            .flat_map(move |(column_index, column)| {
                let x = column_index as f32 * geometry.symbol_size + geometry.x_offset;
                column
                    .lines()
                    .iter()
                    .filter(|line| line.is_shown() && line.is_symbols())
                    .flat_map(move |line| {
                        line.active_slots().map(move |(index, slot)| Glyph {
                            symbol: slot.symbol,
                            x,
                            y: engine.offset_of(slot.started_at_y),
                            color: if index == 0 {
                                self.palette.highlight
                            } else {
                                self.palette.base
                            },
                            alpha: self.trail_alpha(index, line.size()),
                        })
                    })
            })
    }

    /// Draw every visible glyph onto `canvas`, centered in its column.
    ///
    /// Returns the number of glyphs drawn.
    pub fn draw<R, C>(&self, engine: &RainEngine<R>, canvas: &mut C) -> usize
    where
        C: GlyphCanvas + ?Sized,
    {
        let symbol_size = engine.geometry().symbol_size;
        let mut drawn = 0;
        for mut glyph in self.glyphs(engine) {
            glyph.x += (symbol_size - canvas.measure(glyph.symbol)) / 2.0;
            canvas.draw_glyph(&glyph);
            drawn += 1;
        }
        drawn
    }
}
