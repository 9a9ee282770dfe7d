//! Host lifecycle around the engine.

use glyphrain_core::{Palette, RainConfig};
use log::{debug, info};
use rand::Rng;

use crate::engine::RainEngine;
use crate::render::{GlyphCanvas, Renderer};

/// The rain as a host sees it: size changes, activation, ticks and draws.
///
/// Ticks only advance the engine while the view is active. Deactivating
/// keeps every column intact so the animation resumes where it stopped;
/// only a size change discards state.
#[derive(Debug)]
pub struct RainView<R> {
    engine: RainEngine<R>,
    renderer: Renderer,
    active: bool,
    redraw_requested: bool,
}

impl<R: Rng> RainView<R> {
    /// Create an inactive view with no surface yet.
    pub fn new(config: RainConfig, density: f32, palette: Palette, rng: R) -> Self {
        Self {
            engine: RainEngine::new(config, density, 0.0, 0.0, rng),
            renderer: Renderer::new(palette, &config),
            active: false,
            redraw_requested: false,
        }
    }

    /// Rebuild for a new surface size and restart the animation.
    pub fn on_size_changed(&mut self, width: f32, height: f32) {
        debug!("surface resized to {width}x{height}");
        self.engine.resize(width, height);
        self.redraw_requested = true;
    }

    /// Resume ticking.
    pub fn on_activate(&mut self) {
        if !self.active {
            info!("rain activated");
            self.active = true;
        }
    }

    /// Stop ticking, keeping all column state.
    pub fn on_deactivate(&mut self) {
        if self.active {
            info!("rain deactivated");
            self.active = false;
        }
    }

    /// Advance one tick if active. Returns whether the engine advanced.
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.engine.advance();
        self.redraw_requested = true;
        true
    }
}

impl<R> RainView<R> {
    /// Whether ticks currently advance the engine.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Return and clear the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Paint the current state. Returns the number of glyphs drawn.
    pub fn draw<C: GlyphCanvas + ?Sized>(&self, canvas: &mut C) -> usize {
        self.renderer.draw(&self.engine, canvas)
    }

    /// Swap colors and request a redraw.
    pub fn set_palette(&mut self, palette: Palette) {
        self.renderer.set_palette(palette);
        self.redraw_requested = true;
    }

    /// Colors used for drawing.
    pub fn palette(&self) -> &Palette {
        self.renderer.palette()
    }

    /// The engine driven by this view.
    pub fn engine(&self) -> &RainEngine<R> {
        &self.engine
    }

    /// The renderer used by [`draw`](Self::draw).
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}
