//! Falling-symbols rain for the glyphrain terminal app.
//!
//! The [`RainEngine`] keeps every column's lines of symbols and advances
//! them one fixed tick at a time; the [`Renderer`] turns that state into
//! [`Glyph`] draw calls for any [`GlyphCanvas`]. [`RainView`] wraps both with
//! the host lifecycle and [`FixedTicker`] paces the ticks.

mod column;
mod engine;
mod line;
mod render;
mod symbols;
mod ticker;
mod view;

pub use column::Column;
pub use engine::RainEngine;
pub use line::{Line, LineKind, SymbolSlot, SymbolTimers};
pub use render::{Glyph, GlyphCanvas, Renderer};
pub use symbols::{SymbolRange, SymbolRng, seeded_rng};
pub use ticker::FixedTicker;
pub use view::RainView;
