//! Fixed animation constants.

use std::time::Duration;

/// Tunable constants for the rain animation.
///
/// Lengths and delays are in density-independent units (dp) and are scaled
/// once by the host's density factor when a [`Geometry`](crate::Geometry) is
/// computed. The values are fixed at build time; [`RainConfig::DEFAULT`] is
/// what the terminal host runs with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainConfig {
    /// Edge length of one symbol cell (dp).
    pub symbol_size: f32,
    /// Scroll speed (dp per second).
    pub speed: f32,
    /// Engine ticks per second.
    pub ticks_per_second: u32,
    /// Shortest line as a fraction of the visible symbols per column.
    pub min_line_factor: f32,
    /// Longest line as a fraction of the visible symbols per column.
    pub max_line_factor: f32,
    /// Base scroll distance between head glyph mutations (dp).
    pub head_update_delay: f32,
    /// Maximum jitter applied to the head delay of each line (dp).
    pub head_update_jitter: f32,
    /// Scroll distance between body glyph mutations (dp).
    pub body_update_delay: f32,
    /// Alpha of the first body glyph below the head.
    pub alpha_max: u8,
    /// Alpha of the last glyph of a full-length trail.
    pub alpha_floor: u8,
    /// Body alpha for lines too short to interpolate over.
    pub alpha_fallback: u8,
    /// First code point symbols are drawn from (inclusive).
    pub first_symbol: u32,
    /// Last code point symbols are drawn from (inclusive).
    pub last_symbol: u32,
}

impl RainConfig {
    pub const DEFAULT: RainConfig = RainConfig {
        symbol_size: 16.0,
        speed: 192.0,
        ticks_per_second: 60,
        min_line_factor: 0.2,
        max_line_factor: 0.8,
        head_update_delay: 48.0,
        head_update_jitter: 1.0,
        body_update_delay: 32.0,
        alpha_max: 220,
        alpha_floor: 40,
        alpha_fallback: 128,
        first_symbol: 33,
        last_symbol: 126,
    };

    /// Wall-clock time between two engine ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.ticks_per_second.max(1)))
    }
}

impl Default for RainConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
