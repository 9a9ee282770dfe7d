//! Per-surface timing and geometry.

use crate::RainConfig;

/// Inclusive bounds on the number of slots in a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLength {
    pub min: usize,
    pub max: usize,
}

/// Values derived from a surface size and the fixed [`RainConfig`].
///
/// Everything here is in surface pixels. A new `Geometry` is computed for
/// every size change and the engine is rebuilt from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Surface width.
    pub width: f32,
    /// Surface height.
    pub height: f32,
    /// Edge length of one symbol cell.
    pub symbol_size: f32,
    /// Scroll modulus: the surface height plus one symbol, so a glyph fully
    /// leaves the surface before it wraps.
    pub wrap_height: f32,
    /// Scroll distance covered by one tick.
    pub px_per_tick: f32,
    /// Symbols needed to cover the wrap height.
    pub max_visible: usize,
    /// Bounds on line sizes.
    pub line_length: LineLength,
    /// Number of columns that fit across the surface.
    pub column_count: usize,
    /// Horizontal offset that centers the columns.
    pub x_offset: f32,
    /// Lines kept in each column's rotation.
    pub lines_per_column: usize,
    /// Base scroll distance between head mutations.
    pub head_update_delay: f32,
    /// Maximum jitter around `head_update_delay`.
    pub head_update_jitter: f32,
    /// Scroll distance between body mutations.
    pub body_update_delay: f32,
}

impl Geometry {
    /// Derive the geometry for a `width` x `height` pixel surface.
    ///
    /// Surfaces narrower or shorter than one symbol get zero columns, which
    /// makes every engine tick a no-op.
    ///
    /// # Panics
    ///
    /// Panics if `density` or the configured symbol size is not a positive
    /// finite number.
    pub fn new(width: f32, height: f32, config: &RainConfig, density: f32) -> Self {
        assert!(
            density.is_finite() && density > 0.0,
            "density must be positive, got {density}"
        );
        let symbol_size = config.symbol_size * density;
        assert!(
            symbol_size.is_finite() && symbol_size > 0.0,
            "symbol size must be positive, got {symbol_size}"
        );

        let width = width.max(0.0);
        let height = height.max(0.0);

        let wrap_height = height + symbol_size;
        let px_per_tick = config.speed * density / config.ticks_per_second.max(1) as f32;
        let max_visible = (wrap_height / symbol_size).ceil() as usize;

        let min = ((max_visible as f32 * config.min_line_factor).ceil() as usize).max(1);
        let max = ((max_visible as f32 * config.max_line_factor).ceil() as usize).max(min);

        let column_count = if width < symbol_size || height < symbol_size {
            0
        } else {
            (width / symbol_size).floor() as usize
        };

        Self {
            width,
            height,
            symbol_size,
            wrap_height,
            px_per_tick,
            max_visible,
            line_length: LineLength { min, max },
            column_count,
            x_offset: (width % symbol_size) / 2.0,
            lines_per_column: max_visible.div_ceil(min),
            head_update_delay: config.head_update_delay * density,
            head_update_jitter: config.head_update_jitter * density,
            body_update_delay: config.body_update_delay * density,
        }
    }

    /// Whether the surface is too small to hold a single column.
    pub fn is_degenerate(&self) -> bool {
        self.column_count == 0
    }

    /// Distance scrolled from `started_at` to `cursor`, accounting for wrap.
    #[inline]
    pub fn scrolled_since(&self, cursor: f32, started_at: f32) -> f32 {
        if cursor < started_at {
            self.wrap_height + cursor - started_at
        } else {
            cursor - started_at
        }
    }

    /// Wrap an absolute scroll position into `[0, wrap_height)`.
    #[inline]
    pub fn wrap(&self, position: f32) -> f32 {
        let wrapped = position % self.wrap_height;
        if wrapped < 0.0 {
            wrapped + self.wrap_height
        } else {
            wrapped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_symbol(symbol_size: f32) -> RainConfig {
        RainConfig {
            symbol_size,
            ..RainConfig::DEFAULT
        }
    }

    #[test]
    fn test_reference_surface() {
        let geometry = Geometry::new(100.0, 200.0, &config_with_symbol(10.0), 1.0);
        assert_eq!(geometry.column_count, 10);
        assert_eq!(geometry.wrap_height, 210.0);
        assert_eq!(geometry.max_visible, 21);
        assert_eq!(geometry.line_length, LineLength { min: 5, max: 17 });
        assert_eq!(geometry.lines_per_column, 5);
        assert_eq!(geometry.x_offset, 0.0);
    }

    #[test]
    fn test_centering_offset() {
        let geometry = Geometry::new(105.0, 200.0, &config_with_symbol(10.0), 1.0);
        assert_eq!(geometry.column_count, 10);
        assert_eq!(geometry.x_offset, 2.5);
    }

    #[test]
    fn test_density_scales_units() {
        let config = config_with_symbol(10.0);
        let geometry = Geometry::new(100.0, 200.0, &config, 2.0);
        assert_eq!(geometry.symbol_size, 20.0);
        assert_eq!(geometry.column_count, 5);
        assert_eq!(geometry.head_update_delay, config.head_update_delay * 2.0);
        assert_eq!(
            geometry.px_per_tick,
            config.speed * 2.0 / config.ticks_per_second as f32
        );
    }

    #[test]
    fn test_degenerate_surfaces() {
        let config = config_with_symbol(10.0);
        assert!(Geometry::new(0.0, 0.0, &config, 1.0).is_degenerate());
        assert!(Geometry::new(5.0, 200.0, &config, 1.0).is_degenerate());
        assert!(Geometry::new(100.0, 9.0, &config, 1.0).is_degenerate());
        assert!(!Geometry::new(10.0, 10.0, &config, 1.0).is_degenerate());
    }

    #[test]
    fn test_length_bounds_never_zero() {
        let geometry = Geometry::new(0.0, 0.0, &config_with_symbol(10.0), 1.0);
        assert_eq!(geometry.max_visible, 1);
        assert!(geometry.line_length.min >= 1);
        assert!(geometry.line_length.max >= geometry.line_length.min);
        assert_eq!(geometry.lines_per_column, 1);
    }

    #[test]
    fn test_scrolled_since_wraps() {
        let geometry = Geometry::new(100.0, 200.0, &config_with_symbol(10.0), 1.0);
        assert_eq!(geometry.scrolled_since(50.0, 20.0), 30.0);
        assert_eq!(geometry.scrolled_since(10.0, 200.0), 20.0);
        assert_eq!(geometry.wrap(215.0), 5.0);
        assert_eq!(geometry.wrap(-5.0), 205.0);
    }

    #[test]
    #[should_panic(expected = "density must be positive")]
    fn test_zero_density_panics() {
        Geometry::new(100.0, 200.0, &RainConfig::DEFAULT, 0.0);
    }
}
