//! Colors and themes for the rain.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Color from its red, green and blue components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Composite this color at `alpha` over `background`.
    pub fn over(self, background: Rgb, alpha: u8) -> Rgb {
        let mix = |fg: u8, bg: u8| -> u8 {
            let a = u32::from(alpha);
            ((u32::from(fg) * a + u32::from(bg) * (255 - a) + 127) / 255) as u8
        };
        Rgb::new(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// Colors used to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Color of the head glyph of each trail.
    pub highlight: Rgb,
    /// Color of the body glyphs.
    pub base: Rgb,
    /// Surface background, used when the target cannot do real alpha.
    pub background: Rgb,
}

/// Color theme for the rain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Green,
    Cyan,
    Amber,
    Magenta,
    White,
}

impl Theme {
    /// Cycle to the next theme.
    pub fn next(self) -> Self {
        match self {
            Theme::Green => Theme::Cyan,
            Theme::Cyan => Theme::Amber,
            Theme::Amber => Theme::Magenta,
            Theme::Magenta => Theme::White,
            Theme::White => Theme::Green,
        }
    }

    /// Human readable theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Green => "green",
            Theme::Cyan => "cyan",
            Theme::Amber => "amber",
            Theme::Magenta => "magenta",
            Theme::White => "white",
        }
    }

    /// Colors for this theme.
    pub fn palette(self) -> Palette {
        let background = Rgb::new(0, 0, 0);
        match self {
            Theme::Green => Palette {
                highlight: Rgb::new(200, 255, 200),
                base: Rgb::new(0, 230, 65),
                background,
            },
            Theme::Cyan => Palette {
                highlight: Rgb::new(210, 255, 255),
                base: Rgb::new(0, 200, 220),
                background,
            },
            Theme::Amber => Palette {
                highlight: Rgb::new(255, 240, 200),
                base: Rgb::new(255, 170, 0),
                background,
            },
            Theme::Magenta => Palette {
                highlight: Rgb::new(255, 210, 255),
                base: Rgb::new(220, 40, 200),
                background,
            },
            Theme::White => Palette {
                highlight: Rgb::new(255, 255, 255),
                base: Rgb::new(170, 170, 170),
                background,
            },
        }
    }
}
