//! Core types for the glyphrain animation.
//!
//! Holds the fixed animation constants, the per-surface geometry derived
//! from them, and the color themes shared by the engine and the terminal host.

mod color;
mod config;
mod geometry;

pub use color::{Palette, Rgb, Theme};
pub use config::RainConfig;
pub use geometry::{Geometry, LineLength};
