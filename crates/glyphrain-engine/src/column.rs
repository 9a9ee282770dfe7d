//! Columns: a fixed rotation of lines.

use glyphrain_core::Geometry;
use rand::Rng;

use crate::line::Line;

/// A vertical column of alternating empty and symbol lines.
///
/// Line 0 is always empty and starts shown; every other line waits for the
/// line before it to finish revealing.
#[derive(Debug, Clone)]
pub struct Column {
    pub(crate) lines: Vec<Line>,
    pub(crate) is_started: bool,
}

impl Column {
    pub(crate) fn new<R: Rng>(geometry: &Geometry, rng: &mut R) -> Self {
        let capacity = geometry.line_length.max;
        let initial_size = geometry.line_length.min;
        let jitter = geometry.head_update_jitter;

        let mut lines: Vec<Line> = (0..geometry.lines_per_column)
            .map(|index| {
                if index % 2 == 0 {
                    Line::empty(capacity, initial_size)
                } else {
                    let delay = geometry.head_update_delay + rng.random_range(-jitter..=jitter);
                    Line::symbols(capacity, initial_size, delay)
                }
            })
            .collect();
        if let Some(first) = lines.first_mut() {
            first.show_first();
        }

        Self {
            lines,
            is_started: false,
        }
    }

    /// Lines in rotation order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Whether the first line of this column has been activated.
    pub fn is_started(&self) -> bool {
        self.is_started
    }
}
