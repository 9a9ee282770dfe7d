//! The per-tick animation state machine.

use glyphrain_core::{Geometry, RainConfig};
use log::{debug, trace};
use rand::Rng;

use crate::column::Column;
use crate::symbols::SymbolRange;

/// Owns every column of the rain and advances them one tick at a time.
///
/// The engine never sleeps or schedules itself: a host calls
/// [`advance`](Self::advance) at the configured tick rate and reads the state
/// back between ticks. All randomness comes from the injected generator, so
/// two engines with equally seeded generators evolve identically.
#[derive(Debug)]
pub struct RainEngine<R> {
    config: RainConfig,
    density: f32,
    geometry: Geometry,
    symbols: SymbolRange,
    columns: Vec<Column>,
    cursor: f32,
    rng: R,
}

/// Per-tick inputs shared by every line update.
struct Tick<'a, R> {
    geometry: &'a Geometry,
    symbols: &'a SymbolRange,
    cursor: f32,
    rng: &'a mut R,
}

impl<R: Rng> Tick<'_, R> {
    fn random_size(&mut self) -> usize {
        let length = self.geometry.line_length;
        self.rng.random_range(length.min..=length.max)
    }

    fn random_symbol(&mut self) -> char {
        self.symbols.sample(self.rng)
    }
}

impl<R: Rng> RainEngine<R> {
    /// Build an engine for a `width` x `height` pixel surface.
    pub fn new(config: RainConfig, density: f32, width: f32, height: f32, rng: R) -> Self {
        let geometry = Geometry::new(width, height, &config, density);
        let mut engine = Self {
            config,
            density,
            geometry,
            symbols: SymbolRange::from_config(&config),
            columns: Vec::new(),
            cursor: 0.0,
            rng,
        };
        engine.rebuild();
        engine
    }

    /// Discard all columns and rebuild them for a new surface size.
    ///
    /// The cursor restarts at zero; nothing in flight survives a resize.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.geometry = Geometry::new(width, height, &self.config, self.density);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let Self {
            geometry,
            columns,
            rng,
            ..
        } = self;
        *columns = (0..geometry.column_count)
            .map(|_| Column::new(geometry, rng))
            .collect();
        self.cursor = 0.0;
        debug!(
            "rebuilt rain for {}x{}: {} columns x {} lines, line length {}..={}",
            self.geometry.width,
            self.geometry.height,
            self.geometry.column_count,
            self.geometry.lines_per_column,
            self.geometry.line_length.min,
            self.geometry.line_length.max,
        );
    }

    /// Advance the animation by one tick.
    pub fn advance(&mut self) {
        let Self {
            geometry,
            symbols,
            columns,
            cursor,
            rng,
            ..
        } = self;
        *cursor = geometry.wrap(*cursor + geometry.px_per_tick);

        let mut tick = Tick {
            geometry,
            symbols,
            cursor: *cursor,
            rng,
        };
        for column in columns.iter_mut() {
            for index in 0..column.lines.len() {
                if column.lines[index].is_shown() {
                    step_line(column, index, &mut tick);
                }
            }
        }
    }
}

impl<R> RainEngine<R> {
    /// Columns from left to right.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Geometry of the current surface.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Constants the engine was built with.
    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    /// Current scroll position, always in `[0, wrap_height)`.
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// On-screen offset of a slot that began scrolling at `started_at_y`.
    pub fn offset_of(&self, started_at_y: f32) -> f32 {
        self.geometry.scrolled_since(self.cursor, started_at_y)
    }
}

/// Run one tick of the reveal/retire/mutate protocol for a shown line.
fn step_line<R: Rng>(column: &mut Column, index: usize, tick: &mut Tick<'_, R>) {
    let geometry = tick.geometry;

    if !column.is_started {
        column.is_started = true;
        let size = tick.random_size();
        let symbol = column.lines[index]
            .is_symbols()
            .then(|| tick.random_symbol());
        column.lines[index].start_lazily(size, symbol);
    }

    let line_count = column.lines.len();
    let first = column.lines[index].start_index();
    let last = column.lines[index].end_index();

    for slot_index in first..=last {
        let line = &column.lines[index];
        if !line.is_shown() {
            break;
        }
        let started_at_y = line.slot(slot_index).started_at_y;
        let y = geometry.scrolled_since(tick.cursor, started_at_y);

        if slot_index == line.end_index() && y > geometry.symbol_size {
            let next_started_at_y = geometry.wrap(started_at_y + geometry.symbol_size);
            if !line.is_exhausted() {
                let symbol = line.is_symbols().then(|| tick.random_symbol());
                column.lines[index].push_slot(next_started_at_y, symbol);
            } else {
                let next = (index + 1) % line_count;
                if !column.lines[next].is_shown() {
                    let size = tick.random_size();
                    let symbol = column.lines[next]
                        .is_symbols()
                        .then(|| tick.random_symbol());
                    column.lines[next].activate(size, next_started_at_y, symbol);
                    trace!("line {next} shown with size {size} at {next_started_at_y}");
                }
            }
        }

        if y + geometry.px_per_tick >= geometry.wrap_height {
            column.lines[index].retire_front();
        }
    }

    column.lines[index].mutate(geometry, tick.cursor, tick.symbols, tick.rng);
}
