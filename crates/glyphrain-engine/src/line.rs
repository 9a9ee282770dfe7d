//! Lines: fixed-capacity trails of symbol slots.

use glyphrain_core::Geometry;
use rand::Rng;

use crate::symbols::SymbolRange;

/// One symbol position within a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolSlot {
    /// Glyph shown in this slot. Unused by empty lines.
    pub symbol: char,
    /// Scroll position at which the bottom of this slot began scrolling.
    pub started_at_y: f32,
}

impl Default for SymbolSlot {
    fn default() -> Self {
        Self {
            symbol: ' ',
            started_at_y: 0.0,
        }
    }
}

/// Mutation timers carried by symbol lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolTimers {
    /// Scroll position of the last head mutation.
    pub head_update_at: f32,
    /// Scroll position of the last body mutation.
    pub common_update_at: f32,
    /// Scroll distance between head mutations for this line.
    pub head_update_delay: f32,
}

/// What a line draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineKind {
    /// A gap between two trails.
    Empty,
    /// A visible trail of glyphs.
    Symbols(SymbolTimers),
}

/// A trail of slots scrolling down a column.
///
/// Slots `start_index..=end_index` are active while the line is shown. The
/// slot buffer is allocated once with room for the longest possible line and
/// reused every time the line is shown again.
#[derive(Debug, Clone)]
pub struct Line {
    slots: Box<[SymbolSlot]>,
    is_shown: bool,
    start_index: usize,
    end_index: usize,
    size: usize,
    kind: LineKind,
}

impl Line {
    pub(crate) fn empty(capacity: usize, initial_size: usize) -> Self {
        Self::with_kind(capacity, initial_size, LineKind::Empty)
    }

    pub(crate) fn symbols(capacity: usize, initial_size: usize, head_update_delay: f32) -> Self {
        Self::with_kind(
            capacity,
            initial_size,
            LineKind::Symbols(SymbolTimers {
                head_update_at: 0.0,
                common_update_at: 0.0,
                head_update_delay,
            }),
        )
    }

    fn with_kind(capacity: usize, initial_size: usize, kind: LineKind) -> Self {
        assert!(capacity > 0, "line capacity must be positive");
        assert!(
            initial_size <= capacity,
            "line size {initial_size} exceeds capacity {capacity}"
        );
        Self {
            slots: vec![SymbolSlot::default(); capacity].into_boxed_slice(),
            is_shown: false,
            start_index: 0,
            end_index: 0,
            size: initial_size,
            kind,
        }
    }

    /// Whether the line has active slots.
    pub fn is_shown(&self) -> bool {
        self.is_shown
    }

    /// Oldest active slot.
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Newest revealed slot.
    pub fn end_index(&self) -> usize {
        self.end_index
    }

    /// Target length chosen when the line was last shown.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of allocated slots, the longest possible line.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Whether this line is a gap or a trail.
    pub fn kind(&self) -> &LineKind {
        &self.kind
    }

    /// Whether this line draws glyphs.
    pub fn is_symbols(&self) -> bool {
        matches!(self.kind, LineKind::Symbols(_))
    }

    /// Mutation timers, for symbol lines only.
    pub fn timers(&self) -> Option<&SymbolTimers> {
        match &self.kind {
            LineKind::Symbols(timers) => Some(timers),
            LineKind::Empty => None,
        }
    }

    /// Slot at `index`, active or not.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`capacity`](Self::capacity).
    pub fn slot(&self, index: usize) -> &SymbolSlot {
        &self.slots[index]
    }

    /// Number of active slots. Zero when the line is hidden.
    pub fn active_len(&self) -> usize {
        if self.is_shown {
            self.end_index + 1 - self.start_index
        } else {
            0
        }
    }

    /// Active slots with their indices, oldest first.
    pub fn active_slots(&self) -> impl Iterator<Item = (usize, &SymbolSlot)> + '_ {
        let range = if self.is_shown {
            self.start_index..self.end_index + 1
        } else {
            0..0
        };
        range.map(move |index| (index, &self.slots[index]))
    }

    /// Show the first line of a column at construction time.
    pub(crate) fn show_first(&mut self) {
        self.is_shown = true;
        self.start_index = 0;
        self.end_index = 0;
    }

    /// Give a line shown at construction its real size once its column starts.
    pub(crate) fn start_lazily(&mut self, size: usize, symbol: Option<char>) {
        self.set_size(size);
        if let (LineKind::Symbols(_), Some(symbol)) = (&self.kind, symbol) {
            self.slots[0].symbol = symbol;
        }
    }

    /// Show this line as the next in its column's rotation.
    pub(crate) fn activate(&mut self, size: usize, started_at_y: f32, symbol: Option<char>) {
        self.set_size(size);
        self.start_index = 0;
        self.end_index = 0;
        self.is_shown = true;
        if let LineKind::Symbols(timers) = &mut self.kind {
            timers.head_update_at = started_at_y;
            timers.common_update_at = started_at_y;
        }
        self.slots[0] = SymbolSlot {
            symbol: symbol.unwrap_or(' '),
            started_at_y,
        };
    }

    /// Whether all `size` slots have been revealed.
    pub(crate) fn is_exhausted(&self) -> bool {
        self.end_index + 1 >= self.size
    }

    /// Reveal the slot after `end_index`.
    pub(crate) fn push_slot(&mut self, started_at_y: f32, symbol: Option<char>) {
        let next = self.end_index + 1;
        assert!(
            next < self.size && next < self.slots.len(),
            "slot {next} out of range for line of size {} and capacity {}",
            self.size,
            self.slots.len()
        );
        self.slots[next] = SymbolSlot {
            symbol: symbol.unwrap_or(' '),
            started_at_y,
        };
        self.end_index = next;
    }

    /// Drop the oldest active slot, hiding the line once none remain.
    pub(crate) fn retire_front(&mut self) {
        self.start_index += 1;
        if self.start_index > self.end_index {
            self.is_shown = false;
        }
    }

    /// Re-roll the head and one body glyph when their timers have elapsed.
    pub(crate) fn mutate<R: Rng>(
        &mut self,
        geometry: &Geometry,
        cursor: f32,
        symbols: &SymbolRange,
        rng: &mut R,
    ) {
        if !self.is_shown {
            return;
        }
        let Line {
            slots,
            start_index,
            end_index,
            kind,
            ..
        } = self;
        let LineKind::Symbols(timers) = kind else {
            return;
        };

        let head_elapsed = geometry.scrolled_since(cursor, timers.head_update_at);
        if *start_index == 0 && head_elapsed > timers.head_update_delay {
            slots[0].symbol = symbols.sample(rng);
            let next = timers.head_update_at + timers.head_update_delay;
            timers.head_update_at = geometry.wrap(next);
        }

        let first_body = (*start_index).max(1);
        if first_body <= *end_index {
            let index = rng.random_range(first_body..=*end_index);
            let body_elapsed = geometry.scrolled_since(cursor, timers.common_update_at);
            if body_elapsed > geometry.body_update_delay {
                slots[index].symbol = symbols.sample(rng);
                let next = timers.common_update_at + geometry.body_update_delay;
                timers.common_update_at = geometry.wrap(next);
            }
        }
    }

    fn set_size(&mut self, size: usize) {
        assert!(
            size > 0 && size <= self.slots.len(),
            "line size {size} outside 1..={}",
            self.slots.len()
        );
        self.size = size;
    }
}
