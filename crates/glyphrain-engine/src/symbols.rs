//! Random symbol selection.

use glyphrain_core::RainConfig;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Generator used by the terminal host. Any [`Rng`] works with the engine.
pub type SymbolRng = Pcg32;

/// Create the deterministic generator for a run seed.
pub fn seeded_rng(seed: u64) -> SymbolRng {
    Pcg32::seed_from_u64(seed)
}

/// Inclusive range of printable code points symbols are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolRange {
    first: u32,
    last: u32,
}

impl SymbolRange {
    /// # Panics
    ///
    /// Panics if the range is empty, starts below `'!'`, or contains code
    /// points that are not valid `char`s.
    pub fn new(first: u32, last: u32) -> Self {
        assert!(first >= 33, "symbol range must exclude control characters");
        assert!(first <= last, "empty symbol range {first}..={last}");
        assert!(
            char::from_u32(first).is_some() && char::from_u32(last).is_some(),
            "symbol range {first:#x}..={last:#x} has invalid endpoints"
        );
        assert!(
            last < 0xD800 || first > 0xDFFF,
            "symbol range {first:#x}..={last:#x} spans surrogates"
        );
        Self { first, last }
    }

    /// Range from the configured first and last symbols.
    pub fn from_config(config: &RainConfig) -> Self {
        Self::new(config.first_symbol, config.last_symbol)
    }

    /// Draw one symbol uniformly from the range.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> char {
        // The constructor rules out surrogates, so this always maps.
        char::from_u32(rng.random_range(self.first..=self.last))
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Whether `symbol` can be sampled from this range.
    pub fn contains(&self, symbol: char) -> bool {
        (self.first..=self.last).contains(&u32::from(symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_stay_in_range() {
        let range = SymbolRange::from_config(&RainConfig::DEFAULT);
        let mut rng = seeded_rng(7);
        for _ in 0..1000 {
            let symbol = range.sample(&mut rng);
            assert!(range.contains(symbol));
            assert!(!symbol.is_control());
        }
    }

    #[test]
    fn test_same_seed_same_symbols() {
        let range = SymbolRange::new(33, 126);
        let mut a = seeded_rng(42);
        let mut b = seeded_rng(42);
        let left: String = (0..32).map(|_| range.sample(&mut a)).collect();
        let right: String = (0..32).map(|_| range.sample(&mut b)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_single_symbol_range() {
        let range = SymbolRange::new(u32::from('x'), u32::from('x'));
        assert_eq!(range.sample(&mut seeded_rng(1)), 'x');
    }

    #[test]
    #[should_panic(expected = "control characters")]
    fn test_rejects_control_range() {
        SymbolRange::new(0, 126);
    }

    #[test]
    #[should_panic(expected = "surrogates")]
    fn test_rejects_surrogates() {
        SymbolRange::new(0xD000, 0xE000);
    }
}
