use glyphrain_core::{RainConfig, Theme};
use glyphrain_engine::{Glyph, LineKind, RainEngine, Renderer, SymbolRng, seeded_rng};
use proptest::prelude::*;

fn config() -> RainConfig {
    RainConfig {
        symbol_size: 10.0,
        ..RainConfig::DEFAULT
    }
}

fn engine(seed: u64, width: f32, height: f32) -> RainEngine<SymbolRng> {
    RainEngine::new(config(), 1.0, width, height, seeded_rng(seed))
}

fn shown_flags(engine: &RainEngine<SymbolRng>) -> Vec<Vec<bool>> {
    engine
        .columns()
        .iter()
        .map(|column| column.lines().iter().map(|line| line.is_shown()).collect())
        .collect()
}

fn check_state(engine: &RainEngine<SymbolRng>) -> Result<(), TestCaseError> {
    let geometry = engine.geometry();
    prop_assert!(engine.cursor() >= 0.0 && engine.cursor() < geometry.wrap_height);
    for column in engine.columns() {
        for line in column.lines() {
            prop_assert_eq!(line.capacity(), geometry.line_length.max);
            prop_assert!(line.size() <= line.capacity());
            if line.is_shown() {
                prop_assert!(line.start_index() <= line.end_index());
                prop_assert!(line.end_index() < line.capacity());
                prop_assert!(line.end_index() - line.start_index() + 1 <= line.size());
            }
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn line_ranges_stay_valid(
        seed in any::<u64>(),
        width in 0.0f32..320.0,
        height in 0.0f32..320.0,
        ticks in 1usize..600,
    ) {
        let mut engine = engine(seed, width, height);
        check_state(&engine)?;
        for _ in 0..ticks {
            engine.advance();
            check_state(&engine)?;
        }
    }

    #[test]
    fn one_reveal_per_column_per_tick(seed in any::<u64>(), ticks in 1usize..600) {
        let mut engine = engine(seed, 100.0, 200.0);
        for _ in 0..ticks {
            let before = shown_flags(&engine);
            engine.advance();
            let after = shown_flags(&engine);
            for (old, new) in before.iter().zip(&after) {
                let reveals = old.iter().zip(new).filter(|(was, is)| !**was && **is).count();
                prop_assert!(reveals <= 1);
            }
        }
    }

    #[test]
    fn same_seed_same_frames(seed in any::<u64>(), ticks in 1usize..300) {
        let renderer = Renderer::new(Theme::Green.palette(), &config());
        let mut left = engine(seed, 120.0, 90.0);
        let mut right = engine(seed, 120.0, 90.0);
        for _ in 0..ticks {
            left.advance();
            right.advance();
            let a: Vec<Glyph> = renderer.glyphs(&left).collect();
            let b: Vec<Glyph> = renderer.glyphs(&right).collect();
            prop_assert_eq!(a, b);
        }
    }
}

#[test]
fn reference_surface_starts_with_one_empty_line_per_column() {
    let engine = engine(1, 100.0, 200.0);
    let geometry = engine.geometry();
    assert_eq!(geometry.column_count, 10);
    assert_eq!(geometry.wrap_height, 210.0);
    assert_eq!(geometry.max_visible, 21);
    assert_eq!(geometry.line_length.min, 5);
    assert_eq!(geometry.line_length.max, 17);

    for column in engine.columns() {
        let (first, rest) = column.lines().split_first().unwrap();
        assert_eq!(first.kind(), &LineKind::Empty);
        assert!(first.is_shown());
        assert!(rest.iter().all(|line| !line.is_shown()));
    }
}

#[test]
fn glyphs_stay_on_surface_across_wraps() {
    let mut engine = engine(7, 100.0, 200.0);
    let renderer = Renderer::new(Theme::Green.palette(), &config());
    let config = config();
    let wrap = engine.geometry().wrap_height;

    let mut wraps = 0;
    let mut drawn = 0;
    while wraps < 3 {
        let previous = engine.cursor();
        engine.advance();
        if engine.cursor() < previous {
            wraps += 1;
        }
        for glyph in renderer.glyphs(&engine) {
            drawn += 1;
            assert!((0.0..wrap).contains(&glyph.y), "y {} off surface", glyph.y);
            assert!(
                glyph.alpha == 255
                    || glyph.alpha == config.alpha_fallback
                    || (config.alpha_floor..=config.alpha_max).contains(&glyph.alpha),
                "unexpected alpha {}",
                glyph.alpha
            );
        }
    }
    assert!(drawn > 0);
}

#[test]
fn two_slot_lines_use_fallback_alpha() {
    // Factors chosen so every line on a 190px surface is exactly two slots.
    let config = RainConfig {
        symbol_size: 10.0,
        min_line_factor: 0.08,
        max_line_factor: 0.09,
        ..RainConfig::DEFAULT
    };
    let mut engine = RainEngine::new(config, 1.0, 50.0, 190.0, seeded_rng(3));
    assert_eq!(engine.geometry().line_length.min, 2);
    assert_eq!(engine.geometry().line_length.max, 2);

    let renderer = Renderer::new(Theme::Green.palette(), &config);
    let mut saw_head = false;
    let mut saw_tail = false;
    for _ in 0..400 {
        engine.advance();
        for glyph in renderer.glyphs(&engine) {
            match glyph.alpha {
                255 => saw_head = true,
                alpha => {
                    assert_eq!(alpha, config.alpha_fallback);
                    saw_tail = true;
                }
            }
        }
    }
    assert!(saw_head && saw_tail);
}

#[test]
fn degenerate_surfaces_have_no_columns() {
    for (width, height) in [(0.0, 0.0), (9.0, 500.0), (500.0, 9.0)] {
        let mut engine = engine(5, width, height);
        assert!(engine.columns().is_empty());
        engine.advance();
        assert!(engine.columns().is_empty());
    }
}
