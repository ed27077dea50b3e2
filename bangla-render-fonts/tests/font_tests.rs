//! Integration tests for bangla-render-fonts crate.
//!
//! Tests that need a real face use whatever the system has installed and
//! return early on machines without fonts.

use bangla_render_fonts::canvas::new_canvas;
use bangla_render_fonts::{
    FALLBACK_FAMILIES, FontData, FontManager, FontSpec, ShapingEngine, SwashEngine, TextShaper,
};

fn engine_with_fonts() -> Option<SwashEngine> {
    let engine = SwashEngine::new();
    if engine.font_manager().font_count() == 0 {
        return None;
    }
    Some(engine)
}

#[test]
fn test_font_data_invalid_bytes() {
    let font_data = FontData::new(vec![0u8; 100], "broken");
    assert!(
        font_data.is_none(),
        "Should return None for invalid font data"
    );
}

#[test]
fn test_font_data_empty_bytes() {
    assert!(FontData::new(vec![], "empty").is_none());
}

#[test]
fn test_fallback_families_start_with_bengali() {
    assert!(!FALLBACK_FAMILIES.is_empty());
    assert_eq!(FALLBACK_FAMILIES[0], "Noto Sans Bengali");
    assert!(FALLBACK_FAMILIES.contains(&"Lohit Bengali"));
}

#[test]
fn test_text_shaper_with_system_font() {
    let mut manager = FontManager::new();
    if manager.font_count() == 0 {
        return;
    }
    let font = manager.resolve("Noto Sans Bengali").unwrap();
    let run = TextShaper::new().shape_text("Hello", &font);
    assert!(!run.glyphs.is_empty(), "Should produce shaped glyphs");
    assert!(run.total_advance > 0.0, "Should have positive advance");
    assert!(run.units_per_em > 0.0);
}

#[test]
fn test_empty_text_has_empty_bounds() {
    let Some(mut engine) = engine_with_fonts() else {
        return;
    };
    let bounds = engine
        .bounding_box("", &FontSpec::new("Noto Sans Bengali", 24.0))
        .unwrap();
    assert!(bounds.is_empty());
}

#[test]
fn test_bounds_grow_with_font_size() {
    let Some(mut engine) = engine_with_fonts() else {
        return;
    };
    let small = engine
        .bounding_box("বাংলা", &FontSpec::new("Noto Sans Bengali", 12.0))
        .unwrap();
    let large = engine
        .bounding_box("বাংলা", &FontSpec::new("Noto Sans Bengali", 48.0))
        .unwrap();
    assert!(large.height >= small.height);
    assert!(large.width >= small.width);
}

#[test]
fn test_bounds_sit_mostly_above_baseline() {
    let Some(mut engine) = engine_with_fonts() else {
        return;
    };
    let bounds = engine
        .bounding_box("Hx", &FontSpec::new("Noto Sans Bengali", 32.0))
        .unwrap();
    assert!(!bounds.is_empty());
    assert!(bounds.top < 0, "ink should rise above the baseline");
}

#[test]
fn test_draw_text_inks_inside_bounds() {
    let Some(mut engine) = engine_with_fonts() else {
        return;
    };
    let font = FontSpec::new("Noto Sans Bengali", 32.0);
    let bounds = engine.bounding_box("অক্ষর", &font).unwrap();
    if bounds.is_empty() {
        return;
    }

    let pad = 4;
    let width = bounds.width + 2 * pad;
    let height = bounds.height + 2 * pad;
    let mut canvas = new_canvas(width, height, [0, 0, 0, 0]);
    engine
        .draw_text(
            &mut canvas,
            &font,
            [0, 0, 0, 255],
            pad as i32 - bounds.left,
            pad as i32 - bounds.top,
            "অক্ষর",
        )
        .unwrap();

    let mut inked = 0;
    for (x, y, px) in canvas.enumerate_pixels() {
        if px.0[3] > 0 {
            inked += 1;
            assert!(x >= pad && x < width - pad, "column {x} outside ink box");
            assert!(y >= pad && y < height - pad, "row {y} outside ink box");
        }
    }
    assert!(inked > 0, "text should leave ink on the canvas");
}

#[test]
fn test_line_metrics_positive() {
    let Some(mut engine) = engine_with_fonts() else {
        return;
    };
    let metrics = engine
        .line_metrics(&FontSpec::new("Noto Sans Bengali", 28.0))
        .unwrap();
    assert!(metrics.ascent > 0.0);
    assert!(metrics.line_height >= metrics.ascent);
}
