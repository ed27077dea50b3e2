//! Rasterization and standalone render tests.

mod common;

use bangla_render::{
    Background, Color, FontSpec, HorizontalAlign, ParagraphLayout, RenderError, RenderRequest,
    VerticalAlign, rasterize, render_paragraph, render_text,
};
use common::{FailingEngine, FakeEngine, inked_pixels};

fn request(text: &str, size: f32, padding: u32) -> RenderRequest {
    RenderRequest::new(text, FontSpec::new("Noto Sans Bengali", size)).with_padding(padding)
}

#[test]
fn test_bitmap_is_ink_box_plus_padding() {
    let mut engine = FakeEngine::new();
    for (text, size, padding) in [("ক্ষুদ্র", 32.0, 10), ("আমি", 18.0, 0), ("স্বাস্থ্য", 48.0, 3)] {
        let font = FontSpec::new("Noto Sans Bengali", size);
        let bounds = FakeEngine::bounds_for(text, &font);
        let bitmap = rasterize(&mut engine, &request(text, size, padding)).unwrap();
        assert_eq!(bitmap.width(), bounds.width + 2 * padding);
        assert_eq!(bitmap.height(), bounds.height + 2 * padding);
    }
}

#[test]
fn test_ink_top_left_lands_on_padding() {
    let mut engine = FakeEngine::new();
    let bitmap = rasterize(&mut engine, &request("বাংলা", 24.0, 5)).unwrap();
    let canvas = bitmap.to_rgba8();
    assert_eq!(canvas.get_pixel(5, 5).0, [0, 0, 0, 255]);
    assert_eq!(canvas.get_pixel(4, 5).0[3], 0);
    assert_eq!(canvas.get_pixel(5, 4).0[3], 0);
    let (w, h) = canvas.dimensions();
    assert_eq!(canvas.get_pixel(w - 6, h - 6).0, [0, 0, 0, 255]);
    assert_eq!(canvas.get_pixel(w - 5, h - 5).0[3], 0);
}

#[test]
fn test_height_non_decreasing_with_font_size() {
    let mut engine = FakeEngine::new();
    let mut last = 0;
    for size in [8.0, 12.0, 18.0, 24.0, 36.0, 48.0, 72.0] {
        let bitmap = rasterize(&mut engine, &request("জ্ঞানোদয়", size, 10)).unwrap();
        assert!(bitmap.height() >= last, "height shrank at {size}pt");
        last = bitmap.height();
    }
}

#[test]
fn test_backgrounds() {
    let mut engine = FakeEngine::new();
    let transparent = rasterize(&mut engine, &request("ক", 24.0, 4)).unwrap();
    assert_eq!(transparent.to_rgba8().get_pixel(0, 0).0[3], 0);

    let opaque = rasterize(
        &mut engine,
        &request("ক", 24.0, 4).with_background(Background::Opaque(Color::WHITE)),
    )
    .unwrap();
    assert_eq!(opaque.to_rgba8().get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn test_empty_text_is_only_padding() {
    let mut engine = FakeEngine::new();
    let bitmap = rasterize(&mut engine, &request("", 24.0, 6)).unwrap();
    assert_eq!((bitmap.width(), bitmap.height()), (12, 12));
    assert_eq!(engine.draws, 0);
    assert_eq!(inked_pixels(&bitmap.to_rgba8()), 0);
}

#[test]
fn test_every_rasterization_reshapes() {
    let mut engine = FakeEngine::new();
    let a = rasterize(&mut engine, &request("গান", 24.0, 2)).unwrap();
    let b = rasterize(&mut engine, &request("গান", 24.0, 2)).unwrap();
    assert_eq!(a, b);
    assert_eq!(engine.measured.len(), 2);
    assert_eq!(engine.draws, 2);
}

#[test]
fn test_rotation_round_trip() {
    let mut engine = FakeEngine::new();
    let original = rasterize(&mut engine, &request("ওয়াই অক্ষ", 26.0, 10)).unwrap();
    let rotated = original.rotated_ccw();
    assert_eq!(rotated.width(), original.height());
    assert_eq!(rotated.height(), original.width());
    assert_eq!(rotated.rotated_cw(), original);
}

#[test]
fn test_engine_failure_is_reported() {
    let mut engine = FailingEngine;
    let err = rasterize(&mut engine, &request("ক", 24.0, 1)).unwrap_err();
    assert!(matches!(err, RenderError::Font(_)));
}

#[test]
fn test_render_text_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.png");
    let second = dir.path().join("b.png");
    let req = request("আমি বাংলায় গান গাই", 48.0, 0)
        .with_background(Background::Opaque(Color::WHITE));

    let mut engine = FakeEngine::new();
    render_text(&mut engine, &req, 800, 200, &first).unwrap();
    render_text(&mut engine, &req, 800, 200, &second).unwrap();

    let a = std::fs::read(&first).unwrap();
    let b = std::fs::read(&second).unwrap();
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[test]
fn test_render_text_uses_fixed_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("word.png");
    let mut engine = FakeEngine::new();
    let saved = render_text(&mut engine, &request("শ্রদ্ধা", 40.0, 99), 700, 200, &path).unwrap();
    assert_eq!(saved, path);
    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (700, 200));
    // Pen starts 10px in, plus the ink's own left offset
    let baseline = 100 + 20 - 5;
    assert_eq!(image.get_pixel(11, baseline - 1).0, [0, 0, 0, 255]);
    assert_eq!(image.get_pixel(10, baseline - 1).0[3], 0);
}

#[test]
fn test_render_text_rejects_empty_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = FakeEngine::new();
    let err = render_text(&mut engine, &request("ক", 24.0, 0), 0, 100, dir.path().join("x.png"))
        .unwrap_err();
    assert!(matches!(err, RenderError::EmptyCanvas { width: 0, height: 100 }));
}

#[test]
fn test_paragraph_wraps_words() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paragraph.png");
    let mut engine = FakeEngine::new();
    // 24pt is 32px: one character is 16px wide, so two words plus a space
    // (48px) fit in a 60px rectangle but three (80px) do not
    let layout = ParagraphLayout::new(80, 200, 10);
    render_paragraph(&mut engine, &request("ক খ গ ঘ", 24.0, 0), &layout, &path).unwrap();

    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (80, 200));

    // Count separate ink bands down the first text column
    let mut bands = 0;
    let mut inside = false;
    for y in 0..image.height() {
        let inked = image.get_pixel(12, y).0[3] > 0;
        if inked && !inside {
            bands += 1;
        }
        inside = inked;
    }
    assert_eq!(bands, 2);
}

#[test]
fn test_paragraph_alignment_moves_text() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = FakeEngine::new();
    let req = request("ক", 24.0, 0);

    let left = dir.path().join("left.png");
    render_paragraph(&mut engine, &req, &ParagraphLayout::new(200, 100, 10), &left).unwrap();
    let right = dir.path().join("right.png");
    let layout = ParagraphLayout::new(200, 100, 10)
        .with_alignment(HorizontalAlign::Right, VerticalAlign::Bottom);
    render_paragraph(&mut engine, &req, &layout, &right).unwrap();

    let left = image::open(&left).unwrap().to_rgba8();
    let right = image::open(&right).unwrap().to_rgba8();
    assert!(left.get_pixel(12, 20).0[3] > 0);
    assert_eq!(right.get_pixel(12, 20).0[3], 0);
    assert!(right.get_pixel(185, 80).0[3] > 0);
}

#[test]
fn test_paragraph_margin_must_leave_room() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = FakeEngine::new();
    let err = render_paragraph(
        &mut engine,
        &request("ক", 24.0, 0),
        &ParagraphLayout::new(80, 300, 40),
        dir.path().join("p.png"),
    )
    .unwrap_err();
    assert!(matches!(err, RenderError::MarginTooLarge { margin: 40, .. }));
}

#[test]
fn test_huge_paragraph_margin_is_rejected_not_overflowed() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = FakeEngine::new();
    let err = render_paragraph(
        &mut engine,
        &request("ক", 24.0, 0),
        &ParagraphLayout::new(800, 600, u32::MAX),
        dir.path().join("p.png"),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        RenderError::MarginTooLarge {
            margin: u32::MAX,
            ..
        }
    ));
}

#[test]
fn test_huge_padding_is_rejected_not_overflowed() {
    let mut engine = FakeEngine::new();
    let err = rasterize(&mut engine, &request("ক", 24.0, u32::MAX / 2)).unwrap_err();
    assert!(matches!(err, RenderError::PaddingTooLarge { .. }));
}
