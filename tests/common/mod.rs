//! Shared integration test helpers for bangla-render.
//!
//! Include with `mod common;` at the top of a test file. The fake engines
//! here give exact, font-independent geometry so placement can be checked
//! to the pixel.

#![allow(dead_code)]

use bangla_render::{FontSpec, ShapingEngine, TextBounds};
use bangla_render_fonts::FontError;
use bangla_render_fonts::canvas::blend_over;
use image::RgbaImage;

/// Horizontal ink offset from the pen position reported by [`FakeEngine`].
pub const FAKE_LEFT: i32 = 1;

/// Deterministic engine: every character is a solid block half the pixel
/// size wide, and the ink rises three quarters of the pixel size above the
/// baseline.
#[derive(Debug, Default)]
pub struct FakeEngine {
    /// Every `(text, font size)` passed to `bounding_box`, in order
    pub measured: Vec<(String, f32)>,
    /// Number of `draw_text` calls
    pub draws: usize,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds_for(text: &str, font: &FontSpec) -> TextBounds {
        let chars = text.chars().count();
        if chars == 0 {
            return TextBounds::default();
        }
        let px = font.pixel_size();
        TextBounds {
            left: FAKE_LEFT,
            top: -(px * 0.75).round() as i32,
            width: (chars as f32 * px * 0.5).round() as u32,
            height: px.round() as u32,
        }
    }
}

impl ShapingEngine for FakeEngine {
    fn bounding_box(&mut self, text: &str, font: &FontSpec) -> Result<TextBounds, FontError> {
        self.measured.push((text.to_string(), font.size));
        Ok(Self::bounds_for(text, font))
    }

    fn draw_text(
        &mut self,
        canvas: &mut RgbaImage,
        font: &FontSpec,
        color: [u8; 4],
        x: i32,
        y: i32,
        text: &str,
    ) -> Result<(), FontError> {
        self.draws += 1;
        let b = Self::bounds_for(text, font);
        let x0 = (x + b.left) as i64;
        let y0 = (y + b.top) as i64;
        for dy in 0..b.height as i64 {
            for dx in 0..b.width as i64 {
                blend_over(canvas, x0 + dx, y0 + dy, color);
            }
        }
        Ok(())
    }
}

/// Engine for a system with no usable fonts at all.
#[derive(Debug, Default)]
pub struct FailingEngine;

impl ShapingEngine for FailingEngine {
    fn bounding_box(&mut self, _text: &str, _font: &FontSpec) -> Result<TextBounds, FontError> {
        Err(FontError::NoFontsAvailable)
    }

    fn draw_text(
        &mut self,
        _canvas: &mut RgbaImage,
        _font: &FontSpec,
        _color: [u8; 4],
        _x: i32,
        _y: i32,
        _text: &str,
    ) -> Result<(), FontError> {
        Err(FontError::NoFontsAvailable)
    }
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

/// Number of pixels with non-zero alpha.
pub fn inked_pixels(canvas: &RgbaImage) -> usize {
    canvas.pixels().filter(|p| p.0[3] > 0).count()
}
