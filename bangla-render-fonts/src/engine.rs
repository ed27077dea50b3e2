//! The shaping/rasterization engine seam and its swash-backed implementation.
//!
//! Callers only need three operations: the tight ink box of a string, drawing
//! that string at a baseline origin, and line metrics for multi-line layout.
//! Any backend able to shape complex scripts can implement [`ShapingEngine`].

use std::sync::OnceLock;

use image::RgbaImage;
use parking_lot::Mutex;
use swash::scale::image::{Content, Image};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::{Format, Vector};

use crate::canvas::{apply_coverage, blend_over};
use crate::error::FontError;
use crate::font_manager::{FontData, FontManager};
use crate::text_shaper::TextShaper;

/// Screen DPI used to convert point sizes to pixels.
pub const SCREEN_DPI: f32 = 96.0;

/// A font request: family name and size in points.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// Font size in pixels.
    pub fn pixel_size(&self) -> f32 {
        (self.size * SCREEN_DPI / 72.0).max(1.0)
    }
}

/// Tight ink box of a string relative to its baseline origin.
///
/// `left` is the horizontal offset of the first inked column from the pen
/// start; `top` is the offset of the first inked row from the baseline and
/// is negative for ink above the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBounds {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl TextBounds {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Smallest box containing both `self` and `other`. Empty boxes are ignored.
    pub fn union(self, other: TextBounds) -> TextBounds {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = (self.left + self.width as i32).max(other.left + other.width as i32);
        let bottom = (self.top + self.height as i32).max(other.top + other.height as i32);
        TextBounds {
            left,
            top,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        }
    }
}

/// Vertical metrics of a font at a given size, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from the top of a line to the baseline
    pub ascent: f32,
    /// Distance from the baseline to the bottom of a line (positive)
    pub descent: f32,
    /// Baseline-to-baseline distance
    pub line_height: f32,
}

/// Narrow interface to a text shaping and rasterization backend.
pub trait ShapingEngine {
    /// Tight pixel bounding box of `text` shaped with `font`.
    fn bounding_box(&mut self, text: &str, font: &FontSpec) -> Result<TextBounds, FontError>;

    /// Draw `text` anti-aliased onto `canvas` with its baseline origin at `(x, y)`.
    fn draw_text(
        &mut self,
        canvas: &mut RgbaImage,
        font: &FontSpec,
        color: [u8; 4],
        x: i32,
        y: i32,
        text: &str,
    ) -> Result<(), FontError>;

    /// Line metrics for multi-line layout.
    fn line_metrics(&mut self, font: &FontSpec) -> Result<LineMetrics, FontError> {
        let px = font.pixel_size();
        Ok(LineMetrics {
            ascent: px * 0.8,
            descent: px * 0.2,
            line_height: px * 1.2,
        })
    }
}

/// One rasterized glyph positioned relative to the run's baseline origin.
struct PlacedGlyph {
    left: i32,
    top: i32,
    image: Image,
}

/// Shaping engine built on fontdb + rustybuzz + swash.
pub struct SwashEngine {
    font_manager: FontManager,
    text_shaper: TextShaper,
}

impl SwashEngine {
    /// Create an engine over the system's installed fonts.
    pub fn new() -> Self {
        Self::with_font_manager(FontManager::new())
    }

    pub fn with_font_manager(font_manager: FontManager) -> Self {
        Self {
            font_manager,
            text_shaper: TextShaper::new(),
        }
    }

    pub fn font_manager(&self) -> &FontManager {
        &self.font_manager
    }

    pub fn font_manager_mut(&mut self) -> &mut FontManager {
        &mut self.font_manager
    }

    fn resolve(&mut self, font: &FontSpec) -> Result<FontData, FontError> {
        self.font_manager.resolve(&font.family)
    }

    /// Shape `text` and rasterize every glyph, positioned against a baseline
    /// origin at (0, 0).
    fn layout_glyphs(
        &mut self,
        text: &str,
        font: &FontSpec,
    ) -> Result<Vec<PlacedGlyph>, FontError> {
        let font_data = self.resolve(font)?;
        let font_ref = font_data
            .font_ref()
            .ok_or_else(|| FontError::InvalidFontData {
                family: font_data.family.clone(),
            })?;

        let run = self.text_shaper.shape_text(text, &font_data);
        let pixel_size = font.pixel_size();
        let scale = pixel_size / run.units_per_em.max(1.0);

        let mut context = ScaleContext::new();
        let mut scaler = context.builder(font_ref).size(pixel_size).hint(false).build();

        let mut placed = Vec::with_capacity(run.glyphs.len());
        let mut pen_x = 0.0f32;
        let mut pen_y = 0.0f32;
        for glyph in &run.glyphs {
            // Font units are y-up; canvas rows grow downward
            let gx = pen_x + glyph.x_offset * scale;
            let gy = pen_y - glyph.y_offset * scale;
            pen_x += glyph.x_advance * scale;
            pen_y -= glyph.y_advance * scale;

            let origin_x = gx.floor();
            let origin_y = gy.floor();
            let rendered = Render::new(&[
                Source::ColorOutline(0),
                Source::ColorBitmap(StrikeWith::BestFit),
                Source::Outline,
            ])
            .format(Format::Alpha)
            .offset(Vector::new(gx - origin_x, 0.0))
            .render(&mut scaler, glyph.glyph_id as u16);

            let Some(image) = rendered else {
                continue;
            };
            if image.placement.width == 0 || image.placement.height == 0 {
                continue;
            }
            placed.push(PlacedGlyph {
                left: origin_x as i32 + image.placement.left,
                top: origin_y as i32 - image.placement.top,
                image,
            });
        }
        Ok(placed)
    }
}

impl Default for SwashEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapingEngine for SwashEngine {
    fn bounding_box(&mut self, text: &str, font: &FontSpec) -> Result<TextBounds, FontError> {
        let glyphs = self.layout_glyphs(text, font)?;
        Ok(glyphs
            .iter()
            .map(|g| TextBounds {
                left: g.left,
                top: g.top,
                width: g.image.placement.width,
                height: g.image.placement.height,
            })
            .fold(TextBounds::default(), TextBounds::union))
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
        let glyphs = self.layout_glyphs(text, font)?;
        for glyph in &glyphs {
            let width = glyph.image.placement.width as usize;
            let base_x = x as i64 + glyph.left as i64;
            let base_y = y as i64 + glyph.top as i64;
            match glyph.image.content {
                Content::Color => {
                    for (i, px) in glyph.image.data.chunks_exact(4).enumerate() {
                        let (col, row) = ((i % width) as i64, (i / width) as i64);
                        let rgba = [px[0], px[1], px[2], px[3]];
                        blend_over(canvas, base_x + col, base_y + row, rgba);
                    }
                }
                Content::Mask => {
                    for (i, &coverage) in glyph.image.data.iter().enumerate() {
                        let (col, row) = ((i % width) as i64, (i / width) as i64);
                        let rgba = apply_coverage(color, coverage);
                        blend_over(canvas, base_x + col, base_y + row, rgba);
                    }
                }
                Content::SubpixelMask => {
                    // Alpha format is requested above, so this only happens with
                    // unusual rasterizer builds; use the green channel as coverage.
                    let pixels = width * glyph.image.placement.height as usize;
                    let stride = (glyph.image.data.len() / pixels).max(1);
                    for (i, px) in glyph.image.data.chunks_exact(stride).enumerate() {
                        let coverage = px.get(1).copied().unwrap_or(px[0]);
                        let (col, row) = ((i % width) as i64, (i / width) as i64);
                        let rgba = apply_coverage(color, coverage);
                        blend_over(canvas, base_x + col, base_y + row, rgba);
                    }
                }
            }
        }
        log::debug!(
            "Drew {:?} with {} glyphs at ({}, {}) in '{}' {}pt",
            text,
            glyphs.len(),
            x,
            y,
            font.family,
            font.size
        );
        Ok(())
    }

    fn line_metrics(&mut self, font: &FontSpec) -> Result<LineMetrics, FontError> {
        let font_data = self.resolve(font)?;
        let font_ref = font_data
            .font_ref()
            .ok_or_else(|| FontError::InvalidFontData {
                family: font_data.family.clone(),
            })?;
        let metrics = font_ref.metrics(&[]);
        let scale = font.pixel_size() / (metrics.units_per_em as f32).max(1.0);
        let ascent = metrics.ascent * scale;
        let descent = metrics.descent.abs() * scale;
        let leading = metrics.leading * scale;
        Ok(LineMetrics {
            ascent,
            descent,
            line_height: (ascent + descent + leading).max(1.0),
        })
    }
}

static ENGINE: OnceLock<Mutex<SwashEngine>> = OnceLock::new();

/// The process-wide engine, created on first use and never torn down.
///
/// Rendering calls must hold the lock for their whole duration so drawing
/// stays confined to one thread at a time.
pub fn shared_engine() -> &'static Mutex<SwashEngine> {
    ENGINE.get_or_init(|| {
        log::info!("Initializing shared shaping engine");
        Mutex::new(SwashEngine::new())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_size_conversion() {
        assert_eq!(FontSpec::new("x", 72.0).pixel_size(), 96.0);
        assert_eq!(FontSpec::new("x", 0.0).pixel_size(), 1.0);
    }

    #[test]
    fn test_bounds_union() {
        let a = TextBounds {
            left: 0,
            top: -10,
            width: 5,
            height: 10,
        };
        let b = TextBounds {
            left: 8,
            top: -4,
            width: 4,
            height: 8,
        };
        assert_eq!(
            a.union(b),
            TextBounds {
                left: 0,
                top: -10,
                width: 12,
                height: 14,
            }
        );
        assert_eq!(TextBounds::default().union(a), a);
        assert_eq!(a.union(TextBounds::default()), a);
    }

    #[test]
    fn test_shared_engine_is_singleton() {
        let first = shared_engine() as *const _;
        let second = shared_engine() as *const _;
        assert_eq!(first, second);
    }
}
