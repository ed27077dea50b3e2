//! Bitmap rasterization: shaped text to tightly-cropped RGBA bitmaps, plus
//! the fixed-canvas word and paragraph renderers that write straight to PNG.

use std::path::{Path, PathBuf};

use bangla_render_config::{Background, Color, Config};
use bangla_render_fonts::canvas::new_canvas;
use bangla_render_fonts::{FontSpec, ShapingEngine};
use image::{Rgba, Rgba32FImage, RgbaImage, imageops};

use crate::error::{RenderError, Result};
use crate::placement::{HorizontalAlign, VerticalAlign};

/// Horizontal pen position used by [`render_text`].
const TEXT_LEFT: i32 = 10;
/// Empirical nudge that makes [`render_text`] look vertically centered.
const TEXT_BASELINE_NUDGE: i32 = 5;

/// One rasterization request. Built per call and never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub text: String,
    pub font: FontSpec,
    pub color: Color,
    pub background: Background,
    /// Margin around the ink box, in pixels
    pub padding: u32,
}

impl RenderRequest {
    /// Black text on a transparent background with no padding.
    pub fn new(text: impl Into<String>, font: FontSpec) -> Self {
        Self {
            text: text.into(),
            font,
            color: Color::BLACK,
            background: Background::Transparent,
            padding: 0,
        }
    }

    /// A label request using the configured family, color and padding.
    ///
    /// Label bitmaps are always transparent so they composite cleanly.
    pub fn from_config(text: impl Into<String>, font_size: f32, config: &Config) -> Self {
        Self::new(text, FontSpec::new(config.font_family.clone(), font_size))
            .with_color(config.color)
            .with_padding(config.padding)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }
}

/// A rasterized label: RGBA pixels normalized to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphBitmap {
    pixels: Rgba32FImage,
}

impl GlyphBitmap {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn pixels(&self) -> &Rgba32FImage {
        &self.pixels
    }

    /// Normalize an 8-bit canvas.
    pub fn from_rgba8(canvas: &RgbaImage) -> Self {
        let pixels = Rgba32FImage::from_fn(canvas.width(), canvas.height(), |x, y| {
            let p = canvas.get_pixel(x, y).0;
            Rgba(p.map(|c| c as f32 / 255.0))
        });
        Self { pixels }
    }

    /// Back to 8-bit channels.
    pub fn to_rgba8(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            let p = self.pixels.get_pixel(x, y).0;
            Rgba(p.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
        })
    }

    /// Quarter turn counter-clockwise, the orientation of a y-axis label.
    pub fn rotated_ccw(&self) -> Self {
        Self {
            pixels: imageops::rotate270(&self.pixels),
        }
    }

    /// Quarter turn clockwise; undoes [`GlyphBitmap::rotated_ccw`].
    pub fn rotated_cw(&self) -> Self {
        Self {
            pixels: imageops::rotate90(&self.pixels),
        }
    }
}

/// Rasterize `request.text` into a bitmap cropped to its ink box plus padding.
///
/// The canvas is exactly `(ink width + 2 * padding, ink height + 2 * padding)`
/// and the ink's top-left corner lands at `(padding, padding)`.
pub fn rasterize(engine: &mut dyn ShapingEngine, request: &RenderRequest) -> Result<GlyphBitmap> {
    let bounds = engine.bounding_box(&request.text, &request.font)?;
    let pad = request.padding;
    let too_large = || RenderError::PaddingTooLarge {
        padding: pad,
        ink_width: bounds.width,
        ink_height: bounds.height,
    };
    let padded = |side: u32| {
        pad.checked_mul(2)
            .and_then(|both| side.checked_add(both))
            .filter(|&total| i32::try_from(total).is_ok())
    };
    let width = padded(bounds.width).ok_or_else(too_large)?;
    let height = padded(bounds.height).ok_or_else(too_large)?;

    let mut canvas = new_canvas(width, height, request.background.to_array());
    if !bounds.is_empty() {
        engine.draw_text(
            &mut canvas,
            &request.font,
            request.color.to_array(),
            pad as i32 - bounds.left,
            pad as i32 - bounds.top,
            &request.text,
        )?;
    }

    log::debug!(
        "Rasterized {:?} at {}pt into {}x{} (ink {}x{} at {},{})",
        request.text,
        request.font.size,
        width,
        height,
        bounds.width,
        bounds.height,
        bounds.left,
        bounds.top
    );
    Ok(GlyphBitmap::from_rgba8(&canvas))
}

/// Render a single line into a fixed `width` x `height` canvas and save it as PNG.
///
/// The line starts 10px from the left with its baseline a little below the
/// vertical center. `request.padding` is not used.
pub fn render_text(
    engine: &mut dyn ShapingEngine,
    request: &RenderRequest,
    width: u32,
    height: u32,
    path: impl AsRef<Path>,
) -> Result<PathBuf> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyCanvas { width, height });
    }
    let mut canvas = new_canvas(width, height, request.background.to_array());
    let baseline = height as i32 / 2 + request.font.size.round() as i32 / 2 - TEXT_BASELINE_NUDGE;
    engine.draw_text(
        &mut canvas,
        &request.font,
        request.color.to_array(),
        TEXT_LEFT,
        baseline,
        &request.text,
    )?;
    save_png(&canvas, path.as_ref())
}

/// Canvas, margin and text flow for [`render_paragraph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphLayout {
    pub width: u32,
    pub height: u32,
    /// Gap between each canvas edge and the text rectangle, in pixels
    pub margin: u32,
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
}

impl ParagraphLayout {
    /// Left/top flow in a `width` x `height` canvas.
    pub fn new(width: u32, height: u32, margin: u32) -> Self {
        Self {
            width,
            height,
            margin,
            horizontal: HorizontalAlign::Left,
            vertical: VerticalAlign::Top,
        }
    }

    pub fn with_alignment(mut self, horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        self.horizontal = horizontal;
        self.vertical = vertical;
        self
    }
}

/// Render word-wrapped text inside the margin rectangle of a fixed canvas
/// and save it as PNG.
///
/// Words wrap at whitespace; a word wider than the rectangle gets a line of
/// its own and overflows. Explicit newlines always break.
pub fn render_paragraph(
    engine: &mut dyn ShapingEngine,
    request: &RenderRequest,
    layout: &ParagraphLayout,
    path: impl AsRef<Path>,
) -> Result<PathBuf> {
    let ParagraphLayout {
        width,
        height,
        margin,
        ..
    } = *layout;
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyCanvas { width, height });
    }
    let inner = |side: u32| {
        margin
            .checked_mul(2)
            .and_then(|both| side.checked_sub(both))
            .filter(|&rest| rest > 0)
    };
    let (Some(rect_width), Some(rect_height)) = (inner(width), inner(height)) else {
        return Err(RenderError::MarginTooLarge {
            width,
            height,
            margin,
        });
    };

    let lines = wrap_words(engine, &request.text, &request.font, rect_width)?;
    let metrics = engine.line_metrics(&request.font)?;
    let block_height = metrics.line_height * lines.len() as f32;

    // Vertical fractions are measured from the bottom, so top flow means no slack above
    let slack = rect_height as f32 - block_height;
    let block_top = margin as f32 + slack * (1.0 - layout.vertical.fraction());

    let mut canvas = new_canvas(width, height, request.background.to_array());
    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let bounds = engine.bounding_box(line, &request.font)?;
        let line_slack = rect_width as f32 - bounds.width as f32;
        let x = margin as f32 + line_slack * layout.horizontal.fraction() - bounds.left as f32;
        let baseline = block_top + metrics.ascent + metrics.line_height * i as f32;
        engine.draw_text(
            &mut canvas,
            &request.font,
            request.color.to_array(),
            x.round() as i32,
            baseline.round() as i32,
            line,
        )?;
    }

    log::debug!(
        "Laid out paragraph in {} lines within {}x{}",
        lines.len(),
        rect_width,
        rect_height
    );
    save_png(&canvas, path.as_ref())
}

/// Greedy word wrap measured with the engine's ink box.
fn wrap_words(
    engine: &mut dyn ShapingEngine,
    text: &str,
    font: &FontSpec,
    max_width: u32,
) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if engine.bounding_box(&candidate, font)?.width <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }
    Ok(lines)
}

fn save_png(canvas: &RgbaImage, path: &Path) -> Result<PathBuf> {
    canvas
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|source| RenderError::ImageSave {
            path: path.to_path_buf(),
            source,
        })?;
    log::info!("Saved {}x{} render to {:?}", canvas.width(), canvas.height(), path);
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap() -> GlyphBitmap {
        let canvas = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8 * 80, y as u8 * 120, 7, 255]));
        GlyphBitmap::from_rgba8(&canvas)
    }

    #[test]
    fn test_normalized_range() {
        let b = bitmap();
        for p in b.pixels().pixels() {
            assert!(p.0.iter().all(|c| (0.0..=1.0).contains(c)));
        }
        assert_eq!(b.pixels().get_pixel(0, 0).0[3], 1.0);
    }

    #[test]
    fn test_rgba8_roundtrip_is_exact() {
        let canvas = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8 * 63, y as u8 * 17, 255, 128]));
        assert_eq!(GlyphBitmap::from_rgba8(&canvas).to_rgba8(), canvas);
    }

    #[test]
    fn test_ccw_rotation_swaps_dimensions() {
        let rotated = bitmap().rotated_ccw();
        assert_eq!((rotated.width(), rotated.height()), (2, 3));
        // Top-right pixel moves to top-left under a counter-clockwise turn
        assert_eq!(
            rotated.pixels().get_pixel(0, 0),
            bitmap().pixels().get_pixel(2, 0)
        );
    }

    #[test]
    fn test_request_builder() {
        let request = RenderRequest::new("ক", FontSpec::new("Noto Sans Bengali", 20.0))
            .with_padding(3)
            .with_background(Background::Opaque(Color::WHITE));
        assert_eq!(request.padding, 3);
        assert_eq!(request.color, Color::BLACK);
        assert_eq!(request.background, Background::Opaque(Color::WHITE));
    }
}
