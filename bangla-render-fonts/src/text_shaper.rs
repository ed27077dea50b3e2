/// Text shaping module using HarfBuzz via rustybuzz
///
/// This module provides text shaping capabilities for:
/// - Bengali conjuncts (juktakkhor) formed through the hasanta/virama
/// - Pre-base vowel signs that must be reordered before their consonant
/// - Split vowels and combining marks positioned against their base
/// - Kerning and contextual alternates
///
/// # Architecture
///
/// The text shaping pipeline:
/// 1. Script, language and direction guessing (rustybuzz)
/// 2. OpenType feature selection
/// 3. Text shaping (rustybuzz)
/// 4. Glyph positioning and advances in font units
///
/// Every call shapes afresh; results are not cached.
use rustybuzz::{Face, Feature, GlyphBuffer, UnicodeBuffer};
use std::str::FromStr;

use crate::font_manager::FontData;

/// A single shaped glyph with positioning information, in font units
#[derive(Debug, Clone, Copy)]
pub struct ShapedGlyph {
    /// Glyph ID from the font
    pub glyph_id: u32,

    /// Horizontal advance width
    pub x_advance: f32,

    /// Vertical advance (usually 0 for horizontal text)
    pub y_advance: f32,

    /// Horizontal offset from the current position
    pub x_offset: f32,

    /// Vertical offset from the baseline
    pub y_offset: f32,
}

/// Options for text shaping
#[derive(Debug, Clone)]
pub struct ShapingOptions {
    /// Enable standard ligatures
    pub enable_ligatures: bool,

    /// Enable kerning adjustments
    pub enable_kerning: bool,

    /// Enable contextual alternates
    pub enable_contextual_alternates: bool,
}

impl Default for ShapingOptions {
    fn default() -> Self {
        Self {
            enable_ligatures: true,
            enable_kerning: true,
            enable_contextual_alternates: true,
        }
    }
}

/// Result of shaping a text run
#[derive(Debug, Clone)]
pub struct ShapedRun {
    /// The shaped glyphs
    pub glyphs: Vec<ShapedGlyph>,

    /// Total advance width in font units
    pub total_advance: f32,

    /// Units per em of the face the run was shaped with
    pub units_per_em: f32,
}

/// Text shaper using HarfBuzz via rustybuzz
pub struct TextShaper {
    /// OpenType features derived from the shaping options
    features: Vec<Feature>,
}

impl TextShaper {
    /// Create a new text shaper with default options
    pub fn new() -> Self {
        Self::with_options(&ShapingOptions::default())
    }

    /// Create a new text shaper with specific options
    pub fn with_options(options: &ShapingOptions) -> Self {
        Self {
            features: Self::build_features(options),
        }
    }

    /// Shape a text run using rustybuzz
    ///
    /// # Returns
    /// A `ShapedRun` containing the shaped glyphs in font units. An empty run
    /// is returned when the face cannot be parsed by rustybuzz.
    pub fn shape_text(&self, text: &str, font: &FontData) -> ShapedRun {
        let Some(face) = Face::from_slice(font.data.as_slice(), font.face_index) else {
            log::warn!("rustybuzz could not parse face for '{}'", font.family);
            return ShapedRun {
                glyphs: vec![],
                total_advance: 0.0,
                units_per_em: 1000.0,
            };
        };

        let mut unicode_buffer = UnicodeBuffer::new();
        unicode_buffer.push_str(text);
        unicode_buffer.guess_segment_properties();

        let glyph_buffer = rustybuzz::shape(&face, &self.features, unicode_buffer);
        let glyphs = self.extract_shaped_glyphs(&glyph_buffer);
        let total_advance = glyphs.iter().map(|g| g.x_advance).sum();

        log::trace!("Shaped {:?} into {} glyphs", text, glyphs.len());

        ShapedRun {
            glyphs,
            total_advance,
            units_per_em: face.units_per_em() as f32,
        }
    }

    fn build_features(options: &ShapingOptions) -> Vec<Feature> {
        // Glyph composition and localized forms are required for Indic shaping
        let mut tags = vec!["ccmp", "locl"];
        if options.enable_ligatures {
            tags.extend(["liga", "clig"]);
        }
        if options.enable_kerning {
            tags.push("kern");
        }
        if options.enable_contextual_alternates {
            tags.push("calt");
        }
        tags.into_iter()
            .filter_map(|tag| Feature::from_str(tag).ok())
            .collect()
    }

    /// Extract shaped glyphs from HarfBuzz glyph buffer
    fn extract_shaped_glyphs(&self, buffer: &GlyphBuffer) -> Vec<ShapedGlyph> {
        let glyph_infos = buffer.glyph_infos();
        let glyph_positions = buffer.glyph_positions();

        glyph_infos
            .iter()
            .zip(glyph_positions.iter())
            .map(|(info, pos)| ShapedGlyph {
                glyph_id: info.glyph_id,
                x_advance: pos.x_advance as f32,
                y_advance: pos.y_advance as f32,
                x_offset: pos.x_offset as f32,
                y_offset: pos.y_offset as f32,
            })
            .collect()
    }
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_follow_options() {
        let all = TextShaper::new();
        assert_eq!(all.features.len(), 6);

        let minimal = TextShaper::with_options(&ShapingOptions {
            enable_ligatures: false,
            enable_kerning: false,
            enable_contextual_alternates: false,
        });
        assert_eq!(minimal.features.len(), 2);
    }

    #[test]
    fn test_unparseable_face_gives_empty_run() {
        let shaper = TextShaper::new();
        let bogus = FontData {
            data: std::sync::Arc::new(vec![0u8; 16]),
            face_index: 0,
            family: "bogus".to_string(),
        };
        let run = shaper.shape_text("বাংলা", &bogus);
        assert!(run.glyphs.is_empty());
        assert_eq!(run.total_advance, 0.0);
    }
}
