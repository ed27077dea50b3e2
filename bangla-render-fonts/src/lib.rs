//! Font discovery, complex-script shaping, and glyph rasterization for bangla-render.
//!
//! This crate provides:
//! - Font loading by family name with system font discovery and silent substitution
//! - HarfBuzz-based text shaping via rustybuzz for conjuncts, vowel signs and reordering
//! - Anti-aliased glyph rasterization via swash onto RGBA canvases
//!
//! # Architecture
//!
//! Callers talk to the [`ShapingEngine`] trait, which only knows how to measure
//! the tight ink box of a string and draw it at a baseline origin. The
//! [`SwashEngine`] implements it on top of the `FontManager` (family
//! resolution through fontdb) and the `TextShaper` (rustybuzz). A single
//! engine instance per process is available through [`shared_engine`].

pub mod canvas;
pub mod engine;
pub mod error;
pub mod font_manager;
pub mod text_shaper;

// Re-export main types for convenience
pub use engine::{FontSpec, LineMetrics, ShapingEngine, SwashEngine, TextBounds, shared_engine};
pub use error::FontError;
pub use font_manager::{FALLBACK_FAMILIES, FontData, FontManager};
pub use text_shaper::{ShapedGlyph, ShapedRun, ShapingOptions, TextShaper};
