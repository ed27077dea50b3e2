//! Configuration system for bangla-render.
//!
//! This crate provides configuration loading, saving, and default values
//! for the Bengali label renderer. It includes:
//!
//! - Per-label-kind defaults (title, x-label, y-label, free text, heatmap cells)
//! - Figure layout margins reserved for labels outside the axes
//! - Defaults for the standalone word/paragraph renderers
//! - Color and background parsing
//! - YAML persistence

pub mod color;
pub mod config;
pub mod defaults;
pub mod error;

// Re-export main types for convenience
pub use color::{Background, Color, ColorParseError};
pub use config::{AnnotationStyle, Config, LabelStyle, LayoutMargins, StandaloneConfig};
pub use error::ConfigError;
