//! Typed error types for bangla-render.
//!
//! Normal misuse (unknown coordinate or alignment tokens, anchors outside the
//! figure) never reaches this type; those fall back or clamp silently.

use std::path::PathBuf;

use bangla_render_fonts::FontError;
use thiserror::Error;

/// Top-level error type for rasterization, placement and compositing.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The shaping engine could not resolve any face or parse the one it found.
    #[error("shaping engine error: {0}")]
    Font(#[from] FontError),

    /// A standalone render or composited figure could not be written.
    #[error("failed to write image '{path}': {source}")]
    ImageSave {
        /// Destination path.
        path: PathBuf,
        /// Underlying encoder or I/O error.
        #[source]
        source: image::ImageError,
    },

    /// A fixed-size canvas was requested with a zero dimension.
    #[error("canvas must be non-empty, got {width}x{height}")]
    EmptyCanvas {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// The paragraph margin consumes the whole canvas.
    #[error("a {margin}px margin leaves no room in a {width}x{height} canvas")]
    MarginTooLarge {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
        /// Requested margin in pixels.
        margin: u32,
    },

    /// Ink box plus padding does not fit a canvas dimension.
    #[error("{padding}px padding overflows a canvas around a {ink_width}x{ink_height} ink box")]
    PaddingTooLarge {
        /// Requested padding in pixels.
        padding: u32,
        /// Measured ink width in pixels.
        ink_width: u32,
        /// Measured ink height in pixels.
        ink_height: u32,
    },

    /// An axes handle does not belong to the figure it was used with.
    #[error("figure has no axes with index {0}")]
    UnknownAxes(usize),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RenderError>;
