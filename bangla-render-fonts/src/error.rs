//! Typed error types for bangla-render-fonts.

use thiserror::Error;

/// Failures surfaced by the shaping engine.
///
/// A missing font family is not an error: the engine substitutes a fallback
/// face and only logs a warning.
#[derive(Debug, Error)]
pub enum FontError {
    /// Neither the requested family, any fallback family, nor any other
    /// installed face could be loaded.
    #[error("no usable fonts are installed on this system")]
    NoFontsAvailable,

    /// A face was found but its data could not be parsed.
    #[error("font data for '{family}' could not be parsed")]
    InvalidFontData {
        /// Family name the face was resolved for.
        family: String,
    },
}
