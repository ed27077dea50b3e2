//! Default value functions for configuration.
//!
//! Each sub-module groups related free functions used as
//! `#[serde(default = "crate::defaults::...")]` attributes on `Config` fields.
//! Everything is re-exported from this module.

mod font;
mod labels;
mod standalone;

// ── Font & text rendering ──────────────────────────────────────────────────
pub use font::{color, font_family, padding};

// ── Figure labels & layout ─────────────────────────────────────────────────
pub use labels::{
    cell_style, layout_bottom, layout_left, layout_right, layout_top, text_style, title_style,
    xlabel_style, ylabel_style,
};

// ── Standalone word / paragraph renders ────────────────────────────────────
pub use standalone::{
    background, paragraph_font_size, paragraph_height, paragraph_margin, paragraph_width,
    text_font_size, text_height, text_width,
};
