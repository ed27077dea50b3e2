//! Default values for font and text-rendering settings.

use crate::color::Color;

pub fn font_family() -> String {
    "Noto Sans Bengali".to_string()
}

pub fn color() -> Color {
    Color::BLACK
}

pub fn padding() -> u32 {
    10 // Pixels of transparent margin around the tight glyph box
}
