//! Default values for the standalone word and paragraph renderers.

use crate::color::Background;

pub fn background() -> Background {
    Background::default()
}

pub fn text_width() -> u32 {
    800
}

pub fn text_height() -> u32 {
    200
}

pub fn text_font_size() -> f32 {
    48.0
}

pub fn paragraph_width() -> u32 {
    800
}

pub fn paragraph_height() -> u32 {
    300
}

pub fn paragraph_font_size() -> f32 {
    28.0
}

pub fn paragraph_margin() -> u32 {
    40
}
