//! Default values for figure labels and subplot margins.

use crate::config::{AnnotationStyle, LabelStyle};

pub fn title_style() -> LabelStyle {
    LabelStyle {
        font_size: 32.0,
        zoom: 0.40,
        extra_pad: 0.01, // Fraction of figure height
        z_order: 5,
    }
}

pub fn xlabel_style() -> LabelStyle {
    LabelStyle {
        font_size: 26.0,
        zoom: 0.40,
        extra_pad: 0.01, // Fraction of figure height
        z_order: 5,
    }
}

pub fn ylabel_style() -> LabelStyle {
    LabelStyle {
        font_size: 26.0,
        zoom: 0.40,
        extra_pad: 0.05, // Fraction of figure width
        z_order: 5,
    }
}

pub fn text_style() -> AnnotationStyle {
    AnnotationStyle {
        font_size: 18.0,
        z_order: 5,
    }
}

pub fn cell_style() -> AnnotationStyle {
    AnnotationStyle {
        font_size: 22.0,
        z_order: 6,
    }
}

pub fn layout_left() -> f32 {
    0.18
}

pub fn layout_right() -> f32 {
    0.88
}

pub fn layout_bottom() -> f32 {
    0.22
}

pub fn layout_top() -> f32 {
    0.84
}
