//! Placement geometry: converting a label bitmap's pixel size into
//! figure-fraction or axes-fraction anchors.
//!
//! All anchors are fractions rather than pixels so they stay valid when the
//! figure is re-rendered at another size or DPI. Every function here is pure;
//! the compositor feeds it the bitmap size, the axes position and the figure
//! geometry read at placement time.

use std::fmt;

use crate::figure::Bbox;

/// Highest figure fraction a title anchor may reach.
pub const TITLE_MAX_FRACTION: f32 = 0.99;

/// Lowest figure fraction an x-label or y-label anchor may reach.
pub const LABEL_MIN_FRACTION: f32 = 0.0;

/// Coordinate system an anchor point is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordSpace {
    /// The axes' data coordinates (through its x/y limits)
    #[default]
    Data,
    /// (0, 0) is the bottom-left and (1, 1) the top-right of the axes
    Axes,
    /// (0, 0) is the bottom-left and (1, 1) the top-right of the whole figure
    Figure,
}

impl CoordSpace {
    /// Parse a coordinate-space token, falling back to data space for
    /// anything unrecognized.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "data" => CoordSpace::Data,
            "axes" | "axes fraction" => CoordSpace::Axes,
            "figure" | "figure fraction" => CoordSpace::Figure,
            other => {
                log::debug!("Unknown coordinate space '{}', using data space", other);
                CoordSpace::Data
            }
        }
    }
}

impl fmt::Display for CoordSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CoordSpace::Data => "data",
            CoordSpace::Axes => "axes",
            CoordSpace::Figure => "figure",
        })
    }
}

/// Horizontal alignment request for free-form text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl HorizontalAlign {
    /// Parse `left`/`center`/`right`; anything else is centered.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "left" => HorizontalAlign::Left,
            "center" | "centre" => HorizontalAlign::Center,
            "right" => HorizontalAlign::Right,
            other => {
                log::debug!("Unknown horizontal alignment '{}', centering", other);
                HorizontalAlign::Center
            }
        }
    }

    /// Fraction of the bitmap width, from its left edge, that lands on the anchor.
    pub fn fraction(self) -> f32 {
        match self {
            HorizontalAlign::Left => 0.0,
            HorizontalAlign::Center => 0.5,
            HorizontalAlign::Right => 1.0,
        }
    }
}

/// Vertical alignment request for free-form text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    Bottom,
    #[default]
    Center,
    Top,
}

impl VerticalAlign {
    /// Parse `bottom`/`baseline`/`center`/`middle`/`top`; anything else is centered.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "bottom" | "baseline" => VerticalAlign::Bottom,
            "center" | "centre" | "middle" => VerticalAlign::Center,
            "top" => VerticalAlign::Top,
            other => {
                log::debug!("Unknown vertical alignment '{}', centering", other);
                VerticalAlign::Center
            }
        }
    }

    /// Fraction of the bitmap height, from its bottom edge, that lands on the anchor.
    pub fn fraction(self) -> f32 {
        match self {
            VerticalAlign::Bottom => 0.0,
            VerticalAlign::Center => 0.5,
            VerticalAlign::Top => 1.0,
        }
    }
}

/// Which end of a heatmap's rows is row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// Row 0 is drawn at the top
    #[default]
    Upper,
    /// Row 0 is drawn at the bottom
    Lower,
}

impl Origin {
    /// `upper` selects [`Origin::Upper`]; every other token is treated as lower.
    pub fn from_token(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("upper") {
            Origin::Upper
        } else {
            Origin::Lower
        }
    }
}

/// The point within a bitmap's own box, as fractions measured from its
/// bottom-left corner, that is placed exactly on the anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Alignment {
    pub const CENTER: Alignment = Alignment::new(0.5, 0.5);
    /// Top-center: the bitmap hangs below the anchor.
    pub const TOP_CENTER: Alignment = Alignment::new(0.5, 1.0);

    pub const fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn from_aligns(ha: HorizontalAlign, va: VerticalAlign) -> Self {
        Self::new(ha.fraction(), va.fraction())
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::CENTER
    }
}

/// Everything the compositor needs to anchor a bitmap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementSpec {
    pub coords: CoordSpace,
    pub anchor: (f32, f32),
    pub alignment: Alignment,
    pub zoom: f32,
    pub z_order: i32,
}

/// Figure size in pixels (`inches * dpi`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureGeometry {
    pub width_px: f32,
    pub height_px: f32,
}

impl FigureGeometry {
    pub fn new(size_inches: (f32, f32), dpi: f32) -> Self {
        Self {
            width_px: size_inches.0 * dpi,
            height_px: size_inches.1 * dpi,
        }
    }
}

/// Zoom, padding and stacking for a label attached outside the axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelGeometry {
    pub zoom: f32,
    /// Extra gap as a figure fraction (of height for titles and x-labels,
    /// of width for y-labels)
    pub extra_pad: f32,
    pub z_order: i32,
}

/// Offset, as a figure fraction, between the axes edge and a label anchor:
/// the zoomed bitmap extent over the figure extent, plus padding.
pub fn label_delta(bitmap_px: u32, zoom: f32, figure_px: f32, extra_pad: f32) -> f32 {
    if figure_px <= 0.0 {
        return extra_pad;
    }
    (bitmap_px as f32 * zoom) / figure_px + extra_pad
}

/// Title: centered above the axes, clamped to [0, 0.99].
pub fn title_placement(
    bitmap_height: u32,
    axes: Bbox,
    figure: FigureGeometry,
    label: LabelGeometry,
) -> PlacementSpec {
    let delta = label_delta(bitmap_height, label.zoom, figure.height_px, label.extra_pad);
    let x = axes.x0 + axes.width / 2.0;
    let y = (axes.y1() + delta).clamp(LABEL_MIN_FRACTION, TITLE_MAX_FRACTION);
    PlacementSpec {
        coords: CoordSpace::Figure,
        anchor: (x, y),
        alignment: Alignment::CENTER,
        zoom: label.zoom,
        z_order: label.z_order,
    }
}

/// X-label: hangs below the axes' bottom edge, clamped at 0.
pub fn xlabel_placement(
    bitmap_height: u32,
    axes: Bbox,
    figure: FigureGeometry,
    label: LabelGeometry,
) -> PlacementSpec {
    let delta = label_delta(bitmap_height, label.zoom, figure.height_px, label.extra_pad);
    let x = axes.x0 + axes.width / 2.0;
    let y = (axes.y0 - delta).max(LABEL_MIN_FRACTION);
    PlacementSpec {
        coords: CoordSpace::Figure,
        anchor: (x, y),
        alignment: Alignment::TOP_CENTER,
        zoom: label.zoom,
        z_order: label.z_order,
    }
}

/// Y-label: left of the axes, vertically centered, clamped at 0.
///
/// `unrotated_height` is the height of the bitmap before its quarter turn,
/// which becomes the rotated label's horizontal extent.
pub fn ylabel_placement(
    unrotated_height: u32,
    axes: Bbox,
    figure: FigureGeometry,
    label: LabelGeometry,
) -> PlacementSpec {
    let delta = label_delta(unrotated_height, label.zoom, figure.width_px, label.extra_pad);
    let x = (axes.x0 - delta).max(LABEL_MIN_FRACTION);
    let y = axes.y0 + axes.height / 2.0;
    PlacementSpec {
        coords: CoordSpace::Figure,
        anchor: (x, y),
        alignment: Alignment::CENTER,
        zoom: label.zoom,
        z_order: label.z_order,
    }
}

/// Free-form text at a caller-chosen point. The anchor is used as given.
pub fn text_placement(
    anchor: (f32, f32),
    coords: CoordSpace,
    ha: HorizontalAlign,
    va: VerticalAlign,
    zoom: f32,
    z_order: i32,
) -> PlacementSpec {
    PlacementSpec {
        coords,
        anchor,
        alignment: Alignment::from_aligns(ha, va),
        zoom,
        z_order,
    }
}

/// Zoom that keeps apparent glyph size roughly proportional to the requested
/// font size.
pub fn default_zoom(font_size: f32) -> f32 {
    0.35 * (font_size / 24.0)
}

/// Center of heatmap cell `(row, col)` in axes-fraction space.
pub fn cell_center(row: usize, col: usize, rows: usize, cols: usize, origin: Origin) -> (f32, f32) {
    let rows = rows.max(1) as f32;
    let cols = cols.max(1) as f32;
    let x = (col as f32 + 0.5) / cols;
    let from_bottom = (row as f32 + 0.5) / rows;
    let y = match origin {
        Origin::Upper => 1.0 - from_bottom,
        Origin::Lower => from_bottom,
    };
    (x, y)
}
