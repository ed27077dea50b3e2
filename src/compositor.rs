//! The annotation compositor: rasterize a label, compute where it goes, and
//! anchor it on the figure or axes.
//!
//! Titles and axis labels are attached to the figure in figure-fraction
//! space so they can sit outside the axes. Free-form and cell text are
//! attached to the axes in whatever space the caller picks. When a title or
//! axis label replaces native text, the native field is blanked only after
//! the replacement annotation has been inserted.

use bangla_render_config::{Config, LabelStyle, LayoutMargins};
use bangla_render_fonts::{ShapingEngine, shared_engine};

use crate::error::Result;
use crate::figure::{AnnotationId, AxesId, Figure};
use crate::placement::{
    self, CoordSpace, HorizontalAlign, LabelGeometry, Origin, PlacementSpec, VerticalAlign,
};
use crate::raster::{GlyphBitmap, RenderRequest, rasterize};

/// Font size precedence: explicit `font_size`, then the `fontsize` alias,
/// then the per-kind default.
fn resolve_font_size(font_size: Option<f32>, fontsize: Option<f32>, default: f32) -> f32 {
    font_size.or(fontsize).unwrap_or(default)
}

/// Overrides for a title or axis label. Unset fields take the configured style.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LabelOptions {
    pub font_size: Option<f32>,
    /// Alias of `font_size`; loses when both are set
    pub fontsize: Option<f32>,
    pub zoom: Option<f32>,
    pub extra_pad: Option<f32>,
    pub z_order: Option<i32>,
}

impl LabelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_fontsize(mut self, size: f32) -> Self {
        self.fontsize = Some(size);
        self
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn with_extra_pad(mut self, extra_pad: f32) -> Self {
        self.extra_pad = Some(extra_pad);
        self
    }

    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = Some(z_order);
        self
    }

    fn resolve(&self, style: &LabelStyle) -> (f32, LabelGeometry) {
        let size = resolve_font_size(self.font_size, self.fontsize, style.font_size);
        let geometry = LabelGeometry {
            zoom: self.zoom.unwrap_or(style.zoom),
            extra_pad: self.extra_pad.unwrap_or(style.extra_pad),
            z_order: self.z_order.unwrap_or(style.z_order),
        };
        (size, geometry)
    }
}

/// Options for free-form text.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextOptions {
    pub font_size: Option<f32>,
    pub fontsize: Option<f32>,
    pub coords: CoordSpace,
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
    /// Defaults to a zoom proportional to the font size
    pub zoom: Option<f32>,
    pub z_order: Option<i32>,
}

impl TextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_fontsize(mut self, size: f32) -> Self {
        self.fontsize = Some(size);
        self
    }

    pub fn with_coords(mut self, coords: CoordSpace) -> Self {
        self.coords = coords;
        self
    }

    pub fn with_alignment(mut self, horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        self.horizontal = horizontal;
        self.vertical = vertical;
        self
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = Some(z_order);
        self
    }
}

/// Options for heatmap cell text.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CellOptions {
    pub font_size: Option<f32>,
    pub fontsize: Option<f32>,
    pub origin: Origin,
    pub zoom: Option<f32>,
    pub z_order: Option<i32>,
}

impl CellOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_fontsize(mut self, size: f32) -> Self {
        self.fontsize = Some(size);
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = Some(z_order);
        self
    }
}

/// Which native label slot a figure-level label replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelSlot {
    Title,
    XLabel,
    YLabel,
}

/// Places shaped labels on figures using one engine and one configuration.
pub struct Compositor<'a> {
    engine: &'a mut dyn ShapingEngine,
    config: &'a Config,
}

impl<'a> Compositor<'a> {
    pub fn new(engine: &'a mut dyn ShapingEngine, config: &'a Config) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    fn rasterize(&mut self, text: &str, font_size: f32) -> Result<GlyphBitmap> {
        let request = RenderRequest::from_config(text, font_size, self.config);
        rasterize(self.engine, &request)
    }

    /// Title centered above the axes.
    pub fn set_title(
        &mut self,
        fig: &mut Figure,
        axes: AxesId,
        text: &str,
        options: &LabelOptions,
    ) -> Result<AnnotationId> {
        self.place_label(fig, axes, text, options, LabelSlot::Title)
    }

    /// X-axis label hanging below the axes.
    pub fn set_xlabel(
        &mut self,
        fig: &mut Figure,
        axes: AxesId,
        text: &str,
        options: &LabelOptions,
    ) -> Result<AnnotationId> {
        self.place_label(fig, axes, text, options, LabelSlot::XLabel)
    }

    /// Y-axis label, turned a quarter counter-clockwise, left of the axes.
    pub fn set_ylabel(
        &mut self,
        fig: &mut Figure,
        axes: AxesId,
        text: &str,
        options: &LabelOptions,
    ) -> Result<AnnotationId> {
        self.place_label(fig, axes, text, options, LabelSlot::YLabel)
    }

    fn place_label(
        &mut self,
        fig: &mut Figure,
        axes: AxesId,
        text: &str,
        options: &LabelOptions,
        slot: LabelSlot,
    ) -> Result<AnnotationId> {
        let style = match slot {
            LabelSlot::Title => &self.config.title,
            LabelSlot::XLabel => &self.config.xlabel,
            LabelSlot::YLabel => &self.config.ylabel,
        };
        let (font_size, label) = options.resolve(style);

        // Position must be read after any layout adjustment
        let position = fig.get_position(axes)?;
        let geometry = fig.geometry();
        let bitmap = self.rasterize(text, font_size)?;

        let (bitmap, spec) = match slot {
            LabelSlot::Title => {
                let spec = placement::title_placement(bitmap.height(), position, geometry, label);
                (bitmap, spec)
            }
            LabelSlot::XLabel => {
                let spec = placement::xlabel_placement(bitmap.height(), position, geometry, label);
                (bitmap, spec)
            }
            LabelSlot::YLabel => {
                let spec = placement::ylabel_placement(bitmap.height(), position, geometry, label);
                (bitmap.rotated_ccw(), spec)
            }
        };

        let id = fig.add_artist(bitmap, &spec);
        let ax = fig.axes_mut(axes)?;
        match slot {
            LabelSlot::Title => ax.set_title(""),
            LabelSlot::XLabel => ax.set_xlabel(""),
            LabelSlot::YLabel => ax.set_ylabel(""),
        }
        log::debug!("Placed {:?} {:?} at {:?} (z={})", slot, text, spec.anchor, spec.z_order);
        Ok(id)
    }

    /// Free-form text anchored on the axes at `(x, y)` in `options.coords`.
    pub fn place_text(
        &mut self,
        fig: &mut Figure,
        axes: AxesId,
        x: f32,
        y: f32,
        text: &str,
        options: &TextOptions,
    ) -> Result<AnnotationId> {
        fig.axes(axes)?;
        let font_size = resolve_font_size(
            options.font_size,
            options.fontsize,
            self.config.text.font_size,
        );
        let zoom = options
            .zoom
            .unwrap_or_else(|| placement::default_zoom(font_size));
        let z_order = options.z_order.unwrap_or(self.config.text.z_order);
        let spec = placement::text_placement(
            (x, y),
            options.coords,
            options.horizontal,
            options.vertical,
            zoom,
            z_order,
        );
        self.insert(fig, axes, text, font_size, &spec)
    }

    /// Short alias of [`Compositor::place_text`].
    pub fn text(
        &mut self,
        fig: &mut Figure,
        axes: AxesId,
        x: f32,
        y: f32,
        text: &str,
        options: &TextOptions,
    ) -> Result<AnnotationId> {
        self.place_text(fig, axes, x, y, text, options)
    }

    /// Text centered in heatmap cell `(row, col)` of a `rows x cols` grid.
    #[allow(clippy::too_many_arguments)]
    pub fn place_in_cell(
        &mut self,
        fig: &mut Figure,
        axes: AxesId,
        row: usize,
        col: usize,
        text: &str,
        rows: usize,
        cols: usize,
        options: &CellOptions,
    ) -> Result<AnnotationId> {
        fig.axes(axes)?;
        let font_size = resolve_font_size(
            options.font_size,
            options.fontsize,
            self.config.cell.font_size,
        );
        let zoom = options
            .zoom
            .unwrap_or_else(|| placement::default_zoom(font_size));
        let z_order = options.z_order.unwrap_or(self.config.cell.z_order);
        let anchor = placement::cell_center(row, col, rows, cols, options.origin);
        let spec = placement::text_placement(
            anchor,
            CoordSpace::Axes,
            HorizontalAlign::Center,
            VerticalAlign::Center,
            zoom,
            z_order,
        );
        self.insert(fig, axes, text, font_size, &spec)
    }

    fn insert(
        &mut self,
        fig: &mut Figure,
        axes: AxesId,
        text: &str,
        font_size: f32,
        spec: &PlacementSpec,
    ) -> Result<AnnotationId> {
        let bitmap = self.rasterize(text, font_size)?;
        let id = fig.add_axes_artist(axes, bitmap, spec)?;
        log::debug!(
            "Placed text {:?} at {:?} in {} space (z={})",
            text,
            spec.anchor,
            spec.coords,
            spec.z_order
        );
        Ok(id)
    }
}

/// Reserve room around the axes grid for labels placed outside it.
///
/// Call once per figure before placing any title or axis label, since label
/// placement reads the axes position.
pub fn apply_layout(fig: &mut Figure, margins: &LayoutMargins) {
    fig.subplots_adjust(
        Some(margins.left),
        Some(margins.right),
        Some(margins.bottom),
        Some(margins.top),
    );
}

/// Run `f` with a compositor over the process-wide engine, holding its lock
/// for the whole call.
pub fn with_shared_compositor<R>(config: &Config, f: impl FnOnce(&mut Compositor<'_>) -> R) -> R {
    let mut engine = shared_engine().lock();
    let mut compositor = Compositor::new(&mut *engine, config);
    f(&mut compositor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size_precedence() {
        assert_eq!(resolve_font_size(Some(40.0), Some(30.0), 20.0), 40.0);
        assert_eq!(resolve_font_size(None, Some(30.0), 20.0), 30.0);
        assert_eq!(resolve_font_size(None, None, 20.0), 20.0);
    }

    #[test]
    fn test_label_options_fall_back_to_style() {
        let style = LabelStyle {
            font_size: 26.0,
            zoom: 0.4,
            extra_pad: 0.05,
            z_order: 5,
        };
        let (size, geometry) = LabelOptions::new().with_zoom(0.5).resolve(&style);
        assert_eq!(size, 26.0);
        assert_eq!(geometry.zoom, 0.5);
        assert_eq!(geometry.extra_pad, 0.05);
        assert_eq!(geometry.z_order, 5);
    }
}
