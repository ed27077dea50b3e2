//! A small figure model: axes laid out on a subplot grid, coordinate
//! transforms between data, axes-fraction and figure-fraction space, and
//! anchored image annotations composited at render time.
//!
//! Only what the label compositor and the demo figures need is modeled:
//! line series, heatmap grids, an axes frame and image annotations. Native
//! title and axis-label strings are stored but never drawn.

use std::path::{Path, PathBuf};

use bangla_render_config::Color;
use bangla_render_fonts::canvas::{blend_over, new_canvas};
use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::error::{RenderError, Result};
use crate::placement::{Alignment, CoordSpace, FigureGeometry, Origin, PlacementSpec};
use crate::raster::GlyphBitmap;

/// Points per inch; annotation zoom is relative to a 72 DPI figure.
const POINTS_PER_INCH: f32 = 72.0;
/// Axes frame color.
const FRAME_COLOR: [u8; 4] = [0, 0, 0, 255];

/// A rectangle in figure-fraction space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bbox {
    pub x0: f32,
    pub y0: f32,
    pub width: f32,
    pub height: f32,
}

impl Bbox {
    pub fn new(x0: f32, y0: f32, width: f32, height: f32) -> Self {
        Self {
            x0,
            y0,
            width,
            height,
        }
    }

    pub fn x1(&self) -> f32 {
        self.x0 + self.width
    }

    pub fn y1(&self) -> f32 {
        self.y0 + self.height
    }
}

/// Margins and gaps of the subplot grid, as figure fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubplotParams {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    /// Horizontal gap between columns, relative to the average axes width
    pub wspace: f32,
    /// Vertical gap between rows, relative to the average axes height
    pub hspace: f32,
}

impl Default for SubplotParams {
    fn default() -> Self {
        Self {
            left: 0.125,
            right: 0.9,
            bottom: 0.11,
            top: 0.88,
            wspace: 0.2,
            hspace: 0.2,
        }
    }
}

/// Handle to one axes of a [`Figure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxesId(usize);

impl AxesId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Opaque handle to an inserted annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationId(u64);

/// A bitmap anchored at a point.
///
/// The `box_alignment` fraction of the scaled bitmap, measured from its
/// bottom-left corner, is placed on `xy`.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    id: AnnotationId,
    pub bitmap: GlyphBitmap,
    pub xy: (f32, f32),
    pub coords: CoordSpace,
    pub box_alignment: Alignment,
    pub zoom: f32,
    pub frame_on: bool,
    pub z_order: i32,
}

impl Annotation {
    pub fn id(&self) -> AnnotationId {
        self.id
    }
}

/// A data series drawn as connected segments.
#[derive(Debug, Clone, PartialEq)]
struct LineSeries {
    points: Vec<(f32, f32)>,
    color: [u8; 4],
}

/// Values drawn as colored unit cells centered on integer data coordinates.
#[derive(Debug, Clone, PartialEq)]
struct Heatmap {
    values: Vec<Vec<f32>>,
    min: f32,
    max: f32,
}

/// One plot area.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    row: usize,
    col: usize,
    pub xlim: (f32, f32),
    pub ylim: (f32, f32),
    title: String,
    xlabel: String,
    ylabel: String,
    lines: Vec<LineSeries>,
    heatmap: Option<Heatmap>,
    artists: Vec<Annotation>,
}

impl Axes {
    fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            xlim: (0.0, 1.0),
            ylim: (0.0, 1.0),
            title: String::new(),
            xlabel: String::new(),
            ylabel: String::new(),
            lines: Vec::new(),
            heatmap: None,
            artists: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, text: impl Into<String>) {
        self.title = text.into();
    }

    pub fn xlabel(&self) -> &str {
        &self.xlabel
    }

    pub fn set_xlabel(&mut self, text: impl Into<String>) {
        self.xlabel = text.into();
    }

    pub fn ylabel(&self) -> &str {
        &self.ylabel
    }

    pub fn set_ylabel(&mut self, text: impl Into<String>) {
        self.ylabel = text.into();
    }

    pub fn set_xlim(&mut self, left: f32, right: f32) {
        self.xlim = (left, right);
    }

    pub fn set_ylim(&mut self, bottom: f32, top: f32) {
        self.ylim = (bottom, top);
    }

    pub fn artists(&self) -> &[Annotation] {
        &self.artists
    }

    /// Draw a line through `points` and fit the limits to all series.
    pub fn plot(&mut self, points: Vec<(f32, f32)>, color: Color) {
        self.lines.push(LineSeries {
            points,
            color: color.to_array(),
        });
        self.autoscale();
    }

    /// Show a `rows x cols` grid of values with cell `(r, c)` centered on data
    /// point `(c, r)`. Limits are set so cells fill the axes.
    pub fn imshow(&mut self, values: Vec<Vec<f32>>, origin: Origin) {
        let rows = values.len();
        let cols = values.iter().map(Vec::len).max().unwrap_or(0);
        let (min, max) = values
            .iter()
            .flatten()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        self.xlim = (-0.5, cols as f32 - 0.5);
        self.ylim = match origin {
            Origin::Upper => (rows as f32 - 0.5, -0.5),
            Origin::Lower => (-0.5, rows as f32 - 0.5),
        };
        self.heatmap = Some(Heatmap { values, min, max });
    }

    fn autoscale(&mut self) {
        let mut points = self.lines.iter().flat_map(|l| l.points.iter().copied());
        let Some(first) = points.next() else {
            return;
        };
        let (mut x0, mut x1, mut y0, mut y1) = (first.0, first.0, first.1, first.1);
        for (x, y) in points {
            x0 = x0.min(x);
            x1 = x1.max(x);
            y0 = y0.min(y);
            y1 = y1.max(y);
        }
        let mx = ((x1 - x0) * 0.05).max(f32::EPSILON);
        let my = ((y1 - y0) * 0.05).max(f32::EPSILON);
        self.xlim = (x0 - mx, x1 + mx);
        self.ylim = (y0 - my, y1 + my);
    }

    /// Data coordinates to axes fraction.
    fn data_to_axes(&self, (x, y): (f32, f32)) -> (f32, f32) {
        (fraction_in(x, self.xlim), fraction_in(y, self.ylim))
    }
}

fn fraction_in(v: f32, (lo, hi): (f32, f32)) -> f32 {
    let span = hi - lo;
    if span == 0.0 { 0.5 } else { (v - lo) / span }
}

/// A figure of fixed size and DPI holding a grid of axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    size_inches: (f32, f32),
    dpi: f32,
    pub facecolor: Color,
    subplotpars: SubplotParams,
    nrows: usize,
    ncols: usize,
    axes: Vec<Axes>,
    artists: Vec<Annotation>,
    next_id: u64,
}

impl Figure {
    /// A figure with a single axes.
    pub fn new(size_inches: (f32, f32), dpi: f32) -> Self {
        Self::subplots(1, 1, size_inches, dpi)
    }

    /// A figure with an `nrows x ncols` grid of axes, numbered row-major.
    pub fn subplots(nrows: usize, ncols: usize, size_inches: (f32, f32), dpi: f32) -> Self {
        let nrows = nrows.max(1);
        let ncols = ncols.max(1);
        let axes = (0..nrows)
            .flat_map(|r| (0..ncols).map(move |c| Axes::new(r, c)))
            .collect();
        Self {
            size_inches,
            dpi,
            facecolor: Color::WHITE,
            subplotpars: SubplotParams::default(),
            nrows,
            ncols,
            axes,
            artists: Vec::new(),
            next_id: 0,
        }
    }

    pub fn size_inches(&self) -> (f32, f32) {
        self.size_inches
    }

    pub fn set_size_inches(&mut self, width: f32, height: f32) {
        self.size_inches = (width, height);
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    pub fn set_dpi(&mut self, dpi: f32) {
        self.dpi = dpi;
    }

    /// Size in pixels at the current DPI.
    pub fn geometry(&self) -> FigureGeometry {
        FigureGeometry::new(self.size_inches, self.dpi)
    }

    pub fn subplot_params(&self) -> SubplotParams {
        self.subplotpars
    }

    /// Update any subset of the subplot margins.
    pub fn subplots_adjust(
        &mut self,
        left: Option<f32>,
        right: Option<f32>,
        bottom: Option<f32>,
        top: Option<f32>,
    ) {
        let p = &mut self.subplotpars;
        p.left = left.unwrap_or(p.left);
        p.right = right.unwrap_or(p.right);
        p.bottom = bottom.unwrap_or(p.bottom);
        p.top = top.unwrap_or(p.top);
        log::debug!(
            "Subplot margins now left={} right={} bottom={} top={}",
            p.left,
            p.right,
            p.bottom,
            p.top
        );
    }

    pub fn axes_ids(&self) -> impl Iterator<Item = AxesId> + use<> {
        (0..self.axes.len()).map(AxesId)
    }

    /// The top-left axes; every figure has at least one.
    pub fn first_axes(&self) -> AxesId {
        AxesId(0)
    }

    pub fn axes(&self, id: AxesId) -> Result<&Axes> {
        self.axes.get(id.0).ok_or(RenderError::UnknownAxes(id.0))
    }

    pub fn axes_mut(&mut self, id: AxesId) -> Result<&mut Axes> {
        self.axes.get_mut(id.0).ok_or(RenderError::UnknownAxes(id.0))
    }

    /// Current position of an axes in figure fraction, derived from the
    /// subplot parameters at the time of the call.
    pub fn get_position(&self, id: AxesId) -> Result<Bbox> {
        let axes = self.axes(id)?;
        Ok(self.grid_cell(axes.row, axes.col))
    }

    fn grid_cell(&self, row: usize, col: usize) -> Bbox {
        let p = &self.subplotpars;
        let (nrows, ncols) = (self.nrows as f32, self.ncols as f32);
        let cell_w = (p.right - p.left) / (ncols + p.wspace * (ncols - 1.0));
        let cell_h = (p.top - p.bottom) / (nrows + p.hspace * (nrows - 1.0));
        let x0 = p.left + col as f32 * cell_w * (1.0 + p.wspace);
        let y1 = p.top - row as f32 * cell_h * (1.0 + p.hspace);
        Bbox::new(x0, y1 - cell_h, cell_w, cell_h)
    }

    /// Convert a point to figure fraction.
    ///
    /// Without an axes, every coordinate space is read as figure fraction.
    pub fn to_figure_fraction(
        &self,
        axes: Option<AxesId>,
        coords: CoordSpace,
        point: (f32, f32),
    ) -> Result<(f32, f32)> {
        let Some(id) = axes else {
            return Ok(point);
        };
        let ax = self.axes(id)?;
        Ok(self.resolve(ax, coords, point))
    }

    fn resolve(&self, ax: &Axes, coords: CoordSpace, point: (f32, f32)) -> (f32, f32) {
        let local = match coords {
            CoordSpace::Figure => return point,
            CoordSpace::Axes => point,
            CoordSpace::Data => ax.data_to_axes(point),
        };
        let bbox = self.grid_cell(ax.row, ax.col);
        (
            bbox.x0 + local.0 * bbox.width,
            bbox.y0 + local.1 * bbox.height,
        )
    }

    fn make_annotation(&mut self, bitmap: GlyphBitmap, spec: &PlacementSpec) -> Annotation {
        let id = AnnotationId(self.next_id);
        self.next_id += 1;
        Annotation {
            id,
            bitmap,
            xy: spec.anchor,
            coords: spec.coords,
            box_alignment: spec.alignment,
            zoom: spec.zoom,
            frame_on: false,
            z_order: spec.z_order,
        }
    }

    /// Attach an annotation to the figure itself.
    pub fn add_artist(&mut self, bitmap: GlyphBitmap, spec: &PlacementSpec) -> AnnotationId {
        let annotation = self.make_annotation(bitmap, spec);
        let id = annotation.id;
        self.artists.push(annotation);
        id
    }

    /// Attach an annotation to one axes.
    pub fn add_axes_artist(
        &mut self,
        axes: AxesId,
        bitmap: GlyphBitmap,
        spec: &PlacementSpec,
    ) -> Result<AnnotationId> {
        self.axes(axes)?;
        let annotation = self.make_annotation(bitmap, spec);
        let id = annotation.id;
        self.axes_mut(axes)?.artists.push(annotation);
        Ok(id)
    }

    /// Figure-level annotations.
    pub fn artists(&self) -> &[Annotation] {
        &self.artists
    }

    /// Look up an annotation wherever it was attached.
    pub fn annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.artists
            .iter()
            .chain(self.axes.iter().flat_map(|a| a.artists.iter()))
            .find(|a| a.id == id)
    }

    /// Rasterize the whole figure.
    pub fn render(&self) -> RgbaImage {
        let geometry = self.geometry();
        let width = geometry.width_px.round().max(1.0) as u32;
        let height = geometry.height_px.round().max(1.0) as u32;
        let mut canvas = new_canvas(width, height, self.facecolor.to_array());

        for ax in &self.axes {
            let bbox = self.grid_cell(ax.row, ax.col);
            if let Some(heatmap) = &ax.heatmap {
                self.draw_heatmap(&mut canvas, ax, heatmap);
            }
            for line in &ax.lines {
                self.draw_line(&mut canvas, ax, line);
            }
            draw_frame(&mut canvas, bbox);
            if !ax.title.is_empty() || !ax.xlabel.is_empty() || !ax.ylabel.is_empty() {
                log::debug!(
                    "Axes ({}, {}) has native label text that is not drawn",
                    ax.row,
                    ax.col
                );
            }
        }

        // Stable sort keeps insertion order among equal z-orders
        let mut placed: Vec<((f32, f32), &Annotation)> = self
            .artists
            .iter()
            .map(|a| (a.xy, a))
            .chain(self.axes.iter().flat_map(|ax| {
                ax.artists
                    .iter()
                    .map(move |a| (self.resolve(ax, a.coords, a.xy), a))
            }))
            .collect();
        placed.sort_by_key(|(_, a)| a.z_order);

        for (anchor, annotation) in placed {
            self.draw_annotation(&mut canvas, anchor, annotation);
        }
        canvas
    }

    /// Render and write a PNG.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        let canvas = self.render();
        canvas
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|source| RenderError::ImageSave {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("Saved figure {}x{} to {:?}", canvas.width(), canvas.height(), path);
        Ok(path.to_path_buf())
    }

    fn draw_annotation(&self, canvas: &mut RgbaImage, anchor: (f32, f32), annotation: &Annotation) {
        let bitmap = &annotation.bitmap;
        if bitmap.is_empty() {
            return;
        }
        let scale = annotation.zoom * self.dpi / POINTS_PER_INCH;
        let w = (bitmap.width() as f32 * scale).round().max(1.0) as u32;
        let h = (bitmap.height() as f32 * scale).round().max(1.0) as u32;
        let source = bitmap.to_rgba8();
        let scaled = if (w, h) == source.dimensions() {
            source
        } else {
            imageops::resize(&source, w, h, FilterType::Triangle)
        };

        let (ax, ay) = to_pixels(canvas.dimensions(), anchor);
        let left = (ax - annotation.box_alignment.horizontal * w as f32).round() as i64;
        let top = (ay - (1.0 - annotation.box_alignment.vertical) * h as f32).round() as i64;
        for (x, y, px) in scaled.enumerate_pixels() {
            blend_over(canvas, left + x as i64, top + y as i64, px.0);
        }
        if annotation.frame_on {
            let frame = Bbox::new(
                left as f32 / canvas.width() as f32,
                1.0 - (top + h as i64) as f32 / canvas.height() as f32,
                w as f32 / canvas.width() as f32,
                h as f32 / canvas.height() as f32,
            );
            draw_frame(canvas, frame);
        }
    }

    fn draw_line(&self, canvas: &mut RgbaImage, ax: &Axes, line: &LineSeries) {
        let dims = canvas.dimensions();
        let to_px = |p: (f32, f32)| to_pixels(dims, self.resolve(ax, CoordSpace::Data, p));
        for pair in line.points.windows(2) {
            let (x0, y0) = to_px(pair[0]);
            let (x1, y1) = to_px(pair[1]);
            let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                let x = (x0 + (x1 - x0) * t).round() as i64;
                let y = (y0 + (y1 - y0) * t).round() as i64;
                blend_over(canvas, x, y, line.color);
                blend_over(canvas, x, y + 1, line.color);
            }
        }
    }

    fn draw_heatmap(&self, canvas: &mut RgbaImage, ax: &Axes, heatmap: &Heatmap) {
        let span = (heatmap.max - heatmap.min).max(f32::EPSILON);
        let dims = canvas.dimensions();
        let to_px = |p: (f32, f32)| to_pixels(dims, self.resolve(ax, CoordSpace::Data, p));
        for (r, row) in heatmap.values.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                let (cx, cy) = (c as f32, r as f32);
                let (ax0, ay0) = to_px((cx - 0.5, cy - 0.5));
                let (ax1, ay1) = to_px((cx + 0.5, cy + 0.5));
                let color = blues((value - heatmap.min) / span);
                let (x_lo, x_hi) = (ax0.min(ax1).round() as i64, ax0.max(ax1).round() as i64);
                let (y_lo, y_hi) = (ay0.min(ay1).round() as i64, ay0.max(ay1).round() as i64);
                for y in y_lo..y_hi {
                    for x in x_lo..x_hi {
                        blend_over(canvas, x, y, color);
                    }
                }
            }
        }
    }
}

/// Figure fraction to canvas pixels; rows grow downward.
fn to_pixels((width, height): (u32, u32), (fx, fy): (f32, f32)) -> (f32, f32) {
    (fx * width as f32, (1.0 - fy) * height as f32)
}

/// White-to-blue colormap over `t` in `[0, 1]`.
fn blues(t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: f32, b: f32| (a + (b - a) * t).round() as u8;
    [lerp(247.0, 8.0), lerp(251.0, 48.0), lerp(255.0, 107.0), 255]
}

/// 1px outline of a figure-fraction box.
fn draw_frame(canvas: &mut RgbaImage, bbox: Bbox) {
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);
    let x0 = (bbox.x0 * w).round() as i64;
    let x1 = (bbox.x1() * w).round() as i64;
    let y0 = ((1.0 - bbox.y1()) * h).round() as i64;
    let y1 = ((1.0 - bbox.y0) * h).round() as i64;
    for x in x0..=x1 {
        blend_over(canvas, x, y0, FRAME_COLOR);
        blend_over(canvas, x, y1, FRAME_COLOR);
    }
    for y in y0..=y1 {
        blend_over(canvas, x0, y, FRAME_COLOR);
        blend_over(canvas, x1, y, FRAME_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_single_axes_fills_subplot_area() {
        let fig = Figure::new((5.0, 4.0), 100.0);
        let id = fig.first_axes();
        let pos = fig.get_position(id).unwrap();
        assert!(approx(pos.x0, 0.125));
        assert!(approx(pos.x1(), 0.9));
        assert!(approx(pos.y0, 0.11));
        assert!(approx(pos.y1(), 0.88));
    }

    #[test]
    fn test_grid_gaps() {
        let fig = Figure::subplots(1, 2, (8.0, 4.0), 100.0);
        let ids: Vec<_> = fig.axes_ids().collect();
        let a = fig.get_position(ids[0]).unwrap();
        let b = fig.get_position(ids[1]).unwrap();
        assert!(approx(b.x1(), 0.9));
        let gap = b.x0 - a.x1();
        assert!(approx(gap, 0.2 * a.width));
    }

    #[test]
    fn test_data_transform_with_inverted_ylim() {
        let mut fig = Figure::new((4.0, 4.0), 100.0);
        let id = fig.first_axes();
        fig.axes_mut(id).unwrap().imshow(vec![vec![0.0; 3]; 3], Origin::Upper);
        let pos = fig.get_position(id).unwrap();
        // Row 0 sits at the top of an upper-origin heatmap
        let (_, y) = fig
            .to_figure_fraction(Some(id), CoordSpace::Data, (0.0, 0.0))
            .unwrap();
        assert!(approx(y, pos.y0 + pos.height * (5.0 / 6.0)));
    }

    #[test]
    fn test_unknown_axes() {
        let fig = Figure::new((4.0, 4.0), 100.0);
        assert!(matches!(
            fig.get_position(AxesId(3)),
            Err(RenderError::UnknownAxes(3))
        ));
    }

    #[test]
    fn test_render_dimensions() {
        let fig = Figure::new((2.0, 1.5), 50.0);
        let canvas = fig.render();
        assert_eq!(canvas.dimensions(), (100, 75));
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }
}
