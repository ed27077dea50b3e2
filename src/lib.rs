// Library exports for the CLI, tests and library use
//
// # Engine locking
//
// The swash-backed shaping engine lives behind a process-wide
// `parking_lot::Mutex` (`bangla_render_fonts::shared_engine`). Hold the lock
// for a whole label placement or standalone render so drawing stays on one
// thread at a time; `compositor::with_shared_compositor` does this for you.
// Code that owns its own engine (tests, embedders) can build a
// `Compositor` directly and skip the shared instance.

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod compositor;
pub mod debug;
pub mod demos;
pub mod error;
pub mod figure;
pub mod placement;
pub mod raster;

pub use compositor::{
    CellOptions, Compositor, LabelOptions, TextOptions, apply_layout, with_shared_compositor,
};
pub use error::{RenderError, Result};
pub use figure::{Annotation, AnnotationId, Axes, AxesId, Bbox, Figure, SubplotParams};
pub use placement::{
    Alignment, CoordSpace, FigureGeometry, HorizontalAlign, LabelGeometry, Origin, PlacementSpec,
    VerticalAlign,
};
pub use raster::{
    GlyphBitmap, ParagraphLayout, RenderRequest, rasterize, render_paragraph, render_text,
};

pub use bangla_render_config::{Background, Color, Config, LayoutMargins};
pub use bangla_render_fonts::{FontSpec, ShapingEngine, SwashEngine, TextBounds, shared_engine};
