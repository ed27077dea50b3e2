//! Demo figures: a labeled line plot, an emotion heatmap with Bengali cell
//! text, and a confusion matrix with Bengali class names on both axes.

use std::path::{Path, PathBuf};

use bangla_render_config::Color;

use crate::compositor::{CellOptions, Compositor, LabelOptions, TextOptions, apply_layout};
use crate::error::Result;
use crate::figure::Figure;
use crate::placement::{CoordSpace, HorizontalAlign, Origin, VerticalAlign};

/// Which demo figure to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DemoKind {
    /// Line plot with a title, axis labels and a free-form note
    Line,
    /// 3x3 heatmap with one emotion word per cell
    Heatmap,
    /// Confusion matrix with class names along both axes
    Confusion,
}

impl DemoKind {
    /// File name used when no output path is given.
    pub fn default_file_name(self) -> &'static str {
        match self {
            DemoKind::Line => "line_plot.png",
            DemoKind::Heatmap => "heatmap.png",
            DemoKind::Confusion => "confusion_matrix.png",
        }
    }
}

const EMOTIONS: [[&str; 3]; 3] = [
    ["খুশি", "দুঃখ", "রাগ"],
    ["ভয়", "আশা", "বিশ্বাস"],
    ["শান্তি", "ঘৃণা", "আনন্দ"],
];

const CONFUSION: [[u32; 3]; 3] = [[863, 1343, 193], [585, 3710, 541], [26, 245, 7003]];

const CLASSES: [&str; 3] = ["ঘৃণা", "অপমানজনক", "ঠিক আছে"];

/// Build the requested demo and save it to `path`.
pub fn run_demo(compositor: &mut Compositor<'_>, kind: DemoKind, path: &Path) -> Result<PathBuf> {
    log::info!("Building {:?} demo", kind);
    let fig = match kind {
        DemoKind::Line => line_plot(compositor)?,
        DemoKind::Heatmap => heatmap(compositor)?,
        DemoKind::Confusion => confusion_matrix(compositor)?,
    };
    fig.save(path)
}

pub fn line_plot(compositor: &mut Compositor<'_>) -> Result<Figure> {
    let mut fig = Figure::new((5.0, 4.0), 150.0);
    let layout = compositor.config().layout;
    apply_layout(&mut fig, &layout);
    let ax = fig.first_axes();

    let points = [(1.0, 3.0), (2.0, 1.0), (3.0, 4.0), (4.0, 2.0), (5.0, 5.0)];
    fig.axes_mut(ax)?.plot(points.to_vec(), Color::rgb(31, 119, 180));

    let axis_label = LabelOptions::new().with_font_size(24.0);
    let title = LabelOptions::new().with_font_size(32.0);
    compositor.set_title(&mut fig, ax, "বাংলা লাইন প্লট", &title)?;
    compositor.set_xlabel(&mut fig, ax, "এক্স অক্ষ", &axis_label)?;
    compositor.set_ylabel(&mut fig, ax, "ওয়াই অক্ষ", &axis_label)?;
    compositor.text(
        &mut fig,
        ax,
        0.5,
        0.8,
        "উদাহরণ",
        &TextOptions::new()
            .with_coords(CoordSpace::Axes)
            .with_font_size(24.0),
    )?;
    Ok(fig)
}

pub fn heatmap(compositor: &mut Compositor<'_>) -> Result<Figure> {
    let mut fig = Figure::new((6.0, 6.0), 300.0);
    let layout = compositor.config().layout;
    apply_layout(&mut fig, &layout);
    let ax = fig.first_axes();

    let values = vec![
        vec![0.1, 0.5, 0.9],
        vec![0.3, 0.7, 0.4],
        vec![0.8, 0.2, 0.6],
    ];
    let (rows, cols) = (values.len(), values[0].len());
    fig.axes_mut(ax)?.imshow(values, Origin::Upper);

    let cell = CellOptions::new().with_font_size(22.0).with_origin(Origin::Upper);
    for (i, row) in EMOTIONS.iter().enumerate() {
        for (j, word) in row.iter().enumerate() {
            compositor.place_in_cell(&mut fig, ax, i, j, word, rows, cols, &cell)?;
        }
    }

    compositor.set_title(
        &mut fig,
        ax,
        "বাংলা ইমোশন হিটম্যাপ",
        &LabelOptions::new().with_font_size(36.0).with_zoom(0.42),
    )?;
    let axis_label = LabelOptions::new().with_font_size(28.0);
    compositor.set_xlabel(&mut fig, ax, "এক্স অক্ষ", &axis_label)?;
    compositor.set_ylabel(&mut fig, ax, "ওয়াই অক্ষ", &axis_label)?;
    Ok(fig)
}

pub fn confusion_matrix(compositor: &mut Compositor<'_>) -> Result<Figure> {
    let mut fig = Figure::new((6.0, 6.0), 300.0);
    let layout = compositor.config().layout;
    apply_layout(&mut fig, &layout);
    let ax = fig.first_axes();

    let rows = CONFUSION.len();
    let cols = CONFUSION[0].len();
    let values: Vec<Vec<f32>> = CONFUSION
        .iter()
        .map(|row| row.iter().map(|&v| v as f32).collect())
        .collect();
    {
        let axes = fig.axes_mut(ax)?;
        axes.imshow(values, Origin::Upper);
        axes.set_xlim(-0.5, cols as f32 - 0.5);
        axes.set_ylim(rows as f32 - 0.5, -0.5);
    }

    let counts = TextOptions::new().with_font_size(12.0);
    for (i, row) in CONFUSION.iter().enumerate() {
        for (j, count) in row.iter().enumerate() {
            compositor.place_text(&mut fig, ax, j as f32, i as f32, &count.to_string(), &counts)?;
        }
    }

    let class_text = TextOptions::new()
        .with_coords(CoordSpace::Axes)
        .with_font_size(20.0)
        .with_zoom(0.42);
    for (j, label) in CLASSES.iter().enumerate() {
        let x = (j as f32 + 0.5) / cols as f32;
        let options = class_text.with_alignment(HorizontalAlign::Center, VerticalAlign::Top);
        compositor.place_text(&mut fig, ax, x, -0.10, label, &options)?;
    }
    for (i, label) in CLASSES.iter().enumerate() {
        let y = 1.0 - (i as f32 + 0.5) / rows as f32;
        let options = class_text.with_alignment(HorizontalAlign::Right, VerticalAlign::Center);
        compositor.place_text(&mut fig, ax, -0.12, y, label, &options)?;
    }

    compositor.set_title(
        &mut fig,
        ax,
        "কনফিউশন ম্যাট্রিক্স",
        &LabelOptions::new().with_font_size(32.0).with_zoom(0.44),
    )?;
    Ok(fig)
}
