//! Placement geometry across figure sizes and DPIs.

use bangla_render::placement::{
    LABEL_MIN_FRACTION, TITLE_MAX_FRACTION, cell_center, label_delta, title_placement,
    xlabel_placement, ylabel_placement,
};
use bangla_render::{Bbox, FigureGeometry, LabelGeometry, Origin};

const LABEL: LabelGeometry = LabelGeometry {
    zoom: 0.40,
    extra_pad: 0.01,
    z_order: 5,
};

fn axes_positions() -> Vec<Bbox> {
    vec![
        Bbox::new(0.125, 0.11, 0.775, 0.77),
        Bbox::new(0.18, 0.22, 0.70, 0.62),
        Bbox::new(0.05, 0.01, 0.9, 0.98),
        Bbox::new(0.5, 0.5, 0.1, 0.1),
    ]
}

#[test]
fn test_title_and_xlabel_stay_in_frame() {
    for inches in [1.0f32, 2.5, 5.0, 12.0] {
        for dpi in [72.0f32, 100.0, 150.0, 300.0] {
            let figure = FigureGeometry::new((inches, inches * 0.8), dpi);
            for axes in axes_positions() {
                for height in [0u32, 20, 63, 400, 5000] {
                    let delta = label_delta(height, LABEL.zoom, figure.height_px, LABEL.extra_pad);
                    assert!(delta >= 0.0);

                    let title = title_placement(height, axes, figure, LABEL);
                    assert!((LABEL_MIN_FRACTION..=TITLE_MAX_FRACTION).contains(&title.anchor.1));
                    assert!(title.anchor.1 >= axes.y1().min(TITLE_MAX_FRACTION));

                    let xlabel = xlabel_placement(height, axes, figure, LABEL);
                    assert!((0.0..=1.0).contains(&xlabel.anchor.1));
                    assert!(xlabel.anchor.1 <= axes.y0);
                }
            }
        }
    }
}

#[test]
fn test_ylabel_stays_in_frame() {
    let label = LabelGeometry {
        extra_pad: 0.05,
        ..LABEL
    };
    for dpi in [72.0f32, 300.0] {
        let figure = FigureGeometry::new((5.0, 4.0), dpi);
        for axes in axes_positions() {
            for height in [10u32, 55, 2000] {
                let spec = ylabel_placement(height, axes, figure, label);
                assert!((0.0..=1.0).contains(&spec.anchor.0));
                assert!(spec.anchor.0 <= axes.x0);
                assert_eq!(spec.anchor.1, axes.y0 + axes.height / 2.0);
            }
        }
    }
}

#[test]
fn test_ylabel_delta_uses_figure_width() {
    let figure = FigureGeometry::new((5.0, 4.0), 100.0);
    let axes = Bbox::new(0.18, 0.22, 0.70, 0.62);
    let label = LabelGeometry {
        zoom: 0.5,
        extra_pad: 0.0,
        z_order: 5,
    };
    // 100px at zoom 0.5 over a 500px wide figure
    let spec = ylabel_placement(100, axes, figure, label);
    assert!((spec.anchor.0 - 0.08).abs() < 1e-5);
}

#[test]
fn test_three_by_three_cells() {
    let (x, y) = cell_center(0, 0, 3, 3, Origin::Upper);
    assert!((x - 1.0 / 6.0).abs() < 1e-5);
    assert!((y - (1.0 - 1.0 / 6.0)).abs() < 1e-5);

    let (x, y) = cell_center(0, 0, 3, 3, Origin::Lower);
    assert!((x - 1.0 / 6.0).abs() < 1e-5);
    assert!((y - 1.0 / 6.0).abs() < 1e-5);

    let (x, y) = cell_center(1, 1, 3, 3, Origin::Upper);
    assert!((x - 0.5).abs() < 1e-5);
    assert!((y - 0.5).abs() < 1e-5);
}

#[test]
fn test_cells_are_mirrored_between_origins() {
    for rows in 1..6 {
        for row in 0..rows {
            let (_, upper) = cell_center(row, 0, rows, 2, Origin::Upper);
            let (_, lower) = cell_center(row, 0, rows, 2, Origin::Lower);
            assert!((upper + lower - 1.0).abs() < 1e-5);
        }
    }
}
