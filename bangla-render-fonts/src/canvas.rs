//! RGBA canvas helpers shared by glyph drawing and figure compositing.

use image::{Rgba, RgbaImage};

/// Create a canvas of the given size filled with `fill` (`[R, G, B, A]`).
pub fn new_canvas(width: u32, height: u32, fill: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(fill))
}

/// Source-over blend of a straight-alpha `src` pixel onto the canvas at
/// `(x, y)`. Coordinates outside the canvas are ignored.
pub fn blend_over(canvas: &mut RgbaImage, x: i64, y: i64, src: [u8; 4]) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    if src[3] == 0 {
        return;
    }
    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    dst.0 = blend_pixel(dst.0, src);
}

/// Source-over blend of two straight-alpha RGBA pixels.
pub fn blend_pixel(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = src[3] as f32 / 255.0;
    if sa >= 1.0 {
        return src;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        let s = src[c] as f32 / 255.0;
        let d = dst[c] as f32 / 255.0;
        let v = (s * sa + d * da * (1.0 - sa)) / out_a;
        out[c] = (v * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}

/// Scale the alpha of `color` by an 8-bit coverage value.
#[inline]
pub fn apply_coverage(color: [u8; 4], coverage: u8) -> [u8; 4] {
    let alpha = (color[3] as u32 * coverage as u32 + 127) / 255;
    [color[0], color[1], color[2], alpha as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_source_replaces() {
        assert_eq!(
            blend_pixel([255, 255, 255, 255], [0, 0, 0, 255]),
            [0, 0, 0, 255]
        );
    }

    #[test]
    fn test_half_alpha_over_white() {
        let out = blend_pixel([255, 255, 255, 255], [0, 0, 0, 128]);
        assert_eq!(out[3], 255);
        assert!(out[0] > 120 && out[0] < 135, "got {:?}", out);
    }

    #[test]
    fn test_blend_onto_transparent_keeps_color() {
        let out = blend_pixel([0, 0, 0, 0], [200, 10, 20, 100]);
        assert_eq!(out, [200, 10, 20, 100]);
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut canvas = new_canvas(2, 2, [0, 0, 0, 0]);
        blend_over(&mut canvas, -1, 0, [255, 0, 0, 255]);
        blend_over(&mut canvas, 2, 1, [255, 0, 0, 255]);
        assert!(canvas.pixels().all(|p| p.0 == [0, 0, 0, 0]));
        blend_over(&mut canvas, 1, 1, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(1, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_apply_coverage() {
        assert_eq!(apply_coverage([1, 2, 3, 255], 255), [1, 2, 3, 255]);
        assert_eq!(apply_coverage([1, 2, 3, 255], 0), [1, 2, 3, 0]);
    }
}
