// Closed curve -> filled binary mask at the source image's native size.
// Visual: the saved *_label.png is white inside your contour, black outside.

use crate::coords::CoordinateSpace;
use crate::types::CurveSample;
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};

pub const FILLED: u8 = 255;

/// Full pipeline used on commit: fill at working size, resize to native, binarize.
/// An empty curve is a valid (all-black) label, not an error.
pub fn rasterize(curve: &[CurveSample], space: &CoordinateSpace, threshold: u8) -> GrayImage {
    let (ww, wh) = space.working_size();
    let working = fill_polygon(curve, ww, wh);
    let (ow, oh) = space.original_size();
    let mut native = imageops::resize(&working, ow, oh, FilterType::Nearest);
    binarize(&mut native, threshold);
    native
}

/// Even-odd scanline fill of the polygon the samples describe (last joins first).
/// A pixel is inside when its centre is. Self-intersections are best-effort.
pub fn fill_polygon(curve: &[CurveSample], width: u32, height: u32) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    if curve.len() < 3 {
        return mask; // no area to fill
    }

    let n = curve.len();
    let mut crossings: Vec<f64> = Vec::new();

    for y in 0..height {
        let yc = y as f64 + 0.5;

        // 1) Where does this row's centre line cross each edge?
        crossings.clear();
        for i in 0..n {
            let a = curve[i];
            let b = curve[(i + 1) % n];
            if a.y == b.y {
                continue; // horizontal edges never cross a centre line
            }
            let (ay, by) = (a.y as f64, b.y as f64);
            // Half-open span so a shared vertex is counted once.
            if yc < ay.min(by) || yc >= ay.max(by) {
                continue;
            }
            let t = (yc - ay) / (by - ay);
            crossings.push(a.x as f64 + t * (b.x - a.x) as f64);
        }
        if crossings.len() < 2 {
            continue;
        }
        crossings.sort_by(|l, r| l.total_cmp(r));

        // 2) Fill between crossing pairs (even-odd).
        for pair in crossings.chunks_exact(2) {
            let x_start = ((pair[0] - 0.5).ceil().max(0.0)) as i64;
            let x_end = ((pair[1] - 0.5).ceil().min(width as f64)) as i64; // exclusive
            for x in x_start..x_end {
                mask.put_pixel(x as u32, y, Luma([FILLED]));
            }
        }
    }

    mask
}

/// Anything above `threshold` becomes 255, everything else 0.
pub fn binarize(mask: &mut GrayImage, threshold: u8) {
    for px in mask.pixels_mut() {
        px[0] = if px[0] > threshold { FILLED } else { 0 };
    }
}

/// How many pixels are set (used for logs and checks).
pub fn filled_count(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p[0] != 0).count()
}
