// Loads the image to annotate and turns it into the working-size background.
// Visual expectation: the window shows this frame, stretched to the fixed
// canvas, behind your points and curve.

use crate::coords::CoordinateSpace;
use crate::error::Error;
use crate::types::FrameBuffer;
use image::imageops::{self, FilterType};
use image::RgbImage;
use std::path::Path;

/// The decoded source, ready for editing.
pub struct SourceImage {
    pub background: FrameBuffer, // working-size copy, 0x00RRGGBB
    pub space: CoordinateSpace,  // native <-> working mapping, fixed from now on
}

/// Decode `path` and prepare the working canvas. Any decode failure is a
/// `Load` error: the session must not start.
pub fn load(path: &Path, working: (u32, u32)) -> Result<SourceImage, Error> {
    // 1) Decode (missing file, bad bytes, unknown format all land here).
    let img = image::open(path)
        .map_err(|e| Error::Load(format!("{}: {e}", path.display())))?
        .to_rgb8();
    if img.width() == 0 || img.height() == 0 {
        return Err(Error::Load(format!("{}: image has no pixels", path.display())));
    }
    Ok(from_rgb(&img, working))
}

/// Build the working background and mapping from an already decoded image.
pub fn from_rgb(img: &RgbImage, working: (u32, u32)) -> SourceImage {
    let space = CoordinateSpace::new(img.dimensions(), working);

    // 2) Stretch to the canvas size (what you click on).
    let resized = imageops::resize(img, working.0, working.1, FilterType::Triangle);

    // 3) Pack as 0x00RRGGBB for the window.
    let mut pixels = Vec::with_capacity((working.0 as usize) * (working.1 as usize));
    for pixel in resized.pixels() {
        let r = pixel[0] as u32;
        let g = pixel[1] as u32;
        let b = pixel[2] as u32;
        pixels.push((r << 16) | (g << 8) | b);
    }

    SourceImage {
        background: FrameBuffer {
            width: working.0 as usize,
            height: working.1 as usize,
            pixels,
        },
        space,
    }
}
