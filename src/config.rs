// Startup parameter (the image path) plus the tunables of an annotation session.

use crate::types::CurveMode;
use clap::Parser;
use std::path::PathBuf;

/// Trace a region on an image by clicking points; Enter saves a binary label mask
#[derive(Parser, Debug)]
#[command(name = "contour-label")]
#[command(about = "Click a closed contour over an image and save it as a binary label", long_about = None)]
pub struct Args {
    /// Image to annotate (the label is written next to it as <stem>_label.png)
    pub image: PathBuf,
}

/// Knobs for one session. `Default` matches the classic tool: 800x800 canvas,
/// Bézier windows of 100 samples, straight legs of 10 samples.
#[derive(Debug, Clone)]
pub struct Config {
    pub working_width: u32,
    pub working_height: u32,
    pub mode: CurveMode,
    pub linear_density: usize, // samples per leg, anchor included
    pub bezier_density: usize, // samples per 3-anchor window, both ends included
    pub label_suffix: String,  // appended to the source file stem
    pub threshold: u8,         // mask pixels strictly above this become 255
    pub anchor_radius: i32,    // marker size in the preview
    pub stroke_width: i32,     // curve line thickness in the preview
}

impl Default for Config {
    fn default() -> Self {
        Self {
            working_width: 800,
            working_height: 800,
            mode: CurveMode::Bezier,
            linear_density: 10,
            bezier_density: 100,
            label_suffix: "_label".to_string(),
            threshold: 127,
            anchor_radius: 3,
            stroke_width: 2,
        }
    }
}
