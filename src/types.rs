// Core types shared by every step: the screen buffer, clicked anchors,
// curve samples, and which interpolator builds the curve.

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

/// A clicked point in working-resolution pixels.
/// Order in the store matters: it decides how the contour winds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorPoint {
    pub x: i32,
    pub y: i32,
}

impl AnchorPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One rounded point on the generated curve (working-resolution pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveSample {
    pub x: i32,
    pub y: i32,
}

impl CurveSample {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Round a float position to the nearest pixel.
    pub fn rounded(x: f64, y: f64) -> Self {
        Self::new(x.round() as i32, y.round() as i32)
    }
}

impl From<AnchorPoint> for CurveSample {
    fn from(p: AnchorPoint) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Closed loop of samples; the last one connects back to the first.
pub type Curve = Vec<CurveSample>;

/// How consecutive anchors are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveMode {
    /// Straight legs between neighbours (including last -> first).
    Linear,
    /// One quadratic Bézier per sliding 3-anchor window.
    Bezier,
}

impl CurveMode {
    /// The other mode (M key flips between them).
    pub fn toggled(self) -> Self {
        match self {
            CurveMode::Linear => CurveMode::Bezier,
            CurveMode::Bezier => CurveMode::Linear,
        }
    }

    /// Upper-case name for the HUD (only glyphs the 5x7 font knows).
    pub fn label(self) -> &'static str {
        match self {
            CurveMode::Linear => "LINEAR",
            CurveMode::Bezier => "BEZIER",
        }
    }
}
