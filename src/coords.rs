// Mapping between the source image's native size and the fixed working canvas.
// Anchors stay in working space; only the saved mask is scaled back.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSpace {
    original: (u32, u32), // native (width, height) of the source image
    working: (u32, u32),  // canvas (width, height) used while clicking
    scale_x: f64,         // original / working, horizontally
    scale_y: f64,         // original / working, vertically
}

impl CoordinateSpace {
    /// Computed once at load time from the decoded image's dimensions.
    pub fn new(original: (u32, u32), working: (u32, u32)) -> Self {
        let scale_x = original.0 as f64 / working.0.max(1) as f64;
        let scale_y = original.1 as f64 / working.1.max(1) as f64;
        Self { original, working, scale_x, scale_y }
    }

    pub fn original_size(&self) -> (u32, u32) {
        self.original
    }

    pub fn working_size(&self) -> (u32, u32) {
        self.working
    }

    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    /// Working pixel -> original pixel (rounded).
    pub fn to_original(&self, x: i32, y: i32) -> (i32, i32) {
        (
            (x as f64 * self.scale_x).round() as i32,
            (y as f64 * self.scale_y).round() as i32,
        )
    }

    /// Original pixel -> working pixel (rounded). The binary only maps forward.
    #[allow(dead_code)]
    pub fn to_working(&self, x: i32, y: i32) -> (i32, i32) {
        (
            (x as f64 / self.scale_x).round() as i32,
            (y as f64 / self.scale_y).round() as i32,
        )
    }
}
