// Turns the clicked anchors into a dense closed loop of pixel samples.
// Visual: this is the green line you see snake through your red points.
//
// The builder keeps no state between calls; every click/undo rebuilds the
// whole loop. Cost is O(anchors * density), fine for hand-clicked shapes.

use crate::types::{AnchorPoint, Curve, CurveMode, CurveSample};

#[derive(Debug, Clone, Copy)]
pub struct CurveBuilder {
    pub mode: CurveMode,
    pub linear_density: usize, // samples per straight leg (the leg's start anchor included)
    pub bezier_density: usize, // samples per Bézier window (t = 0 and t = 1 included)
}

impl CurveBuilder {
    pub fn new(mode: CurveMode, linear_density: usize, bezier_density: usize) -> Self {
        Self { mode, linear_density, bezier_density }
    }

    /// Build the closed loop for `anchors` (click order).
    ///
    /// - 0 or 1 anchor: empty, nothing to draw.
    /// - 2 anchors: a flat loop, forward leg then the leg back. Two coincident
    ///   anchors give an empty curve.
    /// - 3+ anchors: straight legs or sliding Bézier windows, wrapping last -> first.
    pub fn build(&self, anchors: &[AnchorPoint]) -> Curve {
        let n = anchors.len();
        if n < 2 {
            return Vec::new();
        }
        if n == 2 {
            return self.two_point_loop(anchors[0], anchors[1]);
        }

        match self.mode {
            CurveMode::Linear => {
                let d = self.linear_density.max(1);
                let mut curve = Vec::with_capacity(n * d);
                for i in 0..n {
                    linear_leg(anchors[i], anchors[(i + 1) % n], d, &mut curve);
                }
                curve
            }
            CurveMode::Bezier => {
                let d = self.bezier_density.max(1);
                let mut curve = Vec::with_capacity(n * d);
                // Each anchor opens one window; windows overlap by two anchors.
                for i in 0..n {
                    let p0 = anchors[i];
                    let p1 = anchors[(i + 1) % n];
                    let p2 = anchors[(i + 2) % n];
                    quadratic_window(p0, p1, p2, d, &mut curve);
                }
                curve
            }
        }
    }

    fn two_point_loop(&self, a: AnchorPoint, b: AnchorPoint) -> Curve {
        if a == b {
            return Vec::new(); // a loop of zero length encloses nothing
        }
        let d = self.linear_density.max(1);
        let mut curve = Vec::with_capacity(2 * d);
        linear_leg(a, b, d, &mut curve);
        linear_leg(b, a, d, &mut curve);
        curve
    }
}

/// Push `d` evenly spaced samples from `a` (included) towards `b` (excluded;
/// `b` opens the next leg).
fn linear_leg(a: AnchorPoint, b: AnchorPoint, d: usize, out: &mut Curve) {
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (dx, dy) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
    for k in 0..d {
        let t = k as f64 / d as f64;
        out.push(CurveSample::rounded(ax + t * dx, ay + t * dy));
    }
}

/// Sample B(t) = (1-t)^2 p0 + 2(1-t)t p1 + t^2 p2 at `d` values of t spread over [0, 1].
fn quadratic_window(p0: AnchorPoint, p1: AnchorPoint, p2: AnchorPoint, d: usize, out: &mut Curve) {
    let span = (d - 1).max(1) as f64;
    for k in 0..d {
        let t = k as f64 / span;
        let u = 1.0 - t;
        let (w0, w1, w2) = (u * u, 2.0 * u * t, t * t);
        let x = w0 * p0.x as f64 + w1 * p1.x as f64 + w2 * p2.x as f64;
        let y = w0 * p0.y as f64 + w1 * p1.y as f64 + w2 * p2.y as f64;
        out.push(CurveSample::rounded(x, y));
    }
}
