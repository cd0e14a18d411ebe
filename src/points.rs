// The clicked anchors, in click order. Only the session mutates this.

use crate::types::AnchorPoint;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointStore {
    points: Vec<AnchorPoint>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a point at the end. Off-canvas points are kept as-is (no clamping).
    pub fn append(&mut self, p: AnchorPoint) {
        self.points.push(p);
    }

    /// Drop the newest point; returns it, or None when there was nothing to drop.
    pub fn remove_last(&mut self) -> Option<AnchorPoint> {
        self.points.pop()
    }

    /// Read-only view of the current order, for the curve builder.
    pub fn snapshot(&self) -> &[AnchorPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
