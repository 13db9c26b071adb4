//! Boundary to the drawing layer
//!
//! The core never draws anything itself. It talks to a [`RenderSink`]:
//! an externally implemented surface that creates shapes, moves them, and
//! removes them by handle. The sink is the only shared mutable resource
//! crossing the core boundary and is always called synchronously from
//! within a tick or an explicit setter.

use crate::simulation::states::Vec2;

/// Opaque identifier for a shape living in the render sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeHandle(pub u64);

/// Axis-aligned bounding box handed to the sink on position updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec2,
    pub max: Vec2,
}

pub trait RenderSink {
    /// Create a filled circle, returning a handle for later updates.
    fn add_circle(&mut self, center: Vec2, radius: f64, color: &str) -> ShapeHandle;

    /// Create a line segment between two points (trajectory piece).
    fn add_line_segment(&mut self, p1: Vec2, p2: Vec2, color: &str) -> ShapeHandle;

    /// Move an existing shape to a new bounding box.
    fn update_shape_position(&mut self, handle: ShapeHandle, bbox: BoundingBox);

    /// Remove a shape; the handle is dead afterwards.
    fn remove_shape(&mut self, handle: ShapeHandle);

    /// Status-bar text (used for the FPS counter).
    fn set_status_text(&mut self, text: &str);
}

/// Sink that hands out handles and discards everything. Used for headless
/// runs where no drawing surface exists.
#[derive(Debug, Default)]
pub struct NullSink {
    next: u64,
}

impl NullSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSink for NullSink {
    fn add_circle(&mut self, _center: Vec2, _radius: f64, _color: &str) -> ShapeHandle {
        self.next += 1;
        ShapeHandle(self.next)
    }

    fn add_line_segment(&mut self, _p1: Vec2, _p2: Vec2, _color: &str) -> ShapeHandle {
        self.next += 1;
        ShapeHandle(self.next)
    }

    fn update_shape_position(&mut self, _handle: ShapeHandle, _bbox: BoundingBox) {}

    fn remove_shape(&mut self, _handle: ShapeHandle) {}

    fn set_status_text(&mut self, _text: &str) {}
}
