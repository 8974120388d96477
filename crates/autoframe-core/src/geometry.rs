//! Pure geometry used by extraction and layout application.
//!
//! Everything here works in plain `f64` design units. Rectangles are
//! axis-aligned; rotation is not modelled.

use autoframe_protocols::{SceneNode, Transform};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in parent coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn of_node(node: &SceneNode) -> Self {
        Self::new(node.x, node.y, node.width, node.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if this rectangle intersects with another. Touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Horizontal and vertical extent of the intersection, if any.
    pub fn overlap(&self, other: &Rect) -> Option<(f64, f64)> {
        let overlap_x = self.right().min(other.right()) - self.x.max(other.x);
        let overlap_y = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if overlap_x > 0.0 && overlap_y > 0.0 {
            Some((overlap_x, overlap_y))
        } else {
            None
        }
    }

    pub fn intersection_area(&self, other: &Rect) -> f64 {
        self.overlap(other).map(|(w, h)| w * h).unwrap_or(0.0)
    }
}

/// Position of a child relative to a parent, from their absolute transforms.
pub fn relative_position(child: &Transform, parent: &Transform) -> Point {
    let (cx, cy) = child.translation();
    let (px, py) = parent.translation();
    Point::new(cx - px, cy - py)
}

fn axis_factor(original: f64, target: f64) -> f64 {
    if original > 0.0 { target / original } else { 1.0 }
}

/// Scale a point (or a width/height pair) from one frame size to another.
///
/// A non-positive original dimension leaves that axis unscaled.
pub fn scale_position(
    x: f64,
    y: f64,
    orig_width: f64,
    orig_height: f64,
    new_width: f64,
    new_height: f64,
) -> Point {
    Point::new(
        x * axis_factor(orig_width, new_width),
        y * axis_factor(orig_height, new_height),
    )
}

/// Uniform factor that fits the original frame inside the new one.
pub fn uniform_scale(original: Size, target: Size) -> f64 {
    axis_factor(original.width, target.width).min(axis_factor(original.height, target.height))
}

/// Keep an element of the given size inside `[0, frame]` on both axes.
///
/// An element larger than the frame is pinned to 0 and overflows the far edge.
pub fn clamp_to_frame(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    frame_width: f64,
    frame_height: f64,
) -> Point {
    Point::new(
        x.min(frame_width - width).max(0.0),
        y.min(frame_height - height).max(0.0),
    )
}

/// Largest size with the original aspect ratio that fits `max`, never
/// shrinking below `min_scale` of the original.
pub fn preserve_aspect_ratio(
    orig_width: f64,
    orig_height: f64,
    max_width: f64,
    max_height: f64,
    min_scale: f64,
) -> Size {
    let fx = if orig_width > 0.0 { max_width / orig_width } else { f64::INFINITY };
    let fy = if orig_height > 0.0 { max_height / orig_height } else { f64::INFINITY };
    let mut scale = fx.min(fy);
    if !scale.is_finite() {
        scale = 1.0;
    }
    let scale = scale.max(min_scale);
    Size::new(orig_width * scale, orig_height * scale)
}

/// New position for `b` after pushing it off `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapResolution {
    pub position: Point,
    /// The moved `b` no longer intersects `a`.
    pub cleared: bool,
    /// The push was cut short by the frame edge.
    pub boundary_limited: bool,
}

/// Push `b` off `a` in a single step.
///
/// `b` moves right by the horizontal overlap plus `padding` when the overlap
/// is wider than tall, down by the vertical overlap plus `padding`
/// otherwise, and is then clamped into the frame. Returns `None` when the
/// two do not intersect.
///
/// When `b` does not reach past the far edge of `a` on the push axis, one
/// step can leave the pair overlapping; `cleared` reports that.
pub fn resolve_overlap(a: &Rect, b: &Rect, frame: Size, padding: f64) -> Option<OverlapResolution> {
    let (overlap_x, overlap_y) = a.overlap(b)?;

    let pushed = if overlap_x > overlap_y {
        Point::new(b.x + overlap_x + padding, b.y)
    } else {
        Point::new(b.x, b.y + overlap_y + padding)
    };

    let position = clamp_to_frame(
        pushed.x,
        pushed.y,
        b.width,
        b.height,
        frame.width,
        frame.height,
    );
    let moved = Rect::new(position.x, position.y, b.width, b.height);

    Some(OverlapResolution {
        position,
        cleared: !a.intersects(&moved),
        boundary_limited: position != pushed,
    })
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
