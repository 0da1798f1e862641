// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! Bounding boxes are always held in normalized image space: center and
//! size as fractions of the full unzoomed image. Pixel rectangles only
//! exist at the view boundary (see `util::geometry`).

use std::fmt;

/// Stable identifier of an annotation within a session.
///
/// Ids are never reused, so a handle taken before a deletion can't
/// silently point at a different box afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationId(pub u64);

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A bounding box annotation in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annotation {
    pub class_id: u32,
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

impl Annotation {
    /// Create a new annotation.
    pub fn new(class_id: u32, x_center: f64, y_center: f64, width: f64, height: f64) -> Self {
        Self {
            class_id,
            x_center,
            y_center,
            width,
            height,
        }
    }

    /// Same geometry with a different class.
    pub fn with_class(self, class_id: u32) -> Self {
        Self { class_id, ..self }
    }

    /// Compare geometry and class within `tolerance`.
    #[cfg(test)]
    pub fn approx_eq(&self, other: &Annotation, tolerance: f64) -> bool {
        self.class_id == other.class_id
            && (self.x_center - other.x_center).abs() <= tolerance
            && (self.y_center - other.y_center).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

/// A point in zoomed canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in zoomed canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PixelRect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Build a rectangle from two drag corners in any order.
    pub fn from_corners(a: PixelPoint, b: PixelPoint) -> Self {
        Self {
            x0: a.x.min(b.x),
            y0: a.y.min(b.y),
            x1: a.x.max(b.x),
            y1: a.y.max(b.y),
        }
    }

    /// Swap corners so that `x0 <= x1` and `y0 <= y1`.
    pub fn ordered(self) -> Self {
        Self::from_corners(
            PixelPoint::new(self.x0, self.y0),
            PixelPoint::new(self.x1, self.y1),
        )
    }

    /// Inclusive containment, matching the edges a user sees.
    pub fn contains(&self, point: PixelPoint) -> bool {
        self.x0 <= point.x && point.x <= self.x1 && self.y0 <= point.y && point.y <= self.y1
    }

    /// Clip the rectangle to `[0, limit]` on both axes.
    pub fn clamped(self, limit: f64) -> Self {
        Self {
            x0: self.x0.clamp(0.0, limit),
            y0: self.y0.clamp(0.0, limit),
            x1: self.x1.clamp(0.0, limit),
            y1: self.y1.clamp(0.0, limit),
        }
    }
}
