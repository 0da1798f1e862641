// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module converts between zoomed canvas pixels and normalized
//! annotation coordinates, and owns the clamped zoom factor.

use crate::models::annotation::{Annotation, PixelRect};

/// Maps a square canvas of `canvas_size` pixels at zoom 1.0 to the unit
/// square of normalized image space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub canvas_size: f64,
    pub zoom: f64,
}

impl ViewTransform {
    pub fn new(canvas_size: f64, zoom: f64) -> Self {
        Self { canvas_size, zoom }
    }

    /// Edge length of the image on screen.
    pub fn zoomed_size(&self) -> f64 {
        self.canvas_size * self.zoom
    }

    /// Convert a pixel rectangle to a normalized annotation. No clamping.
    pub fn to_normalized(&self, class_id: u32, rect: PixelRect) -> Annotation {
        let size = self.zoomed_size();
        Annotation {
            class_id,
            x_center: ((rect.x0 + rect.x1) / 2.0) / size,
            y_center: ((rect.y0 + rect.y1) / 2.0) / size,
            width: (rect.x1 - rect.x0) / size,
            height: (rect.y1 - rect.y0) / size,
        }
    }

    /// Convert a normalized annotation back to pixels at this zoom.
    pub fn to_pixels(&self, annotation: &Annotation) -> PixelRect {
        let size = self.zoomed_size();
        let half_w = annotation.width / 2.0;
        let half_h = annotation.height / 2.0;
        PixelRect {
            x0: (annotation.x_center - half_w) * size,
            y0: (annotation.y_center - half_h) * size,
            x1: (annotation.x_center + half_w) * size,
            y1: (annotation.y_center + half_h) * size,
        }
    }
}

/// Zoom factor that moves in fixed multiplicative steps within bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    factor: f64,
    step: f64,
    min: f64,
    max: f64,
}

impl Zoom {
    pub const DEFAULT_STEP: f64 = 1.1;
    pub const MIN: f64 = 0.2;
    pub const MAX: f64 = 10.0;

    /// Bounds must be finite with `0 < min <= max`; `LabelerConfig::validate` checks this.
    pub fn new(step: f64, min: f64, max: f64) -> Self {
        Self {
            factor: 1.0_f64.clamp(min, max),
            step,
            min,
            max,
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Back to 1.0.
    pub fn reset(&mut self) {
        self.factor = 1.0_f64.clamp(self.min, self.max);
    }

    /// One zoom-in event. Returns true if the factor changed.
    pub fn zoom_in(&mut self) -> bool {
        self.set(self.factor * self.step)
    }

    /// One zoom-out event. Returns true if the factor changed.
    pub fn zoom_out(&mut self) -> bool {
        self.set(self.factor / self.step)
    }

    fn set(&mut self, factor: f64) -> bool {
        let old = self.factor;
        self.factor = factor.clamp(self.min, self.max);
        self.factor != old
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STEP, Self::MIN, Self::MAX)
    }
}
