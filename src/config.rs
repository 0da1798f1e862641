// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Labeler configuration.
//!
//! Settings can come from a YAML or JSON file and are then overridden by
//! command line flags.

use crate::error::{Result, SessionError};
use crate::models::catalog::{default_classes, ClassEntry};
use crate::util::geometry::Zoom;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a freshly loaded image gets its first annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    /// Start empty, the user draws everything
    #[default]
    Manual,
    /// Seed from the auto-labeler ("Model Magic Label")
    Magic,
}

impl LabelMode {
    pub fn name(&self) -> &'static str {
        match self {
            LabelMode::Manual => "Manual",
            LabelMode::Magic => "Model Magic Label",
        }
    }

    pub fn all() -> &'static [LabelMode] {
        &[LabelMode::Manual, LabelMode::Magic]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelerConfig {
    /// Directory scanned for input images
    pub image_dir: PathBuf,
    /// Where label files go; next to each image when unset
    pub label_dir: Option<PathBuf>,
    /// Edge length in pixels of the square canvas at zoom 1.0
    pub canvas_size: u32,
    pub zoom_step: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub classes: Vec<ClassEntry>,
    pub mode: LabelMode,
    /// Clip drawn boxes to the image before normalizing
    pub clamp_boxes: bool,
    /// Seed each image from its existing label file
    pub resume_existing: bool,
}

impl Default for LabelerConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("images"),
            label_dir: None,
            canvas_size: 640,
            zoom_step: Zoom::DEFAULT_STEP,
            min_zoom: Zoom::MIN,
            max_zoom: Zoom::MAX,
            classes: default_classes(),
            mode: LabelMode::Manual,
            clamp_boxes: false,
            resume_existing: false,
        }
    }
}

impl LabelerConfig {
    pub fn zoom(&self) -> Zoom {
        Zoom::new(self.zoom_step, self.min_zoom, self.max_zoom)
    }

    /// Reject canvas and zoom settings the geometry can't work with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(SessionError::InvalidConfig(message));

        if self.canvas_size == 0 {
            return invalid("canvas_size must be greater than 0".to_string());
        }
        if !self.min_zoom.is_finite() || !self.max_zoom.is_finite() {
            return invalid(format!(
                "zoom bounds must be finite, got {} and {}",
                self.min_zoom, self.max_zoom
            ));
        }
        if self.min_zoom <= 0.0 {
            return invalid(format!("min_zoom must be positive, got {}", self.min_zoom));
        }
        if self.min_zoom > self.max_zoom {
            return invalid(format!(
                "min_zoom {} is greater than max_zoom {}",
                self.min_zoom, self.max_zoom
            ));
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            return invalid(format!("zoom_step must be greater than 1, got {}", self.zoom_step));
        }
        Ok(())
    }
}
