// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Auto-labeling hook for "Model Magic Label" mode.
//!
//! The session calls the labeler once per image load and takes whatever
//! it returns verbatim. A real detector would plug in here.

use crate::models::annotation::Annotation;
use anyhow::Result;
use std::path::Path;

/// Produces normalized annotations for an image.
pub trait AutoLabeler {
    fn label(&mut self, image: &Path) -> Result<Vec<Annotation>>;
}

/// Stand-in that proposes a single centered box.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderLabeler;

impl PlaceholderLabeler {
    pub const DUMMY: Annotation = Annotation {
        class_id: 1,
        x_center: 0.5,
        y_center: 0.5,
        width: 0.2,
        height: 0.2,
    };
}

impl AutoLabeler for PlaceholderLabeler {
    fn label(&mut self, image: &Path) -> Result<Vec<Annotation>> {
        log::info!("Placeholder model labeling {}", image.display());
        Ok(vec![Self::DUMMY])
    }
}
