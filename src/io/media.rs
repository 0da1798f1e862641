// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image loading.
//!
//! Images are decoded and resized to the square canvas so that pixel
//! coordinates at zoom 1.0 line up with the normalized label space.

use anyhow::{Context, Result};
use image::imageops::FilterType;
use std::path::Path;

/// Decoded RGBA pixels ready for upload as a texture.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Load an image and resize it to `size` x `size`.
pub fn load_image(path: &Path, size: u32) -> Result<LoadedImage> {
    let img = image::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let rgba = img.resize_exact(size, size, FilterType::Lanczos3).to_rgba8();

    Ok(LoadedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}
