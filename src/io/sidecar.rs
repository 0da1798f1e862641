// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-image label files.
//!
//! One text file per image, one box per line:
//! `<class_id> <x_center> <y_center> <width> <height>` with seven
//! decimals. Files are overwritten whole and never written for an empty
//! annotation list.

use crate::error::{Result, SessionError};
use crate::models::annotation::Annotation;
use std::path::{Path, PathBuf};

/// Location of the label file for `image`.
///
/// With a label directory the file is `<label_dir>/<stem>.txt`, otherwise
/// it sits next to the image.
pub fn sidecar_path(image: &Path, label_dir: Option<&Path>) -> PathBuf {
    match label_dir {
        Some(dir) => {
            let mut name = image.file_stem().unwrap_or_default().to_os_string();
            name.push(".txt");
            dir.join(name)
        }
        None => image.with_extension("txt"),
    }
}

/// Render annotations in file format.
pub fn format_annotations<'a>(annotations: impl IntoIterator<Item = &'a Annotation>) -> String {
    annotations
        .into_iter()
        .map(|a| {
            format!(
                "{} {:.7} {:.7} {:.7} {:.7}\n",
                a.class_id, a.x_center, a.y_center, a.width, a.height
            )
        })
        .collect()
}

/// Write annotations to `path`.
///
/// Returns `Ok(false)` without touching the file when there is nothing
/// to write.
pub fn write_sidecar(path: &Path, annotations: &[Annotation]) -> Result<bool> {
    if annotations.is_empty() {
        log::debug!("No annotations, leaving {} untouched", path.display());
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SessionError::io(parent, e))?;
    }

    std::fs::write(path, format_annotations(annotations)).map_err(|e| SessionError::io(path, e))?;
    log::info!("Saved {} annotations to {}", annotations.len(), path.display());
    Ok(true)
}

/// Parse label file contents. Blank lines are skipped.
pub fn parse_annotations(path: &Path, contents: &str) -> Result<Vec<Annotation>> {
    let mut annotations = Vec::new();

    for (line_idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let malformed = |message: String| SessionError::MalformedSidecar {
            path: path.to_path_buf(),
            line: line_idx + 1,
            message,
        };

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 5 {
            return Err(malformed(format!("expected 5 fields, got {}", parts.len())));
        }

        let class_id: u32 = parts[0]
            .parse()
            .map_err(|_| malformed(format!("invalid class id '{}'", parts[0])))?;

        let mut values = [0.0f64; 4];
        for (value, part) in values.iter_mut().zip(&parts[1..]) {
            *value = part
                .parse()
                .map_err(|_| malformed(format!("invalid number '{}'", part)))?;
        }

        annotations.push(Annotation::new(
            class_id, values[0], values[1], values[2], values[3],
        ));
    }

    Ok(annotations)
}

/// Read a label file from disk.
pub fn read_sidecar(path: &Path) -> Result<Vec<Annotation>> {
    let contents = std::fs::read_to_string(path).map_err(|e| SessionError::io(path, e))?;
    parse_annotations(path, &contents)
}
