// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Configuration serialization and deserialization.
//!
//! Labeler settings are stored as YAML or JSON; the file extension picks
//! the format.

use crate::config::LabelerConfig;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Config file formats, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|s| s.to_str());
        match extension {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => bail!("Unsupported config extension: {:?}", extension),
        }
    }
}

/// Load configuration from a YAML or JSON file.
pub fn load_config(path: &Path) -> Result<LabelerConfig> {
    let format = ConfigFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: LabelerConfig = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(&text)?,
        ConfigFormat::Json => serde_json::from_str(&text)?,
    };
    log::info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Save configuration as YAML or JSON.
pub fn save_config(config: &LabelerConfig, path: &Path) -> Result<()> {
    let text = match ConfigFormat::from_path(path)? {
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
    };
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write config {}", path.display()))?;
    Ok(())
}
