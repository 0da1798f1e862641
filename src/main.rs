// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! boxmark - bounding box labeling tool
//!
//! A desktop application for drawing bounding boxes on a folder of images
//! and writing them as normalized YOLO-style label files.

mod app;
mod config;
mod error;
mod io;
mod labeler;
mod models;
mod session;
mod ui;
mod util;

use anyhow::Result;
use app::BoxmarkApp;
use clap::Parser;
use config::{LabelMode, LabelerConfig};
use labeler::PlaceholderLabeler;
use session::Session;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "boxmark", version, about = "Draw bounding boxes and export YOLO label files")]
struct Args {
    /// Configuration file (.yaml, .yml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing the images to label
    #[arg(short, long)]
    images: Option<PathBuf>,

    /// Directory for label files (defaults to next to each image)
    #[arg(short, long)]
    labels: Option<PathBuf>,

    /// Seed each image with boxes from the auto-labeler
    #[arg(long)]
    magic: bool,

    /// Write the effective configuration to this file and exit
    #[arg(long)]
    dump_config: Option<PathBuf>,
}

impl Args {
    /// Load the config file (if any) and apply command line overrides.
    fn resolve_config(&self) -> Result<LabelerConfig> {
        let mut config = match &self.config {
            Some(path) => io::serialization::load_config(path)?,
            None => LabelerConfig::default(),
        };
        if let Some(images) = &self.images {
            config.image_dir = images.clone();
        }
        if let Some(labels) = &self.labels {
            config.label_dir = Some(labels.clone());
        }
        if self.magic {
            config.mode = LabelMode::Magic;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();
    let config = args.resolve_config()?;

    if let Some(path) = &args.dump_config {
        io::serialization::save_config(&config, path)?;
        log::info!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    let images = io::discovery::discover_images(&config.image_dir);
    let session = Session::open(images, &config, Box::new(PlaceholderLabeler))?;

    let size = config.canvas_size as f32;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([size + 40.0, size + 100.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("YOLO Labeling Tool"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "boxmark",
        options,
        Box::new(|_cc| Ok(Box::new(BoxmarkApp::new(session, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
