// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation session.
//!
//! A session walks an ordered list of images one at a time. For the open
//! image it holds the boxes, the zoom and the class cursor used for new
//! boxes. Advancing past the last class saves the label file and moves
//! to the next image; once every image is done the session stays in the
//! terminal "all labeled" state until a new image set is loaded.

use crate::config::{LabelMode, LabelerConfig};
use crate::error::{Result, SessionError};
use crate::io::sidecar;
use crate::labeler::AutoLabeler;
use crate::models::annotation::{Annotation, AnnotationId, PixelPoint, PixelRect};
use crate::models::catalog::{ClassCatalog, ClassEntry};
use crate::models::store::AnnotationStore;
use crate::util::geometry::{ViewTransform, Zoom};
use std::path::{Path, PathBuf};

/// Outcome of [`Session::advance_class`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Still on the same image with the next class selected
    NextClass,
    /// Labels were saved and the next image is open
    NextImage,
    /// Labels were saved and there are no images left
    AllLabeled,
}

pub struct Session {
    catalog: ClassCatalog,
    images: Vec<PathBuf>,
    image_index: usize,
    class_cursor: usize,
    store: AnnotationStore,
    zoom: Zoom,
    canvas_size: f64,
    label_dir: Option<PathBuf>,
    mode: LabelMode,
    clamp_boxes: bool,
    resume_existing: bool,
    labeler: Box<dyn AutoLabeler>,
}

impl Session {
    /// Open a session over `images` and load the first one.
    pub fn open(
        images: Vec<PathBuf>,
        config: &LabelerConfig,
        labeler: Box<dyn AutoLabeler>,
    ) -> Result<Self> {
        config.validate()?;
        let catalog = ClassCatalog::new(config.classes.clone())?;
        let mut session = Self {
            catalog,
            images,
            image_index: 0,
            class_cursor: 0,
            store: AnnotationStore::new(),
            zoom: config.zoom(),
            canvas_size: f64::from(config.canvas_size),
            label_dir: config.label_dir.clone(),
            mode: config.mode,
            clamp_boxes: config.clamp_boxes,
            resume_existing: config.resume_existing,
            labeler,
        };
        session.enter_image();
        Ok(session)
    }

    /// Save the open image and hand back where its labels went.
    pub fn close(self) -> Result<Option<PathBuf>> {
        log::info!("Closing session");
        self.save()
    }

    /// Replace the image list, saving the open image first.
    pub fn load_image_set(&mut self, images: Vec<PathBuf>) -> Result<()> {
        self.save()?;
        self.images = images;
        self.image_index = 0;
        self.enter_image();
        Ok(())
    }

    fn enter_image(&mut self) {
        self.store.clear();
        self.class_cursor = 0;
        self.zoom.reset();

        let Some(path) = self.current_image().map(Path::to_path_buf) else {
            log::info!("All images labeled");
            return;
        };
        log::info!(
            "Loaded image {}/{}: {}",
            self.image_index + 1,
            self.images.len(),
            path.display()
        );

        let mut resumed = false;
        if self.resume_existing {
            let label_path = self.sidecar_path(&path);
            if label_path.exists() {
                match sidecar::read_sidecar(&label_path) {
                    Ok(annotations) => {
                        log::info!("Resumed {} annotations from {}", annotations.len(), label_path.display());
                        resumed = !annotations.is_empty();
                        for annotation in annotations {
                            self.store.push(annotation);
                        }
                    }
                    Err(e) => log::warn!("Ignoring existing labels: {}", e),
                }
            }
        }

        // Resumed labels already went through review; don't stack proposals on top
        if self.mode == LabelMode::Magic && !resumed {
            match self.labeler.label(&path) {
                Ok(annotations) => {
                    log::info!("Auto-labeler proposed {} boxes", annotations.len());
                    for annotation in annotations {
                        self.store.push(annotation);
                    }
                }
                Err(e) => log::warn!("Auto-labeler failed on {}: {}", path.display(), e),
            }
        }
    }

    /// Move the class cursor; past the last class, save and open the next image.
    ///
    /// If saving fails nothing moves, so the call can be retried.
    pub fn advance_class(&mut self) -> Result<Advance> {
        if self.is_complete() {
            return Err(SessionError::AllLabeled);
        }

        if self.class_cursor + 1 < self.catalog.len() {
            self.class_cursor += 1;
            log::info!("Current class: {}", self.catalog.at(self.class_cursor)?.name);
            return Ok(Advance::NextClass);
        }

        self.save()?;
        self.image_index += 1;
        self.enter_image();

        if self.is_complete() {
            Ok(Advance::AllLabeled)
        } else {
            Ok(Advance::NextImage)
        }
    }

    /// Write the open image's label file.
    ///
    /// Returns the path written, or `None` if there was nothing to save.
    /// An existing file is left alone when the box list is empty.
    pub fn save(&self) -> Result<Option<PathBuf>> {
        let Some(image) = self.current_image() else {
            return Ok(None);
        };
        let path = self.sidecar_path(image);
        let annotations: Vec<Annotation> = self.store.annotations().copied().collect();

        if sidecar::write_sidecar(&path, &annotations)? {
            Ok(Some(path))
        } else {
            Ok(None)
        }
    }

    /// Add a box drawn in canvas pixels with the current class.
    pub fn draw_box(&mut self, rect: PixelRect) -> Result<AnnotationId> {
        if self.is_complete() {
            return Err(SessionError::AllLabeled);
        }

        let view = self.view();
        let mut rect = rect.ordered();
        if self.clamp_boxes {
            rect = rect.clamped(view.zoomed_size());
        }

        let class_id = self.catalog.at(self.class_cursor)?.id;
        let id = self.store.add(class_id, rect, &view);
        log::info!("Added annotation {}, total: {}", id, self.store.len());
        Ok(id)
    }

    /// Change the class of a box. The class must be in the catalog.
    pub fn relabel(&mut self, id: AnnotationId, class_id: u32) -> Result<()> {
        self.catalog.by_id(class_id)?;
        self.store.relabel(id, class_id)?;
        log::info!("Relabeled annotation {} as {}", id, self.catalog.name_of(class_id));
        Ok(())
    }

    pub fn delete(&mut self, id: AnnotationId) -> Result<Annotation> {
        let annotation = self.store.delete(id)?;
        log::info!("Deleted annotation {}, total: {}", id, self.store.len());
        Ok(annotation)
    }

    /// Topmost box under a canvas point at the current zoom.
    pub fn hit_test(&self, point: PixelPoint) -> Option<AnnotationId> {
        self.store.hit_test(point, &self.view())
    }

    /// Boxes in draw order with their rectangles at the current zoom.
    pub fn boxes(&self) -> impl Iterator<Item = (AnnotationId, PixelRect, &Annotation)> + '_ {
        let view = self.view();
        self.store
            .all()
            .map(move |(_, id, annotation)| (id, view.to_pixels(annotation), annotation))
    }

    pub fn zoom_in(&mut self) -> bool {
        self.zoom.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom.zoom_out()
    }

    pub fn reset_zoom(&mut self) {
        self.zoom.reset();
    }

    pub fn zoom(&self) -> f64 {
        self.zoom.factor()
    }

    pub fn view(&self) -> ViewTransform {
        ViewTransform::new(self.canvas_size, self.zoom.factor())
    }

    /// Takes effect when the next image is loaded.
    pub fn set_mode(&mut self, mode: LabelMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> LabelMode {
        self.mode
    }

    pub fn is_complete(&self) -> bool {
        self.image_index >= self.images.len()
    }

    pub fn current_image(&self) -> Option<&Path> {
        self.images.get(self.image_index).map(PathBuf::as_path)
    }

    pub fn current_class(&self) -> Option<&ClassEntry> {
        if self.is_complete() {
            return None;
        }
        self.catalog.at(self.class_cursor).ok()
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn sidecar_path(&self, image: &Path) -> PathBuf {
        sidecar::sidecar_path(image, self.label_dir.as_deref())
    }

    /// One-line summary for the status bar.
    pub fn status_text(&self) -> String {
        match self.current_class() {
            Some(class) => format!(
                "Image {}/{} | Label: {} | Zoom: {:.2}x",
                self.image_index() + 1,
                self.image_count(),
                class.name,
                self.zoom.factor()
            ),
            None => "All images labeled.".to_string(),
        }
    }

    pub fn title(&self) -> String {
        match self.current_image().and_then(Path::file_stem) {
            Some(stem) => format!("Labeling - {}", stem.to_string_lossy()),
            None => "Labeling".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labeler::PlaceholderLabeler;
    use anyhow::anyhow;

    struct FailingLabeler;

    impl AutoLabeler for FailingLabeler {
        fn label(&mut self, _image: &Path) -> anyhow::Result<Vec<Annotation>> {
            Err(anyhow!("model unavailable"))
        }
    }

    fn two_class_config() -> LabelerConfig {
        LabelerConfig {
            classes: vec![ClassEntry::new("Blue", 0), ClassEntry::new("Orange", 1)],
            ..LabelerConfig::default()
        }
    }

    fn images_in(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|name| dir.join(name)).collect()
    }

    fn open(images: Vec<PathBuf>, config: &LabelerConfig) -> Session {
        Session::open(images, config, Box::new(PlaceholderLabeler)).unwrap()
    }

    #[test]
    fn test_draw_advance_and_save_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let images = images_in(dir.path(), &["a.jpg", "b.jpg"]);
        let mut session = open(images.clone(), &two_class_config());

        let id = session.draw_box(PixelRect::new(0.0, 0.0, 64.0, 64.0)).unwrap();
        assert!(session
            .store()
            .get(id)
            .unwrap()
            .approx_eq(&Annotation::new(0, 0.05, 0.05, 0.1, 0.1), 1e-9));

        assert_eq!(session.advance_class().unwrap(), Advance::NextClass);
        assert_eq!(session.current_class().unwrap().name, "Orange");
        assert_eq!(session.advance_class().unwrap(), Advance::NextImage);

        let saved = std::fs::read_to_string(dir.path().join("a.txt")).unwrap();
        assert_eq!(saved, "0 0.0500000 0.0500000 0.1000000 0.1000000\n");
        assert_eq!(session.current_image(), Some(images[1].as_path()));
        assert!(session.store().is_empty());
        assert_eq!(session.current_class().unwrap().name, "Blue");
    }

    #[test]
    fn test_boxes_use_current_class() {
        let mut session = open(vec!["a.jpg".into()], &two_class_config());
        session.advance_class().unwrap();
        let id = session.draw_box(PixelRect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert_eq!(session.store().get(id).unwrap().class_id, 1);
    }

    #[test]
    fn test_empty_image_list_is_complete() {
        let mut session = open(Vec::new(), &two_class_config());
        assert!(session.is_complete());
        assert_eq!(session.status_text(), "All images labeled.");
        assert!(matches!(
            session.draw_box(PixelRect::new(0.0, 0.0, 1.0, 1.0)),
            Err(SessionError::AllLabeled)
        ));
        assert!(matches!(session.advance_class(), Err(SessionError::AllLabeled)));
        assert_eq!(session.save().unwrap(), None);
    }

    #[test]
    fn test_last_image_reaches_all_labeled() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open(images_in(dir.path(), &["a.jpg"]), &two_class_config());
        session.advance_class().unwrap();
        assert_eq!(session.advance_class().unwrap(), Advance::AllLabeled);
        assert!(session.is_complete());
        // Nothing drawn, nothing written
        assert!(!dir.path().join("a.txt").exists());
    }

    #[test]
    fn test_load_image_set_leaves_terminal_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open(Vec::new(), &two_class_config());
        session
            .load_image_set(images_in(dir.path(), &["c.png"]))
            .unwrap();
        assert!(!session.is_complete());
        assert!(session.draw_box(PixelRect::new(0.0, 0.0, 5.0, 5.0)).is_ok());
    }

    #[test]
    fn test_inverted_drag_has_positive_size() {
        let mut session = open(vec!["a.jpg".into()], &two_class_config());
        let id = session.draw_box(PixelRect::new(64.0, 64.0, 0.0, 0.0)).unwrap();
        let ann = session.store().get(id).unwrap();
        assert!(ann.width > 0.0 && ann.height > 0.0);
    }

    #[test]
    fn test_clamp_boxes_option() {
        let config = LabelerConfig {
            clamp_boxes: true,
            ..two_class_config()
        };
        let mut session = open(vec!["a.jpg".into()], &config);
        let id = session.draw_box(PixelRect::new(-64.0, 0.0, 64.0, 64.0)).unwrap();
        let ann = session.store().get(id).unwrap();
        assert!((ann.x_center - 0.05).abs() < 1e-9);
        assert!((ann.width - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_unclamped_by_default() {
        let mut session = open(vec!["a.jpg".into()], &two_class_config());
        let id = session.draw_box(PixelRect::new(-64.0, 0.0, 64.0, 64.0)).unwrap();
        assert_eq!(session.store().get(id).unwrap().x_center, 0.0);
    }

    #[test]
    fn test_draw_at_zoom_stores_normalized() {
        let mut session = open(vec!["a.jpg".into()], &two_class_config());
        while session.zoom() < 2.0 {
            session.zoom_in();
        }
        let zoom = session.zoom();
        let id = session
            .draw_box(PixelRect::new(0.0, 0.0, 64.0 * zoom, 64.0 * zoom))
            .unwrap();
        assert!(session
            .store()
            .get(id)
            .unwrap()
            .approx_eq(&Annotation::new(0, 0.05, 0.05, 0.1, 0.1), 1e-9));

        let (_, rect, _) = session.boxes().next().unwrap();
        assert!((rect.x1 - 64.0 * zoom).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_resets_on_next_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open(images_in(dir.path(), &["a.jpg", "b.jpg"]), &two_class_config());
        session.zoom_in();
        assert!(session.zoom() > 1.0);
        session.advance_class().unwrap();
        session.advance_class().unwrap();
        assert_eq!(session.zoom(), 1.0);
    }

    #[test]
    fn test_relabel_and_delete() {
        let mut session = open(vec!["a.jpg".into()], &two_class_config());
        let a = session.draw_box(PixelRect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        let b = session.draw_box(PixelRect::new(50.0, 50.0, 150.0, 150.0)).unwrap();

        assert_eq!(session.hit_test(PixelPoint::new(75.0, 75.0)), Some(b));
        session.relabel(b, 1).unwrap();
        assert!(matches!(session.relabel(b, 7), Err(SessionError::UnknownClass(7))));

        session.delete(b).unwrap();
        assert_eq!(session.hit_test(PixelPoint::new(75.0, 75.0)), Some(a));
        assert!(matches!(session.delete(b), Err(SessionError::AnnotationNotFound(_))));
    }

    #[test]
    fn test_magic_mode_seeds_from_labeler() {
        let config = LabelerConfig {
            mode: LabelMode::Magic,
            ..two_class_config()
        };
        let session = open(vec!["a.jpg".into()], &config);
        let seeded: Vec<_> = session.store().annotations().copied().collect();
        assert_eq!(seeded, vec![PlaceholderLabeler::DUMMY]);
    }

    #[test]
    fn test_mode_change_applies_on_next_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open(images_in(dir.path(), &["a.jpg", "b.jpg"]), &two_class_config());
        session.set_mode(LabelMode::Magic);
        assert!(session.store().is_empty());

        session.advance_class().unwrap();
        session.advance_class().unwrap();
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn test_failing_labeler_starts_empty() {
        let config = LabelerConfig {
            mode: LabelMode::Magic,
            ..two_class_config()
        };
        let session = Session::open(vec!["a.jpg".into()], &config, Box::new(FailingLabeler)).unwrap();
        assert!(session.store().is_empty());
        assert!(!session.is_complete());
    }

    #[test]
    fn test_close_saves_open_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open(images_in(dir.path(), &["a.jpg"]), &two_class_config());
        session.draw_box(PixelRect::new(0.0, 0.0, 64.0, 64.0)).unwrap();

        let saved = session.close().unwrap();
        assert_eq!(saved, Some(dir.path().join("a.txt")));
        assert!(dir.path().join("a.txt").exists());
    }

    #[test]
    fn test_empty_save_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "1 0.5 0.5 0.2 0.2\n").unwrap();
        let session = open(images_in(dir.path(), &["a.jpg"]), &two_class_config());

        assert_eq!(session.save().unwrap(), None);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("a.txt")).unwrap(),
            "1 0.5 0.5 0.2 0.2\n"
        );
    }

    #[test]
    fn test_save_failure_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("labels");
        std::fs::write(&blocker, "not a directory").unwrap();
        let config = LabelerConfig {
            label_dir: Some(blocker.clone()),
            ..two_class_config()
        };
        let mut session = open(images_in(dir.path(), &["a.jpg", "b.jpg"]), &config);
        session.draw_box(PixelRect::new(0.0, 0.0, 64.0, 64.0)).unwrap();
        session.advance_class().unwrap();

        assert!(matches!(session.advance_class(), Err(SessionError::Io { .. })));
        assert_eq!(session.image_index(), 0);
        assert_eq!(session.store().len(), 1);
        assert_eq!(session.current_class().unwrap().name, "Orange");

        std::fs::remove_file(&blocker).unwrap();
        assert_eq!(session.advance_class().unwrap(), Advance::NextImage);
        assert!(blocker.join("a.txt").exists());
    }

    #[test]
    fn test_resume_existing_labels() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "1 0.5000000 0.5000000 0.2000000 0.2000000\n").unwrap();
        let config = LabelerConfig {
            resume_existing: true,
            ..two_class_config()
        };
        let session = open(images_in(dir.path(), &["a.jpg"]), &config);
        assert_eq!(session.store().len(), 1);

        let fresh = open(images_in(dir.path(), &["a.jpg"]), &two_class_config());
        assert!(fresh.store().is_empty());
    }

    #[test]
    fn test_status_and_title() {
        let session = open(vec!["images/a.jpg".into(), "images/b.jpg".into()], &two_class_config());
        assert_eq!(session.status_text(), "Image 1/2 | Label: Blue | Zoom: 1.00x");
        assert_eq!(session.title(), "Labeling - a");
    }

    #[test]
    fn test_resume_skips_auto_labeler() {
        let dir = tempfile::tempdir().unwrap();
        let images = images_in(dir.path(), &["a.jpg"]);
        let config = LabelerConfig {
            resume_existing: true,
            mode: LabelMode::Magic,
            ..two_class_config()
        };

        // First pass has no labels yet, so the auto-labeler seeds one box
        let first = open(images.clone(), &config);
        assert_eq!(first.store().len(), 1);
        first.close().unwrap();

        // Reopening resumes that box without adding another proposal
        let second = open(images, &config);
        assert_eq!(second.store().len(), 1);
        second.close().unwrap();

        let saved = std::fs::read_to_string(dir.path().join("a.txt")).unwrap();
        assert_eq!(saved.lines().count(), 1);
    }

    #[test]
    fn test_open_rejects_inverted_zoom_bounds() {
        let config = LabelerConfig {
            min_zoom: 5.0,
            max_zoom: 1.0,
            ..two_class_config()
        };
        assert!(matches!(
            Session::open(vec!["a.jpg".into()], &config, Box::new(PlaceholderLabeler)),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_open_rejects_zero_canvas() {
        let config = LabelerConfig {
            canvas_size: 0,
            ..two_class_config()
        };
        assert!(matches!(
            Session::open(vec!["a.jpg".into()], &config, Box::new(PlaceholderLabeler)),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_open_rejects_empty_catalog() {
        let config = LabelerConfig {
            classes: Vec::new(),
            ..LabelerConfig::default()
        };
        assert!(matches!(
            Session::open(Vec::new(), &config, Box::new(PlaceholderLabeler)),
            Err(SessionError::EmptyCatalog)
        ));
    }
}
