// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation store for the currently open image.
//!
//! Insertion order is display order: later boxes draw on top and win
//! hit tests. Each box carries a stable [`AnnotationId`], so deleting an
//! entry never changes what another id refers to.

use super::annotation::{Annotation, AnnotationId, PixelPoint, PixelRect};
use crate::error::{Result, SessionError};
use crate::util::geometry::ViewTransform;

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    id: AnnotationId,
    annotation: Annotation,
}

#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    entries: Vec<Entry>,
    next_id: u64,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform a pixel rectangle at the given view and append it.
    pub fn add(&mut self, class_id: u32, rect: PixelRect, view: &ViewTransform) -> AnnotationId {
        self.push(view.to_normalized(class_id, rect))
    }

    /// Append an annotation that is already normalized.
    pub fn push(&mut self, annotation: Annotation) -> AnnotationId {
        let id = AnnotationId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, annotation });
        id
    }

    /// Replace the class of an annotation, keeping its geometry.
    pub fn relabel(&mut self, id: AnnotationId, class_id: u32) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(SessionError::AnnotationNotFound(id))?;
        entry.annotation = entry.annotation.with_class(class_id);
        Ok(())
    }

    /// Remove an annotation. Remaining entries keep their relative order.
    pub fn delete(&mut self, id: AnnotationId) -> Result<Annotation> {
        let index = self
            .index_of(id)
            .ok_or(SessionError::AnnotationNotFound(id))?;
        Ok(self.entries.remove(index).annotation)
    }

    /// Topmost annotation whose on-screen rectangle contains `point`.
    pub fn hit_test(&self, point: PixelPoint, view: &ViewTransform) -> Option<AnnotationId> {
        self.entries
            .iter()
            .rev()
            .find(|entry| view.to_pixels(&entry.annotation).contains(point))
            .map(|entry| entry.id)
    }

    /// All annotations in display order as `(index, id, annotation)`.
    pub fn all(&self) -> impl Iterator<Item = (usize, AnnotationId, &Annotation)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (index, entry.id, &entry.annotation))
    }

    /// Annotations in display order, without ids.
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> + '_ {
        self.entries.iter().map(|entry| &entry.annotation)
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.annotation)
    }

    /// Current display position of an annotation.
    pub fn index_of(&self, id: AnnotationId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries. Ids keep counting up.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
