// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Class catalog.
//!
//! An ordered, immutable mapping from display names to class ids. The
//! session walks it by index ("current class") while stored annotations
//! refer to classes by id.

use crate::error::{Result, SessionError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    pub name: String,
    pub id: u32,
}

impl ClassEntry {
    pub fn new(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

/// Classes used when no configuration is given.
pub fn default_classes() -> Vec<ClassEntry> {
    vec![
        ClassEntry::new("Blue Cone", 0),
        ClassEntry::new("Large Orange Cone", 1),
        ClassEntry::new("Small Orange Cone", 2),
        ClassEntry::new("Yellow Cone", 3),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCatalog {
    entries: Vec<ClassEntry>,
}

impl ClassCatalog {
    /// Build a catalog, rejecting empty lists and repeated ids.
    pub fn new(entries: Vec<ClassEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(SessionError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id) {
                return Err(SessionError::DuplicateClassId(entry.id));
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[ClassEntry] {
        &self.entries
    }

    /// Entry at a cursor position.
    pub fn at(&self, index: usize) -> Result<&ClassEntry> {
        self.entries
            .get(index)
            .ok_or(SessionError::ClassIndexOutOfRange(index))
    }

    /// Entry with the given class id.
    pub fn by_id(&self, id: u32) -> Result<&ClassEntry> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or(SessionError::UnknownClass(id))
    }

    /// Display name for a class id, falling back to the numeric id for
    /// annotations seeded with classes outside the catalog.
    pub fn name_of(&self, id: u32) -> String {
        self.by_id(id)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|_| format!("class {}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = ClassCatalog::new(default_classes()).unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.at(0).unwrap().name, "Blue Cone");
        assert_eq!(catalog.by_id(3).unwrap().name, "Yellow Cone");
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(
            ClassCatalog::new(Vec::new()),
            Err(SessionError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let entries = vec![ClassEntry::new("A", 1), ClassEntry::new("B", 1)];
        assert!(matches!(
            ClassCatalog::new(entries),
            Err(SessionError::DuplicateClassId(1))
        ));
    }

    #[test]
    fn test_lookup_failures() {
        let catalog = ClassCatalog::new(default_classes()).unwrap();
        assert!(matches!(catalog.at(4), Err(SessionError::ClassIndexOutOfRange(4))));
        assert!(matches!(catalog.by_id(9), Err(SessionError::UnknownClass(9))));
        assert_eq!(catalog.name_of(9), "class 9");
    }
}
