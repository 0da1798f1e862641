// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for the labeling session.

use crate::models::annotation::AnnotationId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the annotation store, class catalog and session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The annotation was deleted or never existed
    #[error("Annotation not found: {0}")]
    AnnotationNotFound(AnnotationId),

    /// Class id is not part of the catalog
    #[error("Unknown class id: {0}")]
    UnknownClass(u32),

    /// Class cursor points past the end of the catalog
    #[error("Class index out of range: {0}")]
    ClassIndexOutOfRange(usize),

    #[error("Class catalog is empty")]
    EmptyCatalog,

    #[error("Duplicate class id in catalog: {0}")]
    DuplicateClassId(u32),

    /// A configured canvas or zoom setting is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Every discovered image has been labeled
    #[error("All images labeled")]
    AllLabeled,

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed sidecar {path:?} line {line}: {message}")]
    MalformedSidecar {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl SessionError {
    /// Wrap an I/O error together with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SessionError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
