// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for images, label files and configuration.

pub mod discovery;
pub mod media;
pub mod serialization;
pub mod sidecar;
