// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: annotations, the class catalog and the per-image store.

pub mod annotation;
pub mod catalog;
pub mod store;
