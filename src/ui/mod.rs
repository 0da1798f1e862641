// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the labeling window.

pub mod canvas;
pub mod edit_dialog;
pub mod toolbar;
