// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/message.rs
//
// Selector messages: host events, pointer input, and internal signals.

use std::path::PathBuf;

use crate::app::document::RenderedPage;

#[derive(Debug, Clone)]
pub enum SelectorMessage {
    // File / navigation.
    FileSelected(PathBuf),
    GotoPage(usize),
    NextPage,
    PrevPage,

    // Render completion (from the driver).
    PageRendered(RenderedPage),

    // Pointer input over the rendered page, in device pixels.
    PointerPressed { x: f64, y: f64 },
    PointerMoved { x: f64, y: f64 },
    PointerReleased { x: f64, y: f64 },

    // Container geometry.
    ContainerResized { width: f64 },
    ResizeSettled,

    // Crop operations.
    ApplyCrop,
    Submit,
}
