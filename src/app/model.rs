// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/model.rs
//
// Selector state.

use std::path::PathBuf;

use image::DynamicImage;

use crate::app::document::PortableDocument;
use crate::app::form::CropForm;
use crate::app::gesture::DragGesture;
use crate::config::EngineConfig;
use crate::domain::Viewport;

// =============================================================================
// Viewport state
// =============================================================================

/// Lifecycle of the rendered-page geometry.
///
/// The mapper must never run against a stale viewport: resizes and page
/// changes move the state to `Pending` until the next render completes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ViewportState {
    /// No document loaded.
    #[default]
    Empty,
    /// A render has been requested; the previous geometry is stale.
    Pending,
    /// The geometry of the current render.
    Ready(Viewport),
}

impl ViewportState {
    /// The viewport, if a render is current.
    #[must_use]
    pub fn ready(&self) -> Option<&Viewport> {
        match self {
            ViewportState::Ready(viewport) => Some(viewport),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewportState::Ready(_))
    }
}

// =============================================================================
// Model
// =============================================================================

pub struct SelectorModel {
    // Document.
    pub document: Option<PortableDocument>,
    pub current_path: Option<PathBuf>,
    pub page_count: usize,
    pub current_page: usize,

    // Render state.
    pub viewport: ViewportState,
    pub rendered: Option<DynamicImage>,
    pub container_width: f64,

    // Selection.
    pub gesture: DragGesture,
    pub form: CropForm,

    // Configuration.
    pub config: EngineConfig,
}

impl SelectorModel {
    pub fn new(config: EngineConfig) -> Self {
        let container_width = config.render_width;
        Self {
            document: None,
            current_path: None,
            page_count: 0,
            current_page: 0,
            viewport: ViewportState::default(),
            rendered: None,
            container_width,
            gesture: DragGesture::default(),
            form: CropForm::default(),
            config,
        }
    }

    /// Whether a document is currently loaded.
    #[must_use]
    pub fn has_document(&self) -> bool {
        self.current_path.is_some()
    }

    /// Mark the current render stale and drop selection state tied to it.
    pub fn invalidate_viewport(&mut self) {
        self.viewport = ViewportState::Pending;
        self.rendered = None;
        self.gesture.reset();
    }
}
