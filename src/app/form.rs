// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/form.rs
//
// The four numeric output fields consumed by the form-submission collaborator.

use crate::domain::{CropRegion, Viewport};

/// Crop coordinates staged for submission, in native page units.
///
/// Fields mirror the host form: each may be unset until a gesture commits
/// a region. Finalization never fails; an incomplete or degenerate
/// selection falls back to the full page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CropForm {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl CropForm {
    /// Write a committed region into the fields, replacing any prior values.
    pub fn set_region(&mut self, region: CropRegion) {
        self.x = Some(region.x);
        self.y = Some(region.y);
        self.width = Some(region.width);
        self.height = Some(region.height);
    }

    /// Clear all fields, e.g. when a new document is loaded.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when all four fields hold values.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.x.is_some() && self.y.is_some() && self.width.is_some() && self.height.is_some()
    }

    /// Resolve the fields into the region to submit.
    ///
    /// Any unset field or a zero dimension collapses the selection to the
    /// full page. This is a usability default, not an error.
    #[must_use]
    pub fn finalize(&self, viewport: &Viewport) -> CropRegion {
        match (self.x, self.y, self.width, self.height) {
            (Some(x), Some(y), Some(width), Some(height)) if width != 0.0 && height != 0.0 => {
                CropRegion {
                    x,
                    y,
                    width,
                    height,
                }
            }
            _ => viewport.full_page(),
        }
    }
}
