// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/gesture.rs
//
// Pointer-drag gesture state for rectangle selection.

use crate::domain::{DevicePoint, DeviceRect};

/// A single pointer-down-to-pointer-up interaction, tracked in device
/// pixels. Single-pointer assumption: a pointer-down while a drag is in
/// progress restarts the gesture and drops the previous preview.
#[derive(Debug, Clone, Default)]
pub struct DragGesture {
    start: Option<DevicePoint>,
    current: Option<DevicePoint>,
    active: bool,
}

impl DragGesture {
    /// Begin a new drag at the given point. Any prior selection preview is
    /// discarded.
    pub fn begin(&mut self, point: DevicePoint) {
        self.start = Some(point);
        self.current = Some(point);
        self.active = true;
    }

    /// Track pointer movement. Ignored unless a drag is active.
    pub fn move_to(&mut self, point: DevicePoint) {
        if !self.active {
            return;
        }
        self.current = Some(point);
    }

    /// Finish the drag, returning its corner points. Returns `None` if no
    /// drag was active (a stray pointer-up).
    pub fn release(&mut self, point: DevicePoint) -> Option<(DevicePoint, DevicePoint)> {
        if !self.active {
            return None;
        }
        self.active = false;
        self.current = Some(point);
        self.start.map(|start| (start, point))
    }

    /// Drop all gesture state, e.g. when the viewport is invalidated.
    pub fn reset(&mut self) {
        self.start = None;
        self.current = None;
        self.active = false;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The rectangle currently spanned by the gesture, for live visual
    /// feedback. Present while dragging and after release, until reset.
    #[must_use]
    pub fn preview_rect(&self) -> Option<DeviceRect> {
        match (self.start, self.current) {
            (Some(start), Some(current)) => Some(DeviceRect::from_corners(start, current)),
            _ => None,
        }
    }
}
