// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/mod.rs
//
// Pure geometry and crop domain logic. No I/O, no rendering backend.

pub mod geometry;

pub use geometry::{map_selection, CropRegion, DevicePoint, DeviceRect, PixelRegion, Viewport};
