// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Engine constants that should not be changed by the user.

/// Quiet period after the last resize event before the page is re-rendered,
/// in milliseconds.
pub const RESIZE_QUIET_MS: u64 = 1000;

/// Default target width for page rendering when the host never reported a
/// container size, in device pixels.
pub const DEFAULT_RENDER_WIDTH: f64 = 1280.0;

/// Smallest target width a render request is clamped to (prevents 0-wide
/// cairo surfaces during container collapse).
pub const MIN_RENDER_WIDTH: f64 = 16.0;

/// Tolerance for scale comparisons (float precision in viewport checks).
pub const SCALE_EPSILON: f64 = 0.0001;

/// Preview cache directory name.
pub const CACHE_DIR: &str = "pagecrop";

/// Preview file extension.
pub const PREVIEW_EXT: &str = "png";
