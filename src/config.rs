// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// Global configuration for the selection engine.

use std::time::Duration;

use crate::constant::{DEFAULT_RENDER_WIDTH, RESIZE_QUIET_MS};

/// Global configuration for the selection engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Target width for page rendering until the host reports a container size.
    pub render_width: f64,
    /// Quiet period before a resize triggers a re-render.
    pub resize_quiet_period: Duration,
    /// Whether rendered previews are cached on disk.
    pub cache_previews: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            resize_quiet_period: Duration::from_millis(RESIZE_QUIET_MS),
            cache_previews: true,
        }
    }
}
