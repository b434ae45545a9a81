// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/document/cache.rs
//
// Disk cache for rendered page previews.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use sha2::{Digest, Sha256};

use crate::constant::{CACHE_DIR, PREVIEW_EXT};

/// Resolve the preview cache directory, creating it on first use.
fn cache_dir() -> Option<PathBuf> {
    let dir = dirs::cache_dir()?.join(CACHE_DIR);
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Cache key for one rendered preview.
///
/// Hashes the source path together with its modification time and size,
/// so edits to the source file invalidate stale previews. Page index and
/// render width are part of the file name, not the hash, to keep cache
/// entries of one document greppable.
fn cache_file(source: &Path, page: usize, width: u32) -> Option<PathBuf> {
    let meta = std::fs::metadata(source).ok()?;
    let modified = meta
        .modified()
        .ok()?
        .duration_since(std::time::UNIX_EPOCH)
        .ok()?;

    let mut hasher = Sha256::new();
    hasher.update(source.to_string_lossy().as_bytes());
    hasher.update(modified.as_nanos().to_le_bytes());
    hasher.update(meta.len().to_le_bytes());
    let digest = hasher.finalize();

    let mut key = String::with_capacity(16);
    for byte in &digest[..8] {
        key.push_str(&format!("{byte:02x}"));
    }

    Some(cache_dir()?.join(format!("{key}-p{page}-w{width}.{PREVIEW_EXT}")))
}

/// Load a cached preview, if one exists for this source/page/width.
pub fn load_preview(source: &Path, page: usize, width: u32) -> Option<DynamicImage> {
    let path = cache_file(source, page, width)?;
    if !path.exists() {
        return None;
    }

    match image::open(&path) {
        Ok(img) => Some(img),
        Err(e) => {
            log::warn!("Discarding unreadable cached preview {}: {e}", path.display());
            let _ = std::fs::remove_file(&path);
            None
        }
    }
}

/// Write a rendered preview to the cache.
pub fn save_preview(
    source: &Path,
    page: usize,
    width: u32,
    image: &DynamicImage,
) -> anyhow::Result<()> {
    let path = cache_file(source, page, width)
        .ok_or_else(|| anyhow::anyhow!("Preview cache unavailable"))?;
    image.save(&path)?;
    Ok(())
}
