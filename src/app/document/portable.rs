// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/document/portable.rs
//
// Portable documents (PDF) with poppler backend.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use cairo::{Context, Format, ImageSurface};
use image::{DynamicImage, ImageReader};
use poppler::PopplerDocument;

use super::{cache, RenderedPage};
use crate::constant::MIN_RENDER_WIDTH;
use crate::domain::Viewport;

/// Represents a portable document (PDF).
pub struct PortableDocument {
    /// The parsed PDF document.
    document: PopplerDocument,
    /// Path to the source file (for caching).
    source_path: PathBuf,
    /// Total number of pages.
    page_count: usize,
    /// Whether rendered previews may be served from the disk cache.
    cache_previews: bool,
}

impl PortableDocument {
    /// Open a PDF document.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let document = PopplerDocument::new_from_file(path, None)
            .map_err(|e| anyhow::anyhow!("Failed to parse PDF: {e}"))?;

        let page_count = document.get_n_pages();
        if page_count == 0 {
            return Err(anyhow::anyhow!("PDF has no pages"));
        }

        Ok(Self {
            document,
            source_path: path.to_path_buf(),
            page_count,
            cache_previews: true,
        })
    }

    /// Disable the preview disk cache for this document.
    pub fn set_cache_previews(&mut self, enabled: bool) {
        self.cache_previews = enabled;
    }

    /// Render a page scaled so its width matches `target_width` device
    /// pixels. The returned viewport carries the resulting scale factor
    /// (rendered width / native page width).
    pub fn render_page(&self, page_index: usize, target_width: f64) -> anyhow::Result<RenderedPage> {
        let target_width = target_width.max(MIN_RENDER_WIDTH);

        let page = self
            .document
            .get_page(page_index)
            .ok_or_else(|| anyhow::anyhow!("Failed to get page {page_index}"))?;

        let (page_width, page_height) = page.get_size();
        if page_width <= 0.0 || page_height <= 0.0 {
            return Err(anyhow::anyhow!(
                "Page {page_index} has invalid size {page_width}x{page_height}"
            ));
        }

        let scale = target_width / page_width;
        let scaled_width = (page_width * scale).round();
        let scaled_height = (page_height * scale).round();
        let viewport = Viewport::new(scaled_width, scaled_height, scale);

        if self.cache_previews {
            if let Some(image) =
                cache::load_preview(&self.source_path, page_index, scaled_width as u32)
            {
                return Ok(RenderedPage {
                    page_index,
                    page_count: self.page_count,
                    image,
                    viewport,
                });
            }
        }

        let surface = ImageSurface::create(Format::ARgb32, scaled_width as i32, scaled_height as i32)
            .map_err(|e| anyhow::anyhow!("Failed to create Cairo surface: {e}"))?;

        let context = Context::new(&surface)
            .map_err(|e| anyhow::anyhow!("Failed to create Cairo context: {e}"))?;

        // Fill with white background.
        context.set_source_rgb(1.0, 1.0, 1.0);
        let _ = context.paint();

        context.scale(scale, scale);
        page.render(&context);

        drop(context);
        surface.flush();

        let mut png_data: Vec<u8> = Vec::new();
        surface
            .write_to_png(&mut png_data)
            .map_err(|e| anyhow::anyhow!("Failed to write PNG: {e}"))?;

        let image = ImageReader::new(Cursor::new(png_data))
            .with_guessed_format()
            .map_err(|e| anyhow::anyhow!("Failed to read PNG format: {e}"))?
            .decode()
            .map_err(|e| anyhow::anyhow!("Failed to decode PNG: {e}"))?;

        if self.cache_previews {
            if let Err(e) =
                cache::save_preview(&self.source_path, page_index, scaled_width as u32, &image)
            {
                log::warn!("Failed to cache preview for page {page_index}: {e}");
            }
        }

        Ok(RenderedPage {
            page_index,
            page_count: self.page_count,
            image,
            viewport,
        })
    }

    /// Crop a rendered page image to the given pixel region.
    pub fn crop_rendered(
        image: &DynamicImage,
        region: crate::domain::PixelRegion,
    ) -> anyhow::Result<DynamicImage> {
        if !region.is_valid() {
            return Err(anyhow::anyhow!("Crop region has no area"));
        }
        if region.x + region.width > image.width() || region.y + region.height > image.height() {
            return Err(anyhow::anyhow!(
                "Crop region {}x{}+{}+{} exceeds image {}x{}",
                region.width,
                region.height,
                region.x,
                region.y,
                image.width(),
                image.height()
            ));
        }

        Ok(image.crop_imm(region.x, region.y, region.width, region.height))
    }

    /// Get total page count.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PixelRegion;

    #[test]
    fn crop_rendered_extracts_the_region() {
        let image = DynamicImage::new_rgba8(100, 80);
        let region = PixelRegion {
            x: 10,
            y: 20,
            width: 30,
            height: 40,
        };

        let cropped = PortableDocument::crop_rendered(&image, region).unwrap();
        assert_eq!(cropped.width(), 30);
        assert_eq!(cropped.height(), 40);
    }

    #[test]
    fn crop_rendered_rejects_empty_region() {
        let image = DynamicImage::new_rgba8(100, 80);
        let region = PixelRegion {
            x: 0,
            y: 0,
            width: 0,
            height: 10,
        };

        assert!(PortableDocument::crop_rendered(&image, region).is_err());
    }

    #[test]
    fn crop_rendered_rejects_out_of_bounds_region() {
        let image = DynamicImage::new_rgba8(100, 80);
        let region = PixelRegion {
            x: 90,
            y: 0,
            width: 20,
            height: 10,
        };

        assert!(PortableDocument::crop_rendered(&image, region).is_err());
    }
}
