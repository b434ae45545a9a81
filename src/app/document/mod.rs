// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/document/mod.rs
//
// Document module root: kind detection and the rendered-page unit.

pub mod cache;
pub mod portable;

use std::path::Path;

use image::DynamicImage;

use crate::domain::Viewport;

pub use portable::PortableDocument;

/// High-level classification of selectable documents.
///
/// Only portable documents can be cropped through the selector; anything
/// else is ignored at file-selection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Portable,
}

impl DocumentKind {
    /// Derive document kind from file extension.
    ///
    /// Returns `None` if the extension is not recognized as a supported
    /// document kind.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();

        match ext.as_str() {
            "pdf" => Some(DocumentKind::Portable),
            _ => None,
        }
    }
}

/// One rendered page: the raster output plus the viewport geometry it was
/// rendered at. The unit the render backend hands back to the selector.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Page index the render belongs to (0-based).
    pub page_index: usize,
    /// Total pages in the source document.
    pub page_count: usize,
    /// The rasterized page.
    pub image: DynamicImage,
    /// Geometry of the render, including the device-to-native scale.
    pub viewport: Viewport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_pdf_extension_case_insensitively() {
        assert_eq!(
            DocumentKind::from_path(&PathBuf::from("scan.pdf")),
            Some(DocumentKind::Portable)
        );
        assert_eq!(
            DocumentKind::from_path(&PathBuf::from("SCAN.PDF")),
            Some(DocumentKind::Portable)
        );
    }

    #[test]
    fn ignores_non_document_files() {
        assert_eq!(DocumentKind::from_path(&PathBuf::from("photo.png")), None);
        assert_eq!(DocumentKind::from_path(&PathBuf::from("notes.txt")), None);
        assert_eq!(DocumentKind::from_path(&PathBuf::from("no_extension")), None);
    }
}
