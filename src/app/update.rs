// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/update.rs
//
// Message dispatch: state transitions and the effects they request.

use image::DynamicImage;

use crate::app::document::{DocumentKind, PortableDocument, RenderedPage};
use crate::app::message::SelectorMessage;
use crate::app::model::{SelectorModel, ViewportState};
use crate::domain::{map_selection, CropRegion, DevicePoint, DeviceRect};

/// Work the driver must perform after a state transition.
///
/// `update` itself never blocks and never touches the render backend;
/// rendering, timers, and host notification all happen through effects.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Render a page of the loaded document at the given target width and
    /// feed the result back as `SelectorMessage::PageRendered`.
    RenderPage { page: usize, target_width: f64 },
    /// Start (or restart) the resize quiet-period timer; deliver
    /// `SelectorMessage::ResizeSettled` when it elapses.
    ScheduleRerender,
    /// A page finished rendering and should be displayed by the host.
    PageReady(RenderedPage),
    /// The selection preview changed and should be redrawn. `None` clears it.
    PreviewChanged(Option<DeviceRect>),
    /// A completed gesture committed this region to the form fields.
    RegionCommitted(CropRegion),
    /// The committed (or fallen-back) region applied to the rendered page.
    CropApplied(DynamicImage),
    /// The finalized region for the form-submission collaborator.
    SubmitRegion(CropRegion),
    /// A document or crop operation failed; the host decides how to show it.
    Error(String),
}

pub fn update(model: &mut SelectorModel, message: &SelectorMessage) -> Vec<Effect> {
    match message {
        SelectorMessage::FileSelected(path) => {
            if DocumentKind::from_path(path).is_none() {
                log::info!("Ignoring non-document file: {}", path.display());
                return Vec::new();
            }

            match PortableDocument::open(path) {
                Ok(mut document) => {
                    document.set_cache_previews(model.config.cache_previews);
                    model.page_count = document.page_count();
                    model.current_page = 0;
                    model.document = Some(document);
                    model.current_path = Some(path.clone());
                    model.invalidate_viewport();
                    model.form.clear();
                    vec![
                        Effect::PreviewChanged(None),
                        Effect::RenderPage {
                            page: 0,
                            target_width: model.container_width,
                        },
                    ]
                }
                Err(e) => {
                    log::error!("Failed to open {}: {e}", path.display());
                    vec![Effect::Error(format!(
                        "Failed to open {}: {e}",
                        path.display()
                    ))]
                }
            }
        }

        SelectorMessage::PageRendered(rendered) => {
            model.viewport = ViewportState::Ready(rendered.viewport);
            model.rendered = Some(rendered.image.clone());
            model.current_page = rendered.page_index;
            model.gesture.reset();
            vec![
                Effect::PreviewChanged(None),
                Effect::PageReady(rendered.clone()),
            ]
        }

        SelectorMessage::PointerPressed { x, y } => {
            let Some(viewport) = model.viewport.ready() else {
                log::debug!("Pointer press ignored: no current viewport");
                return Vec::new();
            };
            let point = viewport.clamp(DevicePoint::new(*x, *y));
            model.gesture.begin(point);
            vec![Effect::PreviewChanged(model.gesture.preview_rect())]
        }

        SelectorMessage::PointerMoved { x, y } => {
            let Some(viewport) = model.viewport.ready() else {
                return Vec::new();
            };
            if !model.gesture.is_active() {
                return Vec::new();
            }
            let point = viewport.clamp(DevicePoint::new(*x, *y));
            model.gesture.move_to(point);
            vec![Effect::PreviewChanged(model.gesture.preview_rect())]
        }

        SelectorMessage::PointerReleased { x, y } => {
            let Some(viewport) = model.viewport.ready().copied() else {
                return Vec::new();
            };
            let point = viewport.clamp(DevicePoint::new(*x, *y));
            let Some((start, end)) = model.gesture.release(point) else {
                return Vec::new();
            };

            let region = map_selection(&viewport, start, end);
            model.form.set_region(region);
            vec![
                Effect::PreviewChanged(model.gesture.preview_rect()),
                Effect::RegionCommitted(region),
            ]
        }

        SelectorMessage::ContainerResized { width } => {
            model.container_width = *width;
            if !model.has_document() {
                return Vec::new();
            }
            model.invalidate_viewport();
            vec![Effect::PreviewChanged(None), Effect::ScheduleRerender]
        }

        SelectorMessage::ResizeSettled => {
            if !model.has_document() {
                return Vec::new();
            }
            vec![Effect::RenderPage {
                page: model.current_page,
                target_width: model.container_width,
            }]
        }

        SelectorMessage::GotoPage(page) => {
            if !model.has_document() {
                return Vec::new();
            }
            if *page >= model.page_count {
                log::warn!(
                    "Page {page} out of range (document has {} pages)",
                    model.page_count
                );
                return Vec::new();
            }
            model.current_page = *page;
            model.invalidate_viewport();
            model.form.clear();
            vec![
                Effect::PreviewChanged(None),
                Effect::RenderPage {
                    page: *page,
                    target_width: model.container_width,
                },
            ]
        }

        SelectorMessage::NextPage => {
            if model.has_document() && model.current_page + 1 < model.page_count {
                update(model, &SelectorMessage::GotoPage(model.current_page + 1))
            } else {
                Vec::new()
            }
        }

        SelectorMessage::PrevPage => {
            if model.has_document() && model.current_page > 0 {
                update(model, &SelectorMessage::GotoPage(model.current_page - 1))
            } else {
                Vec::new()
            }
        }

        SelectorMessage::ApplyCrop => {
            let Some(viewport) = model.viewport.ready() else {
                log::warn!("Apply crop ignored: no current viewport");
                return Vec::new();
            };
            let Some(image) = &model.rendered else {
                return Vec::new();
            };

            let region = model.form.finalize(viewport);
            let pixels = region.to_pixels(viewport);
            match PortableDocument::crop_rendered(image, pixels) {
                Ok(cropped) => vec![Effect::CropApplied(cropped)],
                Err(e) => {
                    log::error!("Failed to apply crop: {e}");
                    vec![Effect::Error(format!("Failed to apply crop: {e}"))]
                }
            }
        }

        SelectorMessage::Submit => {
            let Some(viewport) = model.viewport.ready() else {
                log::warn!("Submit ignored: no current viewport");
                return Vec::new();
            };
            vec![Effect::SubmitRegion(model.form.finalize(viewport))]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::domain::Viewport;
    use std::path::PathBuf;

    fn model() -> SelectorModel {
        SelectorModel::new(EngineConfig::default())
    }

    /// A model in the state right after a successful render, without
    /// touching the render backend.
    fn rendered_model() -> SelectorModel {
        let mut model = model();
        model.current_path = Some(PathBuf::from("doc.pdf"));
        model.page_count = 3;
        let effects = update(
            &mut model,
            &SelectorMessage::PageRendered(RenderedPage {
                page_index: 0,
                page_count: 3,
                image: DynamicImage::new_rgba8(800, 600),
                viewport: Viewport::new(800.0, 600.0, 1.0),
            }),
        );
        assert!(matches!(effects[0], Effect::PreviewChanged(None)));
        model
    }

    #[test]
    fn non_document_files_are_ignored() {
        let mut model = model();
        let effects = update(
            &mut model,
            &SelectorMessage::FileSelected(PathBuf::from("notes.txt")),
        );

        assert!(effects.is_empty());
        assert!(!model.has_document());
    }

    #[test]
    fn pointer_input_is_ignored_without_a_viewport() {
        let mut model = model();

        assert!(update(&mut model, &SelectorMessage::PointerPressed { x: 1.0, y: 2.0 }).is_empty());
        assert!(update(&mut model, &SelectorMessage::PointerMoved { x: 3.0, y: 4.0 }).is_empty());
        assert!(
            update(&mut model, &SelectorMessage::PointerReleased { x: 5.0, y: 6.0 }).is_empty()
        );
        assert!(!model.gesture.is_active());
    }

    #[test]
    fn pointer_input_is_ignored_while_viewport_pending() {
        let mut model = rendered_model();
        update(&mut model, &SelectorMessage::ContainerResized { width: 400.0 });

        assert!(
            update(&mut model, &SelectorMessage::PointerPressed { x: 1.0, y: 2.0 }).is_empty()
        );
    }

    #[test]
    fn completed_drag_commits_the_mapped_region() {
        let mut model = rendered_model();

        update(&mut model, &SelectorMessage::PointerPressed { x: 100.0, y: 500.0 });
        let effects = update(&mut model, &SelectorMessage::PointerMoved { x: 200.0, y: 525.0 });
        assert!(matches!(effects[0], Effect::PreviewChanged(Some(_))));

        let effects =
            update(&mut model, &SelectorMessage::PointerReleased { x: 300.0, y: 550.0 });
        let committed = effects.iter().find_map(|e| match e {
            Effect::RegionCommitted(region) => Some(*region),
            _ => None,
        });

        let region = committed.expect("release should commit a region");
        assert_eq!(region.x, 100.0);
        assert_eq!(region.y, 50.0);
        assert_eq!(region.width, 200.0);
        assert_eq!(region.height, 50.0);
        assert!(model.form.is_complete());
    }

    #[test]
    fn resize_invalidates_viewport_and_schedules_rerender() {
        let mut model = rendered_model();

        let effects = update(&mut model, &SelectorMessage::ContainerResized { width: 640.0 });
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::ScheduleRerender)));
        assert!(!model.viewport.is_ready());
        assert_eq!(model.container_width, 640.0);

        let effects = update(&mut model, &SelectorMessage::ResizeSettled);
        assert!(matches!(
            effects[0],
            Effect::RenderPage {
                page: 0,
                target_width
            } if target_width == 640.0
        ));
    }

    #[test]
    fn resize_without_document_only_records_width() {
        let mut model = model();

        assert!(
            update(&mut model, &SelectorMessage::ContainerResized { width: 640.0 }).is_empty()
        );
        assert_eq!(model.container_width, 640.0);
        assert!(update(&mut model, &SelectorMessage::ResizeSettled).is_empty());
    }

    #[test]
    fn page_navigation_clears_form_and_requests_render() {
        let mut model = rendered_model();
        model.form.set_region(CropRegion {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
        });

        let effects = update(&mut model, &SelectorMessage::NextPage);
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::RenderPage { page: 1, .. })));
        assert_eq!(model.current_page, 1);
        assert!(!model.form.is_complete());
        assert!(!model.viewport.is_ready());
    }

    #[test]
    fn page_navigation_is_bounds_checked() {
        let mut model = rendered_model();

        assert!(update(&mut model, &SelectorMessage::PrevPage).is_empty());
        assert!(update(&mut model, &SelectorMessage::GotoPage(3)).is_empty());
        assert_eq!(model.current_page, 0);
    }

    #[test]
    fn submit_without_selection_falls_back_to_full_page() {
        let mut model = rendered_model();

        let effects = update(&mut model, &SelectorMessage::Submit);
        let Some(Effect::SubmitRegion(region)) = effects.first() else {
            panic!("submit should produce a region");
        };
        assert_eq!(region.x, 0.0);
        assert_eq!(region.y, 0.0);
        assert_eq!(region.width, 800.0);
        assert_eq!(region.height, 600.0);
    }

    #[test]
    fn apply_crop_uses_the_committed_selection() {
        let mut model = rendered_model();

        update(&mut model, &SelectorMessage::PointerPressed { x: 100.0, y: 500.0 });
        update(&mut model, &SelectorMessage::PointerReleased { x: 300.0, y: 550.0 });

        let effects = update(&mut model, &SelectorMessage::ApplyCrop);
        let Some(Effect::CropApplied(cropped)) = effects.first() else {
            panic!("apply should produce a cropped image");
        };
        assert_eq!(cropped.width(), 200);
        assert_eq!(cropped.height(), 50);
    }

    #[test]
    fn apply_crop_without_selection_yields_full_page() {
        let mut model = rendered_model();

        let effects = update(&mut model, &SelectorMessage::ApplyCrop);
        let Some(Effect::CropApplied(cropped)) = effects.first() else {
            panic!("apply should produce a cropped image");
        };
        assert_eq!(cropped.width(), 800);
        assert_eq!(cropped.height(), 600);
    }

    #[test]
    fn zero_size_drag_falls_back_on_submit() {
        let mut model = rendered_model();

        update(&mut model, &SelectorMessage::PointerPressed { x: 100.0, y: 100.0 });
        update(&mut model, &SelectorMessage::PointerReleased { x: 100.0, y: 100.0 });
        assert!(model.form.is_complete());

        let effects = update(&mut model, &SelectorMessage::Submit);
        let Some(Effect::SubmitRegion(region)) = effects.first() else {
            panic!("submit should produce a region");
        };
        assert_eq!(region.width, 800.0);
        assert_eq!(region.height, 600.0);
    }

    #[test]
    fn render_completion_reinstates_pointer_input() {
        let mut model = rendered_model();
        update(&mut model, &SelectorMessage::ContainerResized { width: 400.0 });

        update(
            &mut model,
            &SelectorMessage::PageRendered(RenderedPage {
                page_index: 0,
                page_count: 3,
                image: DynamicImage::new_rgba8(400, 300),
                viewport: Viewport::new(400.0, 300.0, 0.5),
            }),
        );

        let effects = update(&mut model, &SelectorMessage::PointerPressed { x: 10.0, y: 10.0 });
        assert!(matches!(effects[0], Effect::PreviewChanged(Some(_))));
        assert!(model.gesture.is_active());
    }
}
