// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/runtime.rs
//
// Event-driven driver: owns the model, runs update, executes effects.

use image::DynamicImage;
use tokio::sync::mpsc;

use crate::app::debounce::Debouncer;
use crate::app::document::RenderedPage;
use crate::app::message::SelectorMessage;
use crate::app::model::SelectorModel;
use crate::app::update::{update, Effect};
use crate::config::EngineConfig;
use crate::domain::{CropRegion, DeviceRect};

/// Host-facing notifications produced by the selector.
#[derive(Debug, Clone)]
pub enum SelectorOutput {
    /// A page finished rendering and should be displayed.
    PageReady(RenderedPage),
    /// The selection preview changed and should be redrawn. `None` clears it.
    PreviewChanged(Option<DeviceRect>),
    /// A completed gesture committed this region to the form fields.
    RegionCommitted(CropRegion),
    /// The crop applied to the rendered page.
    CropApplied(DynamicImage),
    /// The finalized region for the form-submission collaborator.
    RegionSubmitted(CropRegion),
    /// A document or render operation failed.
    Error(String),
}

/// Cloneable sender half used by the host to feed events in.
#[derive(Debug, Clone)]
pub struct SelectorHandle {
    tx: mpsc::UnboundedSender<SelectorMessage>,
}

impl SelectorHandle {
    /// Send a message to the runtime. Returns `false` if it has shut down.
    pub fn send(&self, message: SelectorMessage) -> bool {
        self.tx.send(message).is_ok()
    }
}

/// Single-task event loop around a `SelectorModel`.
///
/// All state mutation happens here, one message at a time: host messages
/// and internal feedback (render completions, settled resizes) go through
/// `update`, and the resulting effects are executed in order. Rendering
/// runs inline between updates; while it does, the viewport is `Pending`
/// and pointer input is ignored.
pub struct SelectorRuntime {
    model: SelectorModel,
    messages: mpsc::UnboundedReceiver<SelectorMessage>,
    feedback_tx: mpsc::UnboundedSender<SelectorMessage>,
    feedback_rx: mpsc::UnboundedReceiver<SelectorMessage>,
    outputs: mpsc::UnboundedSender<SelectorOutput>,
    debouncer: Debouncer,
}

impl SelectorRuntime {
    /// Build a runtime plus the host's handle and output stream.
    #[must_use]
    pub fn new(
        config: EngineConfig,
    ) -> (
        Self,
        SelectorHandle,
        mpsc::UnboundedReceiver<SelectorOutput>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (feedback_tx, feedback_rx) = mpsc::unbounded_channel();
        let (output_tx, output_rx) = mpsc::unbounded_channel();

        let runtime = Self {
            model: SelectorModel::new(config),
            messages: rx,
            feedback_tx,
            feedback_rx,
            outputs: output_tx,
            debouncer: Debouncer::new(),
        };

        (runtime, SelectorHandle { tx }, output_rx)
    }

    /// Run until the host drops its handle.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                message = self.messages.recv() => match message {
                    Some(message) => self.dispatch(message),
                    None => break,
                },
                Some(message) = self.feedback_rx.recv() => self.dispatch(message),
            }
        }
    }

    /// Read access to the model, for hosts embedding the runtime directly.
    #[must_use]
    pub fn model(&self) -> &SelectorModel {
        &self.model
    }

    /// Feed one message through `update` and execute its effects.
    pub fn dispatch(&mut self, message: SelectorMessage) {
        for effect in update(&mut self.model, &message) {
            self.perform(effect);
        }
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::RenderPage { page, target_width } => {
                let Some(document) = &self.model.document else {
                    log::warn!("Render requested without a loaded document");
                    return;
                };
                match document.render_page(page, target_width) {
                    Ok(rendered) => {
                        let _ = self
                            .feedback_tx
                            .send(SelectorMessage::PageRendered(rendered));
                    }
                    Err(e) => {
                        log::error!("Failed to render page {page}: {e}");
                        let _ = self
                            .outputs
                            .send(SelectorOutput::Error(format!(
                                "Failed to render page {page}: {e}"
                            )));
                    }
                }
            }

            Effect::ScheduleRerender => {
                let tx = self.feedback_tx.clone();
                self.debouncer
                    .schedule(self.model.config.resize_quiet_period, async move {
                        let _ = tx.send(SelectorMessage::ResizeSettled);
                    });
            }

            Effect::PageReady(rendered) => {
                let _ = self.outputs.send(SelectorOutput::PageReady(rendered));
            }

            Effect::PreviewChanged(rect) => {
                let _ = self.outputs.send(SelectorOutput::PreviewChanged(rect));
            }

            Effect::RegionCommitted(region) => {
                let _ = self.outputs.send(SelectorOutput::RegionCommitted(region));
            }

            Effect::CropApplied(image) => {
                let _ = self.outputs.send(SelectorOutput::CropApplied(image));
            }

            Effect::SubmitRegion(region) => {
                let _ = self.outputs.send(SelectorOutput::RegionSubmitted(region));
            }

            Effect::Error(message) => {
                let _ = self.outputs.send(SelectorOutput::Error(message));
            }
        }
    }
}
