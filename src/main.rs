// SPDX-License-Identifier: GPL-3.0-or-later
// src/main.rs
//
// CLI driver: render a document page, replay a rectangle selection over
// it, and write the cropped result.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use pagecrop::{
    DevicePoint, EngineConfig, SelectorMessage, SelectorOutput, SelectorRuntime,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "pagecrop", version, about = "Select and apply a crop region on a document page")]
pub struct Args {
    /// Document to crop.
    pub file: PathBuf,

    /// Page to render (0-based).
    #[arg(long, default_value_t = 0)]
    pub page: usize,

    /// Container width in device pixels the page is rendered to fit.
    #[arg(long)]
    pub width: Option<f64>,

    /// Selection corners in device pixels: x1,y1,x2,y2.
    /// Omitted or degenerate selections fall back to the full page.
    #[arg(long, value_parser = parse_selection)]
    pub select: Option<(DevicePoint, DevicePoint)>,

    /// Where to write the cropped page render.
    #[arg(short, long, default_value = "cropped.png")]
    pub output: PathBuf,

    /// Bypass the rendered-preview disk cache.
    #[arg(long)]
    pub no_cache: bool,
}

fn parse_selection(raw: &str) -> Result<(DevicePoint, DevicePoint), String> {
    let parts: Vec<f64> = raw
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid coordinate: {e}"))?;

    match parts.as_slice() {
        [x1, y1, x2, y2] => Ok((DevicePoint::new(*x1, *y1), DevicePoint::new(*x2, *y2))),
        _ => Err(format!("expected x1,y1,x2,y2 but got {} values", parts.len())),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut config = EngineConfig::default();
    if let Some(width) = args.width {
        config.render_width = width;
    }
    config.cache_previews = !args.no_cache;

    // The model owns a poppler document handle, which is not Send; the
    // runtime therefore stays on a local task, like any UI event loop.
    let local = tokio::task::LocalSet::new();
    local.run_until(run(args, config)).await
}

async fn run(args: Args, config: EngineConfig) -> anyhow::Result<()> {
    let (runtime, handle, mut outputs) = SelectorRuntime::new(config);
    let driver = tokio::task::spawn_local(runtime.run());

    handle.send(SelectorMessage::FileSelected(args.file.clone()));
    if args.page > 0 {
        handle.send(SelectorMessage::GotoPage(args.page));
    }

    // Wait for the requested page before replaying the gesture: pointer
    // input against a pending viewport is dropped by design.
    let rendered = loop {
        let output = outputs
            .recv()
            .await
            .context("selector shut down before rendering a page")?;
        match output {
            SelectorOutput::PageReady(rendered) => {
                anyhow::ensure!(
                    args.page < rendered.page_count,
                    "page {} out of range (document has {} pages)",
                    args.page,
                    rendered.page_count
                );
                if rendered.page_index == args.page {
                    break rendered;
                }
            }
            SelectorOutput::Error(message) => anyhow::bail!(message),
            _ => {}
        }
    };

    log::info!(
        "Rendered page {} at {}x{} (scale {:.4})",
        rendered.page_index,
        rendered.viewport.width,
        rendered.viewport.height,
        rendered.viewport.scale
    );

    if let Some((start, end)) = args.select {
        handle.send(SelectorMessage::PointerPressed { x: start.x, y: start.y });
        handle.send(SelectorMessage::PointerMoved { x: end.x, y: end.y });
        handle.send(SelectorMessage::PointerReleased { x: end.x, y: end.y });
    }
    handle.send(SelectorMessage::Submit);
    handle.send(SelectorMessage::ApplyCrop);

    let mut cropped = None;
    while let Some(output) = outputs.recv().await {
        match output {
            SelectorOutput::RegionCommitted(region) => {
                log::info!(
                    "Selection committed: x={} y={} w={} h={}",
                    region.x,
                    region.y,
                    region.width,
                    region.height
                );
            }
            SelectorOutput::RegionSubmitted(region) => {
                println!(
                    "crop region: x={:.2} y={:.2} width={:.2} height={:.2}",
                    region.x, region.y, region.width, region.height
                );
            }
            SelectorOutput::CropApplied(image) => {
                cropped = Some(image);
                break;
            }
            SelectorOutput::Error(message) => anyhow::bail!(message),
            _ => {}
        }
    }

    let image = cropped.context("selector produced no cropped output")?;
    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("wrote {} ({}x{})", args.output.display(), image.width(), image.height());

    drop(handle);
    driver.await?;

    Ok(())
}
