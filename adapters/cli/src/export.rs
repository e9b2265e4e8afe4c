//! Headless export of simulated frames.

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use wave_gauge_core::WaveOutline;
use wave_gauge_rendering::{svg, FrameInput};

use crate::simulation::Simulation;

/// Output produced by the `export` subcommand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ExportFormat {
    /// One JSON record per frame, separated by newlines.
    Json,
    /// SVG document of the final frame.
    Svg,
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    frame: u32,
    progress: u8,
    phase: f32,
    waving: bool,
    tip_text: &'a str,
    outline: &'a WaveOutline,
}

/// Simulates `frames` frames spaced one clock interval apart and writes them to `out`.
///
/// The first frame shows the initial state.
pub(crate) fn write_frames<W: Write>(
    simulation: &mut Simulation,
    frames: u32,
    format: ExportFormat,
    out: &mut W,
) -> Result<()> {
    let interval = simulation.frame_interval();
    let mut scene = simulation.scene();

    match format {
        ExportFormat::Json => {
            for frame in 0..frames {
                if frame > 0 {
                    let _ = simulation.step(interval, FrameInput::default());
                    simulation.populate(&mut scene);
                }
                let record = FrameRecord {
                    frame,
                    progress: scene.progress.get(),
                    phase: simulation.phase().get(),
                    waving: scene.waving,
                    tip_text: &scene.tip_text,
                    outline: &scene.outline,
                };
                serde_json::to_writer(&mut *out, &record)
                    .with_context(|| format!("failed to serialise frame {frame}"))?;
                writeln!(out).context("failed to write frame separator")?;
            }
        }
        ExportFormat::Svg => {
            for _ in 1..frames {
                let _ = simulation.step(interval, FrameInput::default());
            }
            simulation.populate(&mut scene);
            writeln!(out, "{}", svg::document(&scene)).context("failed to write svg document")?;
        }
    }

    tracing::debug!(frames, ?format, "export finished");
    Ok(())
}
