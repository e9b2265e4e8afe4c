#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative indicator state for the Wave Gauge.

use wave_gauge_core::{
    Command, Event, GaugeColor, GaugeGeometry, Phase, Progress, DEFAULT_PROGRESS,
    DEFAULT_WAVE_COLOR,
};

/// Represents the authoritative state of a single gauge.
#[derive(Debug)]
pub struct World {
    geometry: GaugeGeometry,
    progress: Progress,
    phase: Phase,
    waving: bool,
    wave_color: GaugeColor,
    tip_text: String,
    tick_index: u64,
}

impl World {
    /// Creates a gauge with default geometry, idle and at the default progress.
    #[must_use]
    pub fn new() -> Self {
        Self::with_geometry(GaugeGeometry::default())
    }

    /// Creates an idle gauge using the provided geometry.
    #[must_use]
    pub fn with_geometry(geometry: GaugeGeometry) -> Self {
        Self {
            geometry,
            progress: DEFAULT_PROGRESS,
            phase: Phase::ZERO,
            waving: false,
            wave_color: DEFAULT_WAVE_COLOR,
            tip_text: String::new(),
            tick_index: 0,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGeometry { geometry } => {
            world.geometry = geometry;
            out_events.push(Event::GeometryConfigured { geometry });
            out_events.push(Event::RedrawRequested);
        }
        Command::SetProgress { value } => {
            let progress = Progress::clamped(value);
            if progress != world.progress {
                world.progress = progress;
                out_events.push(Event::ProgressChanged { progress });
            }
            out_events.push(Event::RedrawRequested);
        }
        Command::StartWave => {
            if !world.waving {
                world.waving = true;
                out_events.push(Event::WaveStarted);
            }
        }
        Command::StopWave => {
            if world.waving {
                world.waving = false;
                out_events.push(Event::WaveStopped);
            }
        }
        Command::SetWaveColor { color } => {
            world.wave_color = color;
            out_events.push(Event::WaveColorChanged { color });
            out_events.push(Event::RedrawRequested);
        }
        Command::SetTipText { text } => {
            world.tip_text.clone_from(&text);
            out_events.push(Event::TipTextChanged { text });
            out_events.push(Event::RedrawRequested);
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::AdvancePhase { phase } => {
            if !world.waving {
                return;
            }
            world.phase = phase;
            out_events.push(Event::PhaseAdvanced { phase });
            out_events.push(Event::RedrawRequested);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use wave_gauge_core::{GaugeColor, GaugeGeometry, Phase, Progress, WaveConfig};

    /// Provides read-only access to the construction-time geometry.
    #[must_use]
    pub fn geometry(world: &World) -> &GaugeGeometry {
        &world.geometry
    }

    /// Retrieves the displayed percentage.
    #[must_use]
    pub fn progress(world: &World) -> Progress {
        world.progress
    }

    /// Retrieves the wave phase most recently stored by the clock.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Reports whether the wave animation is switched on.
    #[must_use]
    pub fn is_waving(world: &World) -> bool {
        world.waving
    }

    /// Retrieves the liquid color.
    #[must_use]
    pub fn wave_color(world: &World) -> GaugeColor {
        world.wave_color
    }

    /// Retrieves the informational text attached to the gauge.
    #[must_use]
    pub fn tip_text(world: &World) -> &str {
        &world.tip_text
    }

    /// Number of ticks processed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures the generator input for the current frame.
    #[must_use]
    pub fn wave_config(world: &World) -> WaveConfig {
        world.geometry.frame(world.progress, world.phase)
    }
}
