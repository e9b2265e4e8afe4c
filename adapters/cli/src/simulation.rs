//! Drives the world and the animation clock and turns their state into scenes.

use std::time::Duration;

use anyhow::{Context, Result};
use wave_gauge_core::{Command, Event, GaugeColor, GaugeGeometry, Phase, Progress};
use wave_gauge_rendering::{FrameInput, GaugeLayout, GaugePalette, Scene};
use wave_gauge_system_clock::AnimationClock;
use wave_gauge_system_outline::generate_outline;
use wave_gauge_world::{self as world, query, World};

use crate::settings::GaugeSettings;

/// Authoritative gauge state plus the systems reacting to it.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    clock: AnimationClock,
    layout: GaugeLayout,
    palette: GaugePalette,
    border_width: f32,
    frame_interval: Duration,
}

impl Simulation {
    /// Builds the gauge described by `settings` and replays its initial state.
    pub(crate) fn new(settings: &GaugeSettings, progress: Option<i32>) -> Result<Self> {
        let requested = settings.geometry()?;
        let layout = GaugeLayout::measure(
            requested.radius(),
            requested.stroke_width(),
            settings.available_area(),
        )
        .context("failed to fit the gauge into the available area")?;
        let geometry = GaugeGeometry::new(
            layout.radius(),
            layout.stroke_width(),
            requested.wave_amplitude(),
        )
        .context("fitted geometry is invalid")?;
        if geometry != requested {
            tracing::debug!(
                requested = requested.radius(),
                fitted = geometry.radius(),
                "radius shrunk to fit the available area"
            );
        }

        let clock_config = settings.clock_config();
        let palette = settings.palette();
        let mut simulation = Self {
            world: World::with_geometry(geometry),
            clock: AnimationClock::new(clock_config),
            layout,
            palette,
            border_width: settings.border_width(),
            frame_interval: clock_config.interval(),
        };

        let _ = simulation.submit(Command::ConfigureGeometry { geometry });
        let _ = simulation.submit(Command::SetWaveColor {
            color: GaugeColor::from_argb(settings.colors.wave),
        });
        let _ = simulation.submit(Command::SetTipText {
            text: settings.tip_text.clone(),
        });
        let _ = simulation.submit(Command::SetProgress {
            value: progress.unwrap_or(settings.progress),
        });
        if settings.waving {
            let _ = simulation.submit(Command::StartWave);
        }

        Ok(simulation)
    }

    /// Applies a command and lets the clock react until the system settles.
    ///
    /// Returns whether the visible output changed.
    pub(crate) fn submit(&mut self, command: Command) -> bool {
        let mut redraw = false;
        let mut pending = vec![command];

        while !pending.is_empty() {
            let mut events = Vec::new();
            for command in pending.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }

            for event in &events {
                match event {
                    Event::RedrawRequested => redraw = true,
                    Event::ProgressChanged { progress } => {
                        tracing::debug!(progress = progress.get(), "progress changed");
                    }
                    Event::WaveStarted => tracing::debug!("wave started"),
                    Event::WaveStopped => tracing::debug!("wave stopped"),
                    _ => {}
                }
            }

            self.clock.handle(&events, &mut pending);
        }

        redraw
    }

    /// Advances the gauge by one frame, applying adapter input first.
    ///
    /// Returns whether the visible output changed.
    pub(crate) fn step(&mut self, dt: Duration, input: FrameInput) -> bool {
        let mut redraw = false;

        if input.toggle_wave {
            let command = if query::is_waving(&self.world) {
                Command::StopWave
            } else {
                Command::StartWave
            };
            redraw |= self.submit(command);
        }
        if input.progress_step != 0 {
            let value = i32::from(self.progress().get()).saturating_add(input.progress_step);
            redraw |= self.submit(Command::SetProgress { value });
        }

        redraw | self.submit(Command::Tick { dt })
    }

    /// Builds a scene for the current state.
    pub(crate) fn scene(&self) -> Scene {
        let mut scene = Scene::new(
            self.layout,
            generate_outline(&query::wave_config(&self.world)),
            self.progress(),
            self.palette,
            self.border_width,
        );
        self.populate(&mut scene);
        scene
    }

    /// Refreshes `scene` with the current outline and indicator state.
    pub(crate) fn populate(&self, scene: &mut Scene) {
        scene.outline = generate_outline(&query::wave_config(&self.world));
        scene.progress = self.progress();
        scene.waving = query::is_waving(&self.world);
        scene.palette.wave = query::wave_color(&self.world).into();
        query::tip_text(&self.world).clone_into(&mut scene.tip_text);
    }

    /// Time between two clock steps.
    pub(crate) fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Displayed percentage.
    pub(crate) fn progress(&self) -> Progress {
        query::progress(&self.world)
    }

    /// Phase of the most recent frame.
    pub(crate) fn phase(&self) -> Phase {
        query::phase(&self.world)
    }
}
