#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the Wave Gauge.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! Macroquad has no path filling, so the liquid outline is flattened into a
//! polygon and painted as one pixel tall horizontal strips.

use anyhow::Result;
use glam::Vec2;
use macroquad::{
    input::{is_key_pressed, KeyCode},
    shapes::{draw_poly, draw_poly_lines, draw_rectangle},
};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};
use wave_gauge_rendering::{
    flatten_outline, scanline_spans, Color, FrameInput, Presentation, RenderingBackend, Scene,
};

/// Number of sides used to approximate circles.
const CIRCLE_SIDES: u8 = 96;

/// Longest polygon edge produced when flattening the liquid outline.
const FLATTEN_STEP: f32 = 1.0;

/// Smallest window edge requested from the platform.
const MIN_WINDOW_EDGE: f32 = 64.0;

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the render loop.
    quit_requested: bool,
    /// `Space` starts or stops the wave.
    toggle_wave: bool,
    /// `Up` raises the progress by one.
    raise_progress: bool,
    /// `Down` lowers the progress by one.
    lower_progress: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
            toggle_wave: is_key_pressed(KeyCode::Space),
            raise_progress: is_key_pressed(KeyCode::Up),
            lower_progress: is_key_pressed(KeyCode::Down),
        }
    }

    fn frame_input(self) -> FrameInput {
        FrameInput {
            toggle_wave: self.toggle_wave,
            progress_step: i32::from(self.raise_progress) - i32::from(self.lower_progress),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    simulation: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    simulation_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_simulation: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.simulation_accum += breakdown.simulation;
        self.render_accum += breakdown.render;

        self.frame_times.push_back(breakdown.frame);
        self.window_duration += breakdown.frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            match self.frame_times.pop_front() {
                Some(removed) => {
                    self.window_duration = self.window_duration.saturating_sub(removed);
                }
                None => break,
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames;
        let per_second = frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let metrics = FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_simulation: self.simulation_accum / frames,
            avg_render: self.render_accum / frames,
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.simulation_accum = Duration::ZERO;
        self.render_accum = Duration::ZERO;
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let edge = scene.layout.size().max(MIN_WINDOW_EDGE).ceil() as i32;
        let mut config = macroquad::window::Conf {
            window_title,
            window_width: edge,
            window_height: edge,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        tracing::info!(edge, ?swap_interval, "opening gauge window");

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    tracing::info!("quit requested");
                    break;
                }

                macroquad::window::clear_background(background);

                let frame_dt = frame_delta(macroquad::time::get_frame_time());

                let simulation_start = Instant::now();
                update_scene(frame_dt, keyboard.frame_input(), &mut scene);
                let simulation = simulation_start.elapsed();

                let render_start = Instant::now();
                let origin = gauge_origin(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                draw_gauge(&scene, origin);
                let render = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    simulation,
                    render,
                });
                if show_fps {
                    if let Some(metrics) = fps_metrics {
                        tracing::info!(
                            fps = metrics.per_second,
                            trailing_fps = metrics.trailing_ten_seconds,
                            sim_ms = metrics.avg_simulation.as_secs_f64() * 1_000.0,
                            render_ms = metrics.avg_render.as_secs_f64() * 1_000.0,
                            "frame timing"
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Converts the reported frame time, treating negative or non-finite values as no time.
fn frame_delta(seconds: f32) -> Duration {
    Duration::try_from_secs_f32(seconds).unwrap_or_default()
}

/// Top-left corner of the gauge square, centred within the screen.
fn gauge_origin(scene: &Scene, screen_width: f32, screen_height: f32) -> Vec2 {
    let size = scene.layout.size();
    Vec2::new(
        ((screen_width - size) * 0.5).max(0.0),
        ((screen_height - size) * 0.5).max(0.0),
    )
}

fn draw_gauge(scene: &Scene, origin: Vec2) {
    let layout = &scene.layout;
    let center = origin + layout.center();

    draw_poly(
        center.x,
        center.y,
        CIRCLE_SIDES,
        layout.radius(),
        0.0,
        to_macroquad_color(scene.palette.inner),
    );

    let wave_color = to_macroquad_color(scene.palette.wave);
    for (y, left, right) in fill_rows(scene, origin + layout.origin()) {
        draw_rectangle(left, y, right - left, 1.0, wave_color);
    }

    if layout.stroke_width() > 0.0 {
        draw_poly_lines(
            center.x,
            center.y,
            CIRCLE_SIDES,
            layout.ring_radius(),
            0.0,
            layout.stroke_width(),
            to_macroquad_color(scene.palette.outer),
        );
    }
    draw_poly_lines(
        center.x,
        center.y,
        CIRCLE_SIDES,
        scene.border_radius(),
        0.0,
        scene.border_width,
        to_macroquad_color(scene.palette.border),
    );
}

/// Screen rows covered by the liquid, as `(top, left, right)` strips.
///
/// Each row is sampled through its vertical centre.
fn fill_rows(scene: &Scene, offset: Vec2) -> Vec<(f32, f32, f32)> {
    let Ok(polygon) = flatten_outline(&scene.outline, FLATTEN_STEP) else {
        return Vec::new();
    };
    let polygon: Vec<Vec2> = polygon.into_iter().map(|point| point + offset).collect();

    let (top, bottom) = polygon
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(top, bottom), point| {
            (top.min(point.y), bottom.max(point.y))
        });
    if !top.is_finite() || !bottom.is_finite() {
        return Vec::new();
    }

    let mut rows = Vec::new();
    let mut y = top.floor();
    while y < bottom {
        for (left, right) in scanline_spans(&polygon, y + 0.5) {
            rows.push((y, left, right));
        }
        y += 1.0;
    }
    rows
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wave_gauge_core::{GaugeGeometry, Phase, Progress};
    use wave_gauge_rendering::{GaugeLayout, GaugePalette};
    use wave_gauge_system_outline::generate_outline;

    fn scene_at(progress: u8) -> Scene {
        let geometry = GaugeGeometry::default();
        let layout = GaugeLayout::measure(geometry.radius(), geometry.stroke_width(), None)
            .expect("valid layout");
        let progress = Progress::new(progress);
        let outline = generate_outline(&geometry.frame(progress, Phase::ZERO));
        Scene::new(layout, outline, progress, GaugePalette::default(), 1.0)
    }

    #[test]
    fn keyboard_shortcuts_map_to_frame_input() {
        let idle = KeyboardShortcuts::default().frame_input();
        assert_eq!(idle, FrameInput::default());

        let raise = KeyboardShortcuts {
            toggle_wave: true,
            raise_progress: true,
            ..KeyboardShortcuts::default()
        };
        assert_eq!(
            raise.frame_input(),
            FrameInput {
                toggle_wave: true,
                progress_step: 1,
            }
        );

        let both = KeyboardShortcuts {
            raise_progress: true,
            lower_progress: true,
            ..KeyboardShortcuts::default()
        };
        assert_eq!(both.frame_input().progress_step, 0);
    }

    #[test]
    fn frame_delta_tolerates_unusable_frame_times() {
        assert_eq!(frame_delta(0.25), Duration::from_millis(250));
        assert_eq!(frame_delta(-0.5), Duration::ZERO);
        assert_eq!(frame_delta(f32::INFINITY), Duration::ZERO);
        assert_eq!(frame_delta(f32::NAN), Duration::ZERO);
    }

    #[test]
    fn gauge_is_centred_on_screen() {
        let scene = scene_at(30);

        assert_eq!(gauge_origin(&scene, 440.0, 240.0), Vec2::new(100.0, 0.0));
        assert_eq!(gauge_origin(&scene, 100.0, 100.0), Vec2::ZERO);
    }

    #[test]
    fn fill_rows_stay_inside_the_disk() {
        let scene = scene_at(65);
        let rows = fill_rows(&scene, Vec2::ZERO);
        let calm = scene.outline.surface().surface_y + 5.0;

        assert!(!rows.is_empty());
        for (y, left, right) in rows.into_iter().filter(|row| row.0 > calm) {
            assert!(left <= right);
            let dy = y + 0.5 - 120.0;
            let half_chord = (100.0_f32 * 100.0 - dy * dy).max(0.0).sqrt();
            assert!(left >= 120.0 - half_chord - 0.5, "row {y} starts at {left}");
            assert!(right <= 120.0 + half_chord + 0.5, "row {y} ends at {right}");
        }
    }

    #[test]
    fn fill_rows_follow_the_offset() {
        let scene = scene_at(40);
        let plain = fill_rows(&scene, Vec2::ZERO);
        let shifted = fill_rows(&scene, Vec2::new(10.0, 0.0));

        assert_eq!(plain.len(), shifted.len());
        for (a, b) in plain.iter().zip(&shifted) {
            assert!((b.1 - a.1 - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn empty_gauge_paints_no_rows() {
        assert!(fill_rows(&scene_at(0), Vec2::ZERO).is_empty());
    }

    #[test]
    fn fps_counter_reports_once_per_second() {
        let mut counter = FpsCounter::default();
        let frame = FrameBreakdown {
            frame: Duration::from_millis(250),
            simulation: Duration::from_millis(2),
            render: Duration::from_millis(4),
        };

        for _ in 0..3 {
            assert!(counter.record_frame(frame).is_none());
        }
        let metrics = counter.record_frame(frame).expect("one second elapsed");

        assert!((metrics.per_second - 4.0).abs() < 1e-3);
        assert!((metrics.trailing_ten_seconds - 4.0).abs() < 1e-3);
        assert_eq!(metrics.avg_simulation, Duration::from_millis(2));
        assert_eq!(metrics.avg_render, Duration::from_millis(4));
        assert!(counter.record_frame(frame).is_none());
    }

    #[test]
    fn colors_convert_channel_by_channel() {
        let color = to_macroquad_color(Color::new(0.1, 0.2, 0.3, 0.4));

        assert_eq!(color.r, 0.1);
        assert_eq!(color.g, 0.2);
        assert_eq!(color.b, 0.3);
        assert_eq!(color.a, 0.4);
    }
}
