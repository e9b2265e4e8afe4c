#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure wave boundary generator for the Wave Gauge.
//!
//! Given the gauge geometry, the current progress and the wave phase, the
//! generator computes the closed contour that bounds the liquid: a sampled wavy
//! surface across the chord followed by the submerged arc of the disk. Every
//! call is independent, so the generator can run once per frame without
//! accumulating error.

use std::f32::consts::PI;

use wave_gauge_core::{
    ArcSegment, GaugeGeometry, Point, Progress, SurfaceGeometry, WaveConfig, WaveOutline,
};

/// Progress at which the surface crosses the centre of the disk.
const HALF_FULL: u8 = 50;

/// Phase advanced per horizontal sample.
const SAMPLE_PHASE_STEP: f32 = 1.5;

/// Computes the liquid surface parameters for the provided progress.
///
/// Above half full the submerged arc is derived from the arcsine of the
/// surface offset; below it from the arccosine. Both branches agree at exactly
/// half full.
#[must_use]
pub fn surface_geometry(geometry: &GaugeGeometry, progress: Progress) -> SurfaceGeometry {
    let radius = geometry.radius();
    let abs_y = 2.0 * radius * progress.fraction();
    let (abs_x, start_angle, sweep_angle) = if progress.get() >= HALF_FULL {
        upper_branch(radius, abs_y)
    } else {
        lower_branch(radius, abs_y)
    };

    SurfaceGeometry {
        abs_x: abs_x.max(0.0),
        abs_y,
        start_angle,
        sweep_angle,
        surface_y: (2.0 * radius - abs_y) + geometry.stroke_width(),
    }
}

/// Builds the closed outline of the liquid region for a single frame.
#[must_use]
pub fn generate_outline(config: &WaveConfig) -> WaveOutline {
    let geometry = config.geometry();
    let surface = surface_geometry(geometry, config.progress());
    let start_x = (config.radius() - surface.abs_x) + config.stroke_width();
    let sample_count = (2.0 * surface.abs_x).floor() as usize;

    let wave = (0..sample_count)
        .map(|index| {
            let offset = index as f32;
            Point::new(
                offset + start_x,
                wave_height(config, offset) + surface.surface_y,
            )
        })
        .collect();

    let arc = ArcSegment::new(geometry.bounds(), surface.start_angle, surface.sweep_angle);
    WaveOutline::new(surface, wave, arc)
}

fn wave_height(config: &WaveConfig, offset: f32) -> f32 {
    let turn = (offset * SAMPLE_PHASE_STEP + config.phase().get()) / config.radius() * PI;
    config.wave_amplitude() * turn.sin()
}

/// Returns `(abs_x, start_angle, sweep_angle)` for a surface at or above the centre.
fn upper_branch(radius: f32, abs_y: f32) -> (f32, f32, f32) {
    let angle = ((abs_y - radius) / radius)
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees();
    let abs_x = radius * angle.to_radians().cos();
    (abs_x, -angle, 2.0 * angle + 180.0)
}

/// Returns `(abs_x, start_angle, sweep_angle)` for a surface below the centre.
fn lower_branch(radius: f32, abs_y: f32) -> (f32, f32, f32) {
    let angle = ((radius - abs_y) / radius)
        .clamp(-1.0, 1.0)
        .acos()
        .to_degrees();
    let abs_x = radius * angle.to_radians().sin();
    (abs_x, 90.0 - angle, 2.0 * angle)
}
