//! TOML settings describing the gauge before it is shown.

use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use glam::Vec2;
use serde::Deserialize;
use wave_gauge_core::{
    GaugeGeometry, DEFAULT_BORDER_COLOR, DEFAULT_INNER_COLOR, DEFAULT_OUTER_COLOR,
    DEFAULT_PROGRESS, DEFAULT_RADIUS, DEFAULT_STROKE_WIDTH, DEFAULT_WAVE_AMPLITUDE,
    DEFAULT_WAVE_COLOR,
};
use wave_gauge_rendering::{Color, GaugePalette};
use wave_gauge_system_clock::{
    Config as ClockConfig, DEFAULT_INTERVAL, DEFAULT_PHASE_INCREMENT, DEFAULT_WRAP_BOUND,
};

/// Width of the border ring in density-independent units.
const BORDER_WIDTH_DP: f32 = 1.0;

/// Construction-time options of the gauge.
///
/// Radius, stroke width and size are density-independent and scaled by
/// `density`. The wave amplitude is expressed in plain pixels.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GaugeSettings {
    pub(crate) radius: f32,
    pub(crate) stroke_width: f32,
    pub(crate) wave_amplitude: f32,
    pub(crate) progress: i32,
    pub(crate) density: f32,
    pub(crate) size: Option<f32>,
    pub(crate) waving: bool,
    pub(crate) tip_text: String,
    pub(crate) colors: ColorSettings,
    pub(crate) animation: AnimationSettings,
}

/// Packed `0xAARRGGBB` colors of each gauge layer.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ColorSettings {
    pub(crate) wave: u32,
    pub(crate) inner: u32,
    pub(crate) outer: u32,
    pub(crate) border: u32,
    pub(crate) background: u32,
}

/// Cadence of the wave animation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AnimationSettings {
    pub(crate) interval_ms: u64,
    pub(crate) phase_increment: f32,
    pub(crate) wrap_bound: f32,
}

impl Default for GaugeSettings {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            stroke_width: DEFAULT_STROKE_WIDTH,
            wave_amplitude: DEFAULT_WAVE_AMPLITUDE,
            progress: i32::from(DEFAULT_PROGRESS.get()),
            density: 1.0,
            size: None,
            waving: true,
            tip_text: String::new(),
            colors: ColorSettings::default(),
            animation: AnimationSettings::default(),
        }
    }
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            wave: DEFAULT_WAVE_COLOR.to_argb(),
            inner: DEFAULT_INNER_COLOR.to_argb(),
            outer: DEFAULT_OUTER_COLOR.to_argb(),
            border: DEFAULT_BORDER_COLOR.to_argb(),
            background: 0xFF1E_1E1E,
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            phase_increment: DEFAULT_PHASE_INCREMENT,
            wrap_bound: DEFAULT_WRAP_BOUND,
        }
    }
}

impl GaugeSettings {
    /// Reads settings from `path`, falling back to defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid settings in {}", path.display()))
    }

    /// Parses and validates settings from TOML text.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let settings: Self =
            toml::from_str(contents).context("failed to parse settings toml contents")?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if !self.density.is_finite() || self.density <= 0.0 {
            bail!("density must be positive (received {})", self.density);
        }
        if self.animation.interval_ms == 0 {
            bail!("animation.interval_ms must be positive");
        }
        if !self.animation.phase_increment.is_finite() || self.animation.phase_increment <= 0.0 {
            bail!(
                "animation.phase_increment must be positive (received {})",
                self.animation.phase_increment
            );
        }
        if !self.animation.wrap_bound.is_finite() || self.animation.wrap_bound <= 0.0 {
            bail!(
                "animation.wrap_bound must be positive (received {})",
                self.animation.wrap_bound
            );
        }
        if let Some(size) = self.size {
            if !size.is_finite() || size <= 0.0 {
                bail!("size must be positive (received {size})");
            }
        }
        let _ = self.geometry()?;
        Ok(())
    }

    /// Validated geometry in pixels.
    pub(crate) fn geometry(&self) -> Result<GaugeGeometry> {
        GaugeGeometry::new(
            self.radius * self.density,
            self.stroke_width * self.density,
            self.wave_amplitude,
        )
        .context("invalid gauge geometry")
    }

    /// Square the gauge is constrained to, in pixels.
    pub(crate) fn available_area(&self) -> Option<Vec2> {
        self.size.map(|size| Vec2::splat(size * self.density))
    }

    /// Width of the border ring in pixels.
    pub(crate) fn border_width(&self) -> f32 {
        BORDER_WIDTH_DP * self.density
    }

    /// Clock configuration derived from the animation section.
    pub(crate) fn clock_config(&self) -> ClockConfig {
        ClockConfig::new(
            Duration::from_millis(self.animation.interval_ms),
            self.animation.phase_increment,
            self.animation.wrap_bound,
        )
    }

    /// Colors used to paint the gauge layers.
    pub(crate) fn palette(&self) -> GaugePalette {
        GaugePalette {
            wave: Color::from_argb_u32(self.colors.wave),
            inner: Color::from_argb_u32(self.colors.inner),
            outer: Color::from_argb_u32(self.colors.outer),
            border: Color::from_argb_u32(self.colors.border),
        }
    }

    /// Color used to clear the window.
    pub(crate) fn background(&self) -> Color {
        Color::from_argb_u32(self.colors.background)
    }
}
