#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wave Gauge engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative indicator state, and pure systems. Adapters submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to deterministically. Systems consume event streams and
//! respond exclusively with new command batches.
//!
//! All lengths are plain numeric units chosen by the caller, typically pixels
//! that were already resolved from density-independent values.

mod outline;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use outline::{ArcSegment, Bounds, PathSegment, Point, SurfaceGeometry, WaveOutline};

/// Radius of the inner disk used when no configuration is supplied.
pub const DEFAULT_RADIUS: f32 = 100.0;

/// Width of the outer ring used when no configuration is supplied.
pub const DEFAULT_STROKE_WIDTH: f32 = 20.0;

/// Peak deviation of the wave from the liquid surface.
pub const DEFAULT_WAVE_AMPLITUDE: f32 = 5.0;

/// Progress shown before any value has been submitted.
pub const DEFAULT_PROGRESS: Progress = Progress::new(30);

/// Fill color of the liquid.
pub const DEFAULT_WAVE_COLOR: GaugeColor = GaugeColor::from_argb(0xFF45_A348);

/// Fill color of the empty interior.
pub const DEFAULT_INNER_COLOR: GaugeColor = GaugeColor::from_argb(0x9045_A348);

/// Stroke color of the outer ring.
pub const DEFAULT_OUTER_COLOR: GaugeColor = GaugeColor::from_argb(0xFF4C_AF50);

/// Stroke color of the thin border drawn just outside the liquid.
pub const DEFAULT_BORDER_COLOR: GaugeColor = GaugeColor::from_argb(0xF0FF_FFFF);

/// Commands that express all permissible indicator mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the construction-time geometry of the gauge.
    ConfigureGeometry {
        /// Validated radius, stroke width and wave amplitude.
        geometry: GaugeGeometry,
    },
    /// Sets the displayed percentage. Values outside `0..=100` are clamped.
    SetProgress {
        /// Requested percentage.
        value: i32,
    },
    /// Requests that the wave animation starts running.
    StartWave,
    /// Requests that the wave animation stops.
    StopWave,
    /// Updates the color used to fill the liquid.
    SetWaveColor {
        /// New liquid color.
        color: GaugeColor,
    },
    /// Updates the informational text attached to the gauge.
    SetTipText {
        /// New tip text.
        text: String,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Stores a new wave phase produced by the animation clock.
    AdvancePhase {
        /// Phase offset that should be used for subsequent frames.
        phase: Phase,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that the gauge geometry was replaced.
    GeometryConfigured {
        /// Geometry that became active.
        geometry: GaugeGeometry,
    },
    /// Confirms that the displayed percentage changed.
    ProgressChanged {
        /// Percentage after clamping.
        progress: Progress,
    },
    /// Announces that the wave animation was switched on.
    WaveStarted,
    /// Announces that the wave animation was switched off.
    WaveStopped,
    /// Confirms that the liquid color changed.
    WaveColorChanged {
        /// Color that became active.
        color: GaugeColor,
    },
    /// Confirms that the tip text changed.
    TipTextChanged {
        /// Text that became active.
        text: String,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the wave phase moved.
    PhaseAdvanced {
        /// Phase offset now stored by the world.
        phase: Phase,
    },
    /// Signals that the visible output changed and the outline must be regenerated.
    RedrawRequested,
}

/// Errors raised while validating construction-time configuration.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A length was NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The radius must be strictly positive.
    #[error("radius must be positive (received {radius})")]
    NonPositiveRadius {
        /// Radius that failed validation.
        radius: f32,
    },
    /// The ring stroke cannot be negative.
    #[error("stroke width must not be negative (received {stroke_width})")]
    NegativeStrokeWidth {
        /// Stroke width that failed validation.
        stroke_width: f32,
    },
    /// The wave amplitude cannot be negative.
    #[error("wave amplitude must not be negative (received {amplitude})")]
    NegativeAmplitude {
        /// Amplitude that failed validation.
        amplitude: f32,
    },
}

/// Fill percentage of the gauge, always within `0..=100`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "u8")]
pub struct Progress(u8);

impl Progress {
    /// Upper bound of the percentage scale.
    pub const MAX: Self = Self(100);

    /// Creates a progress value, saturating at 100.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value > 100 {
            Self(100)
        } else {
            Self(value)
        }
    }

    /// Clamps an arbitrary integer into the percentage range.
    #[must_use]
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    /// Retrieves the percentage.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Percentage expressed as a fraction in `0.0..=1.0`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        f32::from(self.0) / 100.0
    }

    /// Offsets the percentage by `step`, clamping the result.
    #[must_use]
    pub fn offset(self, step: i32) -> Self {
        Self::clamped(i32::from(self.0).saturating_add(step))
    }
}

impl From<u8> for Progress {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

/// Horizontal phase offset driving the wave ripple.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Phase(f32);

impl Phase {
    /// Phase at the start of the animation.
    pub const ZERO: Self = Self(0.0);

    /// Wraps a raw phase value.
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Retrieves the raw phase value.
    #[must_use]
    pub const fn get(&self) -> f32 {
        self.0
    }
}

/// ARGB color carried through commands without depending on a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GaugeColor {
    alpha: u8,
    red: u8,
    green: u8,
    blue: u8,
}

impl GaugeColor {
    /// Creates a color from a packed `0xAARRGGBB` value.
    #[must_use]
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            alpha: (argb >> 24) as u8,
            red: (argb >> 16) as u8,
            green: (argb >> 8) as u8,
            blue: argb as u8,
        }
    }

    /// Creates an opaque color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha: 0xFF,
            red,
            green,
            blue,
        }
    }

    /// Packs the color back into `0xAARRGGBB` form.
    #[must_use]
    pub const fn to_argb(&self) -> u32 {
        (self.alpha as u32) << 24
            | (self.red as u32) << 16
            | (self.green as u32) << 8
            | self.blue as u32
    }

    /// Alpha component of the color.
    #[must_use]
    pub const fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Validated construction-time dimensions of the gauge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeometryRepr")]
pub struct GaugeGeometry {
    radius: f32,
    stroke_width: f32,
    wave_amplitude: f32,
}

impl GaugeGeometry {
    /// Validates and creates a new geometry description.
    ///
    /// Returns an error when the radius is not strictly positive, when the
    /// stroke width or amplitude is negative, or when any value is not finite.
    pub fn new(radius: f32, stroke_width: f32, wave_amplitude: f32) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("radius", radius),
            ("stroke width", stroke_width),
            ("wave amplitude", wave_amplitude),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        if radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius { radius });
        }
        if stroke_width < 0.0 {
            return Err(ConfigError::NegativeStrokeWidth { stroke_width });
        }
        if wave_amplitude < 0.0 {
            return Err(ConfigError::NegativeAmplitude {
                amplitude: wave_amplitude,
            });
        }

        Ok(Self {
            radius,
            stroke_width,
            wave_amplitude,
        })
    }

    /// Radius of the liquid disk.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Width of the ring surrounding the disk.
    #[must_use]
    pub const fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Peak deviation of the wave from the liquid surface.
    #[must_use]
    pub const fn wave_amplitude(&self) -> f32 {
        self.wave_amplitude
    }

    /// Horizontal phase distance after which the wave repeats itself.
    #[must_use]
    pub fn wave_period(&self) -> f32 {
        2.0 * self.radius
    }

    /// Bounding box of the liquid disk, offset by the stroke width.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let near = self.stroke_width;
        let far = 2.0 * self.radius + self.stroke_width;
        Bounds::from_ltrb(near, near, far, far)
    }

    /// Builds the per-frame generator input for the provided state.
    #[must_use]
    pub const fn frame(&self, progress: Progress, phase: Phase) -> WaveConfig {
        WaveConfig {
            geometry: *self,
            progress,
            phase,
        }
    }
}

#[derive(Deserialize)]
struct GeometryRepr {
    radius: f32,
    stroke_width: f32,
    wave_amplitude: f32,
}

impl TryFrom<GeometryRepr> for GaugeGeometry {
    type Error = ConfigError;

    fn try_from(repr: GeometryRepr) -> Result<Self, Self::Error> {
        Self::new(repr.radius, repr.stroke_width, repr.wave_amplitude)
    }
}

impl Default for GaugeGeometry {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            stroke_width: DEFAULT_STROKE_WIDTH,
            wave_amplitude: DEFAULT_WAVE_AMPLITUDE,
        }
    }
}

/// Immutable input consumed by the wave boundary generator for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveConfig {
    geometry: GaugeGeometry,
    progress: Progress,
    phase: Phase,
}

impl WaveConfig {
    /// Geometry shared by every frame.
    #[must_use]
    pub const fn geometry(&self) -> &GaugeGeometry {
        &self.geometry
    }

    /// Radius of the liquid disk.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.geometry.radius
    }

    /// Width of the ring surrounding the disk.
    #[must_use]
    pub const fn stroke_width(&self) -> f32 {
        self.geometry.stroke_width
    }

    /// Peak deviation of the wave from the liquid surface.
    #[must_use]
    pub const fn wave_amplitude(&self) -> f32 {
        self.geometry.wave_amplitude
    }

    /// Fill percentage for this frame.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Wave phase offset for this frame.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }
}
