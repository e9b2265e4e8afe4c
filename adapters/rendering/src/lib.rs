#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Wave Gauge adapters.

mod fill;
pub mod svg;

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};
use wave_gauge_core::{
    GaugeColor, Progress, WaveOutline, DEFAULT_BORDER_COLOR, DEFAULT_INNER_COLOR,
    DEFAULT_OUTER_COLOR, DEFAULT_WAVE_COLOR,
};

pub use fill::{flatten_outline, scanline_spans};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates a color from a packed `0xAARRGGBB` value.
    #[must_use]
    pub const fn from_argb_u32(argb: u32) -> Self {
        Self {
            red: ((argb >> 16) & 0xFF) as f32 / 255.0,
            green: ((argb >> 8) & 0xFF) as f32 / 255.0,
            blue: (argb & 0xFF) as f32 / 255.0,
            alpha: ((argb >> 24) & 0xFF) as f32 / 255.0,
        }
    }
}

impl From<GaugeColor> for Color {
    fn from(color: GaugeColor) -> Self {
        Self::from_argb_u32(color.to_argb())
    }
}

/// Colors used to paint the individual parts of the gauge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaugePalette {
    /// Fill of the liquid region.
    pub wave: Color,
    /// Fill of the empty interior.
    pub inner: Color,
    /// Stroke of the outer ring.
    pub outer: Color,
    /// Stroke of the thin border around the disk.
    pub border: Color,
}

impl Default for GaugePalette {
    fn default() -> Self {
        Self {
            wave: DEFAULT_WAVE_COLOR.into(),
            inner: DEFAULT_INNER_COLOR.into(),
            outer: DEFAULT_OUTER_COLOR.into(),
            border: DEFAULT_BORDER_COLOR.into(),
        }
    }
}

/// Square footprint of the gauge resolved against the available space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaugeLayout {
    size: f32,
    radius: f32,
    stroke_width: f32,
}

impl GaugeLayout {
    /// Resolves the gauge footprint.
    ///
    /// The gauge occupies a square whose side is the smaller dimension of
    /// `available`, or `2R + 2S` when no constraint is given. When the square
    /// is too small for the requested radius and ring, the radius shrinks so
    /// the ring still fits.
    pub fn measure(
        radius: f32,
        stroke_width: f32,
        available: Option<Vec2>,
    ) -> Result<Self, RenderingError> {
        let size = match available {
            Some(area) => area.x.min(area.y),
            None => 2.0 * (radius + stroke_width),
        };
        if !size.is_finite() || !radius.is_finite() || !stroke_width.is_finite() {
            return Err(RenderingError::NonFiniteLayout);
        }

        let center = size * 0.5;
        let radius = if center <= radius + stroke_width {
            center - stroke_width
        } else {
            radius
        };

        if radius <= 0.0 {
            return Err(RenderingError::LayoutTooSmall { size, stroke_width });
        }

        Ok(Self {
            size,
            radius,
            stroke_width,
        })
    }

    /// Side length of the square occupied by the gauge.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Radius of the liquid disk after fitting.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Width of the outer ring.
    #[must_use]
    pub const fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Centre of the gauge within its square.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::splat(self.size * 0.5)
    }

    /// Translation from outline space, centred on `R + S`, into the square.
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        self.center() - Vec2::splat(self.radius + self.stroke_width)
    }

    /// Radius of the centre line of the outer ring.
    #[must_use]
    pub fn ring_radius(&self) -> f32 {
        self.radius + self.stroke_width * 0.5
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Whether the adapter detected a request to start or stop the wave.
    pub toggle_wave: bool,
    /// Requested change of the displayed percentage.
    pub progress_step: i32,
}

/// Scene description of a single gauge frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Footprint of the gauge.
    pub layout: GaugeLayout,
    /// Boundary of the liquid for the current frame.
    pub outline: WaveOutline,
    /// Percentage the outline was generated for.
    pub progress: Progress,
    /// Whether the wave is currently animating.
    pub waving: bool,
    /// Colors used to paint the gauge.
    pub palette: GaugePalette,
    /// Width of the thin border drawn just outside the disk.
    pub border_width: f32,
    /// Informational text attached to the gauge.
    pub tip_text: String,
}

impl Scene {
    /// Creates a new scene descriptor for an idle gauge.
    #[must_use]
    pub fn new(
        layout: GaugeLayout,
        outline: WaveOutline,
        progress: Progress,
        palette: GaugePalette,
        border_width: f32,
    ) -> Self {
        Self {
            layout,
            outline,
            progress,
            waving: false,
            palette,
            border_width,
            tip_text: String::new(),
        }
    }

    /// Radius of the centre line of the border ring.
    #[must_use]
    pub fn border_radius(&self) -> f32 {
        self.layout.radius() + self.border_width
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Wave Gauge scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and refreshes the scene before
    /// it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The available area, radius or stroke was NaN or infinite.
    NonFiniteLayout,
    /// The available square cannot hold the ring and a positive radius.
    LayoutTooSmall {
        /// Side length of the available square.
        size: f32,
        /// Ring width that had to fit inside it.
        stroke_width: f32,
    },
    /// Flattening needs a positive segment length to terminate.
    InvalidSegmentLength {
        /// Provided segment length that failed validation.
        length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteLayout => write!(f, "layout dimensions must be finite"),
            Self::LayoutTooSmall { size, stroke_width } => {
                write!(
                    f,
                    "a {size} unit square leaves no room for the disk inside a {stroke_width} unit ring"
                )
            }
            Self::InvalidSegmentLength { length } => {
                write!(f, "segment length must be positive (received {length})")
            }
        }
    }
}

impl Error for RenderingError {}
