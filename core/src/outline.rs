//! Geometry produced by the wave boundary generator.

use std::iter;

use serde::{Deserialize, Serialize};

/// Position in gauge space. The y axis grows downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Reports whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle described by its edges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl Bounds {
    /// Creates a rectangle from its left, top, right and bottom edges.
    #[must_use]
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Horizontal extent of the rectangle.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent of the rectangle.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Centre of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }
}

/// Elliptical arc inscribed in `bounds`.
///
/// Angles are expressed in degrees. Zero points along the positive x axis and
/// positive angles turn clockwise on screen, so 90 degrees is the bottom of the
/// oval.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    /// Rectangle the oval is inscribed in.
    pub bounds: Bounds,
    /// Angle where the arc begins.
    pub start_angle: f32,
    /// Angle covered by the arc, measured from `start_angle`.
    pub sweep_angle: f32,
}

impl ArcSegment {
    /// Creates a new arc descriptor.
    #[must_use]
    pub const fn new(bounds: Bounds, start_angle: f32, sweep_angle: f32) -> Self {
        Self {
            bounds,
            start_angle,
            sweep_angle,
        }
    }

    /// Point on the oval at the provided angle in degrees.
    #[must_use]
    pub fn point_at(&self, angle: f32) -> Point {
        let center = self.bounds.center();
        let radians = angle.to_radians();
        Point::new(
            center.x + self.bounds.width() * 0.5 * radians.cos(),
            center.y + self.bounds.height() * 0.5 * radians.sin(),
        )
    }

    /// First point of the arc.
    #[must_use]
    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    /// Last point of the arc.
    #[must_use]
    pub fn end_point(&self) -> Point {
        self.point_at(self.start_angle + self.sweep_angle)
    }
}

/// Liquid surface parameters derived from radius and progress.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceGeometry {
    /// Half of the chord width at the liquid surface.
    pub abs_x: f32,
    /// Height of the liquid column within the diameter.
    pub abs_y: f32,
    /// Angle in degrees where the submerged arc begins.
    pub start_angle: f32,
    /// Angle in degrees covered by the submerged arc.
    pub sweep_angle: f32,
    /// Vertical position of the undisturbed surface, stroke offset included.
    pub surface_y: f32,
}

/// Single drawing instruction of a [`WaveOutline`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    /// Starts the contour at the point.
    MoveTo(Point),
    /// Quadratic curve through `control` ending at `to`.
    QuadTo {
        /// Control point of the curve.
        control: Point,
        /// End point of the curve.
        to: Point,
    },
    /// Straight join to the arc start followed by the arc itself.
    ArcTo(ArcSegment),
    /// Joins the current point back to the contour start.
    Close,
}

/// Closed boundary of the liquid region for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveOutline {
    surface: SurfaceGeometry,
    wave: Vec<Point>,
    arc: ArcSegment,
}

impl WaveOutline {
    /// Assembles an outline from sampled wave points and the submerged arc.
    #[must_use]
    pub fn new(surface: SurfaceGeometry, wave: Vec<Point>, arc: ArcSegment) -> Self {
        Self { surface, wave, arc }
    }

    /// Surface parameters the outline was built from.
    #[must_use]
    pub const fn surface(&self) -> &SurfaceGeometry {
        &self.surface
    }

    /// Wave samples ordered from left to right.
    #[must_use]
    pub fn wave_points(&self) -> &[Point] {
        &self.wave
    }

    /// Arc that completes the contour around the submerged part of the disk.
    #[must_use]
    pub const fn arc(&self) -> &ArcSegment {
        &self.arc
    }

    /// Point where the contour starts and, once closed, ends.
    #[must_use]
    pub fn start_point(&self) -> Point {
        self.wave
            .first()
            .copied()
            .unwrap_or_else(|| self.arc.start_point())
    }

    /// Drawing instructions describing the closed contour.
    ///
    /// The first instruction is always [`PathSegment::MoveTo`] and the last is
    /// always [`PathSegment::Close`].
    pub fn segments(&self) -> impl Iterator<Item = PathSegment> + '_ {
        let curves = self.wave.iter().skip(1).map(|point| PathSegment::QuadTo {
            control: *point,
            to: Point::new(point.x + 1.0, point.y),
        });

        iter::once(PathSegment::MoveTo(self.start_point()))
            .chain(curves)
            .chain(iter::once(PathSegment::ArcTo(self.arc)))
            .chain(iter::once(PathSegment::Close))
    }

    /// Reports whether every coordinate and angle in the outline is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.wave.iter().all(|point| point.is_finite())
            && self.arc.start_angle.is_finite()
            && self.arc.sweep_angle.is_finite()
            && self.surface.abs_x.is_finite()
            && self.surface.abs_y.is_finite()
    }
}
