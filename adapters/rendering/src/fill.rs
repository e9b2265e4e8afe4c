//! Polygon flattening and scanline coverage for filling wave outlines.

use glam::Vec2;
use wave_gauge_core::{ArcSegment, PathSegment, Point, WaveOutline};

use crate::RenderingError;

/// Converts the closed outline into a polygon.
///
/// Quadratic curves and the arc are subdivided so no emitted edge is longer
/// than roughly `max_segment_length`. The polygon is implicitly closed: the
/// last vertex joins the first.
pub fn flatten_outline(
    outline: &WaveOutline,
    max_segment_length: f32,
) -> Result<Vec<Vec2>, RenderingError> {
    if !max_segment_length.is_finite() || max_segment_length <= 0.0 {
        return Err(RenderingError::InvalidSegmentLength {
            length: max_segment_length,
        });
    }

    let mut polygon = Vec::with_capacity(outline.wave_points().len() * 2 + 64);
    let mut cursor = Vec2::ZERO;

    for segment in outline.segments() {
        match segment {
            PathSegment::MoveTo(point) => {
                cursor = to_vec2(point);
                polygon.push(cursor);
            }
            PathSegment::QuadTo { control, to } => {
                let control = to_vec2(control);
                let to = to_vec2(to);
                let estimate = cursor.distance(control) + control.distance(to);
                let steps = subdivisions(estimate, max_segment_length);
                for step in 1..=steps {
                    let t = step as f32 / steps as f32;
                    polygon.push(quadratic(cursor, control, to, t));
                }
                cursor = to;
            }
            PathSegment::ArcTo(arc) => {
                polygon.push(to_vec2(arc.start_point()));
                push_arc(&arc, max_segment_length, &mut polygon);
            }
            PathSegment::Close => {}
        }
    }

    Ok(polygon)
}

/// Computes the horizontal spans of `polygon` covered on the line at `y`.
///
/// Crossings are paired using the even-odd rule. Each returned span is
/// ordered `(left, right)` and spans are sorted from left to right.
#[must_use]
pub fn scanline_spans(polygon: &[Vec2], y: f32) -> Vec<(f32, f32)> {
    if polygon.len() < 3 {
        return Vec::new();
    }

    let mut crossings: Vec<f32> = polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .filter(|(a, b)| (a.y > y) != (b.y > y))
        .map(|(a, b)| a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y))
        .collect();
    crossings.sort_by(f32::total_cmp);

    crossings
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

fn push_arc(arc: &ArcSegment, max_segment_length: f32, polygon: &mut Vec<Vec2>) {
    let radius = arc.bounds.width().max(arc.bounds.height()) * 0.5;
    let length = arc.sweep_angle.abs().to_radians() * radius;
    let steps = subdivisions(length, max_segment_length);

    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        polygon.push(to_vec2(
            arc.point_at(arc.start_angle + arc.sweep_angle * t),
        ));
    }
}

fn subdivisions(length: f32, max_segment_length: f32) -> u32 {
    ((length / max_segment_length).ceil() as u32).max(1)
}

fn quadratic(from: Vec2, control: Vec2, to: Vec2, t: f32) -> Vec2 {
    let inverse = 1.0 - t;
    from * (inverse * inverse) + control * (2.0 * inverse * t) + to * (t * t)
}

fn to_vec2(point: Point) -> Vec2 {
    Vec2::new(point.x, point.y)
}
