//! SVG serialisation of wave outlines and whole gauge scenes.

use wave_gauge_core::{ArcSegment, PathSegment, Point, WaveOutline};

use crate::{Color, Scene};

/// Sweeps at or beyond this many degrees are drawn as a full circle.
const FULL_TURN: f32 = 360.0;

/// Serialises the outline as SVG path data.
///
/// The arc is preceded by an explicit line to its start. A full circle cannot
/// be expressed by a single SVG arc command, so it is split into two halves.
#[must_use]
pub fn path_data(outline: &WaveOutline) -> String {
    let mut commands = Vec::new();

    for segment in outline.segments() {
        match segment {
            PathSegment::MoveTo(point) => commands.push(format!("M{}", pair(point))),
            PathSegment::QuadTo { control, to } => {
                commands.push(format!("Q{} {}", pair(control), pair(to)));
            }
            PathSegment::ArcTo(arc) => {
                commands.push(format!("L{}", pair(arc.start_point())));
                push_arc(&arc, &mut commands);
            }
            PathSegment::Close => commands.push("Z".to_owned()),
        }
    }

    commands.join(" ")
}

/// Renders the scene as a standalone SVG document.
#[must_use]
pub fn document(scene: &Scene) -> String {
    let layout = &scene.layout;
    let size = number(layout.size());
    let center = layout.center();
    let origin = layout.origin();
    let (cx, cy) = (number(center.x), number(center.y));

    let mut lines = vec![
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
        ),
        format!(
            r#"  <circle cx="{cx}" cy="{cy}" r="{}" fill="{}"/>"#,
            number(layout.radius()),
            css(scene.palette.inner)
        ),
        format!(
            r#"  <path transform="translate({} {})" d="{}" fill="{}"/>"#,
            number(origin.x),
            number(origin.y),
            path_data(&scene.outline),
            css(scene.palette.wave)
        ),
    ];
    if layout.stroke_width() > 0.0 {
        lines.push(format!(
            r#"  <circle cx="{cx}" cy="{cy}" r="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            number(layout.ring_radius()),
            css(scene.palette.outer),
            number(layout.stroke_width())
        ));
    }
    lines.push(format!(
        r#"  <circle cx="{cx}" cy="{cy}" r="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
        number(scene.border_radius()),
        css(scene.palette.border),
        number(scene.border_width)
    ));
    lines.push("</svg>".to_owned());

    lines.join("\n")
}

fn push_arc(arc: &ArcSegment, commands: &mut Vec<String>) {
    let sweep = arc.sweep_angle;
    if sweep == 0.0 {
        return;
    }

    if sweep.abs() >= FULL_TURN {
        let half = sweep.signum() * FULL_TURN * 0.5;
        let middle = arc.point_at(arc.start_angle + half);
        commands.push(arc_command(arc, half, middle));
        commands.push(arc_command(arc, half, arc.start_point()));
    } else {
        commands.push(arc_command(arc, sweep, arc.end_point()));
    }
}

fn arc_command(arc: &ArcSegment, sweep: f32, to: Point) -> String {
    let large_arc = u8::from(sweep.abs() > 180.0);
    let clockwise = u8::from(sweep > 0.0);
    format!(
        "A{} {} 0 {large_arc} {clockwise} {}",
        number(arc.bounds.width() * 0.5),
        number(arc.bounds.height() * 0.5),
        pair(to)
    )
}

fn pair(point: Point) -> String {
    format!("{},{}", number(point.x), number(point.y))
}

fn number(value: f32) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_owned()
    } else {
        format!("{rounded}")
    }
}

fn css(color: Color) -> String {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{})",
        channel(color.red),
        channel(color.green),
        channel(color.blue),
        number(color.alpha)
    )
}
