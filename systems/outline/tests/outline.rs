use wave_gauge_core::{GaugeGeometry, PathSegment, Phase, Progress, WaveOutline};
use wave_gauge_system_outline::{generate_outline, surface_geometry};

const PHASES: [f32; 5] = [0.0, 3.0, 157.5, 4_321.0, 9_999.0];

fn reference_geometry() -> GaugeGeometry {
    GaugeGeometry::new(100.0, 20.0, 5.0).expect("reference geometry is valid")
}

fn outline_at(progress: u8, phase: f32) -> WaveOutline {
    generate_outline(&reference_geometry().frame(Progress::new(progress), Phase::new(phase)))
}

fn assert_close(actual: f32, expected: f32, tolerance: f32, what: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{what}: expected {expected} ± {tolerance}, got {actual}"
    );
}

#[test]
fn every_progress_and_phase_yields_a_closed_finite_contour() {
    for progress in 0..=100 {
        for phase in PHASES {
            let outline = outline_at(progress, phase);
            let segments: Vec<_> = outline.segments().collect();

            assert!(outline.is_finite(), "NaN in outline at {progress}%/{phase}");
            assert!(matches!(segments.first(), Some(PathSegment::MoveTo(_))));
            assert_eq!(segments.last(), Some(&PathSegment::Close));
            assert_eq!(
                segments
                    .iter()
                    .filter(|segment| matches!(segment, PathSegment::ArcTo(_)))
                    .count(),
                1,
                "exactly one arc closes the contour"
            );
        }
    }
}

#[test]
fn arc_ends_where_the_wave_begins() {
    let geometry = reference_geometry();
    for progress in 1..100 {
        let outline = outline_at(progress, 42.0);
        let gap = outline.arc().end_point().distance(outline.start_point());

        assert!(
            gap <= geometry.wave_amplitude() + 0.05,
            "closing gap {gap} too large at {progress}%"
        );
    }
}

#[test]
fn surface_is_continuous_across_half_full() {
    let geometry = reference_geometry();
    let below = surface_geometry(&geometry, Progress::new(49));
    let half = surface_geometry(&geometry, Progress::new(50));
    let above = surface_geometry(&geometry, Progress::new(51));

    for (lower, upper) in [(below, half), (half, above)] {
        assert_close(upper.abs_y - lower.abs_y, 2.0, 1e-3, "abs_y step");
        assert_close(upper.abs_x, lower.abs_x, 0.1, "abs_x");
        assert_close(upper.start_angle, lower.start_angle, 1.5, "start angle");
        assert_close(upper.sweep_angle, lower.sweep_angle, 3.0, "sweep angle");
    }
}

#[test]
fn surface_height_increases_strictly_with_progress() {
    let geometry = reference_geometry();
    let heights: Vec<f32> = (0..=100)
        .map(|progress| surface_geometry(&geometry, Progress::new(progress)).abs_y)
        .collect();

    for pair in heights.windows(2) {
        assert!(pair[1] > pair[0], "abs_y must grow: {pair:?}");
    }
}

#[test]
fn phase_only_moves_the_wave_samples() {
    for progress in [0, 12, 49, 50, 77, 100] {
        let reference = outline_at(progress, 0.0);
        for phase in PHASES {
            let shifted = outline_at(progress, phase);

            assert_eq!(shifted.surface(), reference.surface());
            assert_eq!(shifted.arc(), reference.arc());
            assert_eq!(
                shifted.wave_points().len(),
                reference.wave_points().len()
            );
            for (moved, baseline) in shifted.wave_points().iter().zip(reference.wave_points()) {
                assert_eq!(moved.x, baseline.x);
            }
        }
    }
}

#[test]
fn wave_stays_within_amplitude_of_the_surface() {
    for progress in (0..=100).step_by(5) {
        for phase in PHASES {
            let outline = outline_at(progress, phase);
            let surface_y = outline.surface().surface_y;

            for point in outline.wave_points() {
                assert!(
                    (point.y - surface_y).abs() <= 5.0 + 1e-3,
                    "sample {point:?} escapes the amplitude band at {progress}%"
                );
            }
        }
    }
}

#[test]
fn empty_gauge_has_no_wave_and_no_sweep() {
    let outline = outline_at(0, 0.0);

    assert_eq!(outline.surface().abs_y, 0.0);
    assert_close(outline.surface().abs_x, 0.0, 1e-3, "abs_x");
    assert!(outline.wave_points().is_empty());
    assert_close(outline.arc().sweep_angle, 0.0, 1e-3, "sweep");
    assert_close(outline.arc().start_angle, 90.0, 1e-3, "start");
    assert_eq!(outline.surface().surface_y, 220.0);
}

#[test]
fn full_gauge_sweeps_the_whole_circle() {
    let outline = outline_at(100, 0.0);

    assert_eq!(outline.surface().abs_y, 200.0);
    assert!(outline.wave_points().is_empty());
    assert_close(outline.arc().sweep_angle, 360.0, 1e-3, "sweep");
    assert_close(outline.arc().start_angle, -90.0, 1e-3, "start");
    assert_eq!(outline.surface().surface_y, 20.0);
}

#[test]
fn half_full_gauge_spans_the_diameter() {
    let outline = outline_at(50, 0.0);
    let surface = outline.surface();

    assert_eq!(surface.abs_y, 100.0);
    assert_close(surface.abs_x, 100.0, 1e-3, "abs_x");
    assert_close(surface.start_angle, 0.0, 1e-3, "start");
    assert_close(surface.sweep_angle, 180.0, 1e-3, "sweep");
    assert_eq!(outline.wave_points().len(), 200);

    let first = outline.wave_points()[0];
    assert_close(first.x, 20.0, 1e-3, "first sample x");
    assert_close(first.y, 120.0, 1e-3, "first sample y");
    let last = outline.wave_points()[199];
    assert_close(last.x, 219.0, 1e-3, "last sample x");
}

#[test]
fn samples_advance_one_unit_at_a_time() {
    let outline = outline_at(30, 11.0);
    for pair in outline.wave_points().windows(2) {
        assert_close(pair[1].x - pair[0].x, 1.0, 1e-4, "sample step");
    }
}

#[test]
fn stroke_width_offsets_the_whole_contour() {
    let thin = GaugeGeometry::new(100.0, 0.0, 5.0).expect("valid geometry");
    let thick = GaugeGeometry::new(100.0, 20.0, 5.0).expect("valid geometry");
    let state = (Progress::new(65), Phase::new(8.0));

    let thin_outline = generate_outline(&thin.frame(state.0, state.1));
    let thick_outline = generate_outline(&thick.frame(state.0, state.1));

    for (a, b) in thin_outline
        .wave_points()
        .iter()
        .zip(thick_outline.wave_points())
    {
        assert_close(b.x - a.x, 20.0, 1e-3, "x offset");
        assert_close(b.y - a.y, 20.0, 1e-3, "y offset");
    }
    assert_eq!(thick_outline.arc().bounds.left, 20.0);
    assert_eq!(thick_outline.arc().bounds.right, 220.0);
}

#[test]
fn repeated_generation_is_deterministic() {
    let first = outline_at(63, 1_234.5);
    let second = outline_at(63, 1_234.5);

    assert_eq!(first, second);
}
