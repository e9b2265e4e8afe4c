use wave_gauge_core::{GaugeGeometry, Phase, Progress, WaveOutline};
use wave_gauge_rendering::{
    flatten_outline, scanline_spans, svg, GaugeLayout, GaugePalette, RenderingError, Scene,
};
use wave_gauge_system_outline::generate_outline;

fn outline_at(progress: u8) -> WaveOutline {
    generate_outline(&GaugeGeometry::default().frame(Progress::new(progress), Phase::ZERO))
}

#[test]
fn half_full_gauge_fills_the_lower_chord() {
    let polygon = flatten_outline(&outline_at(50), 2.0).expect("positive segment length");

    let spans = scanline_spans(&polygon, 200.0);
    assert_eq!(spans.len(), 1);
    let (left, right) = spans[0];
    assert!((left - 60.0).abs() < 1.0, "left edge {left}");
    assert!((right - 180.0).abs() < 1.0, "right edge {right}");

    assert!(scanline_spans(&polygon, 40.0).is_empty());
}

#[test]
fn full_gauge_fills_the_whole_diameter() {
    let polygon = flatten_outline(&outline_at(100), 1.0).expect("positive segment length");

    let spans = scanline_spans(&polygon, 120.0);
    assert_eq!(spans.len(), 1);
    assert!((spans[0].0 - 20.0).abs() < 0.5);
    assert!((spans[0].1 - 220.0).abs() < 0.5);
}

#[test]
fn empty_gauge_fills_nothing() {
    let polygon = flatten_outline(&outline_at(0), 1.0).expect("positive segment length");

    for y in [20.0, 120.0, 219.5] {
        assert!(scanline_spans(&polygon, y).is_empty());
    }
}

#[test]
fn flattening_rejects_non_positive_lengths() {
    let outline = outline_at(40);

    assert_eq!(
        flatten_outline(&outline, 0.0),
        Err(RenderingError::InvalidSegmentLength { length: 0.0 })
    );
    assert!(flatten_outline(&outline, -1.0).is_err());
    assert!(flatten_outline(&outline, f32::NAN).is_err());
}

#[test]
fn path_data_describes_the_closed_contour() {
    let half = svg::path_data(&outline_at(50));
    assert!(half.starts_with("M20,120 Q"), "unexpected prefix: {half}");
    assert!(half.ends_with(" Z"));
    assert_eq!(half.matches('A').count(), 1);

    let full = svg::path_data(&outline_at(100));
    assert!(full.starts_with("M120,20 L120,20 A"), "unexpected prefix: {full}");
    assert_eq!(full.matches('A').count(), 2);
}

#[test]
fn document_contains_every_layer() {
    let layout = GaugeLayout::measure(100.0, 20.0, None).expect("valid layout");
    let scene = Scene::new(
        layout,
        outline_at(30),
        Progress::new(30),
        GaugePalette::default(),
        1.0,
    );

    let document = svg::document(&scene);

    assert!(document.starts_with("<svg"));
    assert!(document.ends_with("</svg>"));
    assert_eq!(document.matches("<circle").count(), 3);
    assert_eq!(document.matches("<path").count(), 1);
    assert!(document.contains(r#"r="110""#));
    assert!(document.contains(r#"r="101""#));
}
