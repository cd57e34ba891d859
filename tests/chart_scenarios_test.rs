//! Chart end-to-end scenarios: overflow advisories, panning, exports,
//! and teardown through the public API.

#![allow(clippy::unwrap_used)]

use vizgrid::charts::{
    BarChart, BarConfig, GaussChart, GaussConfig, HistogramChart, HistogramConfig, ScatterChart,
    ScatterConfig,
};
use vizgrid::input::DEFAULT_PAN_SPEED;

const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

fn bar(data: Vec<(&str, f64)>) -> BarChart {
    BarChart::new(BarConfig {
        data: data.into_iter().map(|(l, v)| (l.to_string(), v)).collect(),
        ..BarConfig::default()
    })
    .unwrap()
}

// ============================================================================
// Bar overflow advisory
// ============================================================================

#[test]
fn bar_value_over_scale_is_flagged_and_rendered_full() {
    let chart = bar(vec![("low", 10.0), ("over", 150.0)]);

    // The advisory flag names the overflowing pair, nothing else.
    assert_eq!(chart.overflowed(), &[1]);

    // The bar still rendered, clamped to the full stage run: a frame
    // was drawn and the row's value text is present.
    assert_eq!(chart.frame().frames(), 1);
    let texts = chart.frame().canvas().text_content();
    assert!(texts.iter().any(|t| t.contains("150")));
    assert!(texts.iter().any(|t| t.contains("(150%)")));
}

#[test]
fn bar_within_scale_has_no_flags() {
    let chart = bar(vec![("a", 10.0), ("b", 100.0)]);
    assert!(chart.overflowed().is_empty());
}

// ============================================================================
// Panning through the chart loop
// ============================================================================

#[test]
fn held_key_pans_camera_each_tick() {
    let mut chart = bar(vec![("a", 50.0)]);
    chart.frame_mut().input.key_down('d');
    chart.tick();
    chart.tick();
    chart.tick();
    assert_eq!(chart.frame().camera.x, 3.0 * DEFAULT_PAN_SPEED);

    chart.frame_mut().input.key_up('d');
    chart.tick();
    assert_eq!(chart.frame().camera.x, 3.0 * DEFAULT_PAN_SPEED);
}

#[test]
fn unfocused_chart_ignores_keys() {
    let mut chart = bar(vec![("a", 50.0)]);
    chart.frame_mut().input.blur();
    chart.frame_mut().input.key_down('w');
    chart.tick();
    assert_eq!(chart.frame().camera.y, 0.0);
}

#[test]
fn mouse_drag_pans_and_release_stops() {
    let mut chart = bar(vec![("a", 50.0)]);
    let input = &mut chart.frame_mut().input;
    input.mouse_moved(100.0, 100.0);
    input.mouse_down();
    input.mouse_moved(120.0, 100.0);
    chart.tick();
    assert_eq!(chart.frame().camera.x, DEFAULT_PAN_SPEED);

    chart.frame_mut().input.mouse_up();
    chart.tick();
    assert_eq!(chart.frame().camera.x, DEFAULT_PAN_SPEED);
}

// ============================================================================
// Frame export
// ============================================================================

#[test]
fn png_export_has_signature() {
    let chart = bar(vec![("a", 50.0)]);
    let bytes = chart.frame().png_bytes().unwrap();
    assert_eq!(&bytes[0..8], &PNG_MAGIC);
}

#[test]
fn png_export_writes_file() {
    let chart = bar(vec![("a", 50.0)]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bar.png");
    chart.frame().write_png(&path).unwrap();
    assert_eq!(&std::fs::read(&path).unwrap()[0..8], &PNG_MAGIC);
}

#[test]
fn svg_export_carries_raster_and_text() {
    let chart = bar(vec![("a", 50.0)]);
    let svg = chart.frame().to_svg().unwrap();
    assert!(svg.contains("data:image/png;base64,"));
    assert!(svg.contains(">Bar chart</text>"));
}

// ============================================================================
// Teardown semantics
// ============================================================================

#[test]
fn destroyed_charts_ignore_late_ticks() {
    let mut scatter = ScatterChart::new(ScatterConfig {
        x: vec![1.0, 2.0, 3.0],
        y: vec![3.0, 2.0, 1.0],
        ..ScatterConfig::default()
    })
    .unwrap();
    let mut histogram = HistogramChart::new(HistogramConfig {
        data: vec![1.0, 2.0, 2.0, 3.0, 3.0, 3.0],
        ..HistogramConfig::default()
    })
    .unwrap();
    let mut gauss = GaussChart::new(GaussConfig {
        data: vec![0.5, 0.2, 0.8, 0.9],
        ..GaussConfig::default()
    })
    .unwrap();

    scatter.destroy();
    histogram.destroy();
    gauss.destroy();

    // A timer firing after destroy must not draw.
    scatter.tick();
    histogram.tick();
    gauss.tick();

    assert_eq!(scatter.frame().frames(), 1);
    assert_eq!(histogram.frame().frames(), 1);
    assert_eq!(gauss.frame().frames(), 1);
    assert!(!scatter.frame().is_active());
}

#[test]
fn hide_and_show_toggle_visibility_without_stopping() {
    let mut chart = bar(vec![("a", 50.0)]);
    chart.hide();
    assert!(!chart.frame().is_visible());

    // Hidden is not destroyed: ticks keep rendering.
    let frames = chart.frame().frames();
    chart.tick();
    assert_eq!(chart.frame().frames(), frames + 1);

    chart.show();
    assert!(chart.frame().is_visible());
}

// ============================================================================
// Cross-chart redraw stability
// ============================================================================

#[test]
fn all_charts_redraw_idempotently() {
    let mut bar = bar(vec![("a", 25.0), ("b", 75.0)]);
    let mut histogram = HistogramChart::new(HistogramConfig {
        data: vec![5.0, 10.0, 25.0, 50.0, 10.0, 5.0],
        ..HistogramConfig::default()
    })
    .unwrap();

    bar.redraw();
    histogram.redraw();
    let bar_first: Vec<String> = bar
        .frame()
        .canvas()
        .text_content()
        .iter()
        .map(ToString::to_string)
        .collect();
    let histogram_first: Vec<String> = histogram
        .frame()
        .canvas()
        .text_content()
        .iter()
        .map(ToString::to_string)
        .collect();

    bar.redraw();
    histogram.redraw();
    assert_eq!(bar.frame().canvas().text_content(), bar_first);
    assert_eq!(histogram.frame().canvas().text_content(), histogram_first);
}
