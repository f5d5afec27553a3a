//! Chart assembly from reconciled snapshots

mod common;

use common::{capable_analysis, full_analysis, nested_control_chart};
use serde_json::json;
use spc::charts::{assemble, ChartKind, ChartState, LineAxis, SeriesData, SeriesKind};
use spc::control::PointStatus;
use spc::curve::{CURVE_STEPS, OVERLAY_STEPS};
use spc::reconcile::reconcile_snapshot;
use spc::session::Snapshot;

fn snapshot(raw: serde_json::Value) -> Snapshot {
    Snapshot::from_raw(&raw).unwrap()
}

// ============================================================================
// Capability chart
// ============================================================================

#[test]
fn test_capability_chart_marks_limits_and_sigma() {
    let snap = snapshot(full_analysis());
    let chart = snap.charts.capability.ready().unwrap();

    let names: Vec<&str> = chart.mark_lines().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["LSL", "Mean", "USL", "-3σ", "+3σ"]);
    assert!(chart.mark_lines().all(|m| m.axis == LineAxis::X));

    let sigma = chart.mark_lines().find(|m| m.name == "+3σ").unwrap();
    assert!((sigma.value - (100.12 + 3.0 * 5.03)).abs() < 1e-9);
    assert!(sigma.dashed);

    let series = &chart.series[0];
    assert_eq!(series.data.len(), CURVE_STEPS + 1);
    assert_eq!(series.mark_areas.len(), 2);
    assert_eq!(series.mark_areas[0].to, 85.0);
    assert_eq!(series.mark_areas[1].from, 115.0);
}

#[test]
fn test_capability_curve_spans_domain() {
    let snap = snapshot(full_analysis());
    let chart = snap.charts.capability.ready().unwrap();
    let SeriesData::Xy(points) = &chart.series[0].data else {
        panic!("capability curve should be xy data");
    };
    let (lower, upper) = (chart.x_axis.min.unwrap(), chart.x_axis.max.unwrap());
    assert_eq!(points.first().unwrap().x, lower);
    assert_eq!(points.last().unwrap().x, upper);
    assert!(lower <= 85.0 - 3.0 * 5.03);
    assert!(upper >= 115.0 + 3.0 * 5.03);
}

#[test]
fn test_zero_sigma_has_no_capability_chart() {
    let raw = json!({
        "descriptiveStats": {"mean": 100.0, "standardDeviation": 0.0},
        "capabilityIndices": {"lsl": 85, "usl": 115, "cp": 0, "cpk": 0}
    });
    let snap = snapshot(raw);
    assert!(matches!(snap.charts.capability, ChartState::NoData));
}

#[test]
fn test_capability_needs_stats_and_indices() {
    let raw = json!({"capabilityIndices": {"lsl": 85, "usl": 115, "cpk": 1.2}});
    let snap = snapshot(raw);
    assert!(matches!(snap.charts.capability, ChartState::NoData));
}

// ============================================================================
// Control charts
// ============================================================================

#[test]
fn test_xbar_points_are_classified() {
    let snap = snapshot(full_analysis());
    let chart = snap.charts.xbar.ready().unwrap();
    let statuses: Vec<PointStatus> = chart
        .category_points()
        .iter()
        .map(|p| p.status.unwrap())
        .collect();
    assert_eq!(
        statuses,
        [
            PointStatus::InControl,
            PointStatus::OutOfControl,
            PointStatus::InControl,
            PointStatus::InControl,
            PointStatus::InControl,
        ]
    );
    assert_eq!(chart.x_axis.categories[0], "Group 1");
    assert_eq!(chart.x_axis.categories.len(), 5);
}

#[test]
fn test_range_chart_labels_and_stagger() {
    let snap = snapshot(full_analysis());
    let chart = snap.charts.range.ready().unwrap();
    let labels: Vec<&str> = chart.mark_lines().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, ["UCL: 23.500", "CL: 11.100", "LCL: 0.000"]);

    let stagger = chart.series[0].stagger.unwrap();
    assert_eq!(stagger.delay_for(0).as_millis(), 1000);
    assert_eq!(stagger.delay_for(2).as_millis(), 1100);

    let flagged: Vec<&str> = chart
        .category_points()
        .iter()
        .filter(|p| p.status == Some(PointStatus::OutOfControl))
        .map(|p| p.label.as_str())
        .collect();
    assert_eq!(flagged, ["Group 3"]);
}

#[test]
fn test_nested_layout_charts_match_flat() {
    let nested = snapshot(json!({"success": true, "data": nested_control_chart()}));
    let flat = snapshot(full_analysis());
    assert_eq!(nested.charts.xbar, flat.charts.xbar);
    assert_eq!(nested.charts.range, flat.charts.range);
}

#[test]
fn test_point_on_limit_is_in_control() {
    let raw = json!({"controlChart": {
        "means": [104.0, 96.0], "ranges": [],
        "clMean": 100.0, "uclMean": 104.0, "lclMean": 96.0,
        "isControlled": true
    }});
    let snap = snapshot(raw);
    let chart = snap.charts.xbar.ready().unwrap();
    assert!(chart
        .category_points()
        .iter()
        .all(|p| p.status == Some(PointStatus::InControl)));
    assert!(matches!(snap.charts.range, ChartState::NoData));
}

// ============================================================================
// Histogram
// ============================================================================

#[test]
fn test_histogram_bars_and_overlay() {
    let snap = snapshot(full_analysis());
    let chart = snap.charts.histogram.ready().unwrap();
    assert_eq!(chart.series.len(), 2);
    assert_eq!(chart.series[0].kind, SeriesKind::Bar);
    assert_eq!(chart.series[0].data.len(), 10);
    assert_eq!(chart.series[1].data.len(), OVERLAY_STEPS + 1);
    assert!(chart.x_axis.categories[0].starts_with("84.52-"));
}

#[test]
fn test_histogram_without_stats_is_numbered() {
    let snap = snapshot(json!({"histogram": [1, 4, 2]}));
    let chart = snap.charts.histogram.ready().unwrap();
    assert_eq!(chart.x_axis.categories, ["Bin 1", "Bin 2", "Bin 3"]);
    assert_eq!(chart.series.len(), 1);
}

// ============================================================================
// Chart set
// ============================================================================

#[test]
fn test_no_snapshot_means_no_data_everywhere() {
    let set = assemble(None);
    for (kind, state) in set.iter() {
        assert!(matches!(state, ChartState::NoData), "{kind} should be no data");
    }
}

#[test]
fn test_every_chart_ready_for_capable_process() {
    let model = reconcile_snapshot(&capable_analysis()).unwrap();
    let set = assemble(model.as_ref());
    for kind in ChartKind::ALL {
        assert!(set.get(kind).is_ready(), "{kind} should be ready");
    }
}

#[test]
fn test_chart_set_serializes_state_tags() {
    let set = assemble(None);
    let json = serde_json::to_value(&set).unwrap();
    assert_eq!(json["capability"]["state"], "noData");
}
