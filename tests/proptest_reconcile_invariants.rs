//! Property-based invariant tests for reconciliation and derived artifacts.
//!
//! 1. Reconciliation is total: arbitrary JSON never panics and yields finite limits.
//! 2. Flat and nested control chart layouts of the same data agree.
//! 3. Point classification matches the closed `[lcl, ucl]` interval.
//! 4. Capability levels are monotone in Cpk.
//! 5. Sampled curves have a fixed length, ascending x and positive density.
//! 6. Chart assembly never panics on reconciled input.

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use spc::capability::CapabilityLevel;
use spc::charts::assemble;
use spc::control::{classify_point, PointStatus};
use spc::curve::{sample_normal_curve, sample_overlay_curve, CURVE_STEPS, OVERLAY_STEPS};
use spc::reconcile::{reconcile_control_chart, reconcile_snapshot};

// ── Helpers ─────────────────────────────────────────────────────────────

fn json_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1.0e6f64..1.0e6).prop_map(|v| json!(v)),
        any::<i32>().prop_map(|v| json!(v)),
        "[a-zA-Z]{0,8}".prop_map(Value::String),
    ];
    let keys = prop_oneof![
        Just("means".to_string()),
        Just("ranges".to_string()),
        Just("uclMean".to_string()),
        Just("xbarChart".to_string()),
        Just("rChart".to_string()),
        Just("values".to_string()),
        Just("isControlled".to_string()),
        Just("success".to_string()),
        Just("analysis".to_string()),
        Just("data".to_string()),
        Just("capabilityIndices".to_string()),
        Just("descriptiveStats".to_string()),
        Just("histogram".to_string()),
        Just("standardDeviation".to_string()),
        "[a-z]{1,6}",
    ];
    leaf.prop_recursive(4, 48, 6, move |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((keys.clone(), inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn series_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e4f64..1.0e4, 0..20)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Reconciliation is total
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn control_chart_reconciliation_is_total(raw in json_strategy()) {
        let chart = reconcile_control_chart(&raw);
        for limits in [chart.means.limits, chart.ranges.limits] {
            prop_assert!(limits.ucl.is_finite() && limits.cl.is_finite() && limits.lcl.is_finite());
        }
        prop_assert!(chart.means.values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn snapshot_reconciliation_never_panics(raw in json_strategy()) {
        if let Ok(Some(result)) = reconcile_snapshot(&raw) {
            prop_assert!(!result.is_empty());
            let _ = assemble(Some(&result));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Layout equivalence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn flat_and_nested_layouts_agree(
        means in series_strategy(),
        ranges in series_strategy(),
        limits in prop::array::uniform6(-1.0e4f64..1.0e4),
        controlled in any::<bool>(),
    ) {
        let flat = json!({
            "means": means, "ranges": ranges,
            "uclMean": limits[0], "clMean": limits[1], "lclMean": limits[2],
            "uclRange": limits[3], "clRange": limits[4], "lclRange": limits[5],
            "isControlled": controlled,
        });
        let nested = json!({
            "isControlled": controlled,
            "xbarChart": {
                "values": means,
                "upperControlLimit": limits[0], "centerLine": limits[1], "lowerControlLimit": limits[2],
            },
            "rChart": {
                "values": ranges,
                "upperControlLimit": limits[3], "centerLine": limits[4], "lowerControlLimit": limits[5],
            },
        });
        prop_assert_eq!(reconcile_control_chart(&flat), reconcile_control_chart(&nested));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Point classification
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn classification_matches_interval(
        value in -1.0e4f64..1.0e4,
        a in -1.0e4f64..1.0e4,
        b in -1.0e4f64..1.0e4,
    ) {
        let (lcl, ucl) = if a <= b { (a, b) } else { (b, a) };
        let inside = value >= lcl && value <= ucl;
        let status = classify_point(value, Some(ucl), Some(lcl));
        prop_assert_eq!(status == PointStatus::InControl, inside);
        prop_assert_eq!(classify_point(value, None, None), PointStatus::InControl);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Capability levels are monotone
// ═════════════════════════════════════════════════════════════════════════

fn rank(level: CapabilityLevel) -> u8 {
    match level {
        CapabilityLevel::Poor => 0,
        CapabilityLevel::Marginal => 1,
        CapabilityLevel::Acceptable => 2,
        CapabilityLevel::Good => 3,
        CapabilityLevel::Excellent => 4,
    }
}

proptest! {
    #[test]
    fn capability_level_monotone(a in -2.0f64..4.0, b in -2.0f64..4.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(rank(CapabilityLevel::from_cpk(lo)) <= rank(CapabilityLevel::from_cpk(hi)));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Sampled curves
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normal_curve_shape(
        mean in -1.0e3f64..1.0e3,
        sigma in 0.01f64..100.0,
        lsl in -1.0e3f64..1.0e3,
        width in 0.0f64..500.0,
    ) {
        let points = sample_normal_curve(mean, sigma, lsl, lsl + width);
        prop_assert_eq!(points.len(), CURVE_STEPS + 1);
        prop_assert!(points.windows(2).all(|w| w[0].x < w[1].x));
        prop_assert!(points.iter().all(|p| p.y >= 0.0 && p.y.is_finite()));
    }

    #[test]
    fn overlay_curve_length(
        mean in -100.0f64..100.0,
        sigma in 0.01f64..10.0,
        min in -100.0f64..100.0,
        span in 0.001f64..100.0,
        peak in 0.0f64..1000.0,
    ) {
        let points = sample_overlay_curve(mean, sigma, min, min + span, peak);
        prop_assert_eq!(points.len(), OVERLAY_STEPS + 1);
        prop_assert_eq!(points[0].x, min);
        prop_assert_eq!(points[OVERLAY_STEPS].x, min + span);
    }

    #[test]
    fn non_positive_sigma_gives_no_curve(sigma in -10.0f64..=0.0) {
        prop_assert!(sample_normal_curve(100.0, sigma, 85.0, 115.0).is_empty());
    }
}
