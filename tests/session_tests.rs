//! Snapshot lifecycle: request ordering, failures, derived artifacts

mod common;

use std::sync::Arc;

use common::{capable_analysis, failure_envelope, full_analysis};
use serde_json::json;
use spc::capability::OverallStatus;
use spc::charts::ChartState;
use spc::reconcile::UpstreamFailure;
use spc::session::{Session, Snapshot, SnapshotUpdate};

#[test]
fn test_fresh_session_has_no_data() {
    let session = Session::new();
    assert!(session.current().is_none());
    assert!(!session.is_pending());
    assert!(matches!(session.chart_states().histogram, ChartState::NoData));
}

#[test]
fn test_out_of_order_responses_keep_newest() {
    let mut session = Session::new();
    let stale = session.begin_request();
    let fresh = session.begin_request();

    // Stale response arrives first; fresh is still pending
    assert!(matches!(
        session.complete(stale, Ok(capable_analysis())),
        SnapshotUpdate::Superseded
    ));
    assert!(session.is_pending());
    assert!(matches!(session.chart_states().xbar, ChartState::Loading));

    assert!(matches!(
        session.complete(fresh, Ok(full_analysis())),
        SnapshotUpdate::Applied(_)
    ));
    let current = session.current().unwrap();
    let conclusion = current.conclusion.as_ref().unwrap();
    assert_eq!(conclusion.status, OverallStatus::Warning);
}

#[test]
fn test_fetch_error_leaves_snapshot_untouched() {
    let mut session = Session::new();
    let ticket = session.begin_request();
    session.complete(ticket, Ok(capable_analysis()));
    let before = session.current().unwrap();

    let ticket = session.begin_request();
    let update = session.complete(ticket, Err(UpstreamFailure::new("connection refused")));
    assert!(matches!(update, SnapshotUpdate::Failed(ref f) if f.message == "connection refused"));
    assert!(Arc::ptr_eq(&before, &session.current().unwrap()));
    assert!(session.chart_states().capability.is_ready());
}

#[test]
fn test_failure_envelope_before_any_snapshot() {
    let mut session = Session::new();
    let ticket = session.begin_request();
    let update = session.complete(ticket, Ok(failure_envelope("no measurements")));
    assert!(matches!(update, SnapshotUpdate::Failed(_)));
    assert!(session.current().is_none());
    assert!(matches!(session.chart_states().range, ChartState::NoData));
}

#[test]
fn test_empty_payload_replaces_previous_data() {
    let mut session = Session::new();
    let ticket = session.begin_request();
    session.complete(ticket, Ok(full_analysis()));

    let ticket = session.begin_request();
    session.complete(ticket, Ok(json!({"success": true, "message": "cleared"})));
    let current = session.current().unwrap();
    assert!(!current.has_data());
    assert!(current.conclusion.is_none());
    assert!(matches!(current.charts.capability, ChartState::NoData));
}

#[test]
fn test_snapshot_conclusion_for_capable_process() {
    let snapshot = Snapshot::from_raw(&capable_analysis()).unwrap();
    let conclusion = snapshot.conclusion.unwrap();
    assert_eq!(conclusion.status, OverallStatus::Success);
    assert!(conclusion.stability.ok);
    assert!(conclusion.capability.ok);
    assert!(conclusion.distribution.ok);
}

#[test]
fn test_snapshot_conclusion_lists_actions() {
    let snapshot = Snapshot::from_raw(&full_analysis()).unwrap();
    let conclusion = snapshot.conclusion.unwrap();
    assert_eq!(conclusion.recommendations[0], "Investigate group 2");
    assert!(conclusion
        .recommendations
        .iter()
        .any(|r| r.contains("special causes")));
    assert!(conclusion
        .recommendations
        .iter()
        .any(|r| r.contains("reduce the process standard deviation")));
    assert_eq!(conclusion.stability.headline, "unstable");
}

#[test]
fn test_snapshot_serializes_model_and_charts() {
    let snapshot = Snapshot::from_raw(&full_analysis()).unwrap();
    let json = serde_json::to_value(&snapshot).unwrap();
    assert!(json["receivedAt"].is_string());
    assert_eq!(json["model"]["capabilityIndices"]["cpk"], 0.98);
    assert_eq!(json["charts"]["xbar"]["state"], "ready");
    assert_eq!(json["conclusion"]["status"], "warning");
}
