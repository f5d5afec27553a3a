//! Presentation session - the single owned "current snapshot"
//!
//! The session is the one writer of the current snapshot. Every request gets
//! a [`RequestTicket`]; only the newest ticket may replace the snapshot, so a
//! slow response that lands after a newer request is dropped. A snapshot
//! bundles the model with every artifact derived from it and is swapped in
//! whole, so readers never see charts from one snapshot next to a model
//! from another.

use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::capability::{conclude, ProcessConclusion};
use crate::charts::{assemble, ChartSet};
use crate::entities::AnalysisResult;
use crate::reconcile::{reconcile_snapshot, UpstreamFailure};

/// Reconciliation entry point used by a session
pub type Reconciler = fn(&Value) -> Result<Option<AnalysisResult>, UpstreamFailure>;

/// Handle for one outstanding analysis request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// One immutable analysis snapshot with everything derived from it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub received_at: DateTime<Utc>,

    /// Canonical model; `None` is the "no data" state
    pub model: Option<AnalysisResult>,

    pub charts: ChartSet,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<ProcessConclusion>,
}

impl Snapshot {
    /// Build a snapshot from a raw service response
    pub fn from_raw(raw: &Value) -> Result<Self, UpstreamFailure> {
        Self::build(raw, reconcile_snapshot)
    }

    fn build(raw: &Value, reconciler: Reconciler) -> Result<Self, UpstreamFailure> {
        match contain_panic(|| reconciler(raw).map(Self::from_model)) {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(%message, "reconciliation panicked, snapshot downgraded to no data");
                Ok(Self {
                    received_at: Utc::now(),
                    model: None,
                    charts: ChartSet::error(message),
                    conclusion: None,
                })
            }
        }
    }

    /// Derive charts and conclusion from an already reconciled model
    pub fn from_model(model: Option<AnalysisResult>) -> Self {
        let charts = assemble(model.as_ref());
        let conclusion = model.as_ref().and_then(conclude);
        Self {
            received_at: Utc::now(),
            model,
            charts,
            conclusion,
        }
    }

    pub fn has_data(&self) -> bool {
        self.model.is_some()
    }
}

thread_local! {
    static QUIET_PANICS: Cell<bool> = const { Cell::new(false) };
}

/// Chain a hook that stays silent for panics inside [`contain_panic`]
fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if QUIET_PANICS.with(Cell::get) {
                debug!(%info, "panic contained");
            } else {
                previous(info);
            }
        }));
    });
}

/// Run `f`, turning a panic into `Err` without printing it to stderr
fn contain_panic<T>(f: impl FnOnce() -> T) -> std::thread::Result<T> {
    install_panic_hook();
    QUIET_PANICS.with(|quiet| quiet.set(true));
    let outcome = catch_unwind(AssertUnwindSafe(f));
    QUIET_PANICS.with(|quiet| quiet.set(false));
    outcome
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected failure while reading analysis data".to_string()
    }
}

/// Result of completing a request
#[derive(Debug, Clone)]
pub enum SnapshotUpdate {
    /// The response replaced the current snapshot
    Applied(Arc<Snapshot>),

    /// A newer request was issued; the response was dropped
    Superseded,

    /// Upstream reported failure; the current snapshot is unchanged
    Failed(UpstreamFailure),
}

/// Owner of the current snapshot
pub struct Session {
    issued: u64,
    pending: Option<RequestTicket>,
    current: Option<Arc<Snapshot>>,
    reconciler: Reconciler,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("issued", &self.issued)
            .field("pending", &self.pending)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_reconciler(reconcile_snapshot)
    }

    /// Session using a custom reconciliation step
    pub fn with_reconciler(reconciler: Reconciler) -> Self {
        Self {
            issued: 0,
            pending: None,
            current: None,
            reconciler,
        }
    }

    /// Register a new request; any earlier outstanding ticket is superseded
    pub fn begin_request(&mut self) -> RequestTicket {
        self.issued += 1;
        let ticket = RequestTicket(self.issued);
        self.pending = Some(ticket);
        debug!(ticket = ticket.id(), "analysis request issued");
        ticket
    }

    /// Deliver the outcome of a request
    ///
    /// `outcome` is the raw response body, or the failure reported by the
    /// fetch layer itself.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Value, UpstreamFailure>,
    ) -> SnapshotUpdate {
        if self.pending != Some(ticket) {
            debug!(
                ticket = ticket.id(),
                latest = self.issued,
                "dropping superseded analysis result"
            );
            return SnapshotUpdate::Superseded;
        }
        self.pending = None;

        let reconciler = self.reconciler;
        let built = outcome.and_then(|raw| Snapshot::build(&raw, reconciler));
        match built {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                info!(
                    ticket = ticket.id(),
                    has_data = snapshot.has_data(),
                    "analysis snapshot applied"
                );
                self.current = Some(Arc::clone(&snapshot));
                SnapshotUpdate::Applied(snapshot)
            }
            Err(failure) => {
                warn!(ticket = ticket.id(), message = %failure.message, "analysis failed upstream");
                SnapshotUpdate::Failed(failure)
            }
        }
    }

    /// The current snapshot, if one was ever applied
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Chart readiness as a renderer should show it right now
    pub fn chart_states(&self) -> ChartSet {
        match (&self.current, self.pending) {
            (Some(snapshot), _) => snapshot.charts.clone(),
            (None, Some(_)) => ChartSet::loading(),
            (None, None) => ChartSet::no_data(),
        }
    }
}
