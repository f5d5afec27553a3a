//! CLI command implementations

pub mod charts;
pub mod classify;
pub mod completions;
pub mod curve;
pub mod points;
pub mod report;

use std::path::Path;

use miette::Result;
use serde_json::Value;

use crate::json::read_json_input;
use crate::session::Snapshot;

/// Message printed for a missing or empty snapshot
pub const NO_DATA: &str = "No analysis data";

/// Read and reconcile a snapshot file (`-` for stdin)
///
/// `Ok(None)` for blank input. An upstream failure envelope is an error.
pub fn load_snapshot(path: &Path) -> Result<Option<Snapshot>> {
    let Some(raw) = read_json_input::<Value>(path)? else {
        return Ok(None);
    };
    let snapshot = Snapshot::from_raw(&raw)?;
    Ok(Some(snapshot))
}
