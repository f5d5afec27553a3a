//! Response envelope handling
//!
//! The analysis service wraps results as `{success, error?, analysis?, data?,
//! stats?}`, and individual endpoints return a single section (control chart,
//! capability indices, or statistics plus histogram) rather than a full
//! analysis. The capability, normality, mean-test and assessment endpoints put
//! their fields inline next to `success` instead of under a payload key.
//! Everything is normalised here to the full-analysis layout so the section
//! reconcilers only ever see one shape.

use miette::Diagnostic;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::reconcile::fields::{truthy, Object};

/// Section keys of a full analysis payload
pub const SECTION_KEYS: &[&str] = &[
    "descriptiveStats",
    "groupStats",
    "normalityTest",
    "meanTest",
    "capabilityIndices",
    "controlChart",
    "processAssessment",
    "histogram",
];

const DEFAULT_FAILURE: &str = "analysis request failed";

/// Envelope keys that never belong to a payload
const ENVELOPE_KEYS: &[&str] = &["success", "error", "message", "count"];

/// Capability fields the assessment endpoint sends next to its narrative
const ASSESSMENT_INDEX_KEYS: &[&str] = &["cp", "cpk"];

/// The analysis service reported failure
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("Analysis failed upstream: {message}")]
#[diagnostic(
    code(spc::upstream_failure),
    help("regenerate or re-import the dataset, then run the analysis again")
)]
pub struct UpstreamFailure {
    pub message: String,
}

impl UpstreamFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Strip the response envelope and normalise to the full-analysis layout
///
/// Returns `Value::Null` when the envelope reports success but carries no
/// payload, neither under a payload key nor inline.
pub fn unwrap_payload(raw: &Value) -> Result<Value, UpstreamFailure> {
    let Some(obj) = raw.as_object() else {
        return Ok(raw.clone());
    };

    if obj.contains_key("success") && !truthy(obj, "success") {
        let message = obj
            .get("error")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_FAILURE);
        return Err(UpstreamFailure::new(message));
    }

    let payload = if let Some(analysis) = non_null(obj, "analysis") {
        analysis.clone()
    } else if let Some(data) = non_null(obj, "data") {
        data.clone()
    } else if let Some(stats) = non_null(obj, "stats") {
        stats.clone()
    } else if is_envelope(obj) {
        let inline: Object = obj
            .iter()
            .filter(|(key, _)| !ENVELOPE_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if inline.is_empty() {
            debug!("envelope carries no payload");
            return Ok(Value::Null);
        }
        debug!(fields = inline.len(), "inline payload");
        Value::Object(inline)
    } else {
        raw.clone()
    };

    Ok(normalize_sections(payload))
}

/// Wrap a single-section payload into the full-analysis layout
pub fn normalize_sections(payload: Value) -> Value {
    let Value::Object(obj) = payload else {
        return payload;
    };

    // `histogram` alone does not mark a full analysis; the stats endpoint sends it too
    if SECTION_KEYS
        .iter()
        .filter(|key| **key != "histogram")
        .any(|key| obj.contains_key(*key))
    {
        return Value::Object(obj);
    }

    let section = if is_control_chart(&obj) {
        "controlChart"
    } else if obj.contains_key("stabilityStatus") {
        return Value::Object(adapt_assessment(obj));
    } else if obj.contains_key("cpk") || obj.contains_key("cp") {
        "capabilityIndices"
    } else if obj.contains_key("overall") {
        return Value::Object(adapt_stats(obj));
    } else if obj.contains_key("isNormal") {
        "normalityTest"
    } else if obj.contains_key("sampleMean") {
        "meanTest"
    } else {
        return Value::Object(obj);
    };

    debug!(section, "single-section payload wrapped");
    let mut wrapped = Map::new();
    wrapped.insert(section.to_string(), Value::Object(obj));
    Value::Object(wrapped)
}

fn non_null<'a>(obj: &'a Object, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn is_envelope(obj: &Object) -> bool {
    ENVELOPE_KEYS.iter().any(|key| obj.contains_key(*key))
}

fn is_control_chart(obj: &Object) -> bool {
    ["means", "ranges", "xbarChart", "rChart"]
        .iter()
        .any(|key| obj.contains_key(*key))
}

/// `{overall, groups, histogram}` → `{descriptiveStats, groupStats, histogram}`
fn adapt_stats(mut obj: Object) -> Object {
    let mut adapted = Map::new();
    if let Some(overall) = obj.remove("overall") {
        adapted.insert("descriptiveStats".to_string(), overall);
    }
    if let Some(groups) = obj.remove("groups") {
        adapted.insert("groupStats".to_string(), groups);
    }
    if let Some(histogram) = obj.remove("histogram") {
        adapted.insert("histogram".to_string(), histogram);
    }
    adapted
}

/// `{stabilityStatus, ..., cp, cpk}` → `{processAssessment, capabilityIndices}`
fn adapt_assessment(mut obj: Object) -> Object {
    let indices: Object = ASSESSMENT_INDEX_KEYS
        .iter()
        .filter_map(|key| obj.remove_entry(*key))
        .collect();

    let mut adapted = Map::new();
    if !indices.is_empty() {
        adapted.insert("capabilityIndices".to_string(), Value::Object(indices));
    }
    adapted.insert("processAssessment".to_string(), Value::Object(obj));
    adapted
}
