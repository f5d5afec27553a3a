//! Overall process conclusion
//!
//! Rolls stability, capability and normality into one verdict with three
//! summary cards and an ordered recommendation list. Stability always comes
//! from the engine's `isControlled` field.

use serde::Serialize;

use crate::capability::classify::{classify, recommend};
use crate::entities::AnalysisResult;

/// Overall verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    /// In statistical control and Cpk >= 1.00
    Success,
    Warning,
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverallStatus::Success => write!(f, "success"),
            OverallStatus::Warning => write!(f, "warning"),
        }
    }
}

/// One summary card of the conclusion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConclusionCard {
    pub title: &'static str,

    /// Whether this aspect passes
    pub ok: bool,

    /// Short headline (engine text when available)
    pub headline: String,

    pub note: String,
}

/// Process conclusion derived from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessConclusion {
    pub status: OverallStatus,

    pub stability: ConclusionCard,

    pub capability: ConclusionCard,

    pub distribution: ConclusionCard,

    /// Improvement actions, most general first
    pub recommendations: Vec<String>,
}

const SPECIAL_CAUSE_ACTION: &str =
    "Identify and eliminate the special causes making the process unstable";

const DATA_COLLECTION_ACTION: &str =
    "Check the data collection process and make sure samples are representative";

/// Build the conclusion for a snapshot
///
/// Needs capability indices, a normality test and a control chart; returns
/// `None` when any of them is missing.
pub fn conclude(result: &AnalysisResult) -> Option<ProcessConclusion> {
    let capability = result.capability_indices.as_ref()?;
    let normality = result.normality_test.as_ref()?;
    let chart = result.control_chart.as_ref()?;
    let assessment = result.process_assessment.clone().unwrap_or_default();

    let is_controlled = chart.is_controlled;
    let is_capable = capability.cpk >= 1.0;
    let is_normal = normality.is_normal;

    let status = if is_controlled && is_capable {
        OverallStatus::Success
    } else {
        OverallStatus::Warning
    };

    let stability = ConclusionCard {
        title: "Process stability",
        ok: is_controlled,
        headline: or_else(&assessment.stability_status, || {
            if is_controlled {
                "In statistical control".to_string()
            } else {
                "Out of statistical control".to_string()
            }
        }),
        note: if is_controlled {
            "Only common-cause variation present; process behaviour is predictable".to_string()
        } else {
            "Special-cause variation present; instability sources must be removed".to_string()
        },
    };

    let capability_card = ConclusionCard {
        title: "Process capability",
        ok: is_capable,
        headline: or_else(&assessment.capability_level, || {
            classify(capability.cpk).level.to_string()
        }),
        note: format!(
            "Cpk = {:.2}, {}",
            capability.cpk,
            if is_capable {
                "process meets the specification"
            } else {
                "process cannot reliably meet the specification"
            }
        ),
    };

    let distribution = ConclusionCard {
        title: "Data distribution",
        ok: is_normal,
        headline: or_else(&normality.conclusion, || {
            if is_normal {
                "Normally distributed".to_string()
            } else {
                "Not normally distributed".to_string()
            }
        }),
        note: format!(
            "p = {:.3}, {}",
            normality.p_value,
            if is_normal {
                "results can be relied on"
            } else {
                "interpret results with care"
            }
        ),
    };

    let mut recommendations = Vec::new();
    if !assessment.recommendations.trim().is_empty() {
        recommendations.push(assessment.recommendations.clone());
    }
    if !is_controlled {
        recommendations.push(SPECIAL_CAUSE_ACTION.to_string());
    }
    if let Some(rec) = recommend(capability.cp, capability.cpk) {
        recommendations.push(rec.text().to_string());
    }
    if !is_normal {
        recommendations.push(DATA_COLLECTION_ACTION.to_string());
    }

    Some(ProcessConclusion {
        status,
        stability,
        capability: capability_card,
        distribution,
        recommendations,
    })
}

fn or_else(text: &str, fallback: impl FnOnce() -> String) -> String {
    if text.trim().is_empty() {
        fallback()
    } else {
        text.to_string()
    }
}
