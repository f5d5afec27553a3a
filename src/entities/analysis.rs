//! Full analysis snapshot - one reconciled result of a full-analysis request
//!
//! A snapshot is built once and never edited; a newer request replaces the
//! whole value. Sections are optional because upstream may send a subset
//! (capability alone, control chart alone, statistics plus histogram).

use serde::Serialize;

use crate::entities::capability::CapabilityIndices;
use crate::entities::control_chart::ControlChartData;
use crate::entities::stats::{DescriptiveStats, GroupStats};

/// Normality test outcome
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalityTest {
    /// Test method (e.g. "Anderson-Darling")
    pub method: String,

    /// Test statistic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistic: Option<f64>,

    pub p_value: f64,

    /// Whether the data is consistent with a normal distribution
    pub is_normal: bool,

    /// Narrative conclusion
    pub conclusion: String,
}

/// One-sample mean test outcome
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeanTest {
    pub sample_mean: f64,

    pub expected_mean: f64,

    /// Significance level
    pub alpha: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub t_statistic: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_value: Option<f64>,

    /// True when the sample mean is consistent with the expected mean
    pub test_result: bool,

    pub conclusion: String,
}

/// Narrative process assessment written by the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessAssessment {
    pub stability_status: String,

    pub capability_level: String,

    pub recommendations: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_index: Option<f64>,
}

/// Canonical model of one analysis snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Statistics over every measurement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptive_stats: Option<DescriptiveStats>,

    /// Statistics over subgroup means
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_stats: Option<GroupStats>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub normality_test: Option<NormalityTest>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_test: Option<MeanTest>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability_indices: Option<CapabilityIndices>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_chart: Option<ControlChartData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_assessment: Option<ProcessAssessment>,

    /// Histogram bin counts, in bin order
    pub histogram: Vec<f64>,
}

impl AnalysisResult {
    /// True when no section carries any data
    pub fn is_empty(&self) -> bool {
        self.descriptive_stats.is_none()
            && self.group_stats.is_none()
            && self.normality_test.is_none()
            && self.mean_test.is_none()
            && self.capability_indices.is_none()
            && self.control_chart.is_none()
            && self.process_assessment.is_none()
            && self.histogram.is_empty()
    }

    /// Tallest histogram bin, 0 for an empty histogram
    pub fn peak_histogram_count(&self) -> f64 {
        self.histogram.iter().copied().fold(0.0, f64::max)
    }
}
