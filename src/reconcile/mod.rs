//! Payload reconciliation - raw analysis JSON into the canonical SPC model
//!
//! Every reconciler here is total. Missing fields, wrong types and unknown
//! layouts are replaced by safe defaults (0, `false`, empty) instead of being
//! reported as errors. The only fallible step is [`reconcile_snapshot`],
//! which surfaces an upstream failure envelope.

pub mod envelope;
pub(crate) mod fields;
pub mod shape;

use serde_json::Value;

use crate::entities::{
    AnalysisResult, CapabilityIndices, DescriptiveStats, MeanTest, NormalityTest, PpmEstimate,
    ProcessAssessment, SigmaSummary,
};
use fields::{count, first_number, number_or_zero, optional_number, section, text, truthy};

pub use envelope::{unwrap_payload, UpstreamFailure};
pub use shape::{reconcile_control_chart, ChartShape};

/// Reconcile descriptive statistics
///
/// `minimum`/`min`, `maximum`/`max` and `standardDeviation`/`stdDev` are
/// read as aliases: whichever spelling holds a number wins, the long name
/// first. `sampleSize` stands in for a missing `count`.
pub fn reconcile_descriptive_stats(raw: &Value) -> DescriptiveStats {
    let Some(obj) = raw.as_object() else {
        return DescriptiveStats::default();
    };
    DescriptiveStats {
        count: count(obj, &["count", "sampleSize"]),
        mean: number_or_zero(obj, "mean"),
        median: number_or_zero(obj, "median"),
        variance: number_or_zero(obj, "variance"),
        std_dev: first_number(obj, &["standardDeviation", "stdDev"]),
        range: number_or_zero(obj, "range"),
        minimum: first_number(obj, &["minimum", "min"]),
        maximum: first_number(obj, &["maximum", "max"]),
        q1: number_or_zero(obj, "q1"),
        q3: number_or_zero(obj, "q3"),
        skewness: optional_number(obj, "skewness"),
        kurtosis: optional_number(obj, "kurtosis"),
    }
}

/// Reconcile capability indices
pub fn reconcile_capability(raw: &Value) -> CapabilityIndices {
    let Some(obj) = raw.as_object() else {
        return CapabilityIndices::default();
    };
    CapabilityIndices {
        lsl: number_or_zero(obj, "lsl"),
        usl: number_or_zero(obj, "usl"),
        cp: number_or_zero(obj, "cp"),
        cpk: number_or_zero(obj, "cpk"),
        cpl: number_or_zero(obj, "cpl"),
        cpu: number_or_zero(obj, "cpu"),
        pp: number_or_zero(obj, "pp"),
        ppk: number_or_zero(obj, "ppk"),
        k: number_or_zero(obj, "k"),
        cpm: optional_number(obj, "cpm"),
        within: section(obj, "within").map(sigma_summary),
        overall: section(obj, "overall").map(sigma_summary),
        ppm: section(obj, "ppm").and_then(Value::as_object).map(|ppm| PpmEstimate {
            expected: number_or_zero(ppm, "expected"),
            observed: number_or_zero(ppm, "observed"),
        }),
    }
}

fn sigma_summary(raw: &Value) -> SigmaSummary {
    let Some(obj) = raw.as_object() else {
        return SigmaSummary::default();
    };
    SigmaSummary {
        sigma: number_or_zero(obj, "sigma"),
        lower_z: number_or_zero(obj, "lowerZ"),
        upper_z: number_or_zero(obj, "upperZ"),
    }
}

/// Reconcile a normality test result
pub fn reconcile_normality(raw: &Value) -> NormalityTest {
    let Some(obj) = raw.as_object() else {
        return NormalityTest::default();
    };
    NormalityTest {
        method: text(obj, &["testMethod", "method"]),
        statistic: optional_number(obj, "statistic"),
        p_value: number_or_zero(obj, "pValue"),
        is_normal: truthy(obj, "isNormal"),
        conclusion: text(obj, &["conclusion"]),
    }
}

/// Reconcile a mean test result
pub fn reconcile_mean_test(raw: &Value) -> MeanTest {
    let Some(obj) = raw.as_object() else {
        return MeanTest::default();
    };
    MeanTest {
        sample_mean: number_or_zero(obj, "sampleMean"),
        expected_mean: number_or_zero(obj, "expectedMean"),
        alpha: number_or_zero(obj, "alpha"),
        t_statistic: optional_number(obj, "tStatistic"),
        p_value: optional_number(obj, "pValue"),
        test_result: truthy(obj, "testResult"),
        conclusion: text(obj, &["conclusion"]),
    }
}

/// Reconcile the engine's narrative assessment
pub fn reconcile_assessment(raw: &Value) -> ProcessAssessment {
    let Some(obj) = raw.as_object() else {
        return ProcessAssessment::default();
    };
    ProcessAssessment {
        stability_status: text(obj, &["stabilityStatus"]),
        capability_level: text(obj, &["capabilityLevel"]),
        recommendations: text(obj, &["recommendations"]),
        performance_index: optional_number(obj, "performanceIndex"),
    }
}

/// Reconcile histogram bin counts; negative or non-numeric bins become 0
pub fn reconcile_histogram(raw: &Value) -> Vec<f64> {
    raw.as_array()
        .map(|bins| {
            bins.iter()
                .map(|bin| bin.as_f64().filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(0.0))
                .collect()
        })
        .unwrap_or_default()
}

/// Reconcile a full (or partial) analysis payload
///
/// `None` when the payload is not an object. Each section is reconciled
/// independently and is `None` when missing, null or not an object.
pub fn reconcile_analysis(raw: &Value) -> Option<AnalysisResult> {
    let obj = raw.as_object()?;
    Some(AnalysisResult {
        descriptive_stats: section(obj, "descriptiveStats").map(reconcile_descriptive_stats),
        group_stats: section(obj, "groupStats").map(reconcile_descriptive_stats),
        normality_test: section(obj, "normalityTest").map(reconcile_normality),
        mean_test: section(obj, "meanTest").map(reconcile_mean_test),
        capability_indices: section(obj, "capabilityIndices").map(reconcile_capability),
        control_chart: section(obj, "controlChart").map(reconcile_control_chart),
        process_assessment: section(obj, "processAssessment").map(reconcile_assessment),
        histogram: obj.get("histogram").map(reconcile_histogram).unwrap_or_default(),
    })
}

/// Reconcile a raw service response, envelope included
///
/// `Ok(None)` is the "no data" state: no payload, a non-object payload, or a
/// payload without a single usable section.
pub fn reconcile_snapshot(raw: &Value) -> Result<Option<AnalysisResult>, UpstreamFailure> {
    let payload = unwrap_payload(raw)?;
    Ok(reconcile_analysis(&payload).filter(|result| !result.is_empty()))
}
