//! X-bar/R control chart data in canonical form
//!
//! Index `i` of either series belongs to sample group `i + 1`. The flat wire
//! shape (`means`, `clMean`, ...) is what [`ControlChartData`] serializes to;
//! [`ControlChartData::to_nested_value`] produces the `xbarChart`/`rChart`
//! shape for consumers that expect it.

use serde::{Serialize, Serializer};
use serde_json::{json, Value};

/// Center line and control limits of one chart
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlLimits {
    /// Upper control limit
    pub ucl: f64,

    /// Center line
    pub cl: f64,

    /// Lower control limit
    pub lcl: f64,
}

/// One charted statistic (subgroup means or subgroup ranges) with its limits
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlSeries {
    /// Values in sample group order
    pub values: Vec<f64>,

    /// Limits the values are judged against
    pub limits: ControlLimits,
}

impl ControlSeries {
    pub fn new(values: Vec<f64>, limits: ControlLimits) -> Self {
        Self { values, limits }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn to_nested_value(&self) -> Value {
        json!({
            "centerLine": self.limits.cl,
            "upperControlLimit": self.limits.ucl,
            "lowerControlLimit": self.limits.lcl,
            "values": self.values,
        })
    }
}

/// Control chart pair plus the engine's verdict on process stability
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlChartData {
    /// Subgroup means (X-bar chart)
    pub means: ControlSeries,

    /// Subgroup ranges (R chart)
    pub ranges: ControlSeries,

    /// Authoritative "process in statistical control" verdict from upstream
    pub is_controlled: bool,
}

impl ControlChartData {
    /// Number of sample groups charted
    pub fn group_count(&self) -> usize {
        self.means.len().max(self.ranges.len())
    }

    /// Nested wire shape (`xbarChart` / `rChart`)
    pub fn to_nested_value(&self) -> Value {
        json!({
            "isControlled": self.is_controlled,
            "xbarChart": self.means.to_nested_value(),
            "rChart": self.ranges.to_nested_value(),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FlatWire<'a> {
    means: &'a [f64],
    ranges: &'a [f64],
    cl_mean: f64,
    ucl_mean: f64,
    lcl_mean: f64,
    cl_range: f64,
    ucl_range: f64,
    lcl_range: f64,
    is_controlled: bool,
}

impl Serialize for ControlChartData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FlatWire {
            means: &self.means.values,
            ranges: &self.ranges.values,
            cl_mean: self.means.limits.cl,
            ucl_mean: self.means.limits.ucl,
            lcl_mean: self.means.limits.lcl,
            cl_range: self.ranges.limits.cl,
            ucl_range: self.ranges.limits.ucl,
            lcl_range: self.ranges.limits.lcl,
            is_controlled: self.is_controlled,
        }
        .serialize(serializer)
    }
}
