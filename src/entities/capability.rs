//! Process capability indices reported by the analysis engine

use serde::Serialize;

/// Sigma estimate with the distance to each specification limit in sigma units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigmaSummary {
    /// Standard deviation estimate
    pub sigma: f64,

    /// (mean - LSL) / sigma
    pub lower_z: f64,

    /// (USL - mean) / sigma
    pub upper_z: f64,
}

/// Defect rate in parts per million
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PpmEstimate {
    /// PPM predicted from the fitted distribution
    pub expected: f64,

    /// PPM actually observed outside the limits
    pub observed: f64,
}

/// Capability and performance indices against the specification limits
///
/// The engine is expected to keep `cpk == min(cpl, cpu)` and `cp >= cpk`;
/// nothing here re-derives them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityIndices {
    /// Lower specification limit
    pub lsl: f64,

    /// Upper specification limit
    pub usl: f64,

    /// Potential capability (USL - LSL) / 6σ
    pub cp: f64,

    /// Capability adjusted for centering
    pub cpk: f64,

    /// Lower one-sided capability
    pub cpl: f64,

    /// Upper one-sided capability
    pub cpu: f64,

    /// Potential performance (overall sigma)
    pub pp: f64,

    /// Performance adjusted for centering
    pub ppk: f64,

    /// Centering offset, any sign
    pub k: f64,

    /// Taguchi capability index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpm: Option<f64>,

    /// Within-subgroup sigma summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within: Option<SigmaSummary>,

    /// Overall sigma summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<SigmaSummary>,

    /// Defect rate estimate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ppm: Option<PpmEstimate>,
}

impl CapabilityIndices {
    /// Midpoint of the specification band
    pub fn spec_midpoint(&self) -> f64 {
        (self.lsl + self.usl) / 2.0
    }

    /// Width of the specification band
    pub fn tolerance(&self) -> f64 {
        self.usl - self.lsl
    }

    /// Percentage of potential capability lost to off-center running
    ///
    /// Only reported when Cp and Cpk differ by more than 0.1.
    pub fn centering_loss_percent(&self) -> Option<f64> {
        if self.cp > 0.0 && (self.cp - self.cpk).abs() > 0.1 {
            Some((1.0 - self.cpk / self.cp) * 100.0)
        } else {
            None
        }
    }
}
