//! Canonical SPC model - reconciled, shape-independent analysis types

pub mod analysis;
pub mod capability;
pub mod control_chart;
pub mod stats;

pub use analysis::{AnalysisResult, MeanTest, NormalityTest, ProcessAssessment};
pub use capability::{CapabilityIndices, PpmEstimate, SigmaSummary};
pub use control_chart::{ControlChartData, ControlLimits, ControlSeries};
pub use stats::{DescriptiveStats, GroupStats};
