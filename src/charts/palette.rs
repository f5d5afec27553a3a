//! Colour tokens shared by chart descriptors

pub const CURVE: &str = "#1890ff";

/// Specification limits and out-of-spec markers
pub const SPEC_LIMIT: &str = "#F56565";
pub const MEAN: &str = "#38A169";
pub const SIGMA: &str = "#718096";
pub const OUT_OF_SPEC_AREA: &str = "rgba(255, 0, 0, 0.1)";

pub const POINT_IN_CONTROL: &str = "#3182CE";
pub const POINT_OUT_OF_CONTROL: &str = "#F56565";
pub const CONTROL_LIMIT: &str = "#E53E3E";
pub const CENTER_LINE: &str = "#38A169";

pub const HISTOGRAM_BAR: &str = "#188df0";
pub const HISTOGRAM_OVERLAY: &str = "#FF4500";
