//! Chart descriptors and their assembly from a snapshot

pub mod assemble;
pub mod descriptor;
pub mod palette;

pub use assemble::{
    assemble, capability_chart, group_label, histogram_chart, range_chart, xbar_chart,
};
pub use descriptor::{
    Axis, AxisKind, CategoryPoint, ChartDescriptor, ChartKind, ChartSet, ChartState, LineAxis,
    MarkArea, MarkLine, Series, SeriesData, SeriesKind, StaggeredDelay,
};
