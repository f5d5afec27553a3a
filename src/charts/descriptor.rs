//! Renderer-agnostic chart descriptors
//!
//! A descriptor is plain data: axes, series, reference lines and shaded
//! regions. Any declarative charting layer (or the terminal plotter in
//! `cli::viz`) can consume it.

use std::time::Duration;

use serde::Serialize;

use crate::control::PointStatus;
use crate::curve::CurvePoint;

/// Which chart a descriptor draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Capability,
    Xbar,
    Range,
    Histogram,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Capability,
        ChartKind::Xbar,
        ChartKind::Range,
        ChartKind::Histogram,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Capability => "Process Capability",
            ChartKind::Xbar => "X-bar Chart",
            ChartKind::Range => "R Chart",
            ChartKind::Histogram => "Histogram",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Capability => write!(f, "capability"),
            ChartKind::Xbar => write!(f, "xbar"),
            ChartKind::Range => write!(f, "range"),
            ChartKind::Histogram => write!(f, "histogram"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    /// Ordered labels (sample groups, histogram bins)
    Category,
    /// Continuous numeric scale
    Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub kind: AxisKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Category labels, in data order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Axis {
    pub fn category(categories: Vec<String>) -> Self {
        Self {
            kind: AxisKind::Category,
            name: None,
            categories,
            min: None,
            max: None,
        }
    }

    pub fn value(name: impl Into<String>) -> Self {
        Self {
            kind: AxisKind::Value,
            name: Some(name.into()),
            categories: Vec::new(),
            min: None,
            max: None,
        }
    }

    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Bar,
}

/// A value on a category axis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPoint {
    pub label: String,

    pub value: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PointStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "points", rename_all = "lowercase")]
pub enum SeriesData {
    /// (x, y) pairs on a value axis
    Xy(Vec<CurvePoint>),
    /// One value per category, in axis order
    Category(Vec<CategoryPoint>),
}

impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Xy(points) => points.len(),
            SeriesData::Category(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Orientation of a reference line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineAxis {
    /// Vertical line at an x value
    X,
    /// Horizontal line at a y value
    Y,
}

/// Reference line across the plot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkLine {
    pub name: String,

    pub label: String,

    pub axis: LineAxis,

    pub value: f64,

    pub color: &'static str,

    pub dashed: bool,
}

/// Shaded band between two x values
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkArea {
    pub from: f64,

    pub to: f64,

    pub color: &'static str,
}

/// Entrance delay for the i-th item of a series: `base + step · i`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaggeredDelay {
    pub base_ms: u64,
    pub step_ms: u64,
}

impl StaggeredDelay {
    pub const fn new(base_ms: u64, step_ms: u64) -> Self {
        Self { base_ms, step_ms }
    }

    pub fn delay_for(&self, index: usize) -> Duration {
        Duration::from_millis(
            self.base_ms
                .saturating_add(self.step_ms.saturating_mul(index as u64)),
        )
    }

    /// Delays for `count` items, in order
    pub fn offsets(&self, count: usize) -> Vec<Duration> {
        (0..count).map(|i| self.delay_for(i)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub name: String,

    pub kind: SeriesKind,

    /// Default colour; category points may override it
    pub color: &'static str,

    pub smooth: bool,

    pub data: SeriesData,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mark_lines: Vec<MarkLine>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mark_areas: Vec<MarkArea>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagger: Option<StaggeredDelay>,
}

impl Series {
    pub fn new(name: impl Into<String>, kind: SeriesKind, color: &'static str, data: SeriesData) -> Self {
        Self {
            name: name.into(),
            kind,
            color,
            smooth: false,
            data,
            mark_lines: Vec::new(),
            mark_areas: Vec::new(),
            stagger: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDescriptor {
    pub kind: ChartKind,

    pub title: String,

    pub x_axis: Axis,

    pub y_axis: Axis,

    pub series: Vec<Series>,
}

impl ChartDescriptor {
    /// All reference lines across every series
    pub fn mark_lines(&self) -> impl Iterator<Item = &MarkLine> {
        self.series.iter().flat_map(|s| s.mark_lines.iter())
    }

    /// Category points of the first series, if it is categorical
    pub fn category_points(&self) -> &[CategoryPoint] {
        match self.series.first().map(|s| &s.data) {
            Some(SeriesData::Category(points)) => points,
            _ => &[],
        }
    }
}

/// Readiness of one chart component
///
/// Leaves `Loading` exactly once; only a new snapshot produces a new state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ChartState<T> {
    Loading,
    Error { message: String },
    NoData,
    Ready(T),
}

impl<T> ChartState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, ChartState::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ChartState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Short name of the state for display
    pub fn label(&self) -> &'static str {
        match self {
            ChartState::Loading => "loading",
            ChartState::Error { .. } => "error",
            ChartState::NoData => "no data",
            ChartState::Ready(_) => "ready",
        }
    }
}

/// States of every chart derived from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub capability: ChartState<ChartDescriptor>,
    pub xbar: ChartState<ChartDescriptor>,
    pub range: ChartState<ChartDescriptor>,
    pub histogram: ChartState<ChartDescriptor>,
}

impl ChartSet {
    fn uniform(state: ChartState<ChartDescriptor>) -> Self {
        Self {
            capability: state.clone(),
            xbar: state.clone(),
            range: state.clone(),
            histogram: state,
        }
    }

    pub fn loading() -> Self {
        Self::uniform(ChartState::Loading)
    }

    pub fn no_data() -> Self {
        Self::uniform(ChartState::NoData)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::uniform(ChartState::Error {
            message: message.into(),
        })
    }

    pub fn get(&self, kind: ChartKind) -> &ChartState<ChartDescriptor> {
        match kind {
            ChartKind::Capability => &self.capability,
            ChartKind::Xbar => &self.xbar,
            ChartKind::Range => &self.range,
            ChartKind::Histogram => &self.histogram,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChartKind, &ChartState<ChartDescriptor>)> {
        ChartKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}
