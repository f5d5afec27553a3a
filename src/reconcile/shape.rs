//! Control chart wire shapes
//!
//! Upstream has sent control chart data in two layouts over time. The shape
//! is resolved once here and collapsed straight into [`ControlChartData`];
//! nothing past the reconciler sees which layout arrived.
//!
//! Detection order:
//! 1. `means` is an array → [`ChartShape::Flat`]
//! 2. `xbarChart` and `rChart` both present → [`ChartShape::Nested`]
//! 3. anything else → [`ChartShape::Unknown`]

use serde_json::Value;
use tracing::{debug, warn};

use crate::entities::{ControlChartData, ControlLimits, ControlSeries};
use crate::reconcile::fields::{number_array, number_or_zero, truthy, Object};

/// Recognised layouts of a control chart payload
#[derive(Debug, Clone, Copy)]
pub enum ChartShape<'a> {
    /// `means`, `ranges`, `clMean`, `uclMean`, ... on one object
    Flat(&'a Object),

    /// `xbarChart` / `rChart` sub-objects with `centerLine`,
    /// `upperControlLimit`, `lowerControlLimit`, `values`
    Nested {
        root: &'a Object,
        xbar: &'a Value,
        range: &'a Value,
    },

    /// Neither layout; `None` when the payload is not an object at all
    Unknown(Option<&'a Object>),
}

impl<'a> ChartShape<'a> {
    /// Resolve the layout of a raw payload
    pub fn detect(raw: &'a Value) -> Self {
        let Some(obj) = raw.as_object() else {
            return ChartShape::Unknown(None);
        };

        if obj.get("means").is_some_and(Value::is_array) {
            return ChartShape::Flat(obj);
        }

        if truthy(obj, "xbarChart") && truthy(obj, "rChart") {
            if let (Some(xbar), Some(range)) = (obj.get("xbarChart"), obj.get("rChart")) {
                return ChartShape::Nested {
                    root: obj,
                    xbar,
                    range,
                };
            }
        }

        ChartShape::Unknown(Some(obj))
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            ChartShape::Flat(_) => "flat",
            ChartShape::Nested { .. } => "nested",
            ChartShape::Unknown(_) => "unknown",
        }
    }

    /// Collapse into the canonical form
    pub fn into_canonical(self) -> ControlChartData {
        match self {
            ChartShape::Flat(obj) => ControlChartData {
                means: ControlSeries::new(
                    number_array(obj, "means").unwrap_or_default(),
                    ControlLimits {
                        ucl: number_or_zero(obj, "uclMean"),
                        cl: number_or_zero(obj, "clMean"),
                        lcl: number_or_zero(obj, "lclMean"),
                    },
                ),
                ranges: ControlSeries::new(
                    number_array(obj, "ranges").unwrap_or_default(),
                    ControlLimits {
                        ucl: number_or_zero(obj, "uclRange"),
                        cl: number_or_zero(obj, "clRange"),
                        lcl: number_or_zero(obj, "lclRange"),
                    },
                ),
                is_controlled: truthy(obj, "isControlled"),
            },
            ChartShape::Nested { root, xbar, range } => ControlChartData {
                means: nested_series(xbar),
                ranges: nested_series(range),
                is_controlled: truthy(root, "isControlled"),
            },
            ChartShape::Unknown(obj) => {
                // Keep whatever series survived, but no limit or verdict is trusted
                let series = |key: &str| {
                    obj.and_then(|o| number_array(o, key))
                        .map(|values| ControlSeries::new(values, ControlLimits::default()))
                        .unwrap_or_default()
                };
                ControlChartData {
                    means: series("means"),
                    ranges: series("ranges"),
                    is_controlled: false,
                }
            }
        }
    }
}

fn nested_series(chart: &Value) -> ControlSeries {
    let Some(obj) = chart.as_object() else {
        return ControlSeries::default();
    };
    ControlSeries::new(
        number_array(obj, "values").unwrap_or_default(),
        ControlLimits {
            ucl: number_or_zero(obj, "upperControlLimit"),
            cl: number_or_zero(obj, "centerLine"),
            lcl: number_or_zero(obj, "lowerControlLimit"),
        },
    )
}

/// Reconcile a control chart payload of any layout
///
/// Total: a null, non-object or unrecognised payload yields empty series,
/// zero limits and `is_controlled == false`.
pub fn reconcile_control_chart(raw: &Value) -> ControlChartData {
    let shape = ChartShape::detect(raw);
    match shape {
        ChartShape::Unknown(Some(_)) => {
            warn!("control chart payload matches no known layout, limits zeroed")
        }
        _ => debug!(shape = shape.name(), "control chart layout detected"),
    }
    shape.into_canonical()
}
