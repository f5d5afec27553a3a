//! Per-point control limit evaluation
//!
//! Each series is judged on its own limits. The process-level verdict is
//! never derived here; [`ViolationSummary`] is only a display hint next to
//! the engine's `isControlled`.

use serde::Serialize;

use crate::entities::{ControlChartData, ControlSeries};

/// Classification of one charted point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PointStatus {
    InControl,
    OutOfControl,
}

impl PointStatus {
    pub fn is_violation(&self) -> bool {
        matches!(self, PointStatus::OutOfControl)
    }
}

impl std::fmt::Display for PointStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointStatus::InControl => write!(f, "in control"),
            PointStatus::OutOfControl => write!(f, "out of control"),
        }
    }
}

/// Classify a value against optional limits
///
/// An absent upper limit acts as +∞ and an absent lower limit as −∞, so a
/// missing limit never flags a point. Touching a limit is in control.
pub fn classify_point(value: f64, ucl: Option<f64>, lcl: Option<f64>) -> PointStatus {
    let ucl = ucl.unwrap_or(f64::INFINITY);
    let lcl = lcl.unwrap_or(f64::NEG_INFINITY);
    if value > ucl || value < lcl {
        PointStatus::OutOfControl
    } else {
        PointStatus::InControl
    }
}

/// Classify every point of a series against its own limits
pub fn classify_series(series: &ControlSeries) -> Vec<PointStatus> {
    let ucl = Some(series.limits.ucl);
    let lcl = Some(series.limits.lcl);
    series
        .values
        .iter()
        .map(|&value| classify_point(value, ucl, lcl))
        .collect()
}

/// Local violation counts for one control chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationSummary {
    pub mean_violations: usize,
    pub range_violations: usize,
}

impl ViolationSummary {
    pub fn from_chart(chart: &ControlChartData) -> Self {
        let count = |series: &ControlSeries| {
            classify_series(series)
                .iter()
                .filter(|s| s.is_violation())
                .count()
        };
        Self {
            mean_violations: count(&chart.means),
            range_violations: count(&chart.ranges),
        }
    }

    pub fn total(&self) -> usize {
        self.mean_violations + self.range_violations
    }

    /// Whether the local counts contradict the engine's verdict
    pub fn disagrees_with(&self, is_controlled: bool) -> bool {
        (self.total() == 0) != is_controlled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ControlLimits;

    #[test]
    fn test_classify_point() {
        assert_eq!(classify_point(104.0, Some(103.0), Some(97.0)), PointStatus::OutOfControl);
        assert_eq!(classify_point(100.0, Some(103.0), Some(97.0)), PointStatus::InControl);
        assert_eq!(classify_point(96.0, Some(103.0), Some(97.0)), PointStatus::OutOfControl);
    }

    #[test]
    fn test_absent_limits_never_violate() {
        assert_eq!(classify_point(104.0, None, Some(97.0)), PointStatus::InControl);
        assert_eq!(classify_point(-1e9, Some(103.0), None), PointStatus::InControl);
        assert_eq!(classify_point(1e9, None, None), PointStatus::InControl);
    }

    #[test]
    fn test_limit_itself_is_in_control() {
        assert_eq!(classify_point(103.0, Some(103.0), Some(97.0)), PointStatus::InControl);
        assert_eq!(classify_point(97.0, Some(103.0), Some(97.0)), PointStatus::InControl);
    }

    #[test]
    fn test_classify_series() {
        let series = ControlSeries::new(
            vec![98.0, 105.0, 99.0],
            ControlLimits {
                ucl: 103.0,
                cl: 100.0,
                lcl: 96.0,
            },
        );
        assert_eq!(
            classify_series(&series),
            vec![
                PointStatus::InControl,
                PointStatus::OutOfControl,
                PointStatus::InControl
            ]
        );
    }

    #[test]
    fn test_series_are_independent() {
        let chart = ControlChartData {
            means: ControlSeries::new(
                vec![98.0, 105.0],
                ControlLimits { ucl: 103.0, cl: 100.0, lcl: 96.0 },
            ),
            ranges: ControlSeries::new(
                vec![4.0, 5.0],
                ControlLimits { ucl: 11.0, cl: 5.0, lcl: 0.0 },
            ),
            is_controlled: true,
        };
        let summary = ViolationSummary::from_chart(&chart);
        assert_eq!(summary.mean_violations, 1);
        assert_eq!(summary.range_violations, 0);
        assert!(summary.disagrees_with(chart.is_controlled));
        assert!(!summary.disagrees_with(false));
    }
}
