//! Chart assembly from a reconciled snapshot
//!
//! Pure functions of one [`AnalysisResult`]. A chart whose inputs are absent
//! or empty comes out as [`ChartState::NoData`].

use crate::charts::descriptor::{
    Axis, CategoryPoint, ChartDescriptor, ChartKind, ChartSet, ChartState, LineAxis, MarkArea,
    MarkLine, Series, SeriesData, SeriesKind, StaggeredDelay,
};
use crate::charts::palette;
use crate::control::{classify_series, PointStatus};
use crate::curve::{
    histogram_bins, sample_normal_curve, sample_overlay_curve, CurveDomain, CurvePoint,
};
use crate::entities::{AnalysisResult, ControlSeries};

pub const XBAR_STAGGER: StaggeredDelay = StaggeredDelay::new(0, 50);
pub const RANGE_STAGGER: StaggeredDelay = StaggeredDelay::new(1000, 50);
pub const HISTOGRAM_STAGGER: StaggeredDelay = StaggeredDelay::new(0, 100);

/// 1-based label of the sample group at `index`
pub fn group_label(index: usize) -> String {
    format!("Group {}", index + 1)
}

fn mark_line(
    name: &str,
    label: String,
    axis: LineAxis,
    value: f64,
    color: &'static str,
    dashed: bool,
) -> MarkLine {
    MarkLine {
        name: name.to_string(),
        label,
        axis,
        value,
        color,
        dashed,
    }
}

/// Distribution curve with spec limits, mean, ±3σ and out-of-spec regions
pub fn capability_chart(result: &AnalysisResult) -> ChartState<ChartDescriptor> {
    let (Some(stats), Some(indices)) = (&result.descriptive_stats, &result.capability_indices)
    else {
        return ChartState::NoData;
    };
    let (mean, sigma) = (stats.mean, stats.std_dev);
    let (lsl, usl) = (indices.lsl, indices.usl);

    let points = sample_normal_curve(mean, sigma, lsl, usl);
    if points.is_empty() {
        return ChartState::NoData;
    }
    let domain = CurveDomain::for_capability(mean, sigma, lsl, usl);

    let mut series = Series::new(
        "Process distribution",
        SeriesKind::Line,
        palette::CURVE,
        SeriesData::Xy(points),
    );
    series.smooth = true;
    series.mark_lines = vec![
        mark_line("LSL", format!("LSL: {}", lsl), LineAxis::X, lsl, palette::SPEC_LIMIT, false),
        mark_line("Mean", format!("Mean: {:.2}", mean), LineAxis::X, mean, palette::MEAN, false),
        mark_line("USL", format!("USL: {}", usl), LineAxis::X, usl, palette::SPEC_LIMIT, false),
        mark_line(
            "-3σ",
            "-3σ".to_string(),
            LineAxis::X,
            mean - 3.0 * sigma,
            palette::SIGMA,
            true,
        ),
        mark_line(
            "+3σ",
            "+3σ".to_string(),
            LineAxis::X,
            mean + 3.0 * sigma,
            palette::SIGMA,
            true,
        ),
    ];
    series.mark_areas = vec![
        MarkArea {
            from: domain.lower,
            to: lsl,
            color: palette::OUT_OF_SPEC_AREA,
        },
        MarkArea {
            from: usl,
            to: domain.upper,
            color: palette::OUT_OF_SPEC_AREA,
        },
    ];

    ChartState::Ready(ChartDescriptor {
        kind: ChartKind::Capability,
        title: ChartKind::Capability.title().to_string(),
        x_axis: Axis::value("Measurement").with_bounds(domain.lower, domain.upper),
        y_axis: Axis::value("Density"),
        series: vec![series],
    })
}

fn control_chart(
    kind: ChartKind,
    series_name: &str,
    source: &ControlSeries,
    stagger: StaggeredDelay,
) -> ChartState<ChartDescriptor> {
    if source.is_empty() {
        return ChartState::NoData;
    }

    let statuses = classify_series(source);
    let points: Vec<CategoryPoint> = source
        .values
        .iter()
        .zip(statuses)
        .enumerate()
        .map(|(i, (&value, status))| CategoryPoint {
            label: group_label(i),
            value,
            color: Some(match status {
                PointStatus::InControl => palette::POINT_IN_CONTROL,
                PointStatus::OutOfControl => palette::POINT_OUT_OF_CONTROL,
            }),
            status: Some(status),
        })
        .collect();
    let categories = points.iter().map(|p| p.label.clone()).collect();

    let limits = source.limits;
    let mut series = Series::new(
        series_name,
        SeriesKind::Line,
        palette::POINT_IN_CONTROL,
        SeriesData::Category(points),
    );
    series.mark_lines = vec![
        mark_line(
            "UCL",
            format!("UCL: {:.3}", limits.ucl),
            LineAxis::Y,
            limits.ucl,
            palette::CONTROL_LIMIT,
            true,
        ),
        mark_line(
            "CL",
            format!("CL: {:.3}", limits.cl),
            LineAxis::Y,
            limits.cl,
            palette::CENTER_LINE,
            false,
        ),
        mark_line(
            "LCL",
            format!("LCL: {:.3}", limits.lcl),
            LineAxis::Y,
            limits.lcl,
            palette::CONTROL_LIMIT,
            true,
        ),
    ];
    series.stagger = Some(stagger);

    ChartState::Ready(ChartDescriptor {
        kind,
        title: kind.title().to_string(),
        x_axis: Axis::category(categories),
        y_axis: Axis::value(series_name),
        series: vec![series],
    })
}

/// X-bar chart of subgroup means
pub fn xbar_chart(result: &AnalysisResult) -> ChartState<ChartDescriptor> {
    match &result.control_chart {
        Some(chart) => control_chart(ChartKind::Xbar, "Mean", &chart.means, XBAR_STAGGER),
        None => ChartState::NoData,
    }
}

/// R chart of subgroup ranges
pub fn range_chart(result: &AnalysisResult) -> ChartState<ChartDescriptor> {
    match &result.control_chart {
        Some(chart) => control_chart(ChartKind::Range, "Range", &chart.ranges, RANGE_STAGGER),
        None => ChartState::NoData,
    }
}

/// Frequency bars with the scaled normal overlay
pub fn histogram_chart(result: &AnalysisResult) -> ChartState<ChartDescriptor> {
    if result.histogram.is_empty() {
        return ChartState::NoData;
    }
    let stats = result.descriptive_stats.as_ref();
    let bins = histogram_bins(&result.histogram, stats);
    let categories = bins.iter().map(|b| b.label.clone()).collect();

    let bars: Vec<CategoryPoint> = bins
        .into_iter()
        .map(|bin| CategoryPoint {
            label: bin.label,
            value: bin.count,
            color: None,
            status: None,
        })
        .collect();
    let mut bar_series = Series::new(
        "Frequency",
        SeriesKind::Bar,
        palette::HISTOGRAM_BAR,
        SeriesData::Category(bars),
    );
    bar_series.stagger = Some(HISTOGRAM_STAGGER);

    let mut series = vec![bar_series];
    let overlay: Vec<CurvePoint> = stats
        .map(|s| {
            sample_overlay_curve(
                s.mean,
                s.std_dev,
                s.minimum,
                s.maximum,
                result.peak_histogram_count(),
            )
        })
        .unwrap_or_default();
    if !overlay.is_empty() {
        let mut curve = Series::new(
            "Normal distribution",
            SeriesKind::Line,
            palette::HISTOGRAM_OVERLAY,
            SeriesData::Xy(overlay),
        );
        curve.smooth = true;
        series.push(curve);
    }

    ChartState::Ready(ChartDescriptor {
        kind: ChartKind::Histogram,
        title: ChartKind::Histogram.title().to_string(),
        x_axis: Axis::category(categories),
        y_axis: Axis::value("Frequency"),
        series,
    })
}

/// Every chart for one snapshot; all `NoData` without a snapshot
pub fn assemble(result: Option<&AnalysisResult>) -> ChartSet {
    let Some(result) = result else {
        return ChartSet::no_data();
    };
    ChartSet {
        capability: capability_chart(result),
        xbar: xbar_chart(result),
        range: range_chart(result),
        histogram: histogram_chart(result),
    }
}
