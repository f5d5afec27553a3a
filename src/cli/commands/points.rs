//! `spc points` command - Per-group control classification

use std::path::PathBuf;

use miette::Result;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::charts::group_label;
use crate::cli::helpers::styled_status;
use crate::cli::output::{effective_format, print_json, print_yaml, write_delimited};
use crate::cli::{OutputFormat, RunContext};
use crate::control::{classify_series, PointStatus};
use crate::entities::ControlChartData;

use super::{load_snapshot, NO_DATA};

#[derive(clap::Args, Debug)]
pub struct PointsArgs {
    /// Snapshot JSON file (`-` reads stdin)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Only show groups with a point beyond its limits
    #[arg(long)]
    pub violations: bool,
}

/// One sample group with both classifications
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPoint {
    pub group: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_status: Option<PointStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_status: Option<PointStatus>,
}

impl GroupPoint {
    pub fn has_violation(&self) -> bool {
        [self.mean_status, self.range_status]
            .iter()
            .flatten()
            .any(|s| s.is_violation())
    }
}

#[derive(Tabled)]
struct PointRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "X-bar")]
    mean_status: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "R")]
    range_status: String,
}

/// Pair the two series by group index
///
/// A series shorter than the other leaves its cells empty for the extra
/// groups.
pub fn group_points(chart: &ControlChartData) -> Vec<GroupPoint> {
    let mean_status = classify_series(&chart.means);
    let range_status = classify_series(&chart.ranges);
    (0..chart.group_count())
        .map(|i| GroupPoint {
            group: group_label(i),
            mean: chart.means.values.get(i).copied(),
            mean_status: mean_status.get(i).copied(),
            range: chart.ranges.values.get(i).copied(),
            range_status: range_status.get(i).copied(),
        })
        .collect()
}

/// Run the points command
pub fn run(args: PointsArgs, ctx: &RunContext) -> Result<()> {
    let chart = load_snapshot(&args.snapshot)?
        .and_then(|s| s.model)
        .and_then(|m| m.control_chart)
        .filter(|c| c.group_count() > 0);
    let Some(chart) = chart else {
        println!("{}", NO_DATA);
        return Ok(());
    };

    let mut points = group_points(&chart);
    if args.violations {
        points.retain(GroupPoint::has_violation);
    }

    let num = |v: Option<f64>| v.map(|v| ctx.num(v)).unwrap_or_default();
    let status = |s: Option<PointStatus>| s.map(|s| s.to_string()).unwrap_or_default();

    match effective_format(ctx.format, OutputFormat::Tsv) {
        OutputFormat::Json => print_json(&points),
        OutputFormat::Yaml => print_yaml(&points),
        OutputFormat::Text => {
            let rows: Vec<PointRow> = points
                .iter()
                .map(|p| PointRow {
                    group: p.group.clone(),
                    mean: num(p.mean),
                    mean_status: p.mean_status.map(styled_status).unwrap_or_default(),
                    range: num(p.range),
                    range_status: p.range_status.map(styled_status).unwrap_or_default(),
                })
                .collect();
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{}", table);
            println!(
                "Process verdict: {}",
                if chart.is_controlled {
                    "in control"
                } else {
                    "out of control"
                }
            );
            Ok(())
        }
        format => write_delimited(
            format,
            &["group", "mean", "mean_status", "range", "range_status"],
            points.iter().map(|p| {
                [
                    p.group.clone(),
                    num(p.mean),
                    status(p.mean_status),
                    num(p.range),
                    status(p.range_status),
                ]
            }),
        ),
    }
}
