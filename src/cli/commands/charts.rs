//! `spc charts` command - Chart descriptors for a snapshot
//!
//! JSON (default) and YAML emit the descriptors with their readiness state
//! so any charting front end can draw them. Text renders braille previews.

use std::path::PathBuf;

use clap::ValueEnum;
use console::style;
use miette::Result;
use serde::Serialize;

use crate::charts::{ChartDescriptor, ChartKind, ChartSet, ChartState};
use crate::cli::output::{effective_format, print_json, print_yaml, write_delimited};
use crate::cli::viz::{render_descriptor, PLOT_HEIGHT, PLOT_WIDTH};
use crate::cli::{OutputFormat, RunContext};

use super::{load_snapshot, NO_DATA};

#[derive(clap::Args, Debug)]
pub struct ChartsArgs {
    /// Snapshot JSON file (`-` reads stdin)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Which chart to emit
    #[arg(long, short = 'c', value_enum, default_value = "all")]
    pub chart: ChartSelection,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ChartSelection {
    Capability,
    Xbar,
    Range,
    Histogram,
    All,
}

impl ChartSelection {
    fn kinds(&self) -> Vec<ChartKind> {
        match self {
            ChartSelection::Capability => vec![ChartKind::Capability],
            ChartSelection::Xbar => vec![ChartKind::Xbar],
            ChartSelection::Range => vec![ChartKind::Range],
            ChartSelection::Histogram => vec![ChartKind::Histogram],
            ChartSelection::All => ChartKind::ALL.to_vec(),
        }
    }
}

/// One selected chart with its state
#[derive(Debug, Serialize)]
struct ChartEntry<'a> {
    chart: ChartKind,

    #[serde(flatten)]
    state: &'a ChartState<ChartDescriptor>,
}

/// Run the charts command
pub fn run(args: ChartsArgs, ctx: &RunContext) -> Result<()> {
    let Some(snapshot) = load_snapshot(&args.snapshot)? else {
        println!("{}", NO_DATA);
        return Ok(());
    };
    let entries = select(&snapshot.charts, args.chart);

    match effective_format(ctx.format, OutputFormat::Json) {
        OutputFormat::Json | OutputFormat::Auto => print_json(&entries),
        OutputFormat::Yaml => print_yaml(&entries),
        format @ (OutputFormat::Tsv | OutputFormat::Csv) => write_delimited(
            format,
            &["chart", "state", "series", "points"],
            entries.iter().map(summary_row),
        ),
        OutputFormat::Text => {
            print_text(&entries);
            Ok(())
        }
    }
}

fn select(charts: &ChartSet, selection: ChartSelection) -> Vec<ChartEntry<'_>> {
    selection
        .kinds()
        .into_iter()
        .map(|kind| ChartEntry {
            chart: kind,
            state: charts.get(kind),
        })
        .collect()
}

fn summary_row(entry: &ChartEntry<'_>) -> [String; 4] {
    let (series, points) = match entry.state.ready() {
        Some(chart) => (
            chart.series.len(),
            chart.series.iter().map(|s| s.data.len()).sum::<usize>(),
        ),
        None => (0, 0),
    };
    [
        entry.chart.to_string(),
        entry.state.label().to_string(),
        series.to_string(),
        points.to_string(),
    ]
}

fn print_text(entries: &[ChartEntry<'_>]) {
    let blocks: Vec<String> = entries
        .iter()
        .map(|entry| match entry.state {
            ChartState::Ready(chart) => render_descriptor(chart, PLOT_WIDTH, PLOT_HEIGHT),
            ChartState::Error { message } => format!(
                "{}:\n  {} {}",
                entry.chart.title(),
                style("error:").red().bold(),
                message
            ),
            other => format!("{}:\n  ({})", entry.chart.title(), other.label()),
        })
        .collect();
    println!("{}", blocks.join("\n\n"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_single_chart() {
        let set = ChartSet::no_data();
        let entries = select(&set, ChartSelection::Range);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].chart, ChartKind::Range);
    }

    #[test]
    fn test_entry_serializes_flat() {
        let set = ChartSet::error("reconciliation failed");
        let entries = select(&set, ChartSelection::Xbar);
        let json = serde_json::to_value(&entries).unwrap();
        assert_eq!(json[0]["chart"], "xbar");
        assert_eq!(json[0]["state"], "error");
        assert_eq!(json[0]["message"], "reconciliation failed");
    }

    #[test]
    fn test_summary_row_for_missing_chart() {
        let set = ChartSet::no_data();
        let entries = select(&set, ChartSelection::Capability);
        assert_eq!(summary_row(&entries[0]), ["capability", "no data", "0", "0"].map(String::from));
    }
}
