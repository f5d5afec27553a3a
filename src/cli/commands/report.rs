//! `spc report` command - Human-readable analysis summary
//!
//! Text output walks through statistics, normality, capability, control
//! and the overall conclusion. JSON/YAML emit the canonical model.

use std::path::PathBuf;

use console::style;
use miette::Result;

use crate::capability::{badge, classify, classify_cp, recommend, OverallStatus, ProcessConclusion};
use crate::charts::ChartState;
use crate::cli::helpers::{fmt_opt, heading, styled_level, truncate_str, verdict_mark};
use crate::cli::output::{effective_format, print_json, print_yaml, write_delimited};
use crate::cli::viz::{render_descriptor, render_range_bar, PLOT_HEIGHT, PLOT_WIDTH};
use crate::cli::{OutputFormat, RunContext};
use crate::control::ViolationSummary;
use crate::entities::{AnalysisResult, CapabilityIndices, DescriptiveStats};
use crate::session::Snapshot;

use super::{load_snapshot, NO_DATA};

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Snapshot JSON file (`-` reads stdin)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,
}

/// Run the report command
pub fn run(args: ReportArgs, ctx: &RunContext) -> Result<()> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let Some((snapshot, model)) = snapshot
        .as_ref()
        .and_then(|s| s.model.as_ref().map(|m| (s, m)))
    else {
        println!("{}", NO_DATA);
        return Ok(());
    };

    match effective_format(ctx.format, OutputFormat::Text) {
        OutputFormat::Json => print_json(model),
        OutputFormat::Yaml => print_yaml(model),
        format @ (OutputFormat::Tsv | OutputFormat::Csv) => {
            write_delimited(format, &["metric", "value"], metric_rows(model, ctx))
        }
        OutputFormat::Text | OutputFormat::Auto => {
            print_text(snapshot, model, ctx);
            Ok(())
        }
    }
}

/// Flat `metric, value` rows for TSV/CSV
fn metric_rows(model: &AnalysisResult, ctx: &RunContext) -> Vec<[String; 2]> {
    let mut rows = Vec::new();
    let mut push = |name: &str, value: String| rows.push([name.to_string(), value]);

    if let Some(stats) = &model.descriptive_stats {
        push("count", stats.count.to_string());
        push("mean", ctx.num(stats.mean));
        push("median", ctx.num(stats.median));
        push("std_dev", ctx.num(stats.std_dev));
        push("variance", ctx.num(stats.variance));
        push("range", ctx.num(stats.range));
        push("minimum", ctx.num(stats.minimum));
        push("maximum", ctx.num(stats.maximum));
        push("q1", ctx.num(stats.q1));
        push("q3", ctx.num(stats.q3));
    }
    if let Some(test) = &model.normality_test {
        push("normality_p_value", ctx.num(test.p_value));
        push("is_normal", test.is_normal.to_string());
    }
    if let Some(idx) = &model.capability_indices {
        push("lsl", ctx.num(idx.lsl));
        push("usl", ctx.num(idx.usl));
        push("cp", ctx.num(idx.cp));
        push("cpk", ctx.num(idx.cpk));
        push("pp", ctx.num(idx.pp));
        push("ppk", ctx.num(idx.ppk));
    }
    let (level, _) = badge(model.capability_indices.as_ref().map(|idx| idx.cpk));
    push("capability_level", level);
    if let Some(chart) = &model.control_chart {
        push("groups", chart.group_count().to_string());
        push("is_controlled", chart.is_controlled.to_string());
    }
    rows
}

fn print_text(snapshot: &Snapshot, model: &AnalysisResult, ctx: &RunContext) {
    let mut blocks: Vec<String> = Vec::new();

    if let Some(stats) = &model.descriptive_stats {
        blocks.push(stats_block(stats, ctx));
    }
    if let Some(test) = &model.normality_test {
        let mut lines = vec![heading("Normality")];
        if !test.method.is_empty() {
            lines.push(format!("  Method      {}", test.method));
        }
        lines.push(format!("  p-value     {}", ctx.num(test.p_value)));
        if let Some(statistic) = test.statistic {
            lines.push(format!("  Statistic   {}", ctx.num(statistic)));
        }
        lines.push(format!(
            "  Normal      {} {}",
            verdict_mark(test.is_normal),
            if test.is_normal { "yes" } else { "no" }
        ));
        if !test.conclusion.is_empty() {
            lines.push(format!("  {}", truncate_str(&test.conclusion, 76)));
        }
        blocks.push(lines.join("\n"));
    }
    match &model.capability_indices {
        Some(idx) => {
            blocks.push(capability_block(idx, model.descriptive_stats.as_ref(), ctx));
            if let ChartState::Ready(chart) = &snapshot.charts.capability {
                blocks.push(render_descriptor(chart, PLOT_WIDTH, PLOT_HEIGHT));
            }
        }
        None => {
            let (level, _) = badge(None);
            blocks.push(format!(
                "{}\n  {} (no capability indices)",
                heading("Process capability"),
                style(level).dim()
            ));
        }
    }
    if let Some(chart) = &model.control_chart {
        let hint = ViolationSummary::from_chart(chart);
        let mut lines = vec![heading("Statistical control")];
        lines.push(format!(
            "  Verdict     {} {}",
            verdict_mark(chart.is_controlled),
            if chart.is_controlled {
                "in control"
            } else {
                "out of control"
            }
        ));
        lines.push(format!("  Groups      {}", chart.group_count()));
        lines.push(format!(
            "  Points beyond limits: {} mean, {} range",
            hint.mean_violations, hint.range_violations
        ));
        if hint.disagrees_with(chart.is_controlled) {
            lines.push(format!(
                "  {}",
                style("note: local limit check differs from the engine verdict; the engine verdict applies")
                    .dim()
            ));
        }
        blocks.push(lines.join("\n"));
    }
    if let Some(test) = &model.mean_test {
        let mut lines = vec![heading("Mean test")];
        lines.push(format!(
            "  Sample mean {}  expected {}  alpha {}",
            ctx.num(test.sample_mean),
            ctx.num(test.expected_mean),
            test.alpha
        ));
        lines.push(format!(
            "  t = {}  p = {}",
            fmt_opt(test.t_statistic, ctx.decimals()),
            fmt_opt(test.p_value, ctx.decimals())
        ));
        lines.push(format!(
            "  {} {}",
            verdict_mark(test.test_result),
            if test.conclusion.is_empty() {
                "no conclusion given"
            } else {
                test.conclusion.as_str()
            }
        ));
        blocks.push(lines.join("\n"));
    }
    if let Some(conclusion) = &snapshot.conclusion {
        blocks.push(conclusion_block(conclusion));
    }

    println!("{}", blocks.join("\n\n"));
}

fn stats_block(stats: &DescriptiveStats, ctx: &RunContext) -> String {
    let mut lines = vec![heading("Descriptive statistics")];
    lines.push(format!("  Count       {}", stats.count));
    lines.push(format!(
        "  Mean        {}    Median  {}",
        ctx.num(stats.mean),
        ctx.num(stats.median)
    ));
    lines.push(format!(
        "  Std dev     {}    Variance {}",
        ctx.num(stats.std_dev),
        ctx.num(stats.variance)
    ));
    lines.push(format!(
        "  Min         {}    Max     {}    Range {}",
        ctx.num(stats.minimum),
        ctx.num(stats.maximum),
        ctx.num(stats.range)
    ));
    lines.push(format!(
        "  Q1          {}    Q3      {}    IQR   {}",
        ctx.num(stats.q1),
        ctx.num(stats.q3),
        ctx.num(stats.iqr())
    ));
    if stats.skewness.is_some() || stats.kurtosis.is_some() {
        lines.push(format!(
            "  Skewness    {}    Kurtosis {}",
            fmt_opt(stats.skewness, ctx.decimals()),
            fmt_opt(stats.kurtosis, ctx.decimals())
        ));
    }
    lines.join("\n")
}

fn capability_block(
    idx: &CapabilityIndices,
    stats: Option<&DescriptiveStats>,
    ctx: &RunContext,
) -> String {
    let grade = classify(idx.cpk);
    let cp_rating = classify_cp(idx.cp);

    let mut lines = vec![heading("Process capability")];
    lines.push(format!(
        "  LSL {}   USL {}",
        ctx.num(idx.lsl),
        ctx.num(idx.usl)
    ));
    lines.push(format!("  Cp          {}  ({})", ctx.num(idx.cp), cp_rating));
    lines.push(format!(
        "  Cpk         {}  {}",
        ctx.num(idx.cpk),
        styled_level(grade.level)
    ));
    lines.push(format!(
        "  Cpl {}  Cpu {}  Pp {}  Ppk {}",
        ctx.num(idx.cpl),
        ctx.num(idx.cpu),
        ctx.num(idx.pp),
        ctx.num(idx.ppk)
    ));
    if let Some(cpm) = idx.cpm {
        lines.push(format!("  Cpm         {}", ctx.num(cpm)));
    }
    if let Some(ppm) = &idx.ppm {
        lines.push(format!(
            "  PPM         expected {:.0}  observed {:.0}",
            ppm.expected, ppm.observed
        ));
    }
    lines.push(format!("  {}", grade.description));
    if let Some(loss) = idx.centering_loss_percent() {
        lines.push(format!(
            "  Off-center: {:.1}% of potential capability lost",
            loss
        ));
    }
    if let Some(rec) = recommend(idx.cp, idx.cpk) {
        lines.push(format!("  {} {}", style("→").yellow(), rec));
    }
    if let Some(stats) = stats.filter(|s| s.std_dev > 0.0) {
        lines.push(String::new());
        lines.push(render_range_bar(
            stats.mean - 3.0 * stats.std_dev,
            stats.mean + 3.0 * stats.std_dev,
            idx.lsl,
            idx.usl,
        ));
    }
    lines.join("\n")
}

fn conclusion_block(conclusion: &ProcessConclusion) -> String {
    let mut lines = vec![heading("Conclusion")];
    lines.push(format!(
        "  Overall     {}",
        match conclusion.status {
            OverallStatus::Success => style("success").green().bold(),
            OverallStatus::Warning => style("warning").yellow().bold(),
        }
    ));
    for card in [
        &conclusion.stability,
        &conclusion.capability,
        &conclusion.distribution,
    ] {
        lines.push(format!(
            "  {} {:<20} {}",
            verdict_mark(card.ok),
            card.title,
            card.headline
        ));
        lines.push(format!("      {}", style(&card.note).dim()));
    }
    if !conclusion.recommendations.is_empty() {
        lines.push("  Recommendations:".to_string());
        for (i, rec) in conclusion.recommendations.iter().enumerate() {
            lines.push(format!("    {}. {}", i + 1, rec));
        }
    }
    lines.join("\n")
}
