//! `spc curve` command - Sample the normal curve for given parameters

use console::style;
use miette::{bail, Result};
use serde::Serialize;

use crate::cli::output::{effective_format, print_json, print_yaml, write_delimited};
use crate::cli::viz::{render_curve, PLOT_HEIGHT, PLOT_WIDTH};
use crate::cli::{OutputFormat, RunContext};
use crate::curve::{sample_normal_curve, CurveDomain, CurvePoint};

#[derive(clap::Args, Debug)]
pub struct CurveArgs {
    /// Process mean
    #[arg(long, allow_negative_numbers = true)]
    pub mean: f64,

    /// Process standard deviation (must be positive)
    #[arg(long = "std-dev", allow_negative_numbers = true)]
    pub std_dev: f64,

    /// Lower specification limit (defaults to `spec_limits.lsl`)
    #[arg(long, allow_negative_numbers = true)]
    pub lsl: Option<f64>,

    /// Upper specification limit (defaults to `spec_limits.usl`)
    #[arg(long, allow_negative_numbers = true)]
    pub usl: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CurveOutput {
    mean: f64,
    std_dev: f64,
    lsl: f64,
    usl: f64,
    domain: CurveDomain,
    points: Vec<CurvePoint>,
}

/// Run the curve command
pub fn run(args: CurveArgs, ctx: &RunContext) -> Result<()> {
    if !(args.std_dev.is_finite() && args.std_dev > 0.0) {
        bail!("--std-dev must be a positive number, got {}", args.std_dev);
    }
    let lsl = args.lsl.unwrap_or(ctx.config.spec_limits.lsl);
    let usl = args.usl.unwrap_or(ctx.config.spec_limits.usl);
    if lsl > usl {
        bail!("LSL ({}) is above USL ({})", lsl, usl);
    }

    let output = CurveOutput {
        mean: args.mean,
        std_dev: args.std_dev,
        lsl,
        usl,
        domain: CurveDomain::for_capability(args.mean, args.std_dev, lsl, usl),
        points: sample_normal_curve(args.mean, args.std_dev, lsl, usl),
    };
    tracing::debug!(points = output.points.len(), lsl, usl, "sampled curve");

    match effective_format(ctx.format, OutputFormat::Tsv) {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Yaml => print_yaml(&output),
        OutputFormat::Text => {
            println!(
                "{} μ={} σ={}",
                style("Normal curve").bold(),
                ctx.num(args.mean),
                ctx.num(args.std_dev)
            );
            println!(
                "{}",
                render_curve(
                    &output.points,
                    &[("LSL", lsl), ("Mean", args.mean), ("USL", usl)],
                    PLOT_WIDTH,
                    PLOT_HEIGHT
                )
            );
            Ok(())
        }
        format => write_delimited(
            format,
            &["x", "density"],
            output.points.iter().map(|p| [ctx.num(p.x), format!("{:.6}", p.y)]),
        ),
    }
}
