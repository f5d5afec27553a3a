//! `spc classify` command - Capability level for a Cpk value

use console::style;
use miette::Result;
use serde::Serialize;

use crate::capability::{classify, classify_cp, recommend, CapabilityGrade, CpRating, Recommendation};
use crate::cli::helpers::styled_level;
use crate::cli::output::{effective_format, print_json, print_yaml, write_delimited};
use crate::cli::{OutputFormat, RunContext};

#[derive(clap::Args, Debug)]
pub struct ClassifyArgs {
    /// Cpk value to classify
    #[arg(allow_negative_numbers = true)]
    pub cpk: f64,

    /// Cp value; adds the Cp rating and an improvement recommendation
    #[arg(long, allow_negative_numbers = true)]
    pub cp: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Classification {
    cpk: f64,

    #[serde(flatten)]
    grade: CapabilityGrade,

    #[serde(skip_serializing_if = "Option::is_none")]
    cp: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    cp_rating: Option<CpRating>,

    #[serde(skip_serializing_if = "Option::is_none")]
    recommendation: Option<Recommendation>,
}

impl Classification {
    fn new(cpk: f64, cp: Option<f64>) -> Self {
        Self {
            cpk,
            grade: classify(cpk),
            cp,
            cp_rating: cp.map(classify_cp),
            recommendation: cp.and_then(|cp| recommend(cp, cpk)),
        }
    }
}

/// Run the classify command
pub fn run(args: ClassifyArgs, ctx: &RunContext) -> Result<()> {
    let result = Classification::new(args.cpk, args.cp);

    match effective_format(ctx.format, OutputFormat::Text) {
        OutputFormat::Json => print_json(&result),
        OutputFormat::Yaml => print_yaml(&result),
        format @ (OutputFormat::Tsv | OutputFormat::Csv) => write_delimited(
            format,
            &["cpk", "level", "color", "cp_rating"],
            [[
                ctx.num(result.cpk),
                result.grade.level.to_string(),
                result.grade.color_token.to_string(),
                result.cp_rating.map(|r| r.to_string()).unwrap_or_default(),
            ]],
        ),
        OutputFormat::Text | OutputFormat::Auto => {
            println!(
                "Cpk {}  {}",
                ctx.num(result.cpk),
                styled_level(result.grade.level)
            );
            println!("  {}", result.grade.description);
            if let (Some(cp), Some(rating)) = (result.cp, result.cp_rating) {
                println!("Cp  {}  ({})", ctx.num(cp), rating);
            }
            if let Some(rec) = result.recommendation {
                println!("{} {}", style("→").yellow(), rec);
            }
            Ok(())
        }
    }
}
