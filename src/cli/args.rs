//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    charts::ChartsArgs, classify::ClassifyArgs, completions::CompletionsArgs, curve::CurveArgs,
    points::PointsArgs, report::ReportArgs,
};

/// SPC review toolkit
#[derive(Parser, Debug)]
#[command(name = "spc", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format (defaults to `output.format` from config)
    #[arg(long = "format", short = 'o', global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use this config file instead of the global and project files
    #[arg(long, global = true, env = "SPC_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarise an analysis snapshot: statistics, capability, control verdict
    Report(ReportArgs),

    /// Emit chart descriptors with their readiness state
    Charts(ChartsArgs),

    /// Per-group X-bar and R classification
    Points(PointsArgs),

    /// Sample the normal distribution curve for given parameters
    Curve(CurveArgs),

    /// Classify a Cpk value
    Classify(ClassifyArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pick per command (text for reports, TSV for lists, JSON for charts)
    Auto,
    /// Human-readable text
    Text,
    Json,
    Yaml,
    /// Tab-separated values
    Tsv,
    /// Comma-separated values
    Csv,
}

impl OutputFormat {
    /// Parse a format name from config, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_format_from_name() {
        assert_eq!(OutputFormat::from_name("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_name("tsv"), Some(OutputFormat::Tsv));
        assert_eq!(OutputFormat::from_name("xml"), None);
    }

    #[test]
    fn test_negative_cpk_parses() {
        let cli = Cli::try_parse_from(["spc", "classify", "-0.4"]).unwrap();
        assert!(matches!(cli.command, Commands::Classify(_)));
    }
}
