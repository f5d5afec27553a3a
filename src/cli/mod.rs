//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod helpers;
pub mod output;
pub mod viz;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};

use crate::core::Config;

/// Settings resolved from global options and configuration
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Requested output format; `Auto` lets each command choose
    pub format: OutputFormat,

    pub config: Config,
}

impl RunContext {
    pub fn new(global: &GlobalOpts, config: Config) -> Self {
        let format = global
            .output
            .or_else(|| OutputFormat::from_name(&config.output.format))
            .unwrap_or(OutputFormat::Auto);
        Self { format, config }
    }

    pub fn decimals(&self) -> usize {
        self.config.output.decimals
    }

    /// Format a number with the configured precision
    pub fn num(&self, value: f64) -> String {
        helpers::fmt_num(value, self.decimals())
    }
}
