//! Output formatting utilities

use std::io;

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, auto: OutputFormat) -> OutputFormat {
    match format {
        OutputFormat::Auto => auto,
        other => other,
    }
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}

/// Print a value as YAML
pub fn print_yaml<T: Serialize>(value: &T) -> Result<()> {
    let yaml = serde_yml::to_string(value).into_diagnostic()?;
    print!("{}", yaml);
    Ok(())
}

/// Delimited writer on stdout for TSV or CSV
pub fn delimited_writer(format: OutputFormat) -> csv::Writer<io::Stdout> {
    let delimiter = if format == OutputFormat::Csv { b',' } else { b'\t' };
    csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(io::stdout())
}

/// Write header and rows as TSV or CSV
pub fn write_delimited<I, R>(format: OutputFormat, header: &[&str], rows: I) -> Result<()>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut writer = delimited_writer(format);
    writer.write_record(header).into_diagnostic()?;
    for row in rows {
        writer.write_record(row).into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;
    Ok(())
}
