//! Rich diagnostics for snapshot JSON errors

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors reading a snapshot file
#[derive(Debug, Error, Diagnostic)]
pub enum JsonError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] JsonSyntaxError),

    #[error("Failed to read {path}: {source}")]
    #[diagnostic(code(spc::io), help("check that the file exists and is readable"))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// JSON syntax error with the offending location highlighted
#[derive(Debug, Error, Diagnostic)]
#[error("Invalid JSON in {filename}: {message}")]
#[diagnostic(
    code(spc::json_syntax),
    help("analysis snapshots must be a single JSON object as returned by the analysis service")
)]
pub struct JsonSyntaxError {
    pub filename: String,

    pub message: String,

    /// 1-based line reported by the parser
    pub line: usize,

    /// 1-based column reported by the parser
    pub column: usize,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: SourceSpan,
}

impl JsonSyntaxError {
    pub fn from_serde_error(err: &serde_json::Error, content: &str, filename: &str) -> Self {
        let line = err.line();
        let column = err.column();
        let offset = byte_offset(content, line, column);
        let len = if offset < content.len() { 1 } else { 0 };

        Self {
            filename: filename.to_string(),
            message: strip_position(&err.to_string()),
            line,
            column,
            src: NamedSource::new(filename, content.to_string()),
            span: SourceSpan::new(offset.into(), len),
        }
    }
}

/// Byte offset of a 1-based line/column, clamped to the content
fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start: usize = content
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let line_text = content[line_start.min(content.len())..]
        .split('\n')
        .next()
        .unwrap_or("");
    let within = line_text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(line_text.len());
    (line_start + within).min(content.len())
}

/// serde_json appends " at line X column Y"; the span already shows it
fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}
